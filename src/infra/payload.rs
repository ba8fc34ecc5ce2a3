// Wire shape for the infrastructure submission endpoint. Only the fields the
// backend consumes are serialized; node ids, statuses, and env overrides stay
// client-side. Redis and Kafka sections are included only when not skipped
// and their cluster has been given a name.

use serde::{Deserialize, Serialize};

use super::{
    DeploymentMode, Environment, InfrastructureState, KafkaNodeConfig, KafkaNodeType,
    RedisClusterType, VpnServer,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionPayload {
    pub vpn: VpnPayload,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redis: Option<RedisPayload>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kafka: Option<KafkaPayload>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VpnPayload {
    pub mode: DeploymentMode,
    pub client: String,
    pub servers: Vec<VpnServerPayload>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VpnServerPayload {
    pub environment: Environment,
    pub size: String,
    pub region: String,
}

impl From<&VpnServer> for VpnServerPayload {
    fn from(server: &VpnServer) -> Self {
        Self {
            environment: server.environment,
            size: server.size.clone(),
            region: server.region.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedisPayload {
    pub name: String,
    #[serde(rename = "type")]
    pub cluster_type: RedisClusterType,
    pub region: String,
    #[serde(rename = "enableTLS")]
    pub enable_tls: bool,
    pub nodes: RedisNodesPayload,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedisNodesPayload {
    pub masters: Vec<RedisNodePayload>,
    pub replicas: Vec<RedisNodePayload>,
    pub sentinels: Vec<RedisNodePayload>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedisNodePayload {
    pub size: String,
    pub region: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KafkaPayload {
    pub name: String,
    pub region: String,
    pub nodes: Vec<KafkaNodePayload>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KafkaNodePayload {
    pub name: String,
    #[serde(rename = "type")]
    pub node_type: KafkaNodeType,
    pub size: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<KafkaNodeConfig>,
}

impl SubmissionPayload {
    /// Derive the wire payload from the current plan. `skip_redis` and
    /// `skip_kafka` mirror the wizard's skip toggles; an unnamed cluster is
    /// dropped even when not skipped.
    pub fn from_state(state: &InfrastructureState, skip_redis: bool, skip_kafka: bool) -> Self {
        let vpn = VpnPayload {
            mode: state.vpn_config.mode,
            client: state.vpn_config.client.clone(),
            servers: state.vpn_config.servers.iter().map(Into::into).collect(),
        };

        let redis_config = &state.redis_config;
        let redis = (!skip_redis && !redis_config.name.trim().is_empty()).then(|| {
            let node = |n: &super::RedisNode| RedisNodePayload {
                size: n.size.clone(),
                region: n.region.clone(),
            };
            RedisPayload {
                name: redis_config.name.clone(),
                cluster_type: redis_config.cluster_type,
                region: redis_config.region.clone(),
                enable_tls: redis_config.enable_tls,
                nodes: RedisNodesPayload {
                    masters: redis_config.nodes.masters.iter().map(node).collect(),
                    replicas: redis_config.nodes.replicas.iter().map(node).collect(),
                    sentinels: redis_config.nodes.sentinels.iter().map(node).collect(),
                },
            }
        });

        let kafka_config = &state.kafka_config;
        let kafka = (!skip_kafka && !kafka_config.name.trim().is_empty()).then(|| KafkaPayload {
            name: kafka_config.name.clone(),
            region: kafka_config.region.clone(),
            nodes: kafka_config
                .nodes
                .iter()
                .map(|n| KafkaNodePayload {
                    name: n.name.clone(),
                    node_type: n.node_type,
                    size: n.size.clone(),
                    template: n.template.clone(),
                    config: n.config.clone(),
                })
                .collect(),
        });

        Self { vpn, redis, kafka }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::{InfraStore, RedisConfigUpdate};

    #[test]
    fn vpn_servers_round_trip_through_payload_shape() {
        let mut store = InfraStore::new();
        store.update_vpn_client("acme");
        store.add_vpn_server();
        let state = store.state();

        let payload = SubmissionPayload::from_state(state, true, true);
        let json = serde_json::to_string(&payload).unwrap();
        let back: SubmissionPayload = serde_json::from_str(&json).unwrap();

        assert_eq!(back.vpn.servers.len(), state.vpn_config.servers.len());
        for (sent, original) in back.vpn.servers.iter().zip(&state.vpn_config.servers) {
            assert_eq!(sent.environment, original.environment);
            assert_eq!(sent.size, original.size);
            assert_eq!(sent.region, original.region);
        }
    }

    #[test]
    fn skipped_or_unnamed_sections_are_omitted() {
        let mut store = InfraStore::new();
        store.update_vpn_client("acme");

        // no names set: both optional sections drop out even when not skipped
        let payload = SubmissionPayload::from_state(store.state(), false, false);
        assert!(payload.redis.is_none());
        assert!(payload.kafka.is_none());

        // named but skipped: still omitted
        store.update_redis_config(RedisConfigUpdate {
            name: Some("cache".to_string()),
            ..Default::default()
        });
        let payload = SubmissionPayload::from_state(store.state(), true, false);
        assert!(payload.redis.is_none());

        // named and not skipped: included
        let payload = SubmissionPayload::from_state(store.state(), false, false);
        let redis = payload.redis.unwrap();
        assert_eq!(redis.name, "cache");
        assert_eq!(redis.nodes.masters.len(), 1);
    }

    #[test]
    fn payload_json_uses_backend_field_names() {
        let mut store = InfraStore::new();
        store.update_vpn_client("acme");
        store.update_redis_config(RedisConfigUpdate {
            name: Some("cache".to_string()),
            ..Default::default()
        });

        let payload = SubmissionPayload::from_state(store.state(), false, true);
        let value: serde_json::Value = serde_json::to_value(&payload).unwrap();

        assert_eq!(value["vpn"]["mode"], "setup");
        assert_eq!(value["redis"]["type"], "redis-sentinel-cluster-1");
        assert_eq!(value["redis"]["enableTLS"], true);
        assert!(value.get("kafka").is_none());
        // redis node payloads carry only size and region
        let master = &value["redis"]["nodes"]["masters"][0];
        assert!(master.get("id").is_none());
        assert!(master.get("status").is_none());
    }
}
