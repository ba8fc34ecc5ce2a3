// Plan validators: one pure function per resource kind, each returning the
// list of human-readable violations in rule order. An empty list means valid.
// These never mutate anything and carry no error codes; the caller decides
// whether a non-empty list blocks navigation or submission.

use super::{KafkaClusterConfig, RedisClusterConfig, VpnDeploymentConfig};

/// Client name plus per-server environment/size/region. The per-server rules
/// only fire if a plan file was edited by hand; the mutators cannot produce
/// empty slugs.
pub fn validate_vpn_config(config: &VpnDeploymentConfig) -> Vec<String> {
    let mut errors = Vec::new();

    if config.client.trim().is_empty() {
        errors.push("Client name is required".to_string());
    }

    for (index, server) in config.servers.iter().enumerate() {
        if server.size.trim().is_empty() {
            errors.push(format!("Server {}: Size is required", index + 1));
        }
        if server.region.trim().is_empty() {
            errors.push(format!("Server {}: Region is required", index + 1));
        }
    }

    errors
}

/// Name/VPC/password, at least one master, and the soft sentinel minimum:
/// sentinel-typed clusters need three or more sentinel nodes. The store does
/// not enforce that minimum, so it can only surface here.
pub fn validate_redis_config(config: &RedisClusterConfig) -> Vec<String> {
    let mut errors = Vec::new();

    if config.name.trim().is_empty() {
        errors.push("Cluster name is required".to_string());
    }
    if config.vpc_uuid.trim().is_empty() {
        errors.push("VPC UUID is required".to_string());
    }
    if config.system_password.trim().is_empty() {
        errors.push("System password is required".to_string());
    }
    if config.nodes.masters.is_empty() {
        errors.push("At least one master node is required".to_string());
    }
    if config.cluster_type.is_sentinel() && config.nodes.sentinels.len() < 3 {
        errors.push("Sentinel clusters require at least 3 sentinel nodes".to_string());
    }

    errors
}

pub fn validate_kafka_config(config: &KafkaClusterConfig) -> Vec<String> {
    let mut errors = Vec::new();

    if config.name.trim().is_empty() {
        errors.push("Cluster name is required".to_string());
    }
    if config.vpc_uuid.trim().is_empty() {
        errors.push("VPC UUID is required".to_string());
    }
    if config.nodes.is_empty() {
        errors.push("At least one Kafka node is required".to_string());
    }

    for (index, node) in config.nodes.iter().enumerate() {
        if node.name.trim().is_empty() {
            errors.push(format!("Node {}: Name is required", index + 1));
        }
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::{
        InfraStore, KafkaNodeType, KafkaNodeUpdate, RedisClusterType, RedisConfigUpdate,
        RedisNodeRole,
    };

    #[test]
    fn default_vpn_plan_needs_only_a_client_name() {
        let mut store = InfraStore::new();
        let errors = validate_vpn_config(&store.state().vpn_config);
        assert_eq!(errors, vec!["Client name is required".to_string()]);

        store.update_vpn_client("acme-networks");
        assert!(validate_vpn_config(&store.state().vpn_config).is_empty());
    }

    #[test]
    fn whitespace_only_client_name_still_fails() {
        let mut store = InfraStore::new();
        store.update_vpn_client("   ");
        let errors = validate_vpn_config(&store.state().vpn_config);
        assert_eq!(errors, vec!["Client name is required".to_string()]);
    }

    #[test]
    fn hand_edited_server_fields_are_caught() {
        let mut store = InfraStore::new();
        store.update_vpn_client("acme");
        // simulate a hand-edited plan file with a blanked slug
        let mut state = store.state().clone();
        state.vpn_config.servers[0].region = String::new();
        let errors = validate_vpn_config(&state.vpn_config);
        assert_eq!(errors, vec!["Server 1: Region is required".to_string()]);
    }

    #[test]
    fn sentinel_minimum_is_soft_and_type_dependent() {
        let mut store = InfraStore::new();
        store.update_redis_config(RedisConfigUpdate {
            name: Some("cache".to_string()),
            vpc_uuid: Some("vpc-1234".to_string()),
            system_password: Some("hunter2".to_string()),
            ..Default::default()
        });

        // one sentinel, sentinel-typed cluster: violation mentions the minimum
        let errors = validate_redis_config(&store.state().redis_config);
        assert_eq!(
            errors,
            vec!["Sentinel clusters require at least 3 sentinel nodes".to_string()]
        );

        // exactly three sentinels: clean
        store.add_redis_node(RedisNodeRole::Sentinel);
        store.add_redis_node(RedisNodeRole::Sentinel);
        assert!(validate_redis_config(&store.state().redis_config).is_empty());

        // non-sentinel type never triggers the rule
        store.update_redis_config(RedisConfigUpdate {
            cluster_type: Some(RedisClusterType::Single),
            ..Default::default()
        });
        let mut state = store.state().clone();
        state.redis_config.nodes.sentinels.truncate(1);
        assert!(validate_redis_config(&state.redis_config).is_empty());
    }

    #[test]
    fn redis_required_fields_report_in_rule_order() {
        let store = InfraStore::new();
        let errors = validate_redis_config(&store.state().redis_config);
        assert_eq!(
            errors,
            vec![
                "Cluster name is required".to_string(),
                "VPC UUID is required".to_string(),
                "System password is required".to_string(),
                "Sentinel clusters require at least 3 sentinel nodes".to_string(),
            ]
        );
    }

    #[test]
    fn empty_kafka_cluster_requires_a_node() {
        let mut store = InfraStore::new();
        store.update_kafka_name("events");
        store.update_kafka_vpc_uuid("vpc-5678");

        let errors = validate_kafka_config(&store.state().kafka_config);
        assert_eq!(errors, vec!["At least one Kafka node is required".to_string()]);

        // one named custom node clears that violation
        let id = store.add_kafka_node(KafkaNodeType::Custom);
        store.update_kafka_node(
            id,
            KafkaNodeUpdate {
                name: Some("broker-a".to_string()),
                ..Default::default()
            },
        );
        assert!(validate_kafka_config(&store.state().kafka_config).is_empty());
    }

    #[test]
    fn unnamed_kafka_nodes_are_reported_by_position() {
        let mut store = InfraStore::new();
        store.update_kafka_name("events");
        store.update_kafka_vpc_uuid("vpc-5678");
        store.add_kafka_node(KafkaNodeType::Template);
        store.add_kafka_node(KafkaNodeType::Template);

        let errors = validate_kafka_config(&store.state().kafka_config);
        assert_eq!(
            errors,
            vec![
                "Node 1: Name is required".to_string(),
                "Node 2: Name is required".to_string(),
            ]
        );
    }

    #[test]
    fn validators_are_deterministic() {
        let store = InfraStore::new();
        let first = validate_redis_config(&store.state().redis_config);
        let second = validate_redis_config(&store.state().redis_config);
        assert_eq!(first, second);
    }
}
