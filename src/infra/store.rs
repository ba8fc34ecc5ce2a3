// Configuration store: owns one InfrastructureState and applies the wizard's
// mutations. Guarded operations (minimum-count rules, id lookups) return an
// explicit Mutation result instead of silently doing nothing, so callers can
// tell a rejected edit from a successful one. A rejection never changes state.

use uuid::Uuid;

use crate::catalog::{find_kafka_template, KAFKA_TEMPLATES};

use super::{
    Category, DeploymentMode, Environment, InfrastructureState, KafkaNode, KafkaNodeConfig,
    KafkaNodeType, RedisClusterType, RedisNode, RedisNodeRole, ServerStatus, ServerType,
    VpnServer,
};

/// Outcome of a guarded mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    Applied,
    Rejected(&'static str),
}

impl Mutation {
    pub fn is_applied(&self) -> bool {
        matches!(self, Mutation::Applied)
    }

    pub fn rejection(&self) -> Option<&'static str> {
        match self {
            Mutation::Applied => None,
            Mutation::Rejected(reason) => Some(reason),
        }
    }
}

/// Partial update for a VPN server. Only `Some` fields are applied.
#[derive(Debug, Clone, Default)]
pub struct VpnServerUpdate {
    pub environment: Option<Environment>,
    pub size: Option<String>,
    pub region: Option<String>,
}

/// Partial update for a Redis node.
#[derive(Debug, Clone, Default)]
pub struct RedisNodeUpdate {
    pub size: Option<String>,
    pub region: Option<String>,
    pub status: Option<ServerStatus>,
    pub ip: Option<String>,
}

/// Partial update for the Redis cluster's top-level fields.
#[derive(Debug, Clone, Default)]
pub struct RedisConfigUpdate {
    pub name: Option<String>,
    pub cluster_type: Option<RedisClusterType>,
    pub region: Option<String>,
    pub vpc_uuid: Option<String>,
    pub system_password: Option<String>,
    pub enable_tls: Option<bool>,
}

/// Partial update for a Kafka node. The config block is edited separately
/// through `set_kafka_custom_config` / `apply_kafka_template`.
#[derive(Debug, Clone, Default)]
pub struct KafkaNodeUpdate {
    pub name: Option<String>,
    pub size: Option<String>,
    pub region: Option<String>,
    pub status: Option<ServerStatus>,
}

/// A single field of a custom Kafka node's config block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KafkaConfigField {
    BrokerCount,
    ReplicationFactor,
    Partitions,
    RetentionHours,
}

impl KafkaConfigField {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "broker-count" => Some(KafkaConfigField::BrokerCount),
            "replication-factor" => Some(KafkaConfigField::ReplicationFactor),
            "partitions" => Some(KafkaConfigField::Partitions),
            "retention-hours" => Some(KafkaConfigField::RetentionHours),
            _ => None,
        }
    }

    /// Fallback used when free-text input does not parse as a number.
    fn fallback(&self) -> u32 {
        match self {
            KafkaConfigField::RetentionHours => 24,
            _ => 1,
        }
    }
}

/// Owns the in-progress plan and applies all wizard mutations.
pub struct InfraStore {
    state: InfrastructureState,
}

impl InfraStore {
    pub fn new() -> Self {
        Self {
            state: InfrastructureState::new(),
        }
    }

    /// Wrap an existing state, e.g. one loaded from a plan file.
    pub fn from_state(state: InfrastructureState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &InfrastructureState {
        &self.state
    }

    pub fn into_state(self) -> InfrastructureState {
        self.state
    }

    /// Discard everything and start over with the initial plan.
    pub fn reset(&mut self) {
        self.state = InfrastructureState::new();
    }

    // ============ Navigation ============

    /// Changing category clears the server-type selection.
    pub fn set_selected_category(&mut self, category: Category) {
        self.state.selected_category = category;
        self.state.selected_server_type = None;
    }

    /// Changing server type clears the kafka-node-type sub-selection.
    pub fn set_selected_server_type(&mut self, server_type: Option<ServerType>) {
        self.state.selected_server_type = server_type;
        self.state.selected_kafka_node_type = None;
    }

    pub fn set_selected_kafka_node_type(&mut self, node_type: Option<KafkaNodeType>) {
        self.state.selected_kafka_node_type = node_type;
    }

    // ============ VPN ============

    pub fn update_vpn_mode(&mut self, mode: DeploymentMode) {
        self.state.vpn_config.mode = mode;
    }

    pub fn update_vpn_client(&mut self, client: &str) {
        self.state.vpn_config.client = client.to_string();
    }

    /// Set one of the fixed env-override keys. Values are passed through to
    /// the deployment unvalidated; only the key set and numeric shape are
    /// checked here.
    pub fn set_vpn_env_override(&mut self, key: &str, value: &str) -> Mutation {
        let overrides = &mut self.state.vpn_config.env_overrides;
        match key {
            "NODE_ENV" => overrides.node_env = value.to_string(),
            "LOG_LEVEL" => overrides.log_level = value.to_string(),
            "VPN_INTERFACE" => overrides.vpn_interface = value.to_string(),
            "MONITORING_PORT" => match value.parse() {
                Ok(v) => overrides.monitoring_port = v,
                Err(_) => return Mutation::Rejected("MONITORING_PORT must be a number"),
            },
            "HEALTH_CHECK_INTERVAL" => match value.parse() {
                Ok(v) => overrides.health_check_interval = v,
                Err(_) => return Mutation::Rejected("HEALTH_CHECK_INTERVAL must be a number"),
            },
            "MAX_PEERS" => match value.parse() {
                Ok(v) => overrides.max_peers = v,
                Err(_) => return Mutation::Rejected("MAX_PEERS must be a number"),
            },
            _ => return Mutation::Rejected("unknown env override key"),
        }
        Mutation::Applied
    }

    /// Append one server with the default environment/size/region.
    pub fn add_vpn_server(&mut self) -> Uuid {
        let server = VpnServer::new();
        let id = server.id;
        self.state.vpn_config.servers.push(server);
        id
    }

    /// A plan always keeps at least one server.
    pub fn remove_vpn_server(&mut self, id: Uuid) -> Mutation {
        let servers = &mut self.state.vpn_config.servers;
        if servers.len() <= 1 {
            return Mutation::Rejected("a deployment needs at least one VPN server");
        }
        if !servers.iter().any(|s| s.id == id) {
            return Mutation::Rejected("no VPN server with that id");
        }
        servers.retain(|s| s.id != id);
        Mutation::Applied
    }

    pub fn update_vpn_server(&mut self, id: Uuid, updates: VpnServerUpdate) -> Mutation {
        let Some(server) = self.state.vpn_config.servers.iter_mut().find(|s| s.id == id) else {
            return Mutation::Rejected("no VPN server with that id");
        };
        if let Some(environment) = updates.environment {
            server.environment = environment;
        }
        if let Some(size) = updates.size {
            server.size = size;
        }
        if let Some(region) = updates.region {
            server.region = region;
        }
        Mutation::Applied
    }

    // ============ Redis ============

    pub fn update_redis_config(&mut self, updates: RedisConfigUpdate) {
        let redis = &mut self.state.redis_config;
        if let Some(name) = updates.name {
            redis.name = name;
        }
        if let Some(cluster_type) = updates.cluster_type {
            redis.cluster_type = cluster_type;
        }
        if let Some(region) = updates.region {
            redis.region = region;
        }
        if let Some(vpc_uuid) = updates.vpc_uuid {
            redis.vpc_uuid = vpc_uuid;
        }
        if let Some(system_password) = updates.system_password {
            redis.system_password = system_password;
        }
        if let Some(enable_tls) = updates.enable_tls {
            redis.enable_tls = enable_tls;
        }
    }

    /// New nodes inherit the cluster's current region.
    pub fn add_redis_node(&mut self, role: RedisNodeRole) -> Uuid {
        let node = RedisNode::new(role, &self.state.redis_config.region);
        let id = node.id;
        self.state.redis_config.nodes.for_role_mut(role).push(node);
        id
    }

    /// Each role keeps at least one node. The sentinel >= 3 rule is NOT
    /// enforced here; that stays soft validation in the validator.
    pub fn remove_redis_node(&mut self, role: RedisNodeRole, id: Uuid) -> Mutation {
        let nodes = self.state.redis_config.nodes.for_role_mut(role);
        if nodes.len() <= 1 {
            return Mutation::Rejected("each Redis role needs at least one node");
        }
        if !nodes.iter().any(|n| n.id == id) {
            return Mutation::Rejected("no Redis node with that id in this role");
        }
        nodes.retain(|n| n.id != id);
        Mutation::Applied
    }

    /// Only the matching role's collection is searched; the role itself is
    /// fixed at creation.
    pub fn update_redis_node(
        &mut self,
        role: RedisNodeRole,
        id: Uuid,
        updates: RedisNodeUpdate,
    ) -> Mutation {
        let nodes = self.state.redis_config.nodes.for_role_mut(role);
        let Some(node) = nodes.iter_mut().find(|n| n.id == id) else {
            return Mutation::Rejected("no Redis node with that id in this role");
        };
        if let Some(size) = updates.size {
            node.size = size;
        }
        if let Some(region) = updates.region {
            node.region = region;
        }
        if let Some(status) = updates.status {
            node.status = status;
        }
        if let Some(ip) = updates.ip {
            node.ip = Some(ip);
        }
        Mutation::Applied
    }

    // ============ Kafka ============

    pub fn update_kafka_name(&mut self, name: &str) {
        self.state.kafka_config.name = name.to_string();
    }

    pub fn update_kafka_region(&mut self, region: &str) {
        self.state.kafka_config.region = region.to_string();
    }

    pub fn update_kafka_vpc_uuid(&mut self, vpc_uuid: &str) {
        self.state.kafka_config.vpc_uuid = vpc_uuid.to_string();
    }

    /// Template-typed nodes immediately get the first catalog template as
    /// their config block.
    pub fn add_kafka_node(&mut self, node_type: KafkaNodeType) -> Uuid {
        let mut node = KafkaNode::new(node_type, &self.state.kafka_config.region);
        if node_type == KafkaNodeType::Template {
            let template = &KAFKA_TEMPLATES[0];
            node.config = Some(KafkaNodeConfig {
                broker_count: template.broker_count,
                replication_factor: template.replication_factor,
                partitions: template.partitions,
                retention_hours: template.retention_hours,
            });
        }
        let id = node.id;
        self.state.kafka_config.nodes.push(node);
        id
    }

    /// Unlike VPN servers and Redis roles there is no minimum here: a Kafka
    /// cluster may be emptied out entirely.
    pub fn remove_kafka_node(&mut self, id: Uuid) -> Mutation {
        let nodes = &mut self.state.kafka_config.nodes;
        if !nodes.iter().any(|n| n.id == id) {
            return Mutation::Rejected("no Kafka node with that id");
        }
        nodes.retain(|n| n.id != id);
        Mutation::Applied
    }

    pub fn update_kafka_node(&mut self, id: Uuid, updates: KafkaNodeUpdate) -> Mutation {
        let Some(node) = self.state.kafka_config.nodes.iter_mut().find(|n| n.id == id) else {
            return Mutation::Rejected("no Kafka node with that id");
        };
        if let Some(name) = updates.name {
            node.name = name;
        }
        if let Some(size) = updates.size {
            node.size = size;
        }
        if let Some(region) = updates.region {
            node.region = region;
        }
        if let Some(status) = updates.status {
            node.status = status;
        }
        Mutation::Applied
    }

    /// Edit one field of a custom node's config block from free-text input.
    /// Input that does not parse as a number falls back to 1 (counts and
    /// replication factor) or 24 (retention hours).
    pub fn set_kafka_custom_config(
        &mut self,
        id: Uuid,
        field: KafkaConfigField,
        raw: &str,
    ) -> Mutation {
        let Some(node) = self.state.kafka_config.nodes.iter_mut().find(|n| n.id == id) else {
            return Mutation::Rejected("no Kafka node with that id");
        };
        if node.node_type != KafkaNodeType::Custom {
            return Mutation::Rejected("only custom nodes can be edited field by field");
        }
        let value = raw.trim().parse().unwrap_or_else(|_| field.fallback());
        let config = node.config.get_or_insert(KafkaNodeConfig {
            broker_count: 1,
            replication_factor: 1,
            partitions: 1,
            retention_hours: 24,
        });
        match field {
            KafkaConfigField::BrokerCount => config.broker_count = value,
            KafkaConfigField::ReplicationFactor => config.replication_factor = value,
            KafkaConfigField::Partitions => config.partitions = value,
            KafkaConfigField::RetentionHours => config.retention_hours = value,
        }
        Mutation::Applied
    }

    /// Overwrite the node's template reference and config block wholesale.
    /// Unknown template ids leave the node untouched.
    pub fn apply_kafka_template(&mut self, id: Uuid, template_id: &str) -> Mutation {
        let Some(template) = find_kafka_template(template_id) else {
            return Mutation::Rejected("unknown Kafka template");
        };
        let Some(node) = self.state.kafka_config.nodes.iter_mut().find(|n| n.id == id) else {
            return Mutation::Rejected("no Kafka node with that id");
        };
        node.template = Some(template.id.to_string());
        node.config = Some(KafkaNodeConfig {
            broker_count: template.broker_count,
            replication_factor: template.replication_factor,
            partitions: template.partitions,
            retention_hours: template.retention_hours,
        });
        Mutation::Applied
    }

    // ============ Deployment ============

    /// Re-entrant: calling this while a deployment is "running" simply
    /// resets progress under a fresh deployment id.
    pub fn start_deployment(&mut self) -> Uuid {
        let id = Uuid::new_v4();
        self.state.is_deploying = true;
        self.state.deployment_progress = 0;
        self.state.deployment_status = "Initializing deployment...".to_string();
        self.state.deployment_id = Some(id);
        id
    }

    /// Unconditional overwrite; monotonicity is the caller's problem.
    pub fn update_deployment_progress(&mut self, progress: u8, status: &str) {
        self.state.deployment_progress = progress;
        self.state.deployment_status = status.to_string();
    }

    /// On failure the progress value stays wherever it last was.
    pub fn complete_deployment(&mut self, success: bool) {
        self.state.is_deploying = false;
        if success {
            self.state.deployment_progress = 100;
            self.state.deployment_status = "Deployment completed successfully!".to_string();
        } else {
            self.state.deployment_status = "Deployment failed".to_string();
        }
    }

    pub fn reset_deployment(&mut self) {
        self.state.is_deploying = false;
        self.state.deployment_progress = 0;
        self.state.deployment_status = String::new();
        self.state.deployment_id = None;
    }
}

impl Default for InfraStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remove_vpn_server_keeps_at_least_one() {
        let mut store = InfraStore::new();
        let only = store.state().vpn_config.servers[0].id;
        assert_eq!(
            store.remove_vpn_server(only),
            Mutation::Rejected("a deployment needs at least one VPN server")
        );
        assert_eq!(store.state().vpn_config.servers.len(), 1);

        let second = store.add_vpn_server();
        assert!(store.remove_vpn_server(second).is_applied());
        assert_eq!(store.state().vpn_config.servers.len(), 1);
        assert_eq!(store.state().vpn_config.servers[0].id, only);
    }

    #[test]
    fn update_vpn_server_merges_only_given_fields() {
        let mut store = InfraStore::new();
        let id = store.state().vpn_config.servers[0].id;
        let result = store.update_vpn_server(
            id,
            VpnServerUpdate {
                environment: Some(Environment::Prod),
                region: Some("fra1".to_string()),
                ..Default::default()
            },
        );
        assert!(result.is_applied());
        let server = &store.state().vpn_config.servers[0];
        assert_eq!(server.environment, Environment::Prod);
        assert_eq!(server.region, "fra1");
        // untouched field keeps its default
        assert_eq!(server.size, "s-2vcpu-4gb");

        let missing = store.update_vpn_server(Uuid::new_v4(), VpnServerUpdate::default());
        assert!(!missing.is_applied());
    }

    #[test]
    fn redis_roles_never_drop_below_one() {
        let mut store = InfraStore::new();
        for role in [
            RedisNodeRole::Master,
            RedisNodeRole::Replica,
            RedisNodeRole::Sentinel,
        ] {
            let only = store.state().redis_config.nodes.for_role(role)[0].id;
            assert!(!store.remove_redis_node(role, only).is_applied());
            assert_eq!(store.state().redis_config.nodes.for_role(role).len(), 1);

            let added = store.add_redis_node(role);
            assert!(store.remove_redis_node(role, added).is_applied());
            assert_eq!(store.state().redis_config.nodes.for_role(role).len(), 1);
        }
    }

    #[test]
    fn redis_node_update_is_scoped_to_role() {
        let mut store = InfraStore::new();
        let master_id = store.state().redis_config.nodes.masters[0].id;
        // right id, wrong role collection
        let result = store.update_redis_node(
            RedisNodeRole::Replica,
            master_id,
            RedisNodeUpdate {
                status: Some(ServerStatus::Active),
                ..Default::default()
            },
        );
        assert!(!result.is_applied());
        assert_eq!(
            store.state().redis_config.nodes.masters[0].status,
            ServerStatus::Pending
        );
    }

    #[test]
    fn new_redis_nodes_inherit_cluster_region() {
        let mut store = InfraStore::new();
        store.update_redis_config(RedisConfigUpdate {
            region: Some("sgp1".to_string()),
            ..Default::default()
        });
        let id = store.add_redis_node(RedisNodeRole::Replica);
        let node = store
            .state()
            .redis_config
            .nodes
            .replicas
            .iter()
            .find(|n| n.id == id)
            .unwrap();
        assert_eq!(node.region, "sgp1");
    }

    #[test]
    fn template_kafka_node_gets_first_catalog_template() {
        let mut store = InfraStore::new();
        let id = store.add_kafka_node(KafkaNodeType::Template);
        let node = store
            .state()
            .kafka_config
            .nodes
            .iter()
            .find(|n| n.id == id)
            .unwrap();
        let first = &KAFKA_TEMPLATES[0];
        let config = node.config.as_ref().unwrap();
        assert_eq!(config.broker_count, first.broker_count);
        assert_eq!(config.replication_factor, first.replication_factor);
        assert_eq!(config.partitions, first.partitions);
        assert_eq!(config.retention_hours, first.retention_hours);
    }

    #[test]
    fn kafka_cluster_may_be_emptied() {
        // Unlike VPN/Redis there is deliberately no minimum here; this test
        // pins the behavior so a guard is not added by accident.
        let mut store = InfraStore::new();
        let id = store.add_kafka_node(KafkaNodeType::Custom);
        assert!(store.remove_kafka_node(id).is_applied());
        assert!(store.state().kafka_config.nodes.is_empty());
    }

    #[test]
    fn apply_unknown_template_leaves_node_unchanged() {
        let mut store = InfraStore::new();
        let id = store.add_kafka_node(KafkaNodeType::Custom);
        let before = store.state().kafka_config.nodes[0].clone();

        let result = store.apply_kafka_template(id, "does-not-exist");
        assert_eq!(result, Mutation::Rejected("unknown Kafka template"));

        let after = &store.state().kafka_config.nodes[0];
        assert_eq!(after.template, before.template);
        assert_eq!(after.config, before.config);
    }

    #[test]
    fn apply_template_overwrites_config_wholesale() {
        let mut store = InfraStore::new();
        let id = store.add_kafka_node(KafkaNodeType::Template);
        assert!(store.apply_kafka_template(id, "large").is_applied());
        let node = &store.state().kafka_config.nodes[0];
        assert_eq!(node.template.as_deref(), Some("large"));
        let config = node.config.as_ref().unwrap();
        assert_eq!(config.broker_count, 5);
        assert_eq!(config.partitions, 12);
        assert_eq!(config.retention_hours, 168);
    }

    #[test]
    fn custom_config_coerces_bad_input_to_fallbacks() {
        let mut store = InfraStore::new();
        let id = store.add_kafka_node(KafkaNodeType::Custom);

        assert!(store
            .set_kafka_custom_config(id, KafkaConfigField::BrokerCount, "7")
            .is_applied());
        assert!(store
            .set_kafka_custom_config(id, KafkaConfigField::ReplicationFactor, "lots")
            .is_applied());
        assert!(store
            .set_kafka_custom_config(id, KafkaConfigField::RetentionHours, "")
            .is_applied());

        let config = store.state().kafka_config.nodes[0].config.as_ref().unwrap();
        assert_eq!(config.broker_count, 7);
        assert_eq!(config.replication_factor, 1);
        assert_eq!(config.retention_hours, 24);
    }

    #[test]
    fn template_node_rejects_field_edits() {
        let mut store = InfraStore::new();
        let id = store.add_kafka_node(KafkaNodeType::Template);
        let result = store.set_kafka_custom_config(id, KafkaConfigField::Partitions, "9");
        assert!(!result.is_applied());
    }

    #[test]
    fn category_change_resets_server_type_selection() {
        let mut store = InfraStore::new();
        store.set_selected_server_type(Some(ServerType::Kafka));
        store.set_selected_kafka_node_type(Some(KafkaNodeType::Custom));

        store.set_selected_category(Category::Infrastructure);
        assert!(store.state().selected_server_type.is_none());

        store.set_selected_server_type(Some(ServerType::Redis));
        assert!(store.state().selected_kafka_node_type.is_none());
    }

    #[test]
    fn deployment_lifecycle() {
        let mut store = InfraStore::new();
        let first = store.start_deployment();
        assert!(store.state().is_deploying);
        assert_eq!(store.state().deployment_progress, 0);

        store.update_deployment_progress(25, "Provisioning servers...");
        store.update_deployment_progress(55, "Configuring network...");
        store.update_deployment_progress(80, "Running health checks...");
        store.complete_deployment(true);

        assert!(!store.state().is_deploying);
        assert_eq!(store.state().deployment_progress, 100);
        assert_eq!(store.state().deployment_id, Some(first));

        // re-entrant start resets progress under a new id
        store.update_deployment_progress(40, "partial");
        let second = store.start_deployment();
        assert_ne!(second, first);
        assert_eq!(store.state().deployment_progress, 0);
        assert!(store.state().is_deploying);
    }

    #[test]
    fn failed_deployment_keeps_last_progress() {
        let mut store = InfraStore::new();
        store.start_deployment();
        store.update_deployment_progress(60, "Deploying Redis cluster...");
        store.complete_deployment(false);
        assert!(!store.state().is_deploying);
        assert_eq!(store.state().deployment_progress, 60);
        assert_eq!(store.state().deployment_status, "Deployment failed");
    }

    #[test]
    fn reset_deployment_clears_all_fields() {
        let mut store = InfraStore::new();
        store.start_deployment();
        store.update_deployment_progress(30, "halfway-ish");
        store.reset_deployment();
        let state = store.state();
        assert!(!state.is_deploying);
        assert_eq!(state.deployment_progress, 0);
        assert!(state.deployment_status.is_empty());
        assert!(state.deployment_id.is_none());
    }

    #[test]
    fn env_override_keys_and_coercion() {
        let mut store = InfraStore::new();
        assert!(store.set_vpn_env_override("LOG_LEVEL", "debug").is_applied());
        assert!(store.set_vpn_env_override("MAX_PEERS", "250").is_applied());
        assert!(!store.set_vpn_env_override("MAX_PEERS", "many").is_applied());
        assert!(!store.set_vpn_env_override("NOT_A_KEY", "x").is_applied());

        let overrides = &store.state().vpn_config.env_overrides;
        assert_eq!(overrides.log_level, "debug");
        assert_eq!(overrides.max_peers, 250);
    }
}
