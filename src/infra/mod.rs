// Infrastructure plan data model
//
// These types describe the desired state a user assembles with the wizard:
// a VPN deployment plus optional Redis and Kafka cluster topologies. The
// enums serialize with the exact wire names the provisioning API expects.

mod store;
mod validate;

pub mod payload;

pub use store::{InfraStore, KafkaConfigField, KafkaNodeUpdate, Mutation, RedisConfigUpdate,
    RedisNodeUpdate, VpnServerUpdate};
pub use validate::{validate_kafka_config, validate_redis_config, validate_vpn_config};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::catalog::{DEFAULT_NODE_SIZE, DEFAULT_REGION, SENTINEL_NODE_SIZE};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServerStatus {
    Active,
    Inactive,
    Deploying,
    Error,
    Pending,
}

impl ServerStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServerStatus::Active => "active",
            ServerStatus::Inactive => "inactive",
            ServerStatus::Deploying => "deploying",
            ServerStatus::Error => "error",
            ServerStatus::Pending => "pending",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "active" => Some(ServerStatus::Active),
            "inactive" => Some(ServerStatus::Inactive),
            "deploying" => Some(ServerStatus::Deploying),
            "error" => Some(ServerStatus::Error),
            "pending" => Some(ServerStatus::Pending),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Dev,
    Stage,
    Prod,
    Qa,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Dev => "dev",
            Environment::Stage => "stage",
            Environment::Prod => "prod",
            Environment::Qa => "qa",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "dev" => Some(Environment::Dev),
            "stage" => Some(Environment::Stage),
            "prod" => Some(Environment::Prod),
            "qa" => Some(Environment::Qa),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeploymentMode {
    Setup,
    Deploy,
    Update,
    Rollback,
    Maintenance,
}

impl DeploymentMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeploymentMode::Setup => "setup",
            DeploymentMode::Deploy => "deploy",
            DeploymentMode::Update => "update",
            DeploymentMode::Rollback => "rollback",
            DeploymentMode::Maintenance => "maintenance",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "setup" => Some(DeploymentMode::Setup),
            "deploy" => Some(DeploymentMode::Deploy),
            "update" => Some(DeploymentMode::Update),
            "rollback" => Some(DeploymentMode::Rollback),
            "maintenance" => Some(DeploymentMode::Maintenance),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RedisClusterType {
    #[serde(rename = "redis-single")]
    Single,
    #[serde(rename = "redis-prod-single")]
    ProdSingle,
    #[serde(rename = "redis-sentinel-cluster-1")]
    SentinelCluster,
    #[serde(rename = "redis-sentinel-prod")]
    SentinelProd,
}

impl RedisClusterType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RedisClusterType::Single => "redis-single",
            RedisClusterType::ProdSingle => "redis-prod-single",
            RedisClusterType::SentinelCluster => "redis-sentinel-cluster-1",
            RedisClusterType::SentinelProd => "redis-sentinel-prod",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "redis-single" => Some(RedisClusterType::Single),
            "redis-prod-single" => Some(RedisClusterType::ProdSingle),
            "redis-sentinel-cluster-1" => Some(RedisClusterType::SentinelCluster),
            "redis-sentinel-prod" => Some(RedisClusterType::SentinelProd),
            _ => None,
        }
    }

    /// Sentinel-ness is defined by the wire string, matching how the
    /// backend classifies cluster types.
    pub fn is_sentinel(&self) -> bool {
        self.as_str().contains("sentinel")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RedisNodeRole {
    Master,
    Replica,
    Sentinel,
}

impl RedisNodeRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            RedisNodeRole::Master => "master",
            RedisNodeRole::Replica => "replica",
            RedisNodeRole::Sentinel => "sentinel",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "master" => Some(RedisNodeRole::Master),
            "replica" => Some(RedisNodeRole::Replica),
            "sentinel" => Some(RedisNodeRole::Sentinel),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KafkaNodeType {
    Template,
    Custom,
}

impl KafkaNodeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            KafkaNodeType::Template => "template",
            KafkaNodeType::Custom => "custom",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "template" => Some(KafkaNodeType::Template),
            "custom" => Some(KafkaNodeType::Custom),
            _ => None,
        }
    }
}

/// Top-level wizard category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Vpn,
    Infrastructure,
}

impl Category {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "vpn" => Some(Category::Vpn),
            "infrastructure" => Some(Category::Infrastructure),
            _ => None,
        }
    }
}

/// Which server type the wizard is currently editing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServerType {
    Vpn,
    Redis,
    Kafka,
}

impl ServerType {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "vpn" => Some(ServerType::Vpn),
            "redis" => Some(ServerType::Redis),
            "kafka" => Some(ServerType::Kafka),
            _ => None,
        }
    }
}

// ============ VPN ============

/// One unit of VPN capacity to deploy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VpnServer {
    pub id: Uuid,
    pub environment: Environment,
    pub size: String,
    pub region: String,
}

impl VpnServer {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            environment: Environment::Dev,
            size: DEFAULT_NODE_SIZE.to_string(),
            region: DEFAULT_REGION.to_string(),
        }
    }
}

impl Default for VpnServer {
    fn default() -> Self {
        Self::new()
    }
}

/// Environment-variable overrides shipped with every VPN deployment. These
/// are passed through to the deployed containers unvalidated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnvOverrides {
    #[serde(rename = "NODE_ENV")]
    pub node_env: String,
    #[serde(rename = "LOG_LEVEL")]
    pub log_level: String,
    #[serde(rename = "MONITORING_PORT")]
    pub monitoring_port: u32,
    #[serde(rename = "VPN_INTERFACE")]
    pub vpn_interface: String,
    #[serde(rename = "HEALTH_CHECK_INTERVAL")]
    pub health_check_interval: u32,
    #[serde(rename = "MAX_PEERS")]
    pub max_peers: u32,
}

impl Default for EnvOverrides {
    fn default() -> Self {
        Self {
            node_env: "production".to_string(),
            log_level: "info".to_string(),
            monitoring_port: 3000,
            vpn_interface: "wg0".to_string(),
            health_check_interval: 30,
            max_peers: 100,
        }
    }
}

/// The whole VPN plan: deployment mode, client, and the server fleet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VpnDeploymentConfig {
    pub mode: DeploymentMode,
    pub client: String,
    pub servers: Vec<VpnServer>,
    pub env_overrides: EnvOverrides,
}

impl VpnDeploymentConfig {
    /// A plan always starts with one default server.
    pub fn new() -> Self {
        Self {
            mode: DeploymentMode::Setup,
            client: String::new(),
            servers: vec![VpnServer::new()],
            env_overrides: EnvOverrides::default(),
        }
    }
}

impl Default for VpnDeploymentConfig {
    fn default() -> Self {
        Self::new()
    }
}

// ============ Redis ============

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedisNode {
    pub id: Uuid,
    pub role: RedisNodeRole,
    pub size: String,
    pub region: String,
    pub status: ServerStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip: Option<String>,
}

impl RedisNode {
    pub fn new(role: RedisNodeRole, region: &str) -> Self {
        let size = match role {
            RedisNodeRole::Sentinel => SENTINEL_NODE_SIZE,
            _ => DEFAULT_NODE_SIZE,
        };
        Self {
            id: Uuid::new_v4(),
            role,
            size: size.to_string(),
            region: region.to_string(),
            status: ServerStatus::Pending,
            ip: None,
        }
    }
}

/// Node collections keyed by role.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedisNodeSet {
    pub masters: Vec<RedisNode>,
    pub replicas: Vec<RedisNode>,
    pub sentinels: Vec<RedisNode>,
}

impl RedisNodeSet {
    pub fn for_role(&self, role: RedisNodeRole) -> &Vec<RedisNode> {
        match role {
            RedisNodeRole::Master => &self.masters,
            RedisNodeRole::Replica => &self.replicas,
            RedisNodeRole::Sentinel => &self.sentinels,
        }
    }

    pub fn for_role_mut(&mut self, role: RedisNodeRole) -> &mut Vec<RedisNode> {
        match role {
            RedisNodeRole::Master => &mut self.masters,
            RedisNodeRole::Replica => &mut self.replicas,
            RedisNodeRole::Sentinel => &mut self.sentinels,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedisClusterConfig {
    pub name: String,
    #[serde(rename = "type")]
    pub cluster_type: RedisClusterType,
    pub region: String,
    pub vpc_uuid: String,
    pub system_password: String,
    pub enable_tls: bool,
    pub target_clusters: Vec<String>,
    pub nodes: RedisNodeSet,
}

impl RedisClusterConfig {
    /// Starts as a sentinel cluster with one node per role.
    pub fn new() -> Self {
        Self {
            name: String::new(),
            cluster_type: RedisClusterType::SentinelCluster,
            region: DEFAULT_REGION.to_string(),
            vpc_uuid: String::new(),
            system_password: String::new(),
            enable_tls: true,
            target_clusters: vec![RedisClusterType::SentinelCluster.as_str().to_string()],
            nodes: RedisNodeSet {
                masters: vec![RedisNode::new(RedisNodeRole::Master, DEFAULT_REGION)],
                replicas: vec![RedisNode::new(RedisNodeRole::Replica, DEFAULT_REGION)],
                sentinels: vec![RedisNode::new(RedisNodeRole::Sentinel, DEFAULT_REGION)],
            },
        }
    }
}

impl Default for RedisClusterConfig {
    fn default() -> Self {
        Self::new()
    }
}

// ============ Kafka ============

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KafkaNodeConfig {
    pub broker_count: u32,
    pub replication_factor: u32,
    pub partitions: u32,
    pub retention_hours: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KafkaNode {
    pub id: Uuid,
    pub name: String,
    #[serde(rename = "type")]
    pub node_type: KafkaNodeType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
    pub size: String,
    pub region: String,
    pub status: ServerStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<KafkaNodeConfig>,
}

impl KafkaNode {
    /// Template nodes reference the "small" preset until a template is
    /// applied; custom nodes start from a mid-sized config they can edit
    /// field by field.
    pub fn new(node_type: KafkaNodeType, region: &str) -> Self {
        let (template, config) = match node_type {
            KafkaNodeType::Template => (Some("small".to_string()), None),
            KafkaNodeType::Custom => (
                None,
                Some(KafkaNodeConfig {
                    broker_count: 3,
                    replication_factor: 2,
                    partitions: 6,
                    retention_hours: 72,
                }),
            ),
        };
        Self {
            id: Uuid::new_v4(),
            name: String::new(),
            node_type,
            template,
            size: DEFAULT_NODE_SIZE.to_string(),
            region: region.to_string(),
            status: ServerStatus::Pending,
            config,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KafkaClusterConfig {
    pub name: String,
    pub region: String,
    pub vpc_uuid: String,
    pub nodes: Vec<KafkaNode>,
}

impl KafkaClusterConfig {
    pub fn new() -> Self {
        Self {
            name: String::new(),
            region: DEFAULT_REGION.to_string(),
            vpc_uuid: String::new(),
            nodes: Vec::new(),
        }
    }
}

impl Default for KafkaClusterConfig {
    fn default() -> Self {
        Self::new()
    }
}

// ============ Aggregate ============

/// Everything the wizard tracks: current navigation selection, the three
/// resource configs, and the deployment-progress fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InfrastructureState {
    pub selected_category: Category,
    pub selected_server_type: Option<ServerType>,
    pub selected_kafka_node_type: Option<KafkaNodeType>,

    pub vpn_config: VpnDeploymentConfig,
    pub redis_config: RedisClusterConfig,
    pub kafka_config: KafkaClusterConfig,

    pub is_deploying: bool,
    pub deployment_progress: u8,
    pub deployment_status: String,
    pub deployment_id: Option<Uuid>,
}

impl InfrastructureState {
    pub fn new() -> Self {
        Self {
            selected_category: Category::Vpn,
            selected_server_type: None,
            selected_kafka_node_type: None,
            vpn_config: VpnDeploymentConfig::new(),
            redis_config: RedisClusterConfig::new(),
            kafka_config: KafkaClusterConfig::new(),
            is_deploying: false,
            deployment_progress: 0,
            deployment_status: String::new(),
            deployment_id: None,
        }
    }
}

impl Default for InfrastructureState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_state_has_one_default_vpn_server() {
        let state = InfrastructureState::new();
        assert_eq!(state.vpn_config.servers.len(), 1);
        let server = &state.vpn_config.servers[0];
        assert_eq!(server.environment, Environment::Dev);
        assert_eq!(server.size, "s-2vcpu-4gb");
        assert_eq!(server.region, "nyc1");
    }

    #[test]
    fn initial_redis_cluster_has_one_node_per_role() {
        let redis = RedisClusterConfig::new();
        assert_eq!(redis.nodes.masters.len(), 1);
        assert_eq!(redis.nodes.replicas.len(), 1);
        assert_eq!(redis.nodes.sentinels.len(), 1);
        assert_eq!(redis.nodes.sentinels[0].size, "s-1vcpu-1gb");
        assert!(redis.enable_tls);
        assert!(redis.cluster_type.is_sentinel());
    }

    #[test]
    fn sentinel_detection_follows_wire_string() {
        assert!(RedisClusterType::SentinelCluster.is_sentinel());
        assert!(RedisClusterType::SentinelProd.is_sentinel());
        assert!(!RedisClusterType::Single.is_sentinel());
        assert!(!RedisClusterType::ProdSingle.is_sentinel());
    }

    #[test]
    fn kafka_node_factories_differ_by_type() {
        let template = KafkaNode::new(KafkaNodeType::Template, "nyc1");
        assert_eq!(template.template.as_deref(), Some("small"));
        assert!(template.config.is_none());

        let custom = KafkaNode::new(KafkaNodeType::Custom, "nyc1");
        assert!(custom.template.is_none());
        let config = custom.config.unwrap();
        assert_eq!(config.broker_count, 3);
        assert_eq!(config.retention_hours, 72);
    }

    #[test]
    fn wire_names_round_trip() {
        let json = serde_json::to_string(&RedisClusterType::SentinelCluster).unwrap();
        assert_eq!(json, "\"redis-sentinel-cluster-1\"");
        let back: RedisClusterType = serde_json::from_str(&json).unwrap();
        assert_eq!(back, RedisClusterType::SentinelCluster);

        let json = serde_json::to_string(&Environment::Qa).unwrap();
        assert_eq!(json, "\"qa\"");
    }
}
