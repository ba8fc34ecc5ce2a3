// Static catalogs for the configuration wizard: deployable regions, droplet
// sizes, and Kafka cluster presets. These mirror what the provisioning
// backend accepts; slugs are passed through to the API verbatim.

/// A datacenter region a node can be placed in.
pub struct Region {
    pub slug: &'static str,
    pub name: &'static str,
    pub available: bool,
}

pub const REGIONS: &[Region] = &[
    Region { slug: "nyc1", name: "New York 1", available: true },
    Region { slug: "nyc3", name: "New York 3", available: true },
    Region { slug: "sfo3", name: "San Francisco 3", available: true },
    Region { slug: "ams3", name: "Amsterdam 3", available: true },
    Region { slug: "sgp1", name: "Singapore 1", available: true },
    Region { slug: "lon1", name: "London 1", available: true },
    Region { slug: "fra1", name: "Frankfurt 1", available: true },
    Region { slug: "tor1", name: "Toronto 1", available: true },
    Region { slug: "blr1", name: "Bangalore 1", available: true },
];

/// A compute size a node can be provisioned with.
pub struct NodeSize {
    pub slug: &'static str,
    pub label: &'static str,
    pub vcpu: u32,
    pub memory: &'static str,
    pub disk: &'static str,
    pub use_case: &'static str,
}

pub const NODE_SIZES: &[NodeSize] = &[
    NodeSize { slug: "s-1vcpu-1gb", label: "1 vCPU / 1 GB", vcpu: 1, memory: "1 GB", disk: "25 GB", use_case: "Dev, Sentinel" },
    NodeSize { slug: "s-1vcpu-2gb", label: "1 vCPU / 2 GB", vcpu: 1, memory: "2 GB", disk: "50 GB", use_case: "Staging" },
    NodeSize { slug: "s-2vcpu-2gb", label: "2 vCPU / 2 GB", vcpu: 2, memory: "2 GB", disk: "60 GB", use_case: "Small Production" },
    NodeSize { slug: "s-2vcpu-4gb", label: "2 vCPU / 4 GB", vcpu: 2, memory: "4 GB", disk: "80 GB", use_case: "Production" },
    NodeSize { slug: "s-4vcpu-8gb", label: "4 vCPU / 8 GB", vcpu: 4, memory: "8 GB", disk: "160 GB", use_case: "Large Production" },
];

/// Default size for data-serving nodes (VPN servers, Redis masters/replicas,
/// Kafka brokers).
pub const DEFAULT_NODE_SIZE: &str = "s-2vcpu-4gb";
/// Sentinels only coordinate failover, so they get the smallest size.
pub const SENTINEL_NODE_SIZE: &str = "s-1vcpu-1gb";
/// Default region for all newly created nodes and clusters.
pub const DEFAULT_REGION: &str = "nyc1";

/// A named preset bundle of Kafka broker/replication/partition/retention
/// values.
pub struct KafkaTemplate {
    pub id: &'static str,
    pub name: &'static str,
    pub broker_count: u32,
    pub replication_factor: u32,
    pub partitions: u32,
    pub retention_hours: u32,
}

pub const KAFKA_TEMPLATES: &[KafkaTemplate] = &[
    KafkaTemplate { id: "small", name: "Small (Dev)", broker_count: 1, replication_factor: 1, partitions: 3, retention_hours: 24 },
    KafkaTemplate { id: "medium", name: "Medium (Staging)", broker_count: 3, replication_factor: 2, partitions: 6, retention_hours: 72 },
    KafkaTemplate { id: "large", name: "Large (Production)", broker_count: 5, replication_factor: 3, partitions: 12, retention_hours: 168 },
    KafkaTemplate { id: "enterprise", name: "Enterprise", broker_count: 7, replication_factor: 3, partitions: 24, retention_hours: 336 },
];

pub fn find_region(slug: &str) -> Option<&'static Region> {
    REGIONS.iter().find(|r| r.slug == slug)
}

pub fn find_node_size(slug: &str) -> Option<&'static NodeSize> {
    NODE_SIZES.iter().find(|s| s.slug == slug)
}

pub fn find_kafka_template(id: &str) -> Option<&'static KafkaTemplate> {
    KAFKA_TEMPLATES.iter().find(|t| t.id == id)
}
