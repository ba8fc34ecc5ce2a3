// Library crate for planctl - exposes the plan store, validators, and API
// client for use by the CLI binary and by other crates.
pub mod api;
pub mod catalog;
pub mod commands;
pub mod config;
pub mod deploy;
pub mod infra;

// CLI-specific types (used by both library and binary)
use clap::Subcommand;

#[derive(Subcommand)]
pub enum Commands {
    /// Manage the plan file
    Plan {
        #[command(subcommand)]
        action: PlanAction,
    },
    /// Configure the VPN deployment
    Vpn {
        #[command(subcommand)]
        action: VpnAction,
    },
    /// Configure the Redis cluster
    Redis {
        #[command(subcommand)]
        action: RedisAction,
    },
    /// Configure the Kafka cluster
    Kafka {
        #[command(subcommand)]
        action: KafkaAction,
    },
    /// Set the wizard's current selection
    Select {
        #[command(subcommand)]
        action: SelectAction,
    },
    /// Check the plan against the submission rules
    Validate {
        /// Section to validate: vpn, redis, kafka, or all
        #[arg(default_value = "all")]
        section: String,
    },
    /// Validate the plan and submit it for provisioning
    Submit {
        /// Leave the Redis cluster out of the submission
        #[arg(long)]
        skip_redis: bool,
        /// Leave the Kafka cluster out of the submission
        #[arg(long)]
        skip_kafka: bool,
        /// Print the payload instead of sending it
        #[arg(long)]
        dry_run: bool,
    },
    /// Register a new customer account
    Register {
        /// Full name
        name: String,
        /// Email address
        email: String,
        /// Password (prompted for if not provided)
        #[arg(long)]
        password: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        website: Option<String>,
        #[arg(long)]
        location: Option<String>,
    },
    /// Log in and store the session token
    Login {
        /// Email address
        email: String,
        /// Password (prompted for if not provided)
        #[arg(long)]
        password: Option<String>,
    },
    /// Clear the stored session
    Logout,
    /// Show the signed-in user
    Whoami,
    /// List catalog entries: regions, sizes, or templates
    Catalog {
        #[arg(default_value = "regions")]
        what: String,
    },
}

#[derive(Subcommand)]
pub enum PlanAction {
    /// Create a fresh plan file with one default VPN server
    Init {
        /// Overwrite an existing plan file
        #[arg(long)]
        force: bool,
    },
    /// Print the current plan
    Show,
    /// Reset the plan to its initial state
    Reset,
}

#[derive(Subcommand)]
pub enum VpnAction {
    /// Set the deployment mode: setup, deploy, update, rollback, maintenance
    SetMode { mode: String },
    /// Set the client name
    SetClient { client: String },
    /// Set one of the fixed env override keys
    SetEnv { key: String, value: String },
    /// Append a server with default environment/size/region
    AddServer,
    /// Remove a server (a plan keeps at least one)
    RemoveServer { id: String },
    /// Update fields of a server
    UpdateServer {
        id: String,
        /// dev, stage, prod, or qa
        #[arg(long)]
        environment: Option<String>,
        #[arg(long)]
        size: Option<String>,
        #[arg(long)]
        region: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum RedisAction {
    /// Update the cluster's top-level fields
    Set {
        #[arg(long)]
        name: Option<String>,
        /// redis-single, redis-prod-single, redis-sentinel-cluster-1, redis-sentinel-prod
        #[arg(long = "type")]
        cluster_type: Option<String>,
        #[arg(long)]
        region: Option<String>,
        #[arg(long)]
        vpc: Option<String>,
        #[arg(long)]
        password: Option<String>,
        /// true or false
        #[arg(long)]
        tls: Option<bool>,
    },
    /// Add a node: master, replica, or sentinel
    AddNode { role: String },
    /// Remove a node (each role keeps at least one)
    RemoveNode { role: String, id: String },
    /// Update fields of a node within its role
    UpdateNode {
        role: String,
        id: String,
        #[arg(long)]
        size: Option<String>,
        #[arg(long)]
        region: Option<String>,
        /// active, inactive, deploying, error, pending
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        ip: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum KafkaAction {
    /// Update the cluster's top-level fields
    Set {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        region: Option<String>,
        #[arg(long)]
        vpc: Option<String>,
    },
    /// Add a node: template or custom
    AddNode { node_type: String },
    /// Remove a node (clusters may be emptied)
    RemoveNode { id: String },
    /// Update fields of a node
    UpdateNode {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        size: Option<String>,
        #[arg(long)]
        region: Option<String>,
        /// active, inactive, deploying, error, pending
        #[arg(long)]
        status: Option<String>,
    },
    /// Edit one config field of a custom node: broker-count,
    /// replication-factor, partitions, retention-hours
    SetConfig {
        id: String,
        field: String,
        value: String,
    },
    /// Apply a catalog template to a node, replacing its config wholesale
    ApplyTemplate { id: String, template: String },
}

#[derive(Subcommand)]
pub enum SelectAction {
    /// vpn or infrastructure
    Category { category: String },
    /// vpn, redis, kafka, or none
    ServerType { server_type: String },
    /// template, custom, or none
    KafkaNodeType { node_type: String },
}
