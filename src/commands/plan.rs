// Plan-file handling. The whole wizard state round-trips through a JSON file
// between invocations; every mutating command loads it, applies the change
// through the store, and writes it back with a fresh updated_at.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

use crate::infra::{InfraStore, InfrastructureState, Mutation};
use crate::PlanAction;

pub const DEFAULT_PLAN_FILE: &str = "infra-plan.json";

#[derive(Debug, Serialize, Deserialize)]
pub struct PlanFile {
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub state: InfrastructureState,
}

impl PlanFile {
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            created_at: now,
            updated_at: now,
            state: InfrastructureState::new(),
        }
    }
}

impl Default for PlanFile {
    fn default() -> Self {
        Self::new()
    }
}

pub fn plan_path(plan: Option<&str>) -> PathBuf {
    plan.map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_PLAN_FILE))
}

pub fn load_plan(path: &Path) -> Result<PlanFile> {
    if !path.exists() {
        anyhow::bail!(
            "Plan file not found at {}\n\nRun 'planctl plan init' to create one.",
            path.display()
        );
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read plan file: {}", path.display()))?;
    let plan: PlanFile = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse plan file: {}", path.display()))?;

    Ok(plan)
}

pub fn save_plan(path: &Path, plan: &PlanFile) -> Result<()> {
    let content = serde_json::to_string_pretty(plan).context("Failed to serialize plan")?;
    fs::write(path, content)
        .with_context(|| format!("Failed to write plan file: {}", path.display()))?;
    Ok(())
}

/// Load the plan, run one mutation closure against the store, save.
pub fn with_store<F>(plan: Option<&str>, f: F) -> Result<()>
where
    F: FnOnce(&mut InfraStore) -> Result<()>,
{
    let path = plan_path(plan);
    let mut file = load_plan(&path)?;
    let mut store = InfraStore::from_state(file.state);
    f(&mut store)?;
    file.state = store.into_state();
    file.updated_at = Utc::now();
    save_plan(&path, &file)
}

/// Read-only access to the plan's state.
pub fn read_state(plan: Option<&str>) -> Result<InfrastructureState> {
    Ok(load_plan(&plan_path(plan))?.state)
}

/// Print the outcome of a guarded mutation. A rejection is user feedback,
/// not a failure.
pub fn report(result: Mutation, applied: &str) {
    match result {
        Mutation::Applied => println!("✓ {}", applied),
        Mutation::Rejected(reason) => println!("skipped: {}", reason),
    }
}

pub fn parse_id(id: &str) -> Result<Uuid> {
    Uuid::parse_str(id).with_context(|| format!("'{}' is not a valid id", id))
}

pub fn handle(plan: Option<&str>, action: PlanAction) -> Result<()> {
    match action {
        PlanAction::Init { force } => handle_init(plan, force),
        PlanAction::Show => handle_show(plan),
        PlanAction::Reset => handle_reset(plan),
    }
}

fn handle_init(plan: Option<&str>, force: bool) -> Result<()> {
    let path = plan_path(plan);
    if path.exists() && !force {
        anyhow::bail!(
            "Plan file already exists at {} (use --force to overwrite)",
            path.display()
        );
    }
    save_plan(&path, &PlanFile::new())?;
    println!("✓ Created plan at {}", path.display());
    Ok(())
}

fn handle_reset(plan: Option<&str>) -> Result<()> {
    with_store(plan, |store| {
        store.reset();
        Ok(())
    })?;
    println!("✓ Plan reset to initial state");
    Ok(())
}

fn handle_show(plan: Option<&str>) -> Result<()> {
    let state = read_state(plan)?;

    println!("Selection:");
    println!("  category:        {:?}", state.selected_category);
    println!("  server type:     {:?}", state.selected_server_type);
    println!("  kafka node type: {:?}", state.selected_kafka_node_type);
    println!();

    let vpn = &state.vpn_config;
    println!("VPN ({} mode)", vpn.mode.as_str());
    if vpn.client.trim().is_empty() {
        println!("  client: (not set)");
    } else {
        println!("  client: {}", vpn.client);
    }
    for server in &vpn.servers {
        println!(
            "  server {} — {} / {} / {}",
            server.id,
            server.environment.as_str(),
            server.size,
            server.region
        );
    }
    println!();

    let redis = &state.redis_config;
    println!("Redis ({})", redis.cluster_type.as_str());
    if redis.name.trim().is_empty() {
        println!("  name: (not set)");
    } else {
        println!("  name: {}", redis.name);
    }
    println!(
        "  region: {}  tls: {}  masters: {}  replicas: {}  sentinels: {}",
        redis.region,
        redis.enable_tls,
        redis.nodes.masters.len(),
        redis.nodes.replicas.len(),
        redis.nodes.sentinels.len()
    );
    println!();

    let kafka = &state.kafka_config;
    println!("Kafka");
    if kafka.name.trim().is_empty() {
        println!("  name: (not set)");
    } else {
        println!("  name: {}", kafka.name);
    }
    println!("  region: {}  nodes: {}", kafka.region, kafka.nodes.len());
    for node in &kafka.nodes {
        let label = if node.name.trim().is_empty() {
            "(unnamed)"
        } else {
            node.name.as_str()
        };
        match &node.config {
            Some(config) => println!(
                "  node {} — {} [{}] brokers={} rf={} partitions={} retention={}h",
                node.id,
                label,
                node.node_type.as_str(),
                config.broker_count,
                config.replication_factor,
                config.partitions,
                config.retention_hours
            ),
            None => println!("  node {} — {} [{}]", node.id, label, node.node_type.as_str()),
        }
    }

    if state.is_deploying || state.deployment_id.is_some() {
        println!();
        println!(
            "Deployment: {}% — {} (deploying: {})",
            state.deployment_progress, state.deployment_status, state.is_deploying
        );
    }

    Ok(())
}
