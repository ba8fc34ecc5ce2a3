// Final submission: validate the sections that will actually be sent, build
// the wire payload, POST it, then walk the simulated deployment sequence so
// the plan file ends up with a completed deployment record.

use anyhow::Result;

use crate::api;
use crate::deploy;
use crate::infra::payload::SubmissionPayload;
use crate::infra::{validate_kafka_config, validate_redis_config, validate_vpn_config, InfraStore};

use super::plan::{load_plan, plan_path, save_plan};

pub fn handle(plan: Option<&str>, skip_redis: bool, skip_kafka: bool, dry_run: bool) -> Result<()> {
    let path = plan_path(plan);
    let mut file = load_plan(&path)?;

    // Validate what will be submitted; the validators only report, so
    // blocking on a non-empty list happens here.
    let state = &file.state;
    let mut violations = validate_vpn_config(&state.vpn_config);
    let redis_included = !skip_redis && !state.redis_config.name.trim().is_empty();
    if redis_included {
        violations.extend(validate_redis_config(&state.redis_config));
    }
    let kafka_included = !skip_kafka && !state.kafka_config.name.trim().is_empty();
    if kafka_included {
        violations.extend(validate_kafka_config(&state.kafka_config));
    }

    if !violations.is_empty() {
        for violation in &violations {
            println!("✗ {}", violation);
        }
        anyhow::bail!("Plan has {} violation(s); fix them and retry", violations.len());
    }

    let payload = SubmissionPayload::from_state(state, skip_redis, skip_kafka);

    if dry_run {
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    println!(
        "Submitting plan ({} VPN server(s){}{})...",
        payload.vpn.servers.len(),
        if payload.redis.is_some() { ", Redis" } else { "" },
        if payload.kafka.is_some() { ", Kafka" } else { "" },
    );

    let rt = tokio::runtime::Runtime::new()?;
    let response = rt.block_on(api::submit_infrastructure(&payload))?;

    if !response.success {
        match response.display_message() {
            Some(message) => anyhow::bail!("Submission rejected: {}", message),
            None => anyhow::bail!("Submission rejected"),
        }
    }

    println!("✓ Infrastructure configuration submitted");
    if let Some(message) = response.display_message() {
        println!("  {}", message);
    }

    // Progress display only; provisioning happens server-side.
    let mut store = InfraStore::from_state(file.state);
    let deployment_id = rt.block_on(deploy::run_simulation(&mut store));
    println!("✓ Deployment {} recorded", deployment_id);

    file.state = store.into_state();
    file.updated_at = chrono::Utc::now();
    save_plan(&path, &file)?;

    Ok(())
}
