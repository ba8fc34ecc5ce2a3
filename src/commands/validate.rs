use anyhow::Result;

use crate::infra::{validate_kafka_config, validate_redis_config, validate_vpn_config,
    InfrastructureState};

use super::plan::read_state;

/// Run the validators and print every violation verbatim, one per line.
/// Violations do not fail the command; they are reports, not errors.
pub fn handle(plan: Option<&str>, section: &str) -> Result<()> {
    let state = read_state(plan)?;
    let violations = collect(&state, section)?;

    if violations.is_empty() {
        println!("✓ No violations");
    } else {
        for violation in &violations {
            println!("✗ {}", violation);
        }
        println!();
        println!("{} violation(s) found", violations.len());
    }

    Ok(())
}

pub fn collect(state: &InfrastructureState, section: &str) -> Result<Vec<String>> {
    let mut violations = Vec::new();
    match section {
        "vpn" => violations.extend(validate_vpn_config(&state.vpn_config)),
        "redis" => violations.extend(validate_redis_config(&state.redis_config)),
        "kafka" => violations.extend(validate_kafka_config(&state.kafka_config)),
        "all" => {
            violations.extend(validate_vpn_config(&state.vpn_config));
            violations.extend(validate_redis_config(&state.redis_config));
            violations.extend(validate_kafka_config(&state.kafka_config));
        }
        _ => anyhow::bail!(
            "Unknown section: {} (expected vpn, redis, kafka, or all)",
            section
        ),
    }
    Ok(violations)
}
