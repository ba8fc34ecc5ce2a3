use anyhow::Result;

use crate::infra::{KafkaConfigField, KafkaNodeType, KafkaNodeUpdate, ServerStatus};
use crate::KafkaAction;

use super::plan::{parse_id, report, with_store};

pub fn handle(plan: Option<&str>, action: KafkaAction) -> Result<()> {
    match action {
        KafkaAction::Set { name, region, vpc } => {
            with_store(plan, |store| {
                if let Some(name) = name {
                    store.update_kafka_name(&name);
                }
                if let Some(region) = region {
                    store.update_kafka_region(&region);
                }
                if let Some(vpc) = vpc {
                    store.update_kafka_vpc_uuid(&vpc);
                }
                Ok(())
            })?;
            println!("✓ Updated Kafka cluster settings");
        }
        KafkaAction::AddNode { node_type } => {
            let Some(node_type) = KafkaNodeType::parse(&node_type) else {
                anyhow::bail!(
                    "Unknown node type: {} (expected template or custom)",
                    node_type
                );
            };
            with_store(plan, |store| {
                let id = store.add_kafka_node(node_type);
                println!("✓ Added {} node {}", node_type.as_str(), id);
                Ok(())
            })?;
        }
        KafkaAction::RemoveNode { id } => {
            let id = parse_id(&id)?;
            with_store(plan, |store| {
                report(store.remove_kafka_node(id), "Removed Kafka node");
                Ok(())
            })?;
        }
        KafkaAction::UpdateNode {
            id,
            name,
            size,
            region,
            status,
        } => {
            let id = parse_id(&id)?;
            let status = match status {
                Some(s) => match ServerStatus::parse(&s) {
                    Some(parsed) => Some(parsed),
                    None => anyhow::bail!(
                        "Unknown status: {} (expected active, inactive, deploying, error, or pending)",
                        s
                    ),
                },
                None => None,
            };
            with_store(plan, |store| {
                report(
                    store.update_kafka_node(
                        id,
                        KafkaNodeUpdate {
                            name,
                            size,
                            region,
                            status,
                        },
                    ),
                    "Updated Kafka node",
                );
                Ok(())
            })?;
        }
        KafkaAction::SetConfig { id, field, value } => {
            let id = parse_id(&id)?;
            let Some(field) = KafkaConfigField::parse(&field) else {
                anyhow::bail!(
                    "Unknown config field: {} (expected broker-count, replication-factor, partitions, or retention-hours)",
                    field
                );
            };
            with_store(plan, |store| {
                report(
                    store.set_kafka_custom_config(id, field, &value),
                    "Updated node config",
                );
                Ok(())
            })?;
        }
        KafkaAction::ApplyTemplate { id, template } => {
            let id = parse_id(&id)?;
            with_store(plan, |store| {
                report(
                    store.apply_kafka_template(id, &template),
                    &format!("Applied template '{}'", template),
                );
                Ok(())
            })?;
        }
    }
    Ok(())
}
