use anyhow::Result;

use crate::infra::{Category, KafkaNodeType, ServerType};
use crate::SelectAction;

use super::plan::with_store;

pub fn handle(plan: Option<&str>, action: SelectAction) -> Result<()> {
    match action {
        SelectAction::Category { category } => {
            let Some(category) = Category::parse(&category) else {
                anyhow::bail!(
                    "Unknown category: {} (expected vpn or infrastructure)",
                    category
                );
            };
            with_store(plan, |store| {
                store.set_selected_category(category);
                Ok(())
            })?;
            println!("✓ Category selected (server type cleared)");
        }
        SelectAction::ServerType { server_type } => {
            let parsed = if server_type == "none" {
                None
            } else {
                match ServerType::parse(&server_type) {
                    Some(t) => Some(t),
                    None => anyhow::bail!(
                        "Unknown server type: {} (expected vpn, redis, kafka, or none)",
                        server_type
                    ),
                }
            };
            with_store(plan, |store| {
                store.set_selected_server_type(parsed);
                Ok(())
            })?;
            println!("✓ Server type selected (kafka node type cleared)");
        }
        SelectAction::KafkaNodeType { node_type } => {
            let parsed = if node_type == "none" {
                None
            } else {
                match KafkaNodeType::parse(&node_type) {
                    Some(t) => Some(t),
                    None => anyhow::bail!(
                        "Unknown kafka node type: {} (expected template, custom, or none)",
                        node_type
                    ),
                }
            };
            with_store(plan, |store| {
                store.set_selected_kafka_node_type(parsed);
                Ok(())
            })?;
            println!("✓ Kafka node type selected");
        }
    }
    Ok(())
}
