use anyhow::Result;

use crate::catalog::{KAFKA_TEMPLATES, NODE_SIZES, REGIONS};

pub fn handle(what: &str) -> Result<()> {
    match what {
        "regions" => {
            for region in REGIONS {
                let marker = if region.available { " " } else { "✗" };
                println!("{} {:6} {}", marker, region.slug, region.name);
            }
        }
        "sizes" => {
            for size in NODE_SIZES {
                println!(
                    "{:14} {:16} disk {:8} — {}",
                    size.slug, size.label, size.disk, size.use_case
                );
            }
        }
        "templates" => {
            for template in KAFKA_TEMPLATES {
                println!(
                    "{:10} {:20} brokers={} rf={} partitions={} retention={}h",
                    template.id,
                    template.name,
                    template.broker_count,
                    template.replication_factor,
                    template.partitions,
                    template.retention_hours
                );
            }
        }
        _ => anyhow::bail!(
            "Unknown catalog: {} (expected regions, sizes, or templates)",
            what
        ),
    }
    Ok(())
}
