use anyhow::Result;

use crate::infra::{RedisClusterType, RedisConfigUpdate, RedisNodeRole, RedisNodeUpdate,
    ServerStatus};
use crate::RedisAction;

use super::plan::{parse_id, report, with_store};

fn parse_role(role: &str) -> Result<RedisNodeRole> {
    RedisNodeRole::parse(role).ok_or_else(|| {
        anyhow::anyhow!(
            "Unknown role: {} (expected master, replica, or sentinel)",
            role
        )
    })
}

fn parse_status(status: &str) -> Result<ServerStatus> {
    ServerStatus::parse(status).ok_or_else(|| {
        anyhow::anyhow!(
            "Unknown status: {} (expected active, inactive, deploying, error, or pending)",
            status
        )
    })
}

pub fn handle(plan: Option<&str>, action: RedisAction) -> Result<()> {
    match action {
        RedisAction::Set {
            name,
            cluster_type,
            region,
            vpc,
            password,
            tls,
        } => {
            let cluster_type = match cluster_type {
                Some(t) => match RedisClusterType::parse(&t) {
                    Some(parsed) => Some(parsed),
                    None => anyhow::bail!(
                        "Unknown cluster type: {} (expected redis-single, redis-prod-single, redis-sentinel-cluster-1, or redis-sentinel-prod)",
                        t
                    ),
                },
                None => None,
            };
            with_store(plan, |store| {
                store.update_redis_config(RedisConfigUpdate {
                    name,
                    cluster_type,
                    region,
                    vpc_uuid: vpc,
                    system_password: password,
                    enable_tls: tls,
                });
                Ok(())
            })?;
            println!("✓ Updated Redis cluster settings");
        }
        RedisAction::AddNode { role } => {
            let role = parse_role(&role)?;
            with_store(plan, |store| {
                let id = store.add_redis_node(role);
                println!("✓ Added {} node {}", role.as_str(), id);
                Ok(())
            })?;
        }
        RedisAction::RemoveNode { role, id } => {
            let role = parse_role(&role)?;
            let id = parse_id(&id)?;
            with_store(plan, |store| {
                report(
                    store.remove_redis_node(role, id),
                    &format!("Removed {} node", role.as_str()),
                );
                Ok(())
            })?;
        }
        RedisAction::UpdateNode {
            role,
            id,
            size,
            region,
            status,
            ip,
        } => {
            let role = parse_role(&role)?;
            let id = parse_id(&id)?;
            let status = status.as_deref().map(parse_status).transpose()?;
            with_store(plan, |store| {
                report(
                    store.update_redis_node(
                        role,
                        id,
                        RedisNodeUpdate {
                            size,
                            region,
                            status,
                            ip,
                        },
                    ),
                    &format!("Updated {} node", role.as_str()),
                );
                Ok(())
            })?;
        }
    }
    Ok(())
}
