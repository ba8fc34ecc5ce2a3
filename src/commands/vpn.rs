use anyhow::Result;

use crate::infra::{DeploymentMode, Environment, VpnServerUpdate};
use crate::VpnAction;

use super::plan::{parse_id, report, with_store};

pub fn handle(plan: Option<&str>, action: VpnAction) -> Result<()> {
    match action {
        VpnAction::SetMode { mode } => {
            let Some(mode) = DeploymentMode::parse(&mode) else {
                anyhow::bail!(
                    "Unknown mode: {} (expected setup, deploy, update, rollback, or maintenance)",
                    mode
                );
            };
            with_store(plan, |store| {
                store.update_vpn_mode(mode);
                Ok(())
            })?;
            println!("✓ Deployment mode set to {}", mode.as_str());
        }
        VpnAction::SetClient { client } => {
            with_store(plan, |store| {
                store.update_vpn_client(&client);
                Ok(())
            })?;
            println!("✓ Client set to '{}'", client);
        }
        VpnAction::SetEnv { key, value } => {
            with_store(plan, |store| {
                report(
                    store.set_vpn_env_override(&key, &value),
                    &format!("Override {} = {}", key, value),
                );
                Ok(())
            })?;
        }
        VpnAction::AddServer => {
            with_store(plan, |store| {
                let id = store.add_vpn_server();
                println!("✓ Added VPN server {}", id);
                Ok(())
            })?;
        }
        VpnAction::RemoveServer { id } => {
            let id = parse_id(&id)?;
            with_store(plan, |store| {
                report(store.remove_vpn_server(id), "Removed VPN server");
                Ok(())
            })?;
        }
        VpnAction::UpdateServer {
            id,
            environment,
            size,
            region,
        } => {
            let id = parse_id(&id)?;
            let environment = match environment {
                Some(env) => match Environment::parse(&env) {
                    Some(parsed) => Some(parsed),
                    None => anyhow::bail!(
                        "Unknown environment: {} (expected dev, stage, prod, or qa)",
                        env
                    ),
                },
                None => None,
            };
            with_store(plan, |store| {
                report(
                    store.update_vpn_server(
                        id,
                        VpnServerUpdate {
                            environment,
                            size,
                            region,
                        },
                    ),
                    "Updated VPN server",
                );
                Ok(())
            })?;
        }
    }
    Ok(())
}
