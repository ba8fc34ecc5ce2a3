// Command module routing
//
// To add a new command:
// 1. Create a new file in this directory (e.g., `mycommand.rs`)
// 2. Add `pub mod mycommand;` below
// 3. Add the match arm in `handle_command` function

pub mod auth;
pub mod catalog;
pub mod kafka;
pub mod plan;
pub mod redis;
pub mod select;
pub mod submit;
pub mod validate;
pub mod vpn;

use crate::Commands;
use anyhow::Result;

/// Dispatch command to appropriate handler
///
/// Routes commands to their respective handlers based on the Commands enum.
/// `plan` is the global plan-file path override.
pub fn handle_command(plan: Option<String>, command: Commands) -> Result<()> {
    let plan = plan.as_deref();
    match command {
        Commands::Plan { action } => plan::handle(plan, action),
        Commands::Vpn { action } => vpn::handle(plan, action),
        Commands::Redis { action } => redis::handle(plan, action),
        Commands::Kafka { action } => kafka::handle(plan, action),
        Commands::Select { action } => select::handle(plan, action),
        Commands::Validate { section } => validate::handle(plan, &section),
        Commands::Submit {
            skip_redis,
            skip_kafka,
            dry_run,
        } => submit::handle(plan, skip_redis, skip_kafka, dry_run),
        Commands::Register {
            name,
            email,
            password,
            phone,
            website,
            location,
        } => auth::handle_register(name, email, password, phone, website, location),
        Commands::Login { email, password } => auth::handle_login(email, password),
        Commands::Logout => auth::handle_logout(),
        Commands::Whoami => auth::handle_whoami(),
        Commands::Catalog { what } => catalog::handle(&what),
    }
}
