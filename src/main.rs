use anyhow::Result;
use clap::Parser;

use planctl::commands;
use planctl::Commands;

#[derive(Parser)]
#[command(name = "planctl")]
#[command(about = "CLI wizard for assembling, validating, and submitting VPN infrastructure deployment plans", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to the plan file (defaults to ./infra-plan.json)
    #[arg(long, short = 'p', value_name = "PATH", global = true)]
    plan: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

fn main() -> Result<()> {
    // Optional .env for endpoint overrides
    dotenv::dotenv().ok();

    let cli = Cli::parse();
    commands::handle_command(cli.plan, cli.command)?;

    Ok(())
}
