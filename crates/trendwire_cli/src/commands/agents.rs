//! Agents command - List the trend team roles.

use anyhow::Result;
use clap::Args;

use trendwire_agents::TrendRole;

#[derive(Args)]
pub struct AgentsArgs {
    /// Show the full brief for each role
    #[arg(long)]
    full: bool,
}

pub async fn execute(args: AgentsArgs) -> Result<()> {
    println!("🤝 Trend analysis team (hand-off order):");
    println!();

    for role in TrendRole::all() {
        println!("{} {} ({})", role.icon(), role.name(), role.title());
        println!("   {}", role.description());
        if args.full {
            println!("   Accent color: {}", role.color());
            println!();
            for line in role.instructions().lines() {
                println!("   {}", line);
            }
        }
        println!();
    }

    Ok(())
}
