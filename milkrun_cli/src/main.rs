use clap::{Parser, Subcommand};
use mimalloc::MiMalloc;

use crate::{generate::GenerateSubcommands, optimize_plan::OptimizePlanArgs};

mod generate;
mod optimize_plan;
mod parsers;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[arg(short, long)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Order the stops of a delivery plan
    Optimize {
        #[command(flatten)]
        args: OptimizePlanArgs,
    },
    #[command(visible_alias = "g")]
    Generate {
        #[command(subcommand)]
        commands: GenerateSubcommands,
    },
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    dotenvy::from_filename("./.env.local").ok();

    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(if cli.debug {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .init();

    match cli.command {
        Some(Commands::Optimize { args }) => optimize_plan::run(args).await?,
        Some(Commands::Generate { commands }) => generate::run(commands)?,
        None => {}
    }

    Ok(())
}
