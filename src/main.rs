use chrono::Utc;
use clap::Parser;
use leaderboard_processor::{
    args::{Args, Command},
    config::{DecayConfig, ProcessorConfig},
    database::db::DbClient,
    error::ProcessorError,
    pipeline,
    utils::format_utils::decayed_table
};
use tracing::{error, info};
use tracing_indicatif::IndicatifLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    let args = Args::parse();

    let indicatif_layer = IndicatifLayer::new();
    tracing_subscriber::registry()
        .with(EnvFilter::new(&args.log_level))
        .with(tracing_subscriber::fmt::layer().with_writer(indicatif_layer.get_stderr_writer()))
        .with(indicatif_layer)
        .init();

    let mut client = match DbClient::connect(&args.connection_string).await {
        Ok(client) => client,
        Err(e) => {
            error!("Failed to connect to database: {}", e);
            error!("Application cannot start without a valid database connection");
            std::process::exit(1);
        }
    };

    if let Err(e) = run(&mut client, args.command).await {
        error!("{}", e);
        std::process::exit(1);
    }
}

async fn run(client: &mut DbClient, command: Command) -> Result<(), ProcessorError> {
    match command {
        Command::Process(process) => {
            let config = ProcessorConfig::from(&process);
            info!(
                "Recomputing leaderboards (tournament limit {}, seeded x{}, mixed x{})",
                config.tournament_limit, config.seeded_multiplier, config.mixed_multiplier
            );

            pipeline::recompute(client, config, process.dry_run).await?;
        }
        Command::Leaderboard(query) => {
            let as_of = query.as_of.unwrap_or_else(|| Utc::now().date_naive());
            let decayed = pipeline::decayed_leaderboard(&*client, &query.leaderboard, as_of, DecayConfig::from(&query)).await?;

            if query.json {
                println!("{}", serde_json::to_string_pretty(&decayed)?);
            } else {
                print!("{}", decayed_table(&decayed));
            }
        }
        Command::Ratings { leaderboard } => {
            let ratings = pipeline::ratings(&*client, &leaderboard).await?;
            println!("{}", serde_json::to_string_pretty(&ratings)?);
        }
        Command::Events { leaderboard } => {
            let events = pipeline::events(&*client, &leaderboard).await?;
            println!("{}", serde_json::to_string_pretty(&events)?);
        }
    }

    Ok(())
}
