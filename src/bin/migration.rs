//! Schema migrations outside the server process.
//!
//! Usage: `migration [up|down|fresh|status]` (default `up`). The database
//! comes from the same layered configuration as the server.

use sea_orm_migration::MigratorTrait;
use std::process::ExitCode;
use stockroom_api::{config, db, migrator::Migrator};
use tracing::{error, info};

#[derive(Debug, Clone, Copy, PartialEq)]
enum Command {
    Up,
    Down,
    Fresh,
    Status,
}

impl Command {
    fn parse(arg: Option<&str>) -> Option<Self> {
        match arg.unwrap_or("up") {
            "up" => Some(Command::Up),
            "down" => Some(Command::Down),
            "fresh" => Some(Command::Fresh),
            "status" => Some(Command::Status),
            _ => None,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let arg = std::env::args().nth(1);
    let Some(command) = Command::parse(arg.as_deref()) else {
        eprintln!("usage: migration [up|down|fresh|status]");
        return ExitCode::from(2);
    };

    let cfg = match config::load_config() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("configuration error: {e}");
            return ExitCode::FAILURE;
        }
    };
    config::init_tracing(cfg.log_level(), cfg.log_json);

    match run(command, &cfg).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Migration command {:?} failed: {}", command, e);
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Command, cfg: &config::AppConfig) -> anyhow::Result<()> {
    let pool = db::establish_connection_from_app_config(cfg).await?;

    match command {
        Command::Up => db::run_migrations(&pool).await?,
        Command::Down => {
            info!("Rolling back last migration");
            Migrator::down(&pool, Some(1)).await?;
        }
        Command::Fresh => {
            info!("Dropping all tables and reapplying migrations");
            Migrator::fresh(&pool).await?;
        }
        Command::Status => Migrator::status(&pool).await?,
    }

    db::close_pool(pool).await?;
    info!("Migration command {:?} finished", command);
    Ok(())
}
