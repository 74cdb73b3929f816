mod poller;
mod publish;
mod settings;

use crate::poller::Poller;
use crate::publish::Publisher;
use crate::settings::Settings;
use log::info;
use mlb_api::GameState;
use tokio::sync::mpsc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if handle_cli_args() {
        return Ok(());
    }

    better_panic::install();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let settings = Settings::load()?;
    info!(
        "mlbridge starting for {} as \"{}\" (cycle timeout {:?})",
        settings.team_id, settings.name, settings.timeout
    );

    let (update_tx, update_rx) = mpsc::channel::<GameState>(16);

    let poller_task = tokio::spawn(Poller::new(settings.clone(), update_tx).run());
    let publisher_task = tokio::spawn(Publisher::new(settings.name.clone(), update_rx).run());

    tokio::signal::ctrl_c().await?;
    info!("shutting down");

    poller_task.abort();
    publisher_task.abort();

    Ok(())
}

fn handle_cli_args() -> bool {
    let mut args = std::env::args().skip(1);
    let Some(arg) = args.next() else {
        return false;
    };

    match arg.as_str() {
        "-h" | "--help" => {
            println!("{}", usage_text());
            true
        }
        "-V" | "--version" => {
            println!("mlbridge {}", env!("CARGO_PKG_VERSION"));
            true
        }
        _ => {
            eprintln!("Unknown argument: {arg}\n\n{}", usage_text());
            std::process::exit(2);
        }
    }
}

fn usage_text() -> &'static str {
    "mlbridge - MLB game-state bridge

Usage:
  mlbridge
  mlbridge --help
  mlbridge --version

Environment:
  MLBRIDGE_TEAM           Team abbreviation to follow, e.g. NYM (required)
  MLBRIDGE_NAME           Display name for log lines (default MLB)
  MLBRIDGE_TIMEOUT_SECS   Whole-cycle timeout in seconds (default 180)
  RUST_LOG                Log filter (default info)"
}
