use clap::Parser;
use mazerun::{app, config::Config};

fn main() -> std::io::Result<()> {
    let config = Config::parse();

    let _log_guard = app::init_logging();
    tracing::info!("[main] Starting with {:?}", config);

    let mut stdout = std::io::stdout();
    app::setup_terminal(&mut stdout)?;
    let result = app::run(&mut stdout, &config);
    app::restore_terminal(&mut stdout)?;

    if let Err(e) = &result {
        tracing::error!("[main] Exiting with error: {}", e);
    }
    result
}
