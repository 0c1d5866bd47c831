use crate::app::App;
use clap::Parser;
use instant_search::cli::Args;
use instant_search::config::Config;
use instant_search::logging::setup_logging;
use std::io::IsTerminal;
use std::process::ExitCode;
use tracing::info;

mod app;

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let args = Args::parse();

    // Load config and setup logging before App::new() so startup logs are never silently dropped
    let config = match Config::load(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e:#}");
            return ExitCode::FAILURE;
        }
    };
    setup_logging(&config, args.tracing);

    if !std::io::stdout().is_terminal() {
        yansi::disable();
    }

    info!(
        version = env!("CARGO_PKG_VERSION"),
        environment = if cfg!(debug_assertions) {
            "development"
        } else {
            "production"
        },
        "starting instant-search"
    );

    let app = App::new(config).expect("Failed to initialize application");
    app.run(args.command).await
}
