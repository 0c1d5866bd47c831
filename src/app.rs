use anyhow::Context;
use instant_search::cli::Command;
use instant_search::config::Config;
use instant_search::debounce::Debouncer;
use instant_search::lookup::{LookupCoordinator, SearchOutcome};
use instant_search::omdb::OmdbClient;
use instant_search::render::{render_details, render_search};
use instant_search::utils::reap_finished;
use std::process::ExitCode;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

type Coordinator = LookupCoordinator<OmdbClient>;

/// Main application struct: configuration plus the shared lookup coordinator.
pub struct App {
    config: Config,
    coordinator: Arc<Coordinator>,
}

impl App {
    pub fn new(config: Config) -> Result<Self, anyhow::Error> {
        let client = OmdbClient::new(
            config.base_url()?,
            config.omdb_api_key.clone(),
            config.request_timeout,
        )
        .context("Failed to create OMDb client")?;

        let capacities = config.cache_capacities()?;
        info!(
            search_cache_capacity = capacities.search.get(),
            details_cache_capacity = capacities.details.get(),
            min_search_length = config.min_search_length,
            "lookup coordinator ready"
        );

        Ok(App {
            coordinator: Arc::new(LookupCoordinator::new(client, capacities)),
            config,
        })
    }

    /// Run one command to completion.
    pub async fn run(self, command: Command) -> ExitCode {
        match command {
            Command::Search { query, min_length } => {
                let min_length = min_length.unwrap_or(self.config.min_search_length);
                let outcome = self.coordinator.search(&query, min_length).await;
                println!("{}", render_search(&outcome, &self.config.default_poster));
                exit_code(outcome.is_success())
            }
            Command::Details { id } => {
                let outcome = self.coordinator.fetch_details(&id).await;
                println!("{}", render_details(&outcome));
                exit_code(outcome.record().is_some())
            }
            Command::Interactive => match self.interactive().await {
                Ok(()) => ExitCode::SUCCESS,
                Err(e) => {
                    tracing::error!(error = ?e, "interactive session failed");
                    ExitCode::FAILURE
                }
            },
        }
    }

    /// Treat each stdin line as the current value of the search box.
    ///
    /// Search values are debounced; `:d <id>` asks for details right away.
    /// Searches run in their own tasks, so a superseded search still finishes
    /// and can still fill the cache.
    async fn interactive(&self) -> Result<(), anyhow::Error> {
        let (tx, rx) = mpsc::channel::<String>(64);
        let reader = tokio::spawn(read_input(tx, self.coordinator.clone()));

        let mut debouncer = Debouncer::new(rx, self.config.debounce_interval);
        let mut searches = JoinSet::new();
        while let Some(query) = debouncer.next().await {
            reap_finished(&mut searches, "search");
            let coordinator = self.coordinator.clone();
            let min_length = self.config.min_search_length;
            let default_poster = self.config.default_poster.clone();
            searches.spawn(async move {
                let outcome = coordinator.search(&query, min_length).await;
                if let SearchOutcome::Success { from_cache, .. } = &outcome {
                    debug!(query = %query, from_cache, "search settled");
                }
                println!("{}", render_search(&outcome, &default_poster));
            });
        }

        while let Some(result) = searches.join_next().await {
            if let Err(e) = result {
                warn!(error = ?e, "search task failed");
            }
        }
        reader.await.context("stdin reader panicked")?
    }
}

async fn read_input(
    tx: mpsc::Sender<String>,
    coordinator: Arc<Coordinator>,
) -> Result<(), anyhow::Error> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut lookups = JoinSet::new();

    while let Some(line) = lines.next_line().await.context("Failed to read stdin")? {
        reap_finished(&mut lookups, "details");
        if let Some(id) = line.strip_prefix(":d ") {
            let coordinator = coordinator.clone();
            let id = id.trim().to_owned();
            lookups.spawn(async move {
                let outcome = coordinator.fetch_details(&id).await;
                println!("{}", render_details(&outcome));
            });
        } else if tx.send(line).await.is_err() {
            break;
        }
    }
    drop(tx);

    while let Some(result) = lookups.join_next().await {
        if let Err(e) = result {
            warn!(error = ?e, "details task failed");
        }
    }
    Ok(())
}

fn exit_code(success: bool) -> ExitCode {
    if success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
