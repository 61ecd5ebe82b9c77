use std::{sync::Arc, time::Duration};

use colored::Colorize;
use log::{error, info, warn};
use oasis_core::{Config, ConfigError};
use oasis_studio::{
    DisabledGenerator, FileStorage, GeminiGenerator, Storage, Studio, StudioError,
    WorkoutGenerator,
};
use thiserror::Error;
use tokio::runtime::{self, Runtime};

mod logging;

pub struct Oasis {
    config: Config,
    studio: Arc<Studio>,
    runtime: Runtime,
}

#[derive(Debug, Error)]
enum OasisError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Could not open the data folder: {0}")]
    DataFolder(std::io::Error),

    #[error("Could not load the studio: {0}")]
    Studio(#[from] StudioError),

    #[error("Server stopped: {0}")]
    Server(std::io::Error),

    #[error("Fatal error: {0}")]
    Fatal(String),
}

impl Oasis {
    fn new() -> Result<Self, OasisError> {
        let config = Config::from_env()?;

        info!("Building async runtime...");
        let runtime = runtime::Builder::new_multi_thread()
            .enable_all()
            .thread_name("oasis-async")
            .build()
            .map_err(|e| OasisError::Fatal(e.to_string()))?;

        let storage: Arc<dyn Storage> =
            Arc::new(FileStorage::open(&config.data_dir).map_err(OasisError::DataFolder)?);

        let studio = Studio::new(&config, storage, generator(&config))?;

        Ok(Self {
            config,
            studio: Arc::new(studio),
            runtime,
        })
    }

    fn run(self) -> Result<(), OasisError> {
        self.runtime
            .block_on(oasis_server::run_server(self.studio, self.config.port))
            .map_err(OasisError::Server)
    }
}

fn generator(config: &Config) -> Arc<dyn WorkoutGenerator> {
    let Some(api_key) = &config.generator_api_key else {
        warn!("No generator API key is set, only templates will be recommended");
        return Arc::new(DisabledGenerator);
    };

    let timeout = Duration::from_secs(config.generator_timeout_in_seconds);

    match GeminiGenerator::new(api_key, &config.generator_model, timeout) {
        Ok(generator) => {
            info!("Generating workouts with {}", config.generator_model);
            Arc::new(generator)
        }
        Err(e) => {
            warn!("Workout generation is disabled: {}", e);
            Arc::new(DisabledGenerator)
        }
    }
}

impl OasisError {
    fn hint(&self) -> String {
        match self {
            OasisError::Config(_) => "Check the OASIS_* environment variables, then try again.".to_string(),
            OasisError::DataFolder(_) => "Make sure OASIS_DATA_DIR points to a folder oasis can create and write to.".to_string(),
            OasisError::Studio(StudioError::Seed(_)) => "The bundled templates are broken. This is a bug.".to_string(),
            OasisError::Studio(_) => "Stored data could not be read or written. Check the permissions of the data folder.".to_string(),
            OasisError::Server(_) => "Make sure OASIS_SERVER_PORT is not already in use.".to_string(),
            OasisError::Fatal(_) => "This error is fatal, and should not happen.".to_string(),
        }
    }
}

fn main() {
    if let Err(e) = logging::init_logger(Config::verbose_from_env()) {
        eprintln!("Could not initialize logging: {}", e);
    }

    let result = Oasis::new().and_then(|oasis| {
        info!("Initialized successfully.");
        oasis.run()
    });

    if let Err(error) = result {
        error!("{} Read the error below to troubleshoot the issue. If you think this might be a bug, please report it by making a GitHub issue.", "Oasis failed to start!".bold().red());
        error!("{}", error);
        error!("{}", format!("Hint: {}", error.hint()).dimmed().italic());
    }
}
