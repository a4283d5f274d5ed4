// src/main.rs

mod app_logic;
mod cli;
mod core;
mod platform_layer;

use crate::app_logic::CategoryPickerLogic;
use crate::cli::Cli;
use crate::core::mock_catalog::mock_catalog;
use crate::core::{
    AppConfig, CatalogSourceOperations, ConfigManagerOperations, CoreConfigManager,
    DirectoryConfigManager, JsonFileCatalogSource, StaticCatalogSource, TreeSession, catalog,
};
use crate::platform_layer::{AppEvent, PlatformEventHandler, PlatformInterface};
use clap::Parser;
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::{Arc, Mutex};

pub(crate) const APP_NAME: &str = "CategoryPicker";

fn initialize_logging(config: &AppConfig) {
    if let Err(e) = TermLogger::init(
        config.level_filter(),
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    ) {
        eprintln!("Failed to initialize logger: {e}");
    }
}

/*
 * A catalog path given on the command line wins over the configured one. With
 * neither, the built-in sample catalog is used.
 */
fn select_catalog_source(
    cli_catalog: Option<PathBuf>,
    config: &AppConfig,
) -> Box<dyn CatalogSourceOperations> {
    match cli_catalog.or_else(|| config.catalog_path.clone()) {
        Some(path) => {
            log::info!("Loading catalog from {path:?}");
            Box::new(JsonFileCatalogSource::new(path))
        }
        None => {
            log::info!("No catalog configured, using the built-in sample catalog.");
            Box::new(StaticCatalogSource::new(mock_catalog()))
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let config_manager: Box<dyn ConfigManagerOperations> = match &cli.config_dir {
        Some(dir) => Box::new(DirectoryConfigManager::new(dir)),
        None => Box::new(CoreConfigManager::new()),
    };
    let config = match config_manager.load_config(APP_NAME) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Could not load configuration, using defaults: {e}");
            AppConfig::default()
        }
    };
    initialize_logging(&config);

    let source = select_catalog_source(cli.catalog, &config);
    let snapshot = match catalog::load_snapshot(source.as_ref()) {
        Ok(snapshot) => snapshot,
        Err(e) => {
            log::error!("Failed to load catalog: {e}");
            return ExitCode::FAILURE;
        }
    };

    let mut logic = CategoryPickerLogic::new(Box::new(TreeSession::new()), &config);
    logic.handle_event(AppEvent::CatalogLoaded { snapshot });
    let event_handler: Arc<Mutex<dyn PlatformEventHandler>> = Arc::new(Mutex::new(logic));

    let platform = PlatformInterface::new(APP_NAME);
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout().lock();
    match platform.run(event_handler, &mut input, &mut output) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("Console loop failed: {e}");
            ExitCode::FAILURE
        }
    }
}
