use anyhow::Result;
use clap::Parser;
use domain_picker::app::AppState;
use domain_picker::catalog::{Catalog, resolve_catalog};
use domain_picker::cli::{Cli, Commands};
use domain_picker::clipboard::{SystemClipboard, clipboard_available};
use domain_picker::config::Config;
use domain_picker::feedback::FlashFeedback;
use domain_picker::keybindings::KeybindingCache;
use domain_picker::logging::{init_file_logging, init_stderr_logging};
use domain_picker::report::SearchReport;
use domain_picker::ui::{self, theme::Theme};
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::List { json }) => {
            init_stderr_logging()?;
            let (_, catalog) = load(cli.catalog.as_deref())?;
            print_report(&SearchReport::new(&catalog, None), json)?;
        }
        Some(Commands::Search { ref query, json }) => {
            init_stderr_logging()?;
            let (_, catalog) = load(cli.catalog.as_deref())?;
            print_report(&SearchReport::new(&catalog, Some(query.as_str())), json)?;
        }
        None => {
            init_file_logging()?;
            let (config, catalog) = load(cli.catalog.as_deref())?;

            if !clipboard_available() {
                warn!("System clipboard unavailable, copies will fail");
            }

            let state = AppState::new(
                Arc::new(catalog),
                SystemClipboard,
                FlashFeedback::new(config.bell_on_failure),
                Theme::from_config(&config),
                KeybindingCache::from_config(&config.keybindings),
                config.timeoutlen,
            );

            info!("Starting TUI");
            ui::run_tui(state).await?;
        }
    }

    Ok(())
}

fn load(catalog_path: Option<&Path>) -> Result<(Config, Catalog)> {
    let config = Config::load()?;
    let catalog = resolve_catalog(catalog_path, &config)?;
    Ok((config, catalog))
}

fn print_report(report: &SearchReport, json: bool) -> Result<()> {
    if json {
        println!("{}", report.to_json()?);
    } else {
        print!("{}", report.to_text());
    }
    Ok(())
}
