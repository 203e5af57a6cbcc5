//! Command-line interface parsing and handling
//!
//! This module parses arguments, resolves startup settings, installs logging,
//! and dispatches to the selected subcommand.

pub mod ping;
pub mod theme_list;

use std::error::Error;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::debug;

use crate::cli::ping::ping;
use crate::cli::theme_list::list_themes;
use crate::core::config::{Config, Overrides, Settings};
use crate::ui::chat_loop::run_chat;
use crate::utils::logging::{self, LogTarget};

#[derive(Parser, Debug)]
#[command(name = "parley")]
#[command(about = "A terminal chat shell for a local agent backend")]
#[command(
    long_about = "Parley is a full-screen terminal shell that sends each line you type to an \
agent backend (POST {base-url}/run) and shows the reply.\n\n\
Environment Variables:\n\
  PARLEY_BASE_URL       Backend address (default http://127.0.0.1:8000)\n\
  PARLEY_THEME          Initial theme id\n\
  PARLEY_BANNER_THEME   Banner palette name\n\
  PARLEY_LOG            Log filter, e.g. debug or parley=trace\n\
  PARLEY_LOG_FILE       Write logs to this file\n\n\
Controls:\n\
  Enter             Send the message or run a /command\n\
  Up/Down           Walk input history\n\
  PageUp/PageDown   Scroll the transcript\n\
  Esc, Ctrl+C       Quit\n\n\
Commands:\n\
  /help             List commands and keys\n\
  /theme [name]     List themes or switch to one\n\
  /clear            Clear the transcript"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Theme to start with (see `parley themes`)
    #[arg(short = 't', long, global = true, value_name = "THEME")]
    pub theme: Option<String>,

    /// Banner color palette
    #[arg(long, global = true, value_name = "PALETTE")]
    pub banner_theme: Option<String>,

    /// Backend address
    #[arg(short = 'u', long, global = true, value_name = "URL")]
    pub base_url: Option<String>,

    /// Write logs to this file
    #[arg(short = 'l', long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Read configuration from this file instead of the default location
    #[arg(short = 'c', long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Start the chat interface (default)
    Chat,
    /// List themes and banner palettes
    Themes,
    /// Probe the backend once; exits non-zero when unreachable
    Ping,
}

impl Args {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            base_url: self.base_url.clone(),
            theme: self.theme.clone(),
            banner_theme: self.banner_theme.clone(),
            log_file: self.log_file.clone(),
        }
    }

    pub fn load_config(&self) -> Result<Config, Box<dyn Error>> {
        let config = match &self.config {
            Some(path) => Config::load_from_path(path)?,
            None => Config::load()?,
        };
        Ok(config)
    }
}

pub fn main() -> Result<(), Box<dyn Error>> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async_main())
}

async fn async_main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    let config = args.load_config()?;
    let settings = Settings::resolve(&args.overrides(), &config, |var| std::env::var(var).ok());
    let command = args.command.clone().unwrap_or(Commands::Chat);

    let log_file = settings.log_file.as_deref();
    let target = match command {
        Commands::Chat => LogTarget::for_chat(log_file),
        Commands::Themes | Commands::Ping => LogTarget::for_command(log_file),
    };
    logging::init(target)?;
    debug!(?command, ?settings, "settings resolved");

    match command {
        Commands::Chat => run_chat(settings).await,
        Commands::Themes => {
            list_themes(&settings);
            Ok(())
        }
        Commands::Ping => {
            if !ping(&settings).await {
                std::process::exit(1);
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests;
