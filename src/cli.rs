use std::path::PathBuf;

use clap::Parser;

use crate::config::Config;

/// Terminal chat client for an NLPAssist question-answering backend.
#[derive(Debug, Parser)]
#[command(name = "nlpassist-cli", version, about)]
pub struct Args {
    /// Config file (defaults to ~/.config/nlpassist-cli/config.toml)
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Endpoint questions are POSTed to
    #[arg(short, long, value_name = "URL")]
    pub endpoint: Option<String>,

    /// User id sent with every question
    #[arg(short, long, value_name = "ID")]
    pub user_id: Option<String>,

    /// Ask a single question, print the answer and exit
    #[arg(short, long, value_name = "QUESTION")]
    pub ask: Option<String>,

    /// Write the effective configuration to the config path and exit
    #[arg(long)]
    pub write_config: bool,

    /// Log at debug level
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Config file path in effect for this run.
    pub fn config_path(&self) -> Option<PathBuf> {
        self.config.clone().or_else(Config::default_path)
    }

    /// Resolve configuration: defaults < file < environment < flags.
    ///
    /// An explicitly given config file must exist and parse; the default
    /// file is optional.
    pub fn resolve_config(&self) -> anyhow::Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load_from_path(path)?,
            None => Config::load(),
        };
        config.apply_env();
        config.apply_overrides(self.endpoint.clone(), self.user_id.clone());
        Ok(config)
    }
}
