use crate::application::commands::{Action, dispatch};
use crate::application::services::HttpRequestService;
use crate::domain::errors::CarError;
use crate::infrastructure::config::Config;
use crate::infrastructure::output;
use clap::Parser;
use colored::Colorize;
use std::path::PathBuf;

/// CLI configuration for carctl
#[derive(Parser, Debug)]
#[command(name = "carctl", version)]
#[command(about = "carctl: manage cars through the car API", long_about = None)]
pub struct Cli {
    /// TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// API host, overrides the configuration
    #[arg(long)]
    pub host: Option<String>,

    /// API port, overrides the configuration
    #[arg(long)]
    pub port: Option<u16>,

    #[arg(short, long)]
    pub verbose: bool,

    /// help, create, update, delete, getById or get
    pub command: Option<String>,

    /// Request fields as key=value
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub fields: Vec<String>,
}

impl Cli {
    /// Loads the layered configuration and applies `--host`/`--port`
    pub fn load_config(&self) -> Result<Config, CarError> {
        Ok(Config::load(self.config.as_deref())?.with_overrides(self.host.as_deref(), self.port))
    }

    pub async fn run(
        &self,
        request_service: &HttpRequestService,
        config: &Config,
    ) -> Result<(), CarError> {
        let request = match dispatch(&config.api, self.command.as_deref(), &self.fields)? {
            Action::Help => {
                output::print_usage();
                return Ok(());
            }
            Action::Send(request) => request,
        };

        let response = request_service.send_request(request).await?;

        if self.verbose {
            println!("{}", format!("Status: {}", response.status).cyan());
        }

        output::print_response_body(&response.body)?;
        Ok(())
    }
}
