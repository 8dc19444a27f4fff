mod application;
mod domain;
mod infrastructure;
mod presentation;

use crate::infrastructure::http_client::HyperHttpClient;
use crate::infrastructure::output;
use crate::presentation::cli::Cli;
use clap::Parser;

/// carctl: command-line client for the car API
///
/// Turns `key=value` arguments into create, update, delete and lookup
/// requests against `/api/car` and prints what the API answers.
#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let result = match cli.load_config() {
        Ok(config) => {
            let request_service = HyperHttpClient::new().create_request_service();
            cli.run(&request_service, &config).await
        }
        Err(err) => Err(err),
    };

    if let Err(err) = result {
        output::print_error(&err);
        std::process::exit(err.exit_code());
    }
}

fn setup_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}
