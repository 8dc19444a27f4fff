use crate::domain::errors::CarError;
use anyhow::{Result, anyhow};
use colored::Colorize;
use serde_json::Value;

pub const USAGE: &str = "\
Usage: carctl [OPTIONS] <COMMAND> [key=value ...]

Commands:
    carctl help
    carctl create model=string name=string year=number price=number
    carctl update id=string model=string name=string year=number price=number
    carctl delete id=string
    carctl getById id=string
    carctl get limit?=number skip?=number sortField?=string sort?=1(ASC)|-1(DESC) model? ...

Options:
    -c, --config <PATH>  TOML configuration file
        --host <HOST>    API host (overrides configuration)
        --port <PORT>    API port (overrides configuration)
    -v, --verbose        Print the response status and debug logs";

pub fn print_usage() {
    println!("{}", USAGE);
}

pub fn print_response_body(body: &str) -> Result<()> {
    if body.is_empty() {
        return Ok(());
    }

    println!("{}\n", "Api response:".bold());
    match serde_json::from_str::<Value>(body) {
        Ok(json) => {
            let pretty = serde_json::to_string_pretty(&json)
                .map_err(|e| anyhow!("Failed to format JSON: {}", e))?;
            println!("{}", pretty.green());
        }
        Err(_) => println!("{}", body.white()),
    }
    Ok(())
}

/// Single-line report of a failed run
pub fn format_error(err: &CarError) -> String {
    format!(
        "Error - message: {}, response: {}",
        err,
        err.response_text().unwrap_or("null")
    )
}

pub fn print_error(err: &CarError) {
    eprintln!("{}", format_error(err).red());
}
