#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Interactive CLI for the map-data command interpreter.
//!
//! ```text
//! cargo run -p map_data_cli -- "show top 5 states by income in blue"
//! cargo run -p map_data_cli -- --json "highlight california in red"
//! ```
//!
//! Running with no command enters an interactive prompt that interprets
//! each line against the embedded sample datasets and prints the
//! resulting treatments.

mod interactive;
mod render;

use clap::Parser;
use map_data_evaluate::evaluate;
use map_data_query::interpret;

#[derive(Parser)]
#[command(
    name = "map_data_cli",
    about = "Interpret natural-language map commands against the sample datasets"
)]
struct Cli {
    /// Command text, e.g. "show states with population over 10 million".
    /// Omit to enter interactive mode.
    command: Vec<String>,

    /// Print the parsed intent as pretty JSON instead of evaluating it.
    #[arg(long)]
    json: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    if cli.command.is_empty() {
        return interactive::run();
    }

    let command = cli.command.join(" ");
    let intent = interpret(&command);

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&intent)?);
        return Ok(());
    }

    let store = map_data_geography::embedded();
    render::print_evaluation(&evaluate(&intent, store), store);
    Ok(())
}
