//! Interactive prompt: one command per line against the embedded data.

use console::style;
use dialoguer::Input;
use map_data_evaluate::evaluate;
use map_data_query::interpret;

use crate::render;

/// Runs the interactive prompt until the user types `exit` or `quit`.
///
/// # Errors
///
/// Returns an error if reading from the terminal fails.
pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let store = map_data_geography::embedded();

    println!("{}", style("MapData query console").bold());
    println!("Metrics: population, crime rates, income, unemployment, land area.");
    println!("Type a command, or 'exit' to leave.");
    println!();

    loop {
        let line: String = Input::new().with_prompt("query").interact_text()?;
        let command = line.trim();

        if command.is_empty() {
            continue;
        }
        if command.eq_ignore_ascii_case("exit") || command.eq_ignore_ascii_case("quit") {
            return Ok(());
        }

        let intent = interpret(command);
        log::debug!("parsed intent: {intent:?}");
        render::print_evaluation(&evaluate(&intent, store), store);
        println!();
    }
}
