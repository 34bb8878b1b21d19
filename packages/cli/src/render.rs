//! Terminal rendering for evaluation results.

use console::style;
use map_data_evaluate::{Evaluation, StatisticValue, Treatment};
use map_data_geography::DatasetStore;

/// Prints an evaluation result in a human-readable form.
pub fn print_evaluation(evaluation: &Evaluation, store: &DatasetStore) {
    match evaluation {
        Evaluation::Highlights { regions } => {
            if regions.is_empty() {
                println!("No regions matched.");
                return;
            }

            println!("{:<8} {:<28} TREATMENT", "CODE", "REGION");
            println!("{}", "-".repeat(60));
            for (code, treatment) in regions {
                println!(
                    "{:<8} {:<28} {}",
                    code,
                    store.region_label(code),
                    describe_treatment(treatment)
                );
            }
            println!("\n{} region(s)", regions.len());
        }

        Evaluation::Statistic { report } => {
            println!("{}", style(&report.description).bold());
            match report.value {
                StatisticValue::Scalar { value } => println!("  {value:.4}"),
                StatisticValue::Quartiles { q1, q2, q3 } => {
                    println!("  q1: {q1:.4}");
                    println!("  q2: {q2:.4}");
                    println!("  q3: {q3:.4}");
                }
                StatisticValue::Summary {
                    count,
                    mean,
                    median,
                    std_dev,
                    min,
                    max,
                } => {
                    println!("  count:   {count}");
                    println!("  mean:    {mean:.4}");
                    println!("  median:  {median:.4}");
                    println!("  std dev: {std_dev:.4}");
                    println!("  min:     {min:.4}");
                    println!("  max:     {max:.4}");
                }
            }
        }

        Evaluation::Cleared => println!("Highlights cleared."),

        Evaluation::Clarification {
            message,
            suggestions,
            ..
        } => {
            println!("{}", style(message).yellow());
            println!("For example:");
            for suggestion in suggestions {
                println!("  - {suggestion}");
            }
        }

        Evaluation::NoMatch { suggestions } => {
            println!("{}", style("Sorry, I didn't understand that.").yellow());
            println!("Try one of these:");
            for suggestion in suggestions {
                println!("  - {suggestion}");
            }
        }
    }
}

/// One-line description of a treatment.
fn describe_treatment(treatment: &Treatment) -> String {
    match treatment {
        Treatment::Color { color } => color.clone(),
        Treatment::Hex { hex } => hex.clone(),
        Treatment::Ranked {
            color,
            hex,
            intensity,
            rank,
        } => format!("#{rank} {color} {hex} (intensity {intensity:.2})"),
    }
}
