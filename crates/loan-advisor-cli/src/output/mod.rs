pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use serde_json::Value;

/// Render a command result in the requested format. Write failures on stdout
/// are returned so `main` can report them.
pub fn render(format: &OutputFormat, value: &Value) -> Result<(), Box<dyn std::error::Error>> {
    match format {
        OutputFormat::Json => json::print_json(value)?,
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value)?,
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
    Ok(())
}
