use serde_json::Value;

/// Pretty-print JSON to stdout; compact when piped.
pub fn print_json(value: &Value) -> Result<(), serde_json::Error> {
    let rendered = if atty::is(atty::Stream::Stdout) {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{}", rendered);
    Ok(())
}
