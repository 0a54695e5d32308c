pub mod file;
pub mod policy;
pub mod stdin;

use serde::de::DeserializeOwned;

/// Input precedence shared by every command: `--input` file, then piped
/// stdin JSON, then `None` so the caller can build from flags.
pub fn read_input<T: DeserializeOwned>(
    path: Option<&str>,
) -> Result<Option<T>, Box<dyn std::error::Error>> {
    if let Some(path) = path {
        return Ok(Some(file::read_json(path)?));
    }
    match stdin::read_stdin()? {
        Some(data) => Ok(Some(serde_json::from_value(data)?)),
        None => Ok(None),
    }
}
