//! Edit recipes: an ordered list of operations stored in a file.
//!
//! A recipe is either a JSON array of tagged operations
//! (`[{"op": "rotate", "degrees": 90}]`) or plain text with one compact
//! operation per line. Blank lines and `#` comments are skipped in text.

use std::path::Path;

use anyhow::{Context, Result};
use pedit_core::Operation;

pub fn load_recipe<P: AsRef<Path>>(path: P) -> Result<Vec<Operation>> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read recipe {}", path.display()))?;
    parse_recipe(&text).with_context(|| format!("Invalid recipe {}", path.display()))
}

pub fn parse_recipe(text: &str) -> Result<Vec<Operation>> {
    if text.trim_start().starts_with('[') {
        return Ok(serde_json::from_str(text)?);
    }

    text.lines()
        .enumerate()
        .map(|(index, line)| (index + 1, line.split('#').next().unwrap_or("").trim()))
        .filter(|(_, line)| !line.is_empty())
        .map(|(number, line)| {
            line.parse::<Operation>()
                .with_context(|| format!("line {number}: {line}"))
        })
        .collect()
}
