//! JSON Export
//!
//! Writes loaded analytics panels to a JSON file, keyed by panel.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use anyhow::Result;
use serde_json::Value;

/// Write analytics panels to JSON file
pub fn write_analytics(path: &Path, panels: &BTreeMap<&'static str, &Value>) -> Result<usize> {
    let json = serde_json::to_string_pretty(panels)?;

    let mut file = File::create(path)?;
    file.write_all(json.as_bytes())?;

    Ok(panels.len())
}
