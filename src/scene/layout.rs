//! Army layout persistence (JSON).
//!
//! Layouts are plain serde data, so alternative armies can be kept next to
//! the assets and loaded at run time.

use crate::scene::army::ArmyLayout;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// Writes an army layout to a JSON file.
pub fn write_layout(path: &Path, layout: &ArmyLayout) -> Result<()> {
    let file =
        File::create(path).with_context(|| format!("Failed to create file: {}", path.display()))?;
    let writer = BufWriter::new(file);

    serde_json::to_writer_pretty(writer, layout)
        .with_context(|| format!("Failed to serialize layout to: {}", path.display()))?;

    Ok(())
}

/// Reads an army layout from a JSON file.
pub fn read_layout(path: &Path) -> Result<ArmyLayout> {
    let file =
        File::open(path).with_context(|| format!("Failed to open file: {}", path.display()))?;
    let reader = BufReader::new(file);

    let layout: ArmyLayout = serde_json::from_reader(reader)
        .with_context(|| format!("Failed to deserialize layout from: {}", path.display()))?;

    Ok(layout)
}

/// Serializes an army layout to a JSON string.
pub fn to_layout_string(layout: &ArmyLayout) -> Result<String> {
    serde_json::to_string_pretty(layout).context("Failed to serialize layout to string")
}

/// Deserializes an army layout from a JSON string.
pub fn from_layout_string(json: &str) -> Result<ArmyLayout> {
    serde_json::from_str(json).context("Failed to deserialize layout from string")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_write_and_read_layout() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("army.json");

        let original = ArmyLayout::xkcd();
        write_layout(&path, &original)?;
        let loaded = read_layout(&path)?;

        assert_eq!(loaded, original);
        Ok(())
    }

    #[test]
    fn test_string_roundtrip() -> Result<()> {
        let original = ArmyLayout::xkcd();
        let json = to_layout_string(&original)?;
        // Axes serialize lowercase, the way the layout reads naturally
        assert!(json.contains("\"axis\": \"z\""));
        let loaded = from_layout_string(&json)?;
        assert_eq!(loaded, original);
        Ok(())
    }

    #[test]
    fn test_read_missing_file_errors() {
        assert!(read_layout(Path::new("no/such/layout.json")).is_err());
    }

    #[test]
    fn test_malformed_json_errors() {
        assert!(from_layout_string("{\"grid\": 42}").is_err());
    }
}
