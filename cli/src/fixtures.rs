//! CLI command for command parsing fixture management.
//!
//! Records the parser's current output for an utterance as a curated golden
//! fixture. Review the written file before committing it.

use anyhow::{bail, Context, Result};
use basket_core::command_parser::{parse, Command};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// A test case for command parsing
#[derive(Debug, Serialize)]
struct TestCase {
    raw: String,
    expected: Command,
}

/// Default path to the curated fixtures directory
fn default_fixtures_dir() -> PathBuf {
    PathBuf::from("basket-core/tests/fixtures/command_parsing/curated")
}

pub fn add(name: &str, dir: Option<&Path>, raw: &str) -> Result<()> {
    if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        bail!("Fixture name must be non-empty and use only letters, digits and underscores");
    }

    let dir = dir.map(PathBuf::from).unwrap_or_else(default_fixtures_dir);
    fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create {}", dir.display()))?;

    let path = dir.join(format!("{}.json", name));
    if path.exists() {
        bail!("Fixture {} already exists", path.display());
    }

    let case = TestCase {
        raw: raw.to_string(),
        expected: parse(raw),
    };
    let json = serde_json::to_string_pretty(&case)?;
    fs::write(&path, format!("{}\n", json))
        .with_context(|| format!("Failed to write {}", path.display()))?;

    println!("Wrote {}", path.display());
    println!("{}", json);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_writes_parsed_fixture() {
        let temp_dir = TempDir::new().unwrap();
        add("add_two_apples", Some(temp_dir.path()), "add 2 apples").unwrap();

        let written = fs::read_to_string(temp_dir.path().join("add_two_apples.json")).unwrap();
        let json: serde_json::Value = serde_json::from_str(&written).unwrap();
        assert_eq!(json["raw"], "add 2 apples");
        assert_eq!(
            json["expected"],
            serde_json::json!({"action": "add", "item": "apples", "qty": 2})
        );
    }

    #[test]
    fn test_rejects_existing_fixture() {
        let temp_dir = TempDir::new().unwrap();
        add("remove_milk", Some(temp_dir.path()), "remove milk").unwrap();

        let err = add("remove_milk", Some(temp_dir.path()), "delete milk").unwrap_err();
        assert!(err.to_string().contains("already exists"));

        let written = fs::read_to_string(temp_dir.path().join("remove_milk.json")).unwrap();
        assert!(written.contains("\"remove milk\""));
    }

    #[test]
    fn test_rejects_bad_names() {
        let temp_dir = TempDir::new().unwrap();
        for name in ["", "../escape", "has space", "dash-name"] {
            assert!(add(name, Some(temp_dir.path()), "add milk").is_err(), "{}", name);
        }
        assert_eq!(fs::read_dir(temp_dir.path()).unwrap().count(), 0);
    }
}
