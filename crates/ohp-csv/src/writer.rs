//! Writes joined rows to disk.
//!
//! Output goes to a temporary sibling first and is renamed over the
//! destination, so a failed write never leaves a truncated file behind.

use std::fmt;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use ohp_core::{OhpError, OhpResult, Row};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputLayout {
    /// Fields separated by `,`, rows by `\n`.
    #[default]
    Csv,
    /// One field per line, row boundaries are lost.
    #[serde(alias = "flat")]
    Flattened,
}

impl fmt::Display for OutputLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Csv => write!(f, "csv"),
            Self::Flattened => write!(f, "flattened"),
        }
    }
}

/// Render rows as text. There is no trailing newline.
pub fn render(rows: &[Row], layout: OutputLayout) -> String {
    let sep = match layout {
        OutputLayout::Csv => ",",
        OutputLayout::Flattened => "\n",
    };
    rows.iter()
        .map(|row| row.join(sep))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Write rows to `path`, replacing any existing content.
pub fn write(path: &Path, rows: &[Row], layout: OutputLayout) -> OhpResult<()> {
    let tmp_path = tmp_path(path);
    let result = write_tmp(&tmp_path, &render(rows, layout))
        .and_then(|_| fs::rename(&tmp_path, path));

    if let Err(e) = result {
        let _ = fs::remove_file(&tmp_path);
        return Err(OhpError::io(path, e));
    }
    Ok(())
}

fn write_tmp(tmp_path: &Path, content: &str) -> std::io::Result<()> {
    let mut f = fs::File::create(tmp_path)?;
    f.write_all(content.as_bytes())?;
    f.sync_all()
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows() -> Vec<Row> {
        vec![
            vec!["a".into(), "b".into()],
            vec!["c".into(), "d".into()],
        ]
    }

    #[test]
    fn test_write_csv_layout() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        write(&path, &rows(), OutputLayout::Csv).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "a,b\nc,d");
    }

    #[test]
    fn test_write_flattened_layout() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        write(&path, &rows(), OutputLayout::Flattened).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "a\nb\nc\nd");
    }

    #[test]
    fn test_write_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        fs::write(&path, "old content that is longer than the new one").unwrap();
        write(&path, &[vec!["x".to_string()]], OutputLayout::Csv).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "x");
        assert!(!tmp_path(&path).exists());
    }

    #[test]
    fn test_write_into_missing_dir_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.csv");
        let err = write(&path, &rows(), OutputLayout::Csv).unwrap_err();
        assert!(matches!(err, OhpError::Io { .. }));
        assert!(!path.exists());
    }

    #[test]
    fn test_render_empty() {
        assert_eq!(render(&[], OutputLayout::Csv), "");
    }

    #[test]
    fn test_layout_display() {
        assert_eq!(OutputLayout::Csv.to_string(), "csv");
        assert_eq!(OutputLayout::Flattened.to_string(), "flattened");
    }
}
