use std::path::Path;

use ohp_core::{OhpError, OhpResult, Table};
use tracing::{debug, warn};

/// Read a comma-delimited file into a [`Table`].
///
/// The table is named after the file stem. Rows shorter than the header are
/// logged and kept unchanged.
pub fn load(path: &Path) -> OhpResult<Table> {
    let text = std::fs::read_to_string(path).map_err(|e| OhpError::io(path, e))?;
    let name = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    let table = Table::parse(name, &text);
    for (line, row) in table.short_rows() {
        warn!(
            "{}:{line}: malformed row, {} of {} fields",
            path.display(),
            row.len(),
            table.keys.len()
        );
    }
    debug!(
        "loaded {}: {} columns, {} rows",
        path.display(),
        table.keys.len(),
        table.values.len()
    );
    Ok(table)
}
