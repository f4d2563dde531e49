use std::path::{Path, PathBuf};

use ohp_core::{
    left_outer_join, linear_regression, JoinOperator, JoinOptions, OhpError, OhpResult,
    Regression, Table,
};
use tracing::{debug, info};

use crate::loader::load;
use crate::writer::{write, OutputLayout};

/// Where and how a join result is saved.
#[derive(Debug, Clone)]
pub struct SaveOptions {
    pub path: PathBuf,
    pub layout: OutputLayout,
    /// Create missing parent directories of `path` once the join succeeded.
    pub create_dirs: bool,
}

/// Load every file, left-join them on `on` and save the result.
///
/// Input count and operator are checked before anything is read. The merged
/// table is returned after it has been written.
pub fn join<P: AsRef<Path>>(
    csv_paths: &[P],
    on: &str,
    operator: &str,
    save: &SaveOptions,
    options: &JoinOptions,
) -> OhpResult<Table> {
    if csv_paths.len() < 2 {
        return Err(OhpError::InsufficientInputs {
            got: csv_paths.len(),
        });
    }
    let operator: JoinOperator = operator.parse()?;

    let tables = csv_paths
        .iter()
        .map(|p| load(p.as_ref()))
        .collect::<OhpResult<Vec<_>>>()?;

    for table in &tables[1..] {
        if !table.contains_key(on) {
            debug!("{}: no '{on}' column, contributes nothing", table.name);
        }
    }

    let merged = match operator {
        JoinOperator::Left => left_outer_join(&tables, on, options)?,
    };
    if save.create_dirs {
        create_parent(&save.path)?;
    }
    write(&save.path, &merged.to_rows(), save.layout)?;
    info!(
        "{operator} join on '{on}': {} rows written to {}",
        merged.values.len(),
        save.path.display()
    );
    Ok(merged)
}

fn create_parent(path: &Path) -> OhpResult<()> {
    match path.parent().filter(|p| !p.as_os_str().is_empty()) {
        Some(parent) => std::fs::create_dir_all(parent).map_err(|e| OhpError::io(parent, e)),
        None => Ok(()),
    }
}

/// Least-squares fit over a two-column `x,y` file.
pub fn lslr(csv_path: &Path) -> OhpResult<Regression> {
    let table = load(csv_path)?;
    let fit = linear_regression(&table)?;
    debug!("{}: {fit}", csv_path.display());
    Ok(fit)
}
