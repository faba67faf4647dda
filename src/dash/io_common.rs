// Cell-level parsing shared by the table loaders.

use std::collections::HashMap;

use crate::dash::{DashError, DashResult};

/// The marker the source tables use for a missing value.
pub const NA: &str = "NA";

pub fn opt_text(s: &str) -> Option<String> {
    let t = s.trim();
    if t.is_empty() || t == NA {
        None
    } else {
        Some(t.to_string())
    }
}

pub fn opt_number(s: &str) -> Option<f64> {
    let t = s.trim();
    if t.is_empty() || t == NA {
        return None;
    }
    t.parse::<f64>().ok()
}

/// Checks that every required column is present in a header. This is the
/// only fatal schema condition: missing values inside the rows are fine,
/// missing columns are not.
pub fn check_columns(
    cols: &HashMap<String, usize>,
    required: &[&str],
    path: &str,
) -> DashResult<()> {
    for column in required {
        if !cols.contains_key(*column) {
            return Err(DashError::MissingColumn {
                column: (*column).to_string(),
                path: path.to_string(),
            });
        }
    }
    Ok(())
}
