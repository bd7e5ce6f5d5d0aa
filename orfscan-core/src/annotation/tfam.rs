use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::types::OrfError;

/// Transcript family id → member transcript ids, members in file order
pub type FamilyTable = BTreeMap<String, Vec<String>>;

/// Reads a `tid tfam` table.
///
/// The member order of each family follows the file; it decides which
/// transcript an ORF is first seen on and therefore its name suffix.
///
/// # Errors
///
/// Returns [`OrfError::ParseError`] for lines with fewer than two columns.
pub fn read_family_table<P: AsRef<Path>>(path: P) -> Result<FamilyTable, OrfError> {
    let reader = BufReader::new(File::open(path)?);
    let mut families = FamilyTable::new();

    for line in reader.lines() {
        let line = line?;
        let mut fields = line.split_whitespace();
        let Some(tid) = fields.next() else {
            continue;
        };
        let tfam = fields.next().ok_or_else(|| {
            OrfError::ParseError(format!("Expected 'tid tfam' in family table line: {line}"))
        })?;
        families
            .entry(tfam.to_string())
            .or_default()
            .push(tid.to_string());
    }

    Ok(families)
}
