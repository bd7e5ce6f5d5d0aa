//! Writing the ORF table.
//!
//! The table has one row per ORF per transcript with the columns in
//! [`ORF_TABLE_COLUMNS`](crate::constants::ORF_TABLE_COLUMNS), preceded by a
//! header line. Booleans are written as `True`/`False` and the stop columns
//! of nonstop ORFs as `0`.
//!
//! ## Examples
//!
//! ```rust,no_run
//! use orfscan_core::{OrfAnalyzer, config::{InputPaths, OrfConfig, OutputFormat}};
//! use orfscan_core::output::{ensure_writable, write_results};
//! use std::fs::File;
//! use std::path::Path;
//!
//! let orfstore = Path::new("orfs.csv");
//! ensure_writable(orfstore, false)?;
//!
//! let analyzer = OrfAnalyzer::new(OrfConfig::default());
//! let table = analyzer.analyze(&InputPaths::new("genome.fa"))?;
//!
//! let mut output = File::create(orfstore)?;
//! write_results(&mut output, &table, OutputFormat::Csv)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::io::Write;
use std::path::Path;

use crate::{OrfError, config::OutputFormat, results::OrfTable};

mod formats {
    pub mod table;
}

use formats::table::write_table_format;

/// Writes the ORF table in the specified format.
///
/// # Errors
///
/// Returns [`OrfError`] if writing fails.
pub fn write_results<W: Write>(
    writer: &mut W,
    table: &OrfTable,
    format: OutputFormat,
) -> Result<(), OrfError> {
    match format {
        OutputFormat::Tsv => write_table_format(writer, table, b'\t'),
        OutputFormat::Csv => write_table_format(writer, table, b','),
    }
}

/// Refuses to go on if `path` exists and `force` is not set.
///
/// # Errors
///
/// Returns [`OrfError::OutputExists`] for an existing `path` without
/// `force`.
pub fn ensure_writable(path: &Path, force: bool) -> Result<(), OrfError> {
    if path.exists() && !force {
        return Err(OrfError::OutputExists(path.to_path_buf()));
    }
    Ok(())
}
