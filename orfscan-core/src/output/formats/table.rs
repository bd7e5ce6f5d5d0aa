use std::io::Write;

use csv::WriterBuilder;

use crate::OrfError;
use crate::constants::ORF_TABLE_COLUMNS;
use crate::model::strand_symbol;
use crate::results::{OrfRecord, OrfTable};

const fn python_bool(value: bool) -> &'static str {
    if value { "True" } else { "False" }
}

fn record_fields(record: &OrfRecord) -> [String; 14] {
    [
        record.tfam.clone(),
        record.tid.clone(),
        record.tcoord.to_string(),
        record.tstop_or_zero().to_string(),
        record.chrom.clone(),
        record.gcoord.to_string(),
        record.gstop_or_zero().to_string(),
        strand_symbol(record.strand).to_string(),
        record.codon.clone(),
        record.aa_length.to_string(),
        record.orfname.clone(),
        python_bool(record.annot_start).to_string(),
        python_bool(record.annot_stop).to_string(),
        record.orftype.to_string(),
    ]
}

/// Write the ORF table as delimited text with a header line
pub fn write_table_format<W: Write>(
    writer: &mut W,
    table: &OrfTable,
    delimiter: u8,
) -> Result<(), OrfError> {
    let mut table_writer = WriterBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .from_writer(writer);

    table_writer.write_record(ORF_TABLE_COLUMNS)?;
    for record in table.records() {
        table_writer.write_record(record_fields(record))?;
    }
    table_writer.flush()?;
    Ok(())
}
