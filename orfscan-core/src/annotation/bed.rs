//! BED6/BED12 reading into [`SegmentChain`]s.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use bio::bio_types::strand::Strand;

use crate::model::{Exon, SegmentChain};
use crate::types::OrfError;

const MIN_BED_FIELDS: usize = 6;
const BED12_FIELDS: usize = 12;

/// Transcript id → chain
pub type ChainIndex = HashMap<String, SegmentChain>;

fn parse_field<T: std::str::FromStr>(field: &str, what: &str, line: &str) -> Result<T, OrfError> {
    field
        .parse()
        .map_err(|_| OrfError::ParseError(format!("Cannot parse {what} '{field}' in: {line}")))
}

fn parse_list(field: &str, what: &str, line: &str) -> Result<Vec<u64>, OrfError> {
    field
        .split(',')
        .filter(|value| !value.is_empty())
        .map(|value| parse_field(value, what, line))
        .collect()
}

fn parse_strand(field: &str) -> Strand {
    match field {
        "+" => Strand::Forward,
        "-" => Strand::Reverse,
        _ => Strand::Unknown,
    }
}

/// Whether a line carries no record (blank, comment, track or browser line)
fn is_header(line: &str) -> bool {
    let line = line.trim_start();
    line.is_empty()
        || line.starts_with('#')
        || line.starts_with("track")
        || line.starts_with("browser")
}

/// Parses one BED line with at least six columns.
///
/// BED12 lines contribute their blocks as exons and their thick span as
/// the CDS; shorter lines are a single exon without CDS unless thick
/// columns are present.
///
/// # Errors
///
/// Returns [`OrfError::ParseError`] if a column is missing or not numeric,
/// or if the block lists disagree with the block count.
pub fn parse_bed_line(line: &str) -> Result<SegmentChain, OrfError> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() < MIN_BED_FIELDS {
        return Err(OrfError::ParseError(format!(
            "Expected at least {MIN_BED_FIELDS} BED columns in: {line}"
        )));
    }

    let chrom = fields[0];
    let chrom_start: u64 = parse_field(fields[1], "chromStart", line)?;
    let chrom_end: u64 = parse_field(fields[2], "chromEnd", line)?;
    let name = fields[3];
    let strand = parse_strand(fields[5]);

    let exons = if fields.len() >= BED12_FIELDS {
        let block_count: usize = parse_field(fields[9], "blockCount", line)?;
        let sizes = parse_list(fields[10], "blockSizes", line)?;
        let starts = parse_list(fields[11], "blockStarts", line)?;
        if sizes.len() != block_count || starts.len() != block_count {
            return Err(OrfError::ParseError(format!(
                "blockCount {block_count} does not match block lists in: {line}"
            )));
        }
        starts
            .iter()
            .zip(&sizes)
            .map(|(start, size)| Exon::new(chrom_start + start, chrom_start + start + size))
            .collect()
    } else {
        vec![Exon::new(chrom_start, chrom_end)]
    };

    let chain = SegmentChain::new(name, chrom, strand, exons);
    if fields.len() >= 8 {
        let thick_start = parse_field(fields[6], "thickStart", line)?;
        let thick_end = parse_field(fields[7], "thickEnd", line)?;
        Ok(chain.with_cds(thick_start, thick_end))
    } else {
        Ok(chain)
    }
}

/// Reads every record of a BED file, in file order.
///
/// # Errors
///
/// Returns [`OrfError::IoError`] if the file cannot be read and
/// [`OrfError::ParseError`] for malformed records.
pub fn read_bed<P: AsRef<Path>>(path: P) -> Result<Vec<SegmentChain>, OrfError> {
    let reader = BufReader::new(File::open(path)?);
    let mut chains = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if is_header(&line) {
            continue;
        }
        chains.push(parse_bed_line(&line)?);
    }
    Ok(chains)
}

/// Reads a BED file keyed by record name; later duplicates win.
pub fn read_bed_index<P: AsRef<Path>>(path: P) -> Result<ChainIndex, OrfError> {
    Ok(read_bed(path)?
        .into_iter()
        .map(|chain| (chain.name.clone(), chain))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_bed12_blocks_and_cds() {
        let chain =
            parse_bed_line("chr1\t100\t200\ttx1\t0\t+\t110\t190\t0\t2\t30,40,\t0,60,").unwrap();
        assert_eq!(chain.name, "tx1");
        assert_eq!(chain.chrom, "chr1");
        assert_eq!(chain.strand, Strand::Forward);
        assert_eq!(chain.exons(), &[Exon::new(100, 130), Exon::new(160, 200)]);
        assert_eq!(chain.cds(), Some(Exon::new(110, 190)));
    }

    #[test]
    fn test_parse_bed6_single_exon() {
        let chain = parse_bed_line("chr2 5 25 tx2 0 -").unwrap();
        assert_eq!(chain.strand, Strand::Reverse);
        assert_eq!(chain.exons(), &[Exon::new(5, 25)]);
        assert_eq!(chain.cds(), None);
    }

    #[test]
    fn test_parse_noncoding_bed12() {
        let chain =
            parse_bed_line("chr1\t100\t200\tnc1\t0\t+\t200\t200\t0\t1\t100,\t0,").unwrap();
        assert_eq!(chain.cds(), None);
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            parse_bed_line("chr1\t1\t2\ttx"),
            Err(OrfError::ParseError(_))
        ));
        assert!(matches!(
            parse_bed_line("chr1\tone\t2\ttx\t0\t+"),
            Err(OrfError::ParseError(_))
        ));
        assert!(matches!(
            parse_bed_line("chr1\t0\t10\ttx\t0\t+\t0\t10\t0\t2\t5,\t0,"),
            Err(OrfError::ParseError(_))
        ));
    }

    #[test]
    fn test_read_bed_skips_headers() {
        let tmp = NamedTempFile::new().unwrap();
        fs::write(
            tmp.path(),
            "track name=test\n# comment\n\nchr1\t0\t10\ttxA\t0\t+\nchr1\t20\t30\ttxB\t0\t-\n",
        )
        .unwrap();

        let chains = read_bed(tmp.path()).unwrap();
        assert_eq!(chains.len(), 2);
        assert_eq!(chains[0].name, "txA");

        let index = read_bed_index(tmp.path()).unwrap();
        assert_eq!(index["txB"].strand, Strand::Reverse);
    }
}
