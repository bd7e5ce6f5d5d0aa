//! Transcript × family-position coverage bitmap.

use std::collections::HashMap;

use crate::model::SegmentChain;
use crate::types::{Footprint, GenomicCoord, OrfError};

#[inline]
const fn bit_position(column: usize) -> (usize, u8) {
    (column >> 3, 1 << (column & 0x07))
}

#[inline]
fn test_bit(row: &[u8], column: usize) -> bool {
    let (byte_index, bit_mask) = bit_position(column);
    (row[byte_index] & bit_mask) != 0
}

#[inline]
fn set_bit(row: &mut [u8], column: usize) {
    let (byte_index, bit_mask) = bit_position(column);
    row[byte_index] |= bit_mask;
}

/// Which family positions each member transcript covers.
///
/// Columns are the family's genomic positions in stranded order, rows the
/// member transcripts in family table order. A transcript's set bits, read
/// left to right, walk its exons 5′→3′, so an ORF's footprint is a slice of
/// those columns.
#[derive(Debug)]
pub struct CoverageMask {
    tfam: String,
    positions: Footprint,
    columns: HashMap<GenomicCoord, usize>,
    row_bytes: usize,
    rows: Vec<Vec<u8>>,
    row_index: HashMap<String, usize>,
}

impl CoverageMask {
    /// Empty mask over a family's positions
    pub fn new(family: &SegmentChain) -> Self {
        let positions = family.position_list();
        let columns = positions
            .iter()
            .enumerate()
            .map(|(column, &position)| (position, column))
            .collect();
        Self {
            tfam: family.name.clone(),
            row_bytes: positions.len().div_ceil(8),
            positions,
            columns,
            rows: Vec::new(),
            row_index: HashMap::new(),
        }
    }

    /// Family positions in stranded order
    pub fn positions(&self) -> &[GenomicCoord] {
        &self.positions
    }

    #[must_use]
    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    /// Adds a row for `transcript` and returns its index.
    ///
    /// # Errors
    ///
    /// Returns [`OrfError::InconsistentCoverage`] if the transcript covers
    /// positions outside the family.
    pub fn add_transcript(&mut self, transcript: &SegmentChain) -> Result<usize, OrfError> {
        let mut row = vec![0u8; self.row_bytes];
        let mut uncovered = 0;
        for position in transcript.position_list() {
            match self.columns.get(&position) {
                Some(&column) => set_bit(&mut row, column),
                None => uncovered += 1,
            }
        }
        if uncovered > 0 {
            return Err(OrfError::InconsistentCoverage {
                tfam: self.tfam.clone(),
                tid: transcript.name.clone(),
                uncovered,
            });
        }

        let index = self.rows.len();
        self.rows.push(row);
        self.row_index.insert(transcript.name.clone(), index);
        Ok(index)
    }

    /// Whether row `row` covers family column `column`
    #[must_use]
    pub fn is_covered(&self, row: usize, column: usize) -> bool {
        self.rows
            .get(row)
            .is_some_and(|bits| column < self.positions.len() && test_bit(bits, column))
    }

    /// Columns covered by a row, in stranded order
    pub fn covered_columns(&self, row: usize) -> impl Iterator<Item = usize> + '_ {
        (0..self.positions.len()).filter(move |&column| self.is_covered(row, column))
    }

    /// Genomic positions of transcript offsets `tcoord..tstop`.
    ///
    /// A missing `tstop` runs to the transcript end.
    ///
    /// # Errors
    ///
    /// Returns [`OrfError::MissingTranscript`] if `tid` has no row.
    pub fn footprint(
        &self,
        tid: &str,
        tcoord: usize,
        tstop: Option<usize>,
    ) -> Result<Footprint, OrfError> {
        let row = *self
            .row_index
            .get(tid)
            .ok_or_else(|| OrfError::MissingTranscript(tid.to_string()))?;
        let length = tstop.map_or(usize::MAX, |stop| stop.saturating_sub(tcoord));
        Ok(self
            .covered_columns(row)
            .skip(tcoord)
            .take(length)
            .map(|column| self.positions[column])
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Exon;
    use bio::bio_types::strand::Strand;

    fn chain(name: &str, strand: Strand, exons: &[(u64, u64)]) -> SegmentChain {
        SegmentChain::new(
            name,
            "chr1",
            strand,
            exons.iter().map(|&(s, e)| Exon::new(s, e)).collect(),
        )
    }

    #[test]
    fn test_bit_position() {
        assert_eq!(bit_position(0), (0, 1));
        assert_eq!(bit_position(7), (0, 128));
        assert_eq!(bit_position(8), (1, 1));
        assert_eq!(bit_position(17), (2, 2));
    }

    #[test]
    fn test_rows_mark_covered_columns() {
        let family = chain("fam1", Strand::Forward, &[(0, 20)]);
        let mut mask = CoverageMask::new(&family);
        let a = mask.add_transcript(&chain("a", Strand::Forward, &[(0, 5), (10, 12)])).unwrap();
        let b = mask.add_transcript(&chain("b", Strand::Forward, &[(15, 20)])).unwrap();

        assert_eq!(mask.num_rows(), 2);
        assert_eq!(
            mask.covered_columns(a).collect::<Vec<_>>(),
            vec![0, 1, 2, 3, 4, 10, 11]
        );
        assert!(mask.is_covered(b, 19));
        assert!(!mask.is_covered(b, 14));
        assert!(!mask.is_covered(b, 20));
        assert!(!mask.is_covered(5, 0));
    }

    #[test]
    fn test_footprint_crosses_introns() {
        let family = chain("fam1", Strand::Forward, &[(0, 20)]);
        let mut mask = CoverageMask::new(&family);
        mask.add_transcript(&chain("a", Strand::Forward, &[(0, 5), (10, 15)]))
            .unwrap();

        assert_eq!(mask.footprint("a", 3, Some(6)).unwrap(), vec![3, 4, 10]);
        assert_eq!(mask.footprint("a", 8, None).unwrap(), vec![13, 14]);
        assert!(matches!(
            mask.footprint("z", 0, None),
            Err(OrfError::MissingTranscript(_))
        ));
    }

    #[test]
    fn test_minus_strand_columns_run_downstream() {
        let family = chain("fam1", Strand::Reverse, &[(0, 10)]);
        let mut mask = CoverageMask::new(&family);
        mask.add_transcript(&chain("a", Strand::Reverse, &[(2, 8)]))
            .unwrap();

        assert_eq!(mask.positions()[0], 9);
        assert_eq!(mask.footprint("a", 0, Some(3)).unwrap(), vec![7, 6, 5]);
    }

    #[test]
    fn test_transcript_outside_family_is_rejected() {
        let family = chain("fam1", Strand::Forward, &[(0, 10)]);
        let mut mask = CoverageMask::new(&family);
        match mask.add_transcript(&chain("a", Strand::Forward, &[(5, 14)])) {
            Err(OrfError::InconsistentCoverage { tfam, tid, uncovered }) => {
                assert_eq!(tfam, "fam1");
                assert_eq!(tid, "a");
                assert_eq!(uncovered, 4);
            }
            other => panic!("Expected InconsistentCoverage, got {other:?}"),
        }
    }
}
