//! Spliced genomic features and transcript ↔ genome coordinate mapping.
//!
//! A [`SegmentChain`] is an ordered set of exons on one chromosome and
//! strand, optionally carrying a CDS (the BED thick span). Transcripts,
//! transcript families and annotated CDSs are all segment chains.
//!
//! Transcript-local offsets count spliced bases from the 5′ end, so on the
//! minus strand offset 0 is the highest genomic position.

use bio::bio_types::strand::Strand;

use crate::types::{Footprint, GenomicCoord, OrfError};

/// Half-open genomic interval `[start, end)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Exon {
    pub start: u64,
    pub end: u64,
}

impl Exon {
    pub const fn new(start: u64, end: u64) -> Self {
        Self { start, end }
    }

    #[must_use]
    pub const fn len(&self) -> u64 {
        self.end.saturating_sub(self.start)
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// Whether the two intervals share at least one position
    #[must_use]
    pub const fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// Exons on one chromosome and strand, with an optional CDS.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentChain {
    /// Feature name (transcript or family id)
    pub name: String,
    pub chrom: String,
    pub strand: Strand,
    exons: Vec<Exon>,
    cds: Option<Exon>,
}

impl SegmentChain {
    /// Builds a chain; exons are sorted by position and empty ones dropped.
    pub fn new(
        name: impl Into<String>,
        chrom: impl Into<String>,
        strand: Strand,
        mut exons: Vec<Exon>,
    ) -> Self {
        exons.retain(|exon| !exon.is_empty());
        exons.sort_unstable();
        Self {
            name: name.into(),
            chrom: chrom.into(),
            strand,
            exons,
            cds: None,
        }
    }

    /// Attaches a CDS given as genomic thick start/end.
    ///
    /// An empty span (`thick_start == thick_end`) means no CDS.
    #[must_use]
    pub fn with_cds(mut self, thick_start: u64, thick_end: u64) -> Self {
        self.cds = (thick_end > thick_start).then(|| Exon::new(thick_start, thick_end));
        self
    }

    /// Exons in ascending genomic order, regardless of strand
    pub fn exons(&self) -> &[Exon] {
        &self.exons
    }

    /// Genomic CDS span, if annotated
    pub const fn cds(&self) -> Option<Exon> {
        self.cds
    }

    /// Number of spliced bases
    #[must_use]
    pub fn len(&self) -> usize {
        self.exons.iter().map(|exon| exon.len() as usize).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.exons.is_empty()
    }

    /// Leftmost and rightmost covered position (half-open)
    #[must_use]
    pub fn span(&self) -> Option<Exon> {
        Some(Exon::new(self.exons.first()?.start, self.exons.last()?.end))
    }

    /// Every covered genomic position, 5′→3′ on the chain's strand.
    #[must_use]
    pub fn position_list(&self) -> Footprint {
        let ascending = self
            .exons
            .iter()
            .flat_map(|exon| exon.start as GenomicCoord..exon.end as GenomicCoord);
        match self.strand {
            Strand::Reverse => {
                let mut positions: Footprint = ascending.collect();
                positions.reverse();
                positions
            }
            _ => ascending.collect(),
        }
    }

    /// Genomic position of a transcript-local offset.
    ///
    /// # Errors
    ///
    /// Returns [`OrfError::CoordinateOutOfRange`] if `offset` is not inside
    /// the chain.
    pub fn genomic_coordinate(&self, offset: usize) -> Result<GenomicCoord, OrfError> {
        let mut remaining = offset as u64;
        let exons: Box<dyn Iterator<Item = &Exon>> = match self.strand {
            Strand::Reverse => Box::new(self.exons.iter().rev()),
            _ => Box::new(self.exons.iter()),
        };

        for exon in exons {
            if remaining < exon.len() {
                let position = match self.strand {
                    Strand::Reverse => exon.end - 1 - remaining,
                    _ => exon.start + remaining,
                };
                return Ok(position as GenomicCoord);
            }
            remaining -= exon.len();
        }

        Err(OrfError::CoordinateOutOfRange {
            tid: self.name.clone(),
            offset,
            length: self.len(),
        })
    }

    /// Half-open genomic stop of a feature ending at transcript offset
    /// `stop` (exclusive).
    ///
    /// The last covered base is mapped and stepped one position further in
    /// the direction of transcription: +1 on the plus strand, -1 on the
    /// minus strand.
    ///
    /// # Errors
    ///
    /// Returns [`OrfError::CoordinateOutOfRange`] if `stop` is 0 or past
    /// the chain end.
    pub fn genomic_stop(&self, stop: usize) -> Result<GenomicCoord, OrfError> {
        let last = stop
            .checked_sub(1)
            .ok_or_else(|| OrfError::CoordinateOutOfRange {
                tid: self.name.clone(),
                offset: stop,
                length: self.len(),
            })?;
        Ok(self.genomic_coordinate(last)? + strand_step(self.strand))
    }

    /// Genomic positions of the CDS, 5′→3′ on the chain's strand
    #[must_use]
    pub fn cds_position_list(&self) -> Option<Footprint> {
        let cds = self.cds?;
        let cds_start = cds.start as GenomicCoord;
        let cds_end = cds.end as GenomicCoord;
        Some(
            self.position_list()
                .into_iter()
                .filter(|position| (cds_start..cds_end).contains(position))
                .collect(),
        )
    }

    /// Whether any exon of `self` shares a position with any exon of `other`
    /// on the same chromosome and strand.
    #[must_use]
    pub fn overlaps_exonically(&self, other: &Self) -> bool {
        self.chrom == other.chrom
            && self.strand == other.strand
            && self
                .exons
                .iter()
                .any(|exon| other.exons.iter().any(|theirs| exon.overlaps(theirs)))
    }
}

/// BED strand column symbol
#[must_use]
pub const fn strand_symbol(strand: Strand) -> char {
    match strand {
        Strand::Forward => '+',
        Strand::Reverse => '-',
        Strand::Unknown => '.',
    }
}

/// +1 on the plus strand, -1 on the minus strand
#[must_use]
pub const fn strand_step(strand: Strand) -> GenomicCoord {
    match strand {
        Strand::Reverse => -1,
        _ => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Two exons: [100, 105) and [110, 114); 9 spliced bases
    fn chain(strand: Strand) -> SegmentChain {
        SegmentChain::new(
            "tx1",
            "chr1",
            strand,
            vec![Exon::new(110, 114), Exon::new(100, 105)],
        )
    }

    #[test]
    fn test_exons_sorted_and_empty_dropped() {
        let tx = SegmentChain::new(
            "tx",
            "chr1",
            Strand::Forward,
            vec![Exon::new(50, 60), Exon::new(20, 20), Exon::new(10, 15)],
        );
        assert_eq!(tx.exons(), &[Exon::new(10, 15), Exon::new(50, 60)]);
        assert_eq!(tx.len(), 15);
        assert_eq!(tx.span(), Some(Exon::new(10, 60)));
    }

    #[test]
    fn test_position_list_plus() {
        assert_eq!(
            chain(Strand::Forward).position_list(),
            vec![100, 101, 102, 103, 104, 110, 111, 112, 113]
        );
    }

    #[test]
    fn test_position_list_minus() {
        assert_eq!(
            chain(Strand::Reverse).position_list(),
            vec![113, 112, 111, 110, 104, 103, 102, 101, 100]
        );
    }

    #[test]
    fn test_genomic_coordinate_matches_position_list() {
        for strand in [Strand::Forward, Strand::Reverse] {
            let tx = chain(strand);
            let positions = tx.position_list();
            for (offset, position) in positions.iter().enumerate() {
                assert_eq!(tx.genomic_coordinate(offset).unwrap(), *position);
            }
            assert!(matches!(
                tx.genomic_coordinate(9),
                Err(OrfError::CoordinateOutOfRange { offset: 9, .. })
            ));
        }
    }

    #[test]
    fn test_genomic_stop_is_half_open_on_both_strands() {
        // Stop after offset 5: last base is offset 4
        assert_eq!(chain(Strand::Forward).genomic_stop(5).unwrap(), 105);
        assert_eq!(chain(Strand::Reverse).genomic_stop(5).unwrap(), 103);
        assert!(chain(Strand::Forward).genomic_stop(0).is_err());
    }

    #[test]
    fn test_cds_positions_plus() {
        let tx = chain(Strand::Forward).with_cds(102, 112);
        assert_eq!(tx.cds_position_list(), Some(vec![102, 103, 104, 110, 111]));
    }

    #[test]
    fn test_cds_positions_minus() {
        let tx = chain(Strand::Reverse).with_cds(102, 112);
        assert_eq!(tx.cds_position_list(), Some(vec![111, 110, 104, 103, 102]));
        assert_eq!(tx.genomic_coordinate(2).unwrap(), 111);
    }

    #[test]
    fn test_empty_thick_span_is_no_cds() {
        let tx = chain(Strand::Forward).with_cds(105, 105);
        assert_eq!(tx.cds(), None);
        assert_eq!(tx.cds_position_list(), None);
    }

    #[test]
    fn test_overlaps_exonically_ignores_introns() {
        let tx = chain(Strand::Forward);
        let in_intron =
            SegmentChain::new("a", "chr1", Strand::Forward, vec![Exon::new(105, 110)]);
        let in_exon = SegmentChain::new("b", "chr1", Strand::Forward, vec![Exon::new(104, 106)]);
        let other_strand =
            SegmentChain::new("c", "chr1", Strand::Reverse, vec![Exon::new(104, 106)]);
        assert!(!tx.overlaps_exonically(&in_intron));
        assert!(tx.overlaps_exonically(&in_exon));
        assert!(!tx.overlaps_exonically(&other_strand));
    }
}
