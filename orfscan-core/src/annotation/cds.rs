//! Annotated coding sequences of one transcript family.

use std::collections::{BTreeSet, HashSet};

use crate::constants::CODON_LENGTH;
use crate::model::{SegmentChain, strand_step};
use crate::types::{Footprint, GenomicCoord};

/// Genomic positions of one codon, 5′→3′
pub type CodonPositions = [GenomicCoord; CODON_LENGTH];

/// One annotated CDS as seen from a transcript family.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotatedCds {
    /// Index of the annotation source the CDS came from
    pub source: usize,
    /// Annotating transcript
    pub tid: String,
    /// First position of the start codon
    pub gcoord: GenomicCoord,
    /// Half-open genomic stop, one past the stop codon on the CDS strand
    pub gstop: GenomicCoord,
    /// Amino acids, excluding the stop codon
    pub aa_length: usize,
    /// CDS positions in stranded order
    pub footprint: Footprint,
    pub positions: BTreeSet<GenomicCoord>,
    /// Whether every CDS position lies inside the family
    pub in_tfam: bool,
}

impl AnnotatedCds {
    /// Builds the CDS of an annotating transcript.
    ///
    /// Returns `None` when the transcript has no CDS or the CDS length is
    /// not a multiple of three.
    pub fn from_chain(
        source: usize,
        chain: &SegmentChain,
        family_positions: &HashSet<GenomicCoord>,
    ) -> Option<Self> {
        let footprint = chain.cds_position_list()?;
        if footprint.is_empty() || footprint.len() % CODON_LENGTH != 0 {
            return None;
        }

        let gcoord = *footprint.first()?;
        let gstop = *footprint.last()? + strand_step(chain.strand);
        let positions: BTreeSet<GenomicCoord> = footprint.iter().copied().collect();
        let in_tfam = positions
            .iter()
            .all(|position| family_positions.contains(position));

        Some(Self {
            source,
            tid: chain.name.clone(),
            gcoord,
            gstop,
            aa_length: (footprint.len() - CODON_LENGTH) / CODON_LENGTH,
            footprint,
            positions,
            in_tfam,
        })
    }

    /// Same start, stop, length, family membership and positions.
    ///
    /// Source and transcript are ignored: one CDS annotated on several
    /// transcripts or in several sources counts once.
    #[must_use]
    pub fn same_cds(&self, other: &Self) -> bool {
        self.gcoord == other.gcoord
            && self.gstop == other.gstop
            && self.aa_length == other.aa_length
            && self.in_tfam == other.in_tfam
            && self.positions == other.positions
    }

    /// Codons in reading order
    pub fn codons(&self) -> impl Iterator<Item = CodonPositions> + '_ {
        self.footprint
            .chunks_exact(CODON_LENGTH)
            .map(|codon| [codon[0], codon[1], codon[2]])
    }
}

/// Deduplicated CDSs of a family with lookups used by the classifier.
#[derive(Debug, Default)]
pub struct CdsSet {
    entries: Vec<AnnotatedCds>,
    starts: HashSet<GenomicCoord>,
    stops: HashSet<GenomicCoord>,
    positions: HashSet<GenomicCoord>,
    codons: HashSet<CodonPositions>,
}

impl CdsSet {
    pub fn new(cds: impl IntoIterator<Item = AnnotatedCds>) -> Self {
        let mut set = Self::default();
        for entry in cds {
            set.insert(entry);
        }
        set
    }

    /// Adds a CDS unless an identical one is already present.
    pub fn insert(&mut self, cds: AnnotatedCds) -> bool {
        if self.entries.iter().any(|kept| kept.same_cds(&cds)) {
            return false;
        }
        self.starts.insert(cds.gcoord);
        self.stops.insert(cds.gstop);
        self.positions.extend(cds.positions.iter().copied());
        self.codons.extend(cds.codons());
        self.entries.push(cds);
        true
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, AnnotatedCds> {
        self.entries.iter()
    }

    /// Whether any CDS starts at `gcoord`
    #[must_use]
    pub fn is_annotated_start(&self, gcoord: GenomicCoord) -> bool {
        self.starts.contains(&gcoord)
    }

    /// Whether any CDS stops at `gstop`
    #[must_use]
    pub fn is_annotated_stop(&self, gstop: GenomicCoord) -> bool {
        self.stops.contains(&gstop)
    }

    /// Whether any CDS covers one of the positions
    pub fn overlaps<'a>(&self, positions: impl IntoIterator<Item = &'a GenomicCoord>) -> bool {
        positions
            .into_iter()
            .any(|position| self.positions.contains(position))
    }

    /// Whether a footprint shares a whole in-frame codon with any CDS
    #[must_use]
    pub fn shares_codon(&self, footprint: &[GenomicCoord]) -> bool {
        footprint
            .chunks_exact(CODON_LENGTH)
            .any(|codon| self.codons.contains(&[codon[0], codon[1], codon[2]]))
    }
}

impl<'a> IntoIterator for &'a CdsSet {
    type Item = &'a AnnotatedCds;
    type IntoIter = std::slice::Iter<'a, AnnotatedCds>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
