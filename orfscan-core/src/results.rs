use std::collections::{BTreeMap, HashSet};

use bio::bio_types::strand::Strand;

use crate::types::{GenomicCoord, OrfType};

/// One ORF as found on one transcript.
///
/// An ORF present on several transcripts of a family yields one record per
/// transcript; all of them share the same `orfname` and `orftype`.
///
/// # Examples
///
/// ```rust
/// # use bio::bio_types::strand::Strand;
/// # use orfscan_core::results::OrfRecord;
/// # use orfscan_core::types::OrfType;
/// let record = OrfRecord {
///     tfam: "fam1".to_string(),
///     tid: "tx1".to_string(),
///     tcoord: 12,
///     tstop: Some(165),
///     chrom: "chr1".to_string(),
///     gcoord: 1000,
///     gstop: Some(1153),
///     strand: Strand::Forward,
///     codon: "ATG".to_string(),
///     aa_length: 50,
///     orfname: "fam1_1000_50aa".to_string(),
///     annot_start: false,
///     annot_stop: false,
///     orftype: OrfType::New,
/// };
/// assert_eq!(record.tstop_or_zero(), 165);
/// assert!(record.has_stop());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct OrfRecord {
    /// Transcript family
    pub tfam: String,
    /// Transcript the ORF was found on
    pub tid: String,

    /// Transcript offset of the first start-codon base
    pub tcoord: usize,

    /// Transcript offset just past the stop codon.
    ///
    /// `None` if the reading frame runs off the transcript end.
    pub tstop: Option<usize>,

    pub chrom: String,

    /// Genomic position of the first start-codon base
    pub gcoord: GenomicCoord,

    /// Half-open genomic stop; `None` for nonstop ORFs
    pub gstop: Option<GenomicCoord>,

    pub strand: Strand,

    /// Start codon as it appears in the transcript
    pub codon: String,

    /// Amino acids excluding the stop codon; 0 for nonstop ORFs
    pub aa_length: usize,

    /// Family-unique ORF identifier
    pub orfname: String,

    /// Whether the start matches an annotated CDS start
    pub annot_start: bool,
    /// Whether the stop matches an annotated CDS stop
    pub annot_stop: bool,

    pub orftype: OrfType,
}

impl OrfRecord {
    #[must_use]
    pub const fn has_stop(&self) -> bool {
        self.tstop.is_some()
    }

    /// `tstop` as written to the ORF table
    #[must_use]
    pub fn tstop_or_zero(&self) -> usize {
        self.tstop.unwrap_or(0)
    }

    /// `gstop` as written to the ORF table
    #[must_use]
    pub fn gstop_or_zero(&self) -> GenomicCoord {
        self.gstop.unwrap_or(0)
    }
}

/// ORF records of a whole run, keyed by family id.
///
/// Family order is the sorted order of the ids; within a family, records
/// follow transcript order and then transcript offset.
#[derive(Debug, Default)]
pub struct OrfTable {
    pub families: BTreeMap<String, Vec<OrfRecord>>,
}

impl OrfTable {
    /// Total number of records
    #[must_use]
    pub fn len(&self) -> usize {
        self.families.values().map(Vec::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.families.values().all(Vec::is_empty)
    }

    /// Every record in output order
    pub fn records(&self) -> impl Iterator<Item = &OrfRecord> {
        self.families.values().flatten()
    }

    /// Number of distinct ORFs per type
    #[must_use]
    pub fn type_counts(&self) -> BTreeMap<OrfType, usize> {
        let mut counts = BTreeMap::new();
        for records in self.families.values() {
            let mut seen = HashSet::new();
            for record in records {
                if seen.insert(record.orfname.as_str()) {
                    *counts.entry(record.orftype).or_insert(0) += 1;
                }
            }
        }
        counts
    }
}

impl FromIterator<(String, Vec<OrfRecord>)> for OrfTable {
    fn from_iter<I: IntoIterator<Item = (String, Vec<OrfRecord>)>>(iter: I) -> Self {
        Self {
            families: iter.into_iter().collect(),
        }
    }
}
