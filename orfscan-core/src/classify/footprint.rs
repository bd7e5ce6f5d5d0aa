use std::collections::hash_map::Entry;
use std::collections::{BTreeSet, HashMap};

use crate::family::CoverageMask;
use crate::results::OrfRecord;
use crate::types::{Footprint, GenomicCoord, OrfError};

/// Genomic positions of one ORF, ordered and as a set.
#[derive(Debug, Clone)]
pub struct OrfFootprint {
    pub ordered: Footprint,
    pub positions: BTreeSet<GenomicCoord>,
}

impl OrfFootprint {
    pub fn new(ordered: Footprint) -> Self {
        let positions = ordered.iter().copied().collect();
        Self { ordered, positions }
    }

    pub fn contains(&self, position: GenomicCoord) -> bool {
        self.positions.contains(&position)
    }
}

/// Footprints of a family's ORFs, computed on first use.
///
/// Keyed by ORF name; the footprint is taken from the record passed on the
/// first lookup, which is fine because equal names imply equal footprints.
#[derive(Debug)]
pub struct FootprintCache<'a> {
    mask: &'a CoverageMask,
    entries: HashMap<String, OrfFootprint>,
}

impl<'a> FootprintCache<'a> {
    pub fn new(mask: &'a CoverageMask) -> Self {
        Self {
            mask,
            entries: HashMap::new(),
        }
    }

    pub fn get(&mut self, record: &OrfRecord) -> Result<&OrfFootprint, OrfError> {
        match self.entries.entry(record.orfname.clone()) {
            Entry::Occupied(entry) => Ok(entry.into_mut()),
            Entry::Vacant(entry) => {
                let ordered = self
                    .mask
                    .footprint(&record.tid, record.tcoord, record.tstop)?;
                Ok(entry.insert(OrfFootprint::new(ordered)))
            }
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Exon, SegmentChain};
    use crate::types::OrfType;
    use bio::bio_types::strand::Strand;

    fn record(tid: &str, tcoord: usize, tstop: Option<usize>, orfname: &str) -> OrfRecord {
        OrfRecord {
            tfam: "fam1".to_string(),
            tid: tid.to_string(),
            tcoord,
            tstop,
            chrom: "chr1".to_string(),
            gcoord: 0,
            gstop: None,
            strand: Strand::Reverse,
            codon: "ATG".to_string(),
            aa_length: 0,
            orfname: orfname.to_string(),
            annot_start: false,
            annot_stop: false,
            orftype: OrfType::New,
        }
    }

    #[test]
    fn test_footprints_are_stranded_and_cached_by_name() {
        let family = SegmentChain::new("fam1", "chr1", Strand::Reverse, vec![Exon::new(0, 20)]);
        let tx = SegmentChain::new(
            "tx1",
            "chr1",
            Strand::Reverse,
            vec![Exon::new(0, 5), Exon::new(10, 20)],
        );
        let mut mask = CoverageMask::new(&family);
        mask.add_transcript(&tx).unwrap();

        let mut cache = FootprintCache::new(&mask);
        assert!(cache.is_empty());

        // Offsets 8..14 of tx1 cross the intron between 10 and 5
        let footprint = cache.get(&record("tx1", 8, Some(14), "orf_a")).unwrap();
        assert_eq!(footprint.ordered, vec![11, 10, 4, 3, 2, 1]);
        assert!(footprint.contains(4));
        assert!(!footprint.contains(7));

        let nonstop = cache.get(&record("tx1", 12, None, "orf_b")).unwrap();
        assert_eq!(nonstop.ordered, vec![2, 1, 0]);

        cache.get(&record("tx1", 8, Some(14), "orf_a")).unwrap();
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_unknown_transcript() {
        let family = SegmentChain::new("fam1", "chr1", Strand::Forward, vec![Exon::new(0, 20)]);
        let mask = CoverageMask::new(&family);
        let mut cache = FootprintCache::new(&mask);
        assert!(matches!(
            cache.get(&record("tx9", 0, Some(3), "orf_a")),
            Err(OrfError::MissingTranscript(_))
        ));
    }
}
