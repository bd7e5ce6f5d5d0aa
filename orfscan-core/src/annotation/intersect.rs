//! Assignment of extra CDS transcripts to transcript families.

use std::collections::HashMap;

use crate::model::{Exon, SegmentChain, strand_symbol};

/// Chromosome and strand symbol
type BinKey<'a> = (&'a str, char);

/// Families on one chromosome and strand, sorted by span start.
struct StrandBin<'a> {
    spans: Vec<(Exon, &'a SegmentChain)>,
    /// Running maximum of span ends, so a backwards scan can stop early
    max_end: Vec<u64>,
}

impl<'a> StrandBin<'a> {
    fn new(mut spans: Vec<(Exon, &'a SegmentChain)>) -> Self {
        spans.sort_by_key(|(span, _)| (span.start, span.end));
        let max_end = spans
            .iter()
            .scan(0, |running, (span, _)| {
                *running = (*running).max(span.end);
                Some(*running)
            })
            .collect();
        Self { spans, max_end }
    }

    /// Families whose span overlaps `query`
    fn overlapping(&self, query: Exon) -> impl Iterator<Item = &'a SegmentChain> + '_ {
        let upper = self.spans.partition_point(|(span, _)| span.start < query.end);
        (0..upper)
            .rev()
            .take_while(move |&index| self.max_end[index] > query.start)
            .filter(move |&index| self.spans[index].0.end > query.start)
            .map(move |index| self.spans[index].1)
    }
}

/// Maps each family to the CDS transcripts sharing an exonic position with it.
///
/// Only same-strand, same-chromosome overlaps count, and overlap is
/// evaluated exon by exon so a CDS lying entirely in a family intron is
/// not assigned. Transcript ids keep the order of `cds_records` and each
/// appears once per family.
///
/// # Examples
///
/// ```rust
/// use bio::bio_types::strand::Strand;
/// use orfscan_core::annotation::intersect::assign_to_families;
/// use orfscan_core::model::{Exon, SegmentChain};
///
/// let family = SegmentChain::new("fam1", "chr1", Strand::Forward, vec![Exon::new(0, 100)]);
/// let cds = SegmentChain::new("extra1", "chr1", Strand::Forward, vec![Exon::new(90, 150)]);
///
/// let assigned = assign_to_families([&family], &[cds]);
/// assert_eq!(assigned["fam1"], vec!["extra1".to_string()]);
/// ```
pub fn assign_to_families<'a>(
    families: impl IntoIterator<Item = &'a SegmentChain>,
    cds_records: &[SegmentChain],
) -> HashMap<String, Vec<String>> {
    let mut grouped: HashMap<BinKey, Vec<(Exon, &SegmentChain)>> = HashMap::new();
    for family in families {
        if let Some(span) = family.span() {
            grouped
                .entry((family.chrom.as_str(), strand_symbol(family.strand)))
                .or_default()
                .push((span, family));
        }
    }
    let bins: HashMap<BinKey, StrandBin> = grouped
        .into_iter()
        .map(|(key, spans)| (key, StrandBin::new(spans)))
        .collect();

    let mut assigned: HashMap<String, Vec<String>> = HashMap::new();
    for record in cds_records {
        let (Some(span), Some(bin)) = (
            record.span(),
            bins.get(&(record.chrom.as_str(), strand_symbol(record.strand))),
        ) else {
            continue;
        };

        for family in bin.overlapping(span) {
            if !family.overlaps_exonically(record) {
                continue;
            }
            let tids = assigned.entry(family.name.clone()).or_default();
            if !tids.contains(&record.name) {
                tids.push(record.name.clone());
            }
        }
    }
    assigned
}
