//! ORF type assignment.
//!
//! Each distinct ORF of a family (one `orfname`) carries one [`OrfType`].
//! All stopped ORFs start as [`OrfType::New`] and a fixed sequence of rules
//! relabels them; a rule only looks at ORFs that are still `new`, and an
//! ORF keeps the first label it receives. The last rule labels everything
//! left, so no ORF of an annotated family stays `new`.
//!
//! Several rules compare an ORF with annotated ORFs on the same
//! transcript, using transcript offsets. When extra CDS annotations are
//! supplied, the CDS behind a truncation, internal or overlapping ORF may
//! not be on any transcript of the family, so those rules fall back to
//! comparing genomic positions with every annotated CDS.

pub mod footprint;
pub mod orientation;

use std::collections::HashMap;

use crate::annotation::CdsSet;
use crate::family::CoverageMask;
use crate::results::OrfRecord;
use crate::types::{OrfError, OrfType};

pub use footprint::{FootprintCache, OrfFootprint};
pub use orientation::Orientation;

/// Labels every record of a family.
///
/// Sets `annot_start`, `annot_stop` and `orftype` on every record. With an
/// empty `cds` set the records are left as they are. `check_unfound`
/// enables the genomic fallbacks for CDSs outside the transcriptome.
///
/// # Errors
///
/// Returns [`OrfError::MissingTranscript`] if a record's transcript has no
/// row in `mask`.
pub fn classify_family(
    records: &mut [OrfRecord],
    mask: &CoverageMask,
    cds: &CdsSet,
    check_unfound: bool,
) -> Result<(), OrfError> {
    if cds.is_empty() || records.is_empty() {
        return Ok(());
    }

    for record in records.iter_mut() {
        record.annot_start = cds.is_annotated_start(record.gcoord);
        record.annot_stop = record
            .gstop
            .is_some_and(|gstop| cds.is_annotated_stop(gstop));
    }

    let row_types = {
        let mut cascade = Cascade::new(records, mask, cds, check_unfound);
        cascade.run()?;
        cascade.row_types()
    };
    for (record, orftype) in records.iter_mut().zip(row_types) {
        record.orftype = orftype;
    }
    Ok(())
}

/// `tstop` of a stopped ORF; nonstop ORFs never reach the positional rules
fn stop(record: &OrfRecord) -> usize {
    record.tstop_or_zero()
}

struct Cascade<'a> {
    records: &'a [OrfRecord],
    /// Rows of each distinct ORF, in record order
    orfs: Vec<Vec<usize>>,
    tags: Vec<OrfType>,
    annotated_rows: Vec<usize>,
    footprints: FootprintCache<'a>,
    cds: &'a CdsSet,
    orientation: Orientation,
    check_unfound: bool,
}

impl<'a> Cascade<'a> {
    fn new(
        records: &'a [OrfRecord],
        mask: &'a CoverageMask,
        cds: &'a CdsSet,
        check_unfound: bool,
    ) -> Self {
        let mut index: HashMap<&str, usize> = HashMap::new();
        let mut orfs: Vec<Vec<usize>> = Vec::new();
        let mut tags = Vec::new();
        for (row, record) in records.iter().enumerate() {
            let orf = *index.entry(record.orfname.as_str()).or_insert_with(|| {
                orfs.push(Vec::new());
                tags.push(record.orftype);
                orfs.len() - 1
            });
            orfs[orf].push(row);
        }

        Self {
            records,
            orfs,
            tags,
            annotated_rows: Vec::new(),
            footprints: FootprintCache::new(mask),
            cds,
            orientation: Orientation::new(records[0].strand),
            check_unfound,
        }
    }

    fn first(&self, orf: usize) -> &'a OrfRecord {
        &self.records[self.orfs[orf][0]]
    }

    fn new_orfs(&self) -> Vec<usize> {
        (0..self.orfs.len())
            .filter(|&orf| self.tags[orf].is_new())
            .collect()
    }

    /// Labels every still-new ORF satisfying `predicate`.
    ///
    /// The predicate sees the labels as they were before the rule started.
    fn relabel<F>(&mut self, orftype: OrfType, mut predicate: F) -> Result<(), OrfError>
    where
        F: FnMut(&mut Self, usize) -> Result<bool, OrfError>,
    {
        let mut hits = Vec::new();
        for orf in self.new_orfs() {
            if predicate(self, orf)? {
                hits.push(orf);
            }
        }
        for orf in hits {
            self.tags[orf] = orftype;
        }
        Ok(())
    }

    /// Whether any row of `orf` relates to an annotated row of the same
    /// transcript as `related` requires
    fn same_transcript(&self, orf: usize, related: impl Fn(&OrfRecord, &OrfRecord) -> bool) -> bool {
        self.orfs[orf].iter().any(|&row| {
            let record = &self.records[row];
            self.annotated_rows.iter().any(|&annotated_row| {
                let annotated = &self.records[annotated_row];
                annotated.tid == record.tid && related(record, annotated)
            })
        })
    }

    fn run(&mut self) -> Result<(), OrfError> {
        self.annotated_and_exact_isoforms()?;

        self.relabel(OrfType::Siso, |cascade, orf| {
            let record = cascade.first(orf);
            Ok(record.annot_start && record.annot_stop)
        })?;
        self.relabel(OrfType::Ciso, |cascade, orf| Ok(cascade.first(orf).annot_start))?;

        self.relabel(OrfType::Truncation, |cascade, orf| {
            Ok(cascade.same_transcript(orf, |record, annotated| {
                record.tstop == annotated.tstop && record.tcoord > annotated.tcoord
            }))
        })?;
        if self.check_unfound {
            self.relabel(OrfType::Truncation, Self::is_unfound_truncation)?;
        }

        // Same stop on the same transcript and not downstream: upstream
        self.relabel(OrfType::Extension, |cascade, orf| {
            Ok(cascade.same_transcript(orf, |record, annotated| {
                record.tstop == annotated.tstop
            }))
        })?;

        self.relabel(OrfType::Niso, |cascade, orf| Ok(cascade.first(orf).annot_stop))?;

        self.relabel(OrfType::NCiso, |cascade, orf| {
            let record = cascade.first(orf);
            let footprint = cascade.footprints.get(record)?;
            Ok(cascade.cds.shares_codon(&footprint.ordered))
        })?;

        self.relabel(OrfType::Internal, |cascade, orf| {
            Ok(cascade.same_transcript(orf, |record, annotated| {
                record.tcoord > annotated.tcoord && stop(record) < stop(annotated)
            }))
        })?;
        if self.check_unfound {
            self.relabel(OrfType::Internal, Self::is_unfound_internal)?;
        }

        self.relabel(OrfType::StopOverlap, |cascade, orf| {
            Ok(cascade.same_transcript(orf, |record, annotated| {
                record.tcoord > annotated.tcoord && record.tcoord < stop(annotated)
            }))
        })?;
        if self.check_unfound {
            self.relabel(OrfType::StopOverlap, Self::is_unfound_stop_overlap)?;
        }

        self.relabel(OrfType::StartOverlap, |cascade, orf| {
            Ok(cascade.same_transcript(orf, |record, annotated| {
                stop(record) > annotated.tcoord && stop(record) < stop(annotated)
            }))
        })?;
        if self.check_unfound {
            self.relabel(OrfType::StartOverlap, Self::is_unfound_start_overlap)?;
        }

        self.relabel(OrfType::Loof, |cascade, orf| {
            Ok(cascade.same_transcript(orf, |record, annotated| {
                record.tcoord < annotated.tcoord && stop(record) > stop(annotated)
            }))
        })?;
        self.relabel(OrfType::Upstream, |cascade, orf| {
            Ok(cascade.same_transcript(orf, |record, annotated| {
                stop(record) <= annotated.tcoord
            }))
        })?;
        self.relabel(OrfType::Downstream, |cascade, orf| {
            Ok(cascade.same_transcript(orf, |record, annotated| {
                stop(annotated) <= record.tcoord
            }))
        })?;

        for orf in self.new_orfs() {
            let record = self.first(orf);
            let footprint = self.footprints.get(record)?;
            self.tags[orf] = if self.cds.overlaps(&footprint.ordered) {
                OrfType::Giso
            } else {
                OrfType::NewIso
            };
        }

        debug_assert!(self.tags.iter().all(|orftype| !orftype.is_new()));
        Ok(())
    }

    /// Exact start/stop matches: `annotated` when the ORF contains an
    /// in-family CDS of the same length, `Xiso` otherwise.
    fn annotated_and_exact_isoforms(&mut self) -> Result<(), OrfError> {
        let cds_set = self.cds;
        for orf in self.new_orfs() {
            let record = self.first(orf);
            let Some(gstop) = record.gstop else {
                continue;
            };
            let mut matching = cds_set
                .iter()
                .filter(|cds| {
                    cds.in_tfam
                        && cds.gcoord == record.gcoord
                        && cds.gstop == gstop
                        && cds.aa_length == record.aa_length
                })
                .peekable();
            if matching.peek().is_none() {
                continue;
            }

            let footprint = self.footprints.get(record)?;
            self.tags[orf] = if matching.any(|cds| cds.positions.is_subset(&footprint.positions)) {
                OrfType::Annotated
            } else {
                OrfType::Xiso
            };
        }

        self.relabel(OrfType::Xiso, |cascade, orf| {
            let record = cascade.first(orf);
            Ok(record.gstop.is_some_and(|gstop| {
                cascade
                    .cds
                    .iter()
                    .any(|cds| cds.gcoord == record.gcoord && cds.gstop == gstop)
            }))
        })?;

        self.annotated_rows = self
            .orfs
            .iter()
            .zip(&self.tags)
            .filter(|(_, orftype)| **orftype == OrfType::Annotated)
            .flat_map(|(rows, _)| rows.iter().copied())
            .collect();
        Ok(())
    }

    /// Same stop as a longer CDS that contains the ORF and is covered by it
    /// from the ORF start onwards.
    fn is_unfound_truncation(&mut self, orf: usize) -> Result<bool, OrfError> {
        let record = self.first(orf);
        let Some(gstop) = record.gstop else {
            return Ok(false);
        };
        let orientation = self.orientation;
        let footprint = self.footprints.get(record)?;

        Ok(self
            .cds
            .iter()
            .filter(|cds| cds.gstop == gstop && record.aa_length < cds.aa_length)
            .any(|cds| {
                cds.positions.is_superset(&footprint.positions)
                    && cds
                        .positions
                        .iter()
                        .filter(|&&position| !orientation.upstream_of(position, record.gcoord))
                        .all(|&position| footprint.contains(position))
            }))
    }

    /// Inside a CDS that starts upstream and stops downstream, covering
    /// every CDS position between the ORF start and stop.
    fn is_unfound_internal(&mut self, orf: usize) -> Result<bool, OrfError> {
        let record = self.first(orf);
        let Some(gstop) = record.gstop else {
            return Ok(false);
        };
        let orientation = self.orientation;
        let footprint = self.footprints.get(record)?;

        Ok(self
            .cds
            .iter()
            .filter(|cds| {
                orientation.upstream_of(cds.gcoord, record.gcoord)
                    && orientation.upstream_of(gstop, cds.gstop)
            })
            .any(|cds| {
                cds.positions.is_superset(&footprint.positions)
                    && cds
                        .positions
                        .iter()
                        .filter(|&&position| {
                            !orientation.upstream_of(position, record.gcoord)
                                && orientation.upstream_of(position, gstop)
                        })
                        .all(|&position| footprint.contains(position))
            }))
    }

    /// Starts inside a CDS and ends past its stop, agreeing with the CDS
    /// on the shared stretch.
    fn is_unfound_stop_overlap(&mut self, orf: usize) -> Result<bool, OrfError> {
        let record = self.first(orf);
        let Some(gstop) = record.gstop else {
            return Ok(false);
        };
        let orientation = self.orientation;
        let footprint = self.footprints.get(record)?;

        Ok(self
            .cds
            .iter()
            .filter(|cds| {
                orientation.upstream_of(cds.gcoord, record.gcoord)
                    && orientation.upstream_of(cds.gstop, gstop)
                    && orientation.upstream_of(record.gcoord, cds.gstop)
            })
            .any(|cds| {
                footprint
                    .ordered
                    .iter()
                    .filter(|&&position| orientation.upstream_of(position, cds.gstop))
                    .all(|position| cds.positions.contains(position))
                    && cds
                        .positions
                        .iter()
                        .filter(|&&position| !orientation.upstream_of(position, record.gcoord))
                        .all(|&position| footprint.contains(position))
            }))
    }

    /// Starts before a CDS and ends inside it, agreeing with the CDS on
    /// the shared stretch.
    fn is_unfound_start_overlap(&mut self, orf: usize) -> Result<bool, OrfError> {
        let record = self.first(orf);
        let Some(gstop) = record.gstop else {
            return Ok(false);
        };
        let orientation = self.orientation;
        let footprint = self.footprints.get(record)?;

        Ok(self
            .cds
            .iter()
            .filter(|cds| {
                orientation.upstream_of(record.gcoord, cds.gcoord)
                    && orientation.upstream_of(gstop, cds.gstop)
                    && orientation.upstream_of(cds.gcoord, gstop)
            })
            .any(|cds| {
                footprint
                    .ordered
                    .iter()
                    .filter(|&&position| !orientation.upstream_of(position, cds.gcoord))
                    .all(|position| cds.positions.contains(position))
                    && cds
                        .positions
                        .iter()
                        .filter(|&&position| orientation.upstream_of(position, gstop))
                        .all(|&position| footprint.contains(position))
            }))
    }

    /// Label of every record row
    fn row_types(&self) -> Vec<OrfType> {
        let mut row_types = vec![OrfType::New; self.records.len()];
        for (rows, &orftype) in self.orfs.iter().zip(&self.tags) {
            for &row in rows {
                row_types[row] = orftype;
            }
        }
        row_types
    }
}
