//! Canonical ORF names within a transcript family.

use std::collections::BTreeMap;

use crate::family::coverage::CoverageMask;
use crate::results::OrfRecord;
use crate::types::{Footprint, GenomicCoord, OrfError};

/// `{tfam}_{gcoord}_{AAlen}aa`
#[must_use]
pub fn base_name(tfam: &str, gcoord: GenomicCoord, aa_length: usize) -> String {
    format!("{tfam}_{gcoord}_{aa_length}aa")
}

/// Names every record of a family.
///
/// Records sharing genomic start and length get the base name when their
/// footprints agree. Otherwise each distinct footprint gets the base name
/// with `_0`, `_1`, … appended, numbered in record order.
///
/// # Errors
///
/// Returns [`OrfError::MissingTranscript`] if a record's transcript has no
/// row in `mask`.
pub fn assign_names(
    tfam: &str,
    records: &mut [OrfRecord],
    mask: &CoverageMask,
) -> Result<(), OrfError> {
    let mut groups: BTreeMap<(GenomicCoord, usize), Vec<usize>> = BTreeMap::new();
    for (index, record) in records.iter().enumerate() {
        groups
            .entry((record.gcoord, record.aa_length))
            .or_default()
            .push(index);
    }

    for ((gcoord, aa_length), members) in groups {
        let basename = base_name(tfam, gcoord, aa_length);
        if members.len() == 1 {
            records[members[0]].orfname = basename;
            continue;
        }

        let footprints = members
            .iter()
            .map(|&index| {
                let record = &records[index];
                mask.footprint(&record.tid, record.tcoord, record.tstop)
            })
            .collect::<Result<Vec<Footprint>, _>>()?;

        if footprints.iter().all(|footprint| *footprint == footprints[0]) {
            for &index in &members {
                records[index].orfname.clone_from(&basename);
            }
            continue;
        }

        let mut distinct: Vec<&Footprint> = Vec::new();
        for (&index, footprint) in members.iter().zip(&footprints) {
            let suffix = match distinct.iter().position(|seen| *seen == footprint) {
                Some(suffix) => suffix,
                None => {
                    distinct.push(footprint);
                    distinct.len() - 1
                }
            };
            records[index].orfname = format!("{basename}_{suffix}");
        }
    }

    Ok(())
}
