//! Per-family ORF discovery.
//!
//! Every member transcript of a family is scanned for ORFs, each ORF is
//! placed on the genome, and ORFs that are the same across transcripts are
//! given the same name.

pub mod coverage;
pub mod naming;

use log::debug;

use crate::model::SegmentChain;
use crate::results::OrfRecord;
use crate::sequence::Genome;
use crate::sequence::codons::StartCodonMatcher;
use crate::sequence::scanner::find_all_orfs;
use crate::types::{OrfError, OrfType};

pub use coverage::CoverageMask;
pub use naming::{assign_names, base_name};

/// ORFs of one family together with the coverage mask they were named with.
#[derive(Debug)]
pub struct FamilyOrfs {
    pub records: Vec<OrfRecord>,
    pub mask: CoverageMask,
}

impl FamilyOrfs {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Finds and names every ORF on the members of one family.
///
/// Records are ordered by member (in the order given) and then by
/// transcript offset. ORFs without a stop codon are typed
/// [`OrfType::Nonstop`]; all others start as [`OrfType::New`].
///
/// # Errors
///
/// Returns [`OrfError::InconsistentCoverage`] if a member leaves the
/// family footprint, and genome or coordinate errors from sequence
/// extraction.
pub fn identify_family_orfs(
    family: &SegmentChain,
    members: &[&SegmentChain],
    genome: &Genome,
    starts: &StartCodonMatcher,
) -> Result<FamilyOrfs, OrfError> {
    let tfam = family.name.as_str();
    let mut mask = CoverageMask::new(family);
    let mut records = Vec::new();

    for transcript in members {
        mask.add_transcript(transcript)?;
        let sequence = genome.spliced_sequence(transcript)?;

        for span in find_all_orfs(&sequence, starts) {
            let gcoord = transcript.genomic_coordinate(span.start)?;
            let gstop = span
                .stop
                .map(|stop| transcript.genomic_stop(stop))
                .transpose()?;
            let aa_length = span.aa_length();
            records.push(OrfRecord {
                tfam: tfam.to_string(),
                tid: transcript.name.clone(),
                tcoord: span.start,
                tstop: span.stop,
                chrom: family.chrom.clone(),
                gcoord,
                gstop,
                strand: family.strand,
                codon: span.codon,
                aa_length,
                orfname: String::new(),
                annot_start: false,
                annot_stop: false,
                orftype: if span.stop.is_some() {
                    OrfType::New
                } else {
                    OrfType::Nonstop
                },
            });
        }
    }

    if !records.is_empty() {
        assign_names(tfam, &mut records, &mask)?;
    }
    debug!(
        "{tfam}: {} ORF records on {} transcripts",
        records.len(),
        members.len()
    );

    Ok(FamilyOrfs { records, mask })
}
