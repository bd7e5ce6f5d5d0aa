//! Transcriptome, transcript families and CDS annotation sources.

pub mod bed;
pub mod cds;
pub mod intersect;
pub mod tfam;

use std::collections::{HashMap, HashSet};
use std::path::Path;

use log::{debug, info};

use crate::config::{InputPaths, OrfConfig};
use crate::model::SegmentChain;
use crate::types::{GenomicCoord, OrfError};

pub use bed::{ChainIndex, parse_bed_line, read_bed, read_bed_index};
pub use cds::{AnnotatedCds, CdsSet};
pub use intersect::assign_to_families;
pub use tfam::{FamilyTable, read_family_table};

/// Transcripts grouped into families.
#[derive(Debug, Default)]
pub struct Transcriptome {
    transcripts: ChainIndex,
    families: FamilyTable,
    family_chains: ChainIndex,
}

impl Transcriptome {
    pub fn new(transcripts: ChainIndex, families: FamilyTable, family_chains: ChainIndex) -> Self {
        Self {
            transcripts,
            families,
            family_chains,
        }
    }

    /// Reads the transcriptome BED and the `{stem}.txt`/`{stem}.bed` pair.
    pub fn load(paths: &InputPaths) -> Result<Self, OrfError> {
        let transcripts = read_bed_index(&paths.transcript_bed)?;
        let families = read_family_table(paths.tfam_table())?;
        let family_chains = read_bed_index(paths.tfam_bed())?;
        info!(
            "Read {} transcripts in {} families",
            transcripts.len(),
            families.len()
        );
        Ok(Self::new(transcripts, families, family_chains))
    }

    /// Family ids in sorted order
    pub fn family_ids(&self) -> impl Iterator<Item = &str> {
        self.families.keys().map(String::as_str)
    }

    /// Footprint chain of a family.
    ///
    /// # Errors
    ///
    /// Returns [`OrfError::MissingFamily`] if the family has no BED record.
    pub fn family(&self, tfam: &str) -> Result<&SegmentChain, OrfError> {
        self.family_chains
            .get(tfam)
            .ok_or_else(|| OrfError::MissingFamily(tfam.to_string()))
    }

    /// Every family BED record
    pub fn family_chains(&self) -> impl Iterator<Item = &SegmentChain> {
        self.family_chains.values()
    }

    /// Member transcript ids, in family table order
    pub fn member_ids(&self, tfam: &str) -> &[String] {
        self.families
            .get(tfam)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn transcript(&self, tid: &str) -> Result<&SegmentChain, OrfError> {
        self.transcripts
            .get(tid)
            .ok_or_else(|| OrfError::MissingTranscript(tid.to_string()))
    }

    /// Member transcripts of a family, in family table order
    pub fn members(&self, tfam: &str) -> Result<Vec<&SegmentChain>, OrfError> {
        self.member_ids(tfam)
            .iter()
            .map(|tid| self.transcript(tid))
            .collect()
    }
}

/// A BED file of extra annotated CDSs, mapped onto the families.
#[derive(Debug, Default)]
pub struct ExtraCdsSource {
    chains: ChainIndex,
    members: HashMap<String, Vec<String>>,
}

impl ExtraCdsSource {
    /// Reads `path` and assigns its records to overlapping families.
    pub fn load<P: AsRef<Path>>(path: P, transcriptome: &Transcriptome) -> Result<Self, OrfError> {
        let records = read_bed(path.as_ref())?;
        let members = assign_to_families(transcriptome.family_chains(), &records);
        debug!(
            "{}: {} CDS records touching {} families",
            path.as_ref().display(),
            records.len(),
            members.len()
        );
        let chains = records
            .into_iter()
            .map(|chain| (chain.name.clone(), chain))
            .collect();
        Ok(Self { chains, members })
    }

    fn touches(&self, tfam: &str) -> bool {
        self.members.contains_key(tfam)
    }

    fn family_chains(&self, tfam: &str) -> impl Iterator<Item = &SegmentChain> {
        self.members
            .get(tfam)
            .into_iter()
            .flatten()
            .filter_map(|tid| self.chains.get(tid))
    }
}

/// Every source of annotated CDSs used for classification.
///
/// Source 0 is the transcriptome itself unless annotations are ignored;
/// extra BED files follow in command-line order.
#[derive(Debug, Default)]
pub struct Annotations {
    use_transcriptome: bool,
    extra: Vec<ExtraCdsSource>,
}

impl Annotations {
    pub fn new(use_transcriptome: bool, extra: Vec<ExtraCdsSource>) -> Self {
        Self {
            use_transcriptome,
            extra,
        }
    }

    /// Builds the sources named by the configuration.
    pub fn load(config: &OrfConfig, transcriptome: &Transcriptome) -> Result<Self, OrfError> {
        if !config.extra_cds_beds.is_empty() {
            info!("Identifying families for extra CDS annotations");
        }
        let extra = config
            .extra_cds_beds
            .iter()
            .map(|path| ExtraCdsSource::load(path, transcriptome))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(!config.ignore_annotations, extra))
    }

    #[must_use]
    pub fn num_sources(&self) -> usize {
        usize::from(self.use_transcriptome) + self.extra.len()
    }

    /// Whether any source annotates the family at all.
    ///
    /// The transcriptome covers every family; an extra source only covers
    /// families its records overlap. A family can be associated and still
    /// have no eligible CDS.
    #[must_use]
    pub fn is_associated(&self, tfam: &str) -> bool {
        self.use_transcriptome || self.extra.iter().any(|extra| extra.touches(tfam))
    }

    /// Eligible, deduplicated CDSs annotated in one family.
    ///
    /// # Errors
    ///
    /// Returns [`OrfError::MissingTranscript`] if the family table names a
    /// transcript absent from the transcriptome.
    pub fn family_cds(
        &self,
        tfam: &str,
        transcriptome: &Transcriptome,
        family_positions: &HashSet<GenomicCoord>,
    ) -> Result<CdsSet, OrfError> {
        let mut cds = CdsSet::default();
        let mut source = 0;

        if self.use_transcriptome {
            for chain in transcriptome.members(tfam)? {
                if let Some(entry) = AnnotatedCds::from_chain(source, chain, family_positions) {
                    cds.insert(entry);
                }
            }
            source += 1;
        }

        for extra in &self.extra {
            for chain in extra.family_chains(tfam) {
                if let Some(entry) = AnnotatedCds::from_chain(source, chain, family_positions) {
                    cds.insert(entry);
                }
            }
            source += 1;
        }

        Ok(cds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Exon;
    use bio::bio_types::strand::Strand;
    use std::fs;
    use tempfile::TempDir;

    fn transcriptome() -> Transcriptome {
        let coding = SegmentChain::new("txA", "chr1", Strand::Forward, vec![Exon::new(0, 30)])
            .with_cds(3, 12);
        let noncoding = SegmentChain::new("txB", "chr1", Strand::Forward, vec![Exon::new(0, 20)]);
        let family = SegmentChain::new("fam1", "chr1", Strand::Forward, vec![Exon::new(0, 30)]);
        Transcriptome::new(
            [("txA".to_string(), coding), ("txB".to_string(), noncoding)].into(),
            [("fam1".to_string(), vec!["txB".to_string(), "txA".to_string()])].into(),
            [("fam1".to_string(), family)].into(),
        )
    }

    #[test]
    fn test_members_follow_table_order() {
        let transcriptome = transcriptome();
        let members = transcriptome.members("fam1").unwrap();
        assert_eq!(members[0].name, "txB");
        assert_eq!(members[1].name, "txA");
        assert!(transcriptome.members("other").unwrap().is_empty());
        assert!(matches!(
            transcriptome.family("other"),
            Err(OrfError::MissingFamily(_))
        ));
    }

    #[test]
    fn test_family_cds_from_transcriptome() {
        let transcriptome = transcriptome();
        let positions: HashSet<GenomicCoord> = (0..30).collect();

        let annotations = Annotations::new(true, Vec::new());
        let cds = annotations
            .family_cds("fam1", &transcriptome, &positions)
            .unwrap();
        assert_eq!(cds.len(), 1);
        assert!(cds.is_annotated_start(3));

        assert!(annotations.is_associated("fam1"));

        let ignored = Annotations::new(false, Vec::new());
        assert_eq!(ignored.num_sources(), 0);
        assert!(!ignored.is_associated("fam1"));
        assert!(
            ignored
                .family_cds("fam1", &transcriptome, &positions)
                .unwrap()
                .is_empty()
        );
    }

    #[test]
    fn test_extra_source_numbered_after_transcriptome() {
        let dir = TempDir::new().unwrap();
        let extra_bed = dir.path().join("extra.bed");
        fs::write(
            &extra_bed,
            "chr1\t0\t30\textra1\t0\t+\t6\t15\t0\t1\t30,\t0,\n\
             chr1\t0\t30\tanti\t0\t-\t6\t15\t0\t1\t30,\t0,\n",
        )
        .unwrap();

        let transcriptome = transcriptome();
        let extra = ExtraCdsSource::load(&extra_bed, &transcriptome).unwrap();
        assert!(extra.touches("fam1"));
        assert!(!extra.touches("fam2"));
        let annotations = Annotations::new(true, vec![extra]);
        assert_eq!(annotations.num_sources(), 2);

        let positions: HashSet<GenomicCoord> = (0..30).collect();
        let cds = annotations
            .family_cds("fam1", &transcriptome, &positions)
            .unwrap();
        assert_eq!(cds.len(), 2);
        let extra_cds = cds.iter().find(|entry| entry.tid == "extra1").unwrap();
        assert_eq!(extra_cds.source, 1);
        assert_eq!(extra_cds.gcoord, 6);
    }

    #[test]
    fn test_extra_source_associates_only_overlapped_families() {
        let dir = TempDir::new().unwrap();
        let extra_bed = dir.path().join("extra.bed");
        fs::write(&extra_bed, "chr2\t0\t30\tfar\t0\t+\t6\t15\t0\t1\t30,\t0,\n").unwrap();

        let transcriptome = transcriptome();
        let extra = ExtraCdsSource::load(&extra_bed, &transcriptome).unwrap();
        let annotations = Annotations::new(false, vec![extra]);
        assert_eq!(annotations.num_sources(), 1);
        assert!(!annotations.is_associated("fam1"));
    }
}
