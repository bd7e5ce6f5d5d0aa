use std::collections::HashSet;

use log::{debug, info};
use rayon::prelude::*;

use crate::annotation::{Annotations, Transcriptome};
use crate::classify::classify_family;
use crate::config::{InputPaths, OrfConfig};
use crate::family::{FamilyOrfs, identify_family_orfs};
use crate::results::{OrfRecord, OrfTable};
use crate::sequence::Genome;
use crate::sequence::codons::StartCodonMatcher;
use crate::types::{GenomicCoord, OrfError, OrfType};

/// Transcriptome-wide ORF identification and classification.
///
/// Families are independent of each other and are processed in parallel on
/// a dedicated rayon pool; the resulting table is ordered by family id
/// whatever the thread count.
///
/// # Examples
///
/// ```rust,no_run
/// use orfscan_core::{OrfAnalyzer, config::{InputPaths, OrfConfig}};
///
/// let analyzer = OrfAnalyzer::new(OrfConfig {
///     start_codons: vec!["ATG".to_string(), "NTG".to_string()],
///     num_threads: Some(4),
///     ..Default::default()
/// });
///
/// let mut paths = InputPaths::new("genome.fa");
/// paths.tfam_stem = "families".to_string();
///
/// let table = analyzer.analyze(&paths)?;
/// for (orftype, count) in table.type_counts() {
///     println!("{orftype}: {count}");
/// }
/// # Ok::<(), orfscan_core::types::OrfError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct OrfAnalyzer {
    /// Configuration options for identification and classification
    pub config: OrfConfig,
}

impl OrfAnalyzer {
    /// Creates a new analyzer with the specified configuration.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use orfscan_core::{OrfAnalyzer, config::OrfConfig};
    ///
    /// let analyzer = OrfAnalyzer::new(OrfConfig::default());
    /// ```
    pub const fn new(config: OrfConfig) -> Self {
        Self { config }
    }

    /// Loads every input and processes all families.
    ///
    /// The start codons are checked before any file is read.
    ///
    /// # Errors
    ///
    /// Returns [`OrfError`] if:
    /// - A start codon is invalid
    /// - An input file cannot be read or parsed
    /// - Any family fails to process
    pub fn analyze(&self, paths: &InputPaths) -> Result<OrfTable, OrfError> {
        self.config.validate()?;

        let genome = Genome::from_fasta(&paths.genome_fasta)?;
        let transcriptome = Transcriptome::load(paths)?;
        let annotations = Annotations::load(&self.config, &transcriptome)?;

        self.analyze_inputs(&genome, &transcriptome, &annotations)
    }

    /// Processes all families of already loaded inputs.
    ///
    /// # Errors
    ///
    /// Returns [`OrfError::InvalidCodon`] for a bad start codon,
    /// [`OrfError::ThreadPool`] if the worker pool cannot be built, and the
    /// first error of any family.
    pub fn analyze_inputs(
        &self,
        genome: &Genome,
        transcriptome: &Transcriptome,
        annotations: &Annotations,
    ) -> Result<OrfTable, OrfError> {
        let starts = StartCodonMatcher::new(&self.config.start_codons)?;

        let mut builder = rayon::ThreadPoolBuilder::new();
        if let Some(num_threads) = self.config.num_threads {
            builder = builder.num_threads(num_threads);
        }
        let pool = builder
            .build()
            .map_err(|e| OrfError::ThreadPool(e.to_string()))?;

        let ids: Vec<&str> = transcriptome.family_ids().collect();
        info!(
            "Processing {} families on {} thread(s) with {} annotation source(s)",
            ids.len(),
            pool.current_num_threads(),
            annotations.num_sources()
        );

        let families = pool.install(|| {
            ids.par_iter()
                .map(|&tfam| {
                    self.process_family(tfam, genome, transcriptome, annotations, &starts)
                        .map(|records| (tfam.to_string(), records))
                })
                .collect::<Result<Vec<_>, OrfError>>()
        })?;

        let table: OrfTable = families.into_iter().collect();
        info!(
            "Found {} ORF records in {} families",
            table.len(),
            table.families.len()
        );
        for (orftype, count) in table.type_counts() {
            debug!("{orftype}: {count}");
        }
        Ok(table)
    }

    /// Identifies and classifies the ORFs of one family.
    ///
    /// Families that no annotation source covers have every ORF typed
    /// `new`, nonstop ORFs included. Covered families without any eligible
    /// CDS keep their ORFs typed `new` or `nonstop`.
    ///
    /// # Errors
    ///
    /// Returns [`OrfError::MissingFamily`] or
    /// [`OrfError::MissingTranscript`] for inconsistent family tables, and
    /// any error from identification or classification.
    pub fn process_family(
        &self,
        tfam: &str,
        genome: &Genome,
        transcriptome: &Transcriptome,
        annotations: &Annotations,
        starts: &StartCodonMatcher,
    ) -> Result<Vec<OrfRecord>, OrfError> {
        let family = transcriptome.family(tfam)?;
        let members = transcriptome.members(tfam)?;
        let FamilyOrfs { mut records, mask } =
            identify_family_orfs(family, &members, genome, starts)?;
        if records.is_empty() {
            return Ok(records);
        }
        if !annotations.is_associated(tfam) {
            debug!("{tfam}: not covered by any annotation source");
            for record in &mut records {
                record.orftype = OrfType::New;
            }
            return Ok(records);
        }

        let family_positions: HashSet<GenomicCoord> = mask.positions().iter().copied().collect();
        let cds = annotations.family_cds(tfam, transcriptome, &family_positions)?;
        if cds.is_empty() {
            debug!("{tfam}: no annotated CDS, ORFs left unclassified");
        } else {
            classify_family(
                &mut records,
                &mask,
                &cds,
                self.config.checks_unfound_cds(),
            )?;
        }
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    //                0         1         2
    //                012345678901234567890123456789
    const CHR1: &str = "CCATGAAACCCTAAGGATGTTTTAGCCCCC";
    // Minus strand reads CCCATGTAACC
    const CHR2: &str = "GGTTACATGGG";

    fn write_inputs(dir: &Path) -> InputPaths {
        fs::write(dir.join("genome.fa"), format!(">chr1\n{CHR1}\n>chr2\n{CHR2}\n")).unwrap();
        fs::write(
            dir.join("transcripts.bed"),
            "chr1\t0\t30\ttx1\t0\t+\t2\t14\t0\t1\t30,\t0,\n\
             chr2\t0\t11\ttx2\t0\t-\t0\t0\t0\t1\t11,\t0,\n",
        )
        .unwrap();
        fs::write(dir.join("tfams.txt"), "tx1\tfam1\ntx2\tfam2\n").unwrap();
        fs::write(
            dir.join("tfams.bed"),
            "chr1\t0\t30\tfam1\t0\t+\t0\t0\t0\t1\t30,\t0,\n\
             chr2\t0\t11\tfam2\t0\t-\t0\t0\t0\t1\t11,\t0,\n",
        )
        .unwrap();

        let mut paths = InputPaths::new(dir.join("genome.fa"));
        paths.transcript_bed = dir.join("transcripts.bed");
        paths.tfam_stem = dir.join("tfams").to_string_lossy().into_owned();
        paths
    }

    fn summary(records: &[OrfRecord]) -> Vec<(&str, OrfType)> {
        records
            .iter()
            .map(|record| (record.orfname.as_str(), record.orftype))
            .collect()
    }

    #[test]
    fn test_analyze_classifies_annotated_family() {
        let dir = TempDir::new().unwrap();
        let paths = write_inputs(dir.path());

        let analyzer = OrfAnalyzer::new(OrfConfig {
            num_threads: Some(2),
            ..Default::default()
        });
        let table = analyzer.analyze(&paths).unwrap();

        assert_eq!(table.len(), 3);
        assert_eq!(
            summary(&table.families["fam1"]),
            vec![
                ("fam1_2_3aa", OrfType::Annotated),
                ("fam1_16_2aa", OrfType::Downstream),
            ]
        );
        let annotated = &table.families["fam1"][0];
        assert_eq!((annotated.tcoord, annotated.tstop), (2, Some(14)));
        assert!(annotated.annot_start && annotated.annot_stop);
    }

    #[test]
    fn test_family_without_eligible_cds_stays_new() {
        let dir = TempDir::new().unwrap();
        let paths = write_inputs(dir.path());

        let table = OrfAnalyzer::default().analyze(&paths).unwrap();
        let records = &table.families["fam2"];
        assert_eq!(summary(records), vec![("fam2_7_1aa", OrfType::New)]);
        assert_eq!(records[0].gstop, Some(1));
    }

    #[test]
    fn test_ignore_annotations_leaves_everything_new() {
        let dir = TempDir::new().unwrap();
        let paths = write_inputs(dir.path());

        let analyzer = OrfAnalyzer::new(OrfConfig {
            ignore_annotations: true,
            ..Default::default()
        });
        let table = analyzer.analyze(&paths).unwrap();
        assert!(table.records().all(|record| record.orftype == OrfType::New));
    }

    #[test]
    fn test_extra_cds_bed_annotates_family() {
        let dir = TempDir::new().unwrap();
        let paths = write_inputs(dir.path());
        fs::write(
            dir.path().join("extra.bed"),
            "chr2\t0\t11\tcds2\t0\t-\t2\t8\t0\t1\t11,\t0,\n",
        )
        .unwrap();

        let analyzer = OrfAnalyzer::new(OrfConfig {
            ignore_annotations: true,
            extra_cds_beds: vec![dir.path().join("extra.bed")],
            ..Default::default()
        });
        let table = analyzer.analyze(&paths).unwrap();
        assert_eq!(
            summary(&table.families["fam2"]),
            vec![("fam2_7_1aa", OrfType::Annotated)]
        );
        // Transcriptome CDSs are ignored, so fam1 has no annotation
        assert!(table.families["fam1"]
            .iter()
            .all(|record| record.orftype == OrfType::New));
    }

    //                         01234567890123456789
    const NONSTOP_CHR: &str = "ATGAAATAACCCATGCCCCC";

    fn write_nonstop_inputs(dir: &Path) -> InputPaths {
        fs::write(dir.join("genome.fa"), format!(">chr3\n{NONSTOP_CHR}\n")).unwrap();
        fs::write(
            dir.join("transcripts.bed"),
            "chr3\t0\t20\ttx3\t0\t+\t0\t0\t0\t1\t20,\t0,\n",
        )
        .unwrap();
        fs::write(dir.join("tfams.txt"), "tx3\tfam3\n").unwrap();
        fs::write(
            dir.join("tfams.bed"),
            "chr3\t0\t20\tfam3\t0\t+\t0\t0\t0\t1\t20,\t0,\n",
        )
        .unwrap();

        let mut paths = InputPaths::new(dir.join("genome.fa"));
        paths.transcript_bed = dir.join("transcripts.bed");
        paths.tfam_stem = dir.join("tfams").to_string_lossy().into_owned();
        paths
    }

    #[test]
    fn test_covered_family_without_cds_keeps_nonstop() {
        let dir = TempDir::new().unwrap();
        let paths = write_nonstop_inputs(dir.path());

        let table = OrfAnalyzer::default().analyze(&paths).unwrap();
        assert_eq!(
            summary(&table.families["fam3"]),
            vec![("fam3_0_2aa", OrfType::New), ("fam3_12_0aa", OrfType::Nonstop)]
        );
    }

    #[test]
    fn test_uncovered_family_is_entirely_new() {
        let dir = TempDir::new().unwrap();
        let paths = write_nonstop_inputs(dir.path());

        let ignored = OrfAnalyzer::new(OrfConfig {
            ignore_annotations: true,
            ..Default::default()
        })
        .analyze(&paths)
        .unwrap();
        assert_eq!(
            summary(&ignored.families["fam3"]),
            vec![("fam3_0_2aa", OrfType::New), ("fam3_12_0aa", OrfType::New)]
        );
        assert_eq!(ignored.families["fam3"][1].tstop, None);

        // An extra source on another chromosome covers nothing here
        fs::write(
            dir.path().join("extra.bed"),
            "chr9\t0\t20\tfar\t0\t+\t0\t9\t0\t1\t20,\t0,\n",
        )
        .unwrap();
        let unrelated = OrfAnalyzer::new(OrfConfig {
            ignore_annotations: true,
            extra_cds_beds: vec![dir.path().join("extra.bed")],
            ..Default::default()
        })
        .analyze(&paths)
        .unwrap();
        assert_eq!(unrelated.families, ignored.families);
    }

    #[test]
    fn test_invalid_codon_fails_before_reading() {
        let analyzer = OrfAnalyzer::new(OrfConfig {
            start_codons: vec!["ATGA".to_string()],
            ..Default::default()
        });
        let paths = InputPaths::new("does/not/exist.fa");
        assert!(matches!(
            analyzer.analyze(&paths),
            Err(OrfError::InvalidCodon(_))
        ));
    }

    #[test]
    fn test_missing_family_record_fails() {
        let dir = TempDir::new().unwrap();
        let paths = write_inputs(dir.path());
        fs::write(
            dir.path().join("tfams.bed"),
            "chr1\t0\t30\tfam1\t0\t+\t0\t0\t0\t1\t30,\t0,\n",
        )
        .unwrap();

        match OrfAnalyzer::default().analyze(&paths) {
            Err(OrfError::MissingFamily(tfam)) => assert_eq!(tfam, "fam2"),
            other => panic!("Expected MissingFamily, got {other:?}"),
        }
    }

    #[test]
    fn test_thread_count_does_not_change_output() {
        let dir = TempDir::new().unwrap();
        let paths = write_inputs(dir.path());

        let single = OrfAnalyzer::new(OrfConfig {
            num_threads: Some(1),
            ..Default::default()
        })
        .analyze(&paths)
        .unwrap();
        let multi = OrfAnalyzer::new(OrfConfig {
            num_threads: Some(4),
            ..Default::default()
        })
        .analyze(&paths)
        .unwrap();
        assert_eq!(single.families, multi.families);
    }
}
