use std::path::PathBuf;

use crate::constants::{
    CODON_LENGTH, DEFAULT_ORF_STORE, DEFAULT_START_CODON, DEFAULT_TFAM_STEM,
    DEFAULT_TRANSCRIPT_BED,
};
use crate::sequence::codons::is_iupac_nucleotide;
use crate::types::OrfError;

/// Output format options for the ORF table.
///
/// # Examples
///
/// ```rust
/// use orfscan_core::config::{OutputFormat, OrfConfig};
///
/// let config = OrfConfig {
///     output_format: OutputFormat::Csv,
///     ..Default::default()
/// };
/// assert_eq!(config.output_format.delimiter(), ',');
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Tab-separated values with a header line.
    #[default]
    Tsv,

    /// Comma-separated values with a header line.
    Csv,
}

impl OutputFormat {
    /// Field separator written between columns
    #[must_use]
    pub const fn delimiter(self) -> char {
        match self {
            Self::Tsv => '\t',
            Self::Csv => ',',
        }
    }
}

/// Configuration settings for ORF identification.
///
/// # Examples
///
/// ## Default configuration
///
/// ```rust
/// use orfscan_core::config::OrfConfig;
///
/// let config = OrfConfig::default();
/// assert_eq!(config.start_codons, vec!["ATG".to_string()]);
/// ```
///
/// ## All NTG starts on eight threads
///
/// ```rust
/// use orfscan_core::config::OrfConfig;
///
/// let config = OrfConfig {
///     start_codons: vec!["NTG".to_string()],
///     num_threads: Some(8),
///     quiet: true,
///     ..Default::default()
/// };
/// config.validate()?;
/// # Ok::<(), orfscan_core::types::OrfError>(())
/// ```
#[derive(Debug, Clone)]
pub struct OrfConfig {
    /// Codons considered as translation initiation sites.
    ///
    /// Each must be three letters from the IUPAC nucleotide alphabet, so
    /// `NTG` stands for `ATG`, `CTG`, `GTG` and `TTG`.
    ///
    /// **Default**: `["ATG"]`
    pub start_codons: Vec<String>,

    /// Do not use the transcriptome's own CDS annotations.
    ///
    /// Typically combined with [`OrfConfig::extra_cds_beds`].
    ///
    /// **Default**: `false`
    pub ignore_annotations: bool,

    /// Additional BED files of annotated CDSs.
    ///
    /// Each file becomes its own annotation source. Supplying any of them
    /// also enables the cross-transcript checks for truncations, internal
    /// and overlapping ORFs whose CDS lies on a transcript outside the
    /// transcriptome.
    ///
    /// **Default**: empty
    pub extra_cds_beds: Vec<PathBuf>,

    /// Number of worker threads used to process transcript families.
    ///
    /// **Default**: `None` (use all available cores)
    pub num_threads: Option<usize>,

    /// Suppress informational progress messages.
    ///
    /// **Default**: `false`
    pub quiet: bool,

    /// Log per-family details and type counts.
    ///
    /// Ignored when [`OrfConfig::quiet`] is set.
    ///
    /// **Default**: `false`
    pub verbose: bool,

    /// Overwrite an existing output table.
    ///
    /// **Default**: `false`
    pub force: bool,

    /// Format of the output table.
    ///
    /// **Default**: [`OutputFormat::Tsv`]
    pub output_format: OutputFormat,
}

impl Default for OrfConfig {
    fn default() -> Self {
        Self {
            start_codons: vec![DEFAULT_START_CODON.to_string()],
            ignore_annotations: false,
            extra_cds_beds: Vec::new(),
            num_threads: None,
            quiet: false,
            verbose: false,
            force: false,
            output_format: OutputFormat::Tsv,
        }
    }
}

impl OrfConfig {
    /// Checks the start codons before any processing starts.
    ///
    /// # Errors
    ///
    /// Returns [`OrfError::InvalidCodon`] for the first codon that is not
    /// exactly three IUPAC nucleotide letters (case-insensitive).
    pub fn validate(&self) -> Result<(), OrfError> {
        for codon in &self.start_codons {
            if codon.len() != CODON_LENGTH || !codon.bytes().all(is_iupac_nucleotide) {
                return Err(OrfError::InvalidCodon(codon.clone()));
            }
        }
        Ok(())
    }

    /// Whether cross-transcript checks against extra annotations are enabled
    #[must_use]
    pub fn checks_unfound_cds(&self) -> bool {
        !self.extra_cds_beds.is_empty()
    }

    /// Default `env_logger` filter for the configured verbosity
    #[must_use]
    pub const fn log_filter(&self) -> &'static str {
        if self.quiet {
            "warn"
        } else if self.verbose {
            "debug"
        } else {
            "info"
        }
    }
}

/// Locations of the input files.
#[derive(Debug, Clone)]
pub struct InputPaths {
    /// Genome FASTA file
    pub genome_fasta: PathBuf,
    /// Transcriptome BED file; its CDSs are the primary annotation
    pub transcript_bed: PathBuf,
    /// Stem of the transcript-family files `{stem}.txt` and `{stem}.bed`
    pub tfam_stem: String,
}

impl InputPaths {
    /// Input paths with the default transcriptome and family file names
    pub fn new(genome_fasta: impl Into<PathBuf>) -> Self {
        Self {
            genome_fasta: genome_fasta.into(),
            transcript_bed: PathBuf::from(DEFAULT_TRANSCRIPT_BED),
            tfam_stem: DEFAULT_TFAM_STEM.to_string(),
        }
    }

    /// `{stem}.txt`, the transcript → family table
    #[must_use]
    pub fn tfam_table(&self) -> PathBuf {
        PathBuf::from(format!("{}.txt", self.tfam_stem))
    }

    /// `{stem}.bed`, the family footprints
    #[must_use]
    pub fn tfam_bed(&self) -> PathBuf {
        PathBuf::from(format!("{}.bed", self.tfam_stem))
    }
}

/// Default output path for the ORF table
#[must_use]
pub fn default_orf_store() -> PathBuf {
    PathBuf::from(DEFAULT_ORF_STORE)
}
