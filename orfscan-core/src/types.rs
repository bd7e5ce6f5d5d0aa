use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;

/// Genomic coordinate, 0-based.
///
/// Signed so that the half-open stop of a minus-strand ORF ending at
/// position 0 (which lies at -1) stays representable.
pub type GenomicCoord = i64;

/// Ordered list of genomic positions covered by an ORF or CDS, in
/// transcript (stranded) order.
pub type Footprint = Vec<GenomicCoord>;

/// Classification label of an ORF relative to the annotated CDSs of its
/// transcript family.
///
/// Every ORF starts as [`OrfType::New`]. In a family that carries at least
/// one eligible annotation the classifier moves each ORF to exactly one of
/// the other labels, and the first matching rule wins.
///
/// # Examples
///
/// ```rust
/// use orfscan_core::types::OrfType;
///
/// assert_eq!(OrfType::StopOverlap.to_string(), "stop_overlap");
/// assert_eq!("Xiso".parse::<OrfType>().unwrap(), OrfType::Xiso);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum OrfType {
    /// Unclassified; only valid in families without eligible annotations
    #[default]
    New,
    /// Exact match to an annotated CDS, including its splicing
    Annotated,
    /// Same start and stop as a CDS, different internal splicing
    Xiso,
    /// Start of one CDS, stop of another
    Siso,
    /// Annotated start, novel stop
    Ciso,
    /// Annotated stop, initiating downstream of the annotated start
    Truncation,
    /// Annotated stop, initiating upstream of the annotated start
    Extension,
    /// Annotated stop, novel start
    Niso,
    /// Shares an in-frame codon with a CDS, novel start and stop
    NCiso,
    /// Entirely inside a CDS, out of frame
    Internal,
    /// Starts inside a CDS and ends past its stop
    StopOverlap,
    /// Starts before a CDS and ends inside it
    StartOverlap,
    /// Long out-of-frame: strictly contains a CDS
    Loof,
    /// Ends before a CDS on the same transcript (uORF)
    Upstream,
    /// Starts after a CDS on the same transcript
    Downstream,
    /// No overlap with any annotated CDS
    NewIso,
    /// Overlaps a CDS out of frame on a different transcript
    Giso,
    /// No in-frame stop codon before the transcript end
    Nonstop,
}

impl OrfType {
    /// Every label, in rule-precedence order after [`OrfType::New`].
    pub const ALL: [Self; 18] = [
        Self::New,
        Self::Nonstop,
        Self::Annotated,
        Self::Xiso,
        Self::Siso,
        Self::Ciso,
        Self::Truncation,
        Self::Extension,
        Self::Niso,
        Self::NCiso,
        Self::Internal,
        Self::StopOverlap,
        Self::StartOverlap,
        Self::Loof,
        Self::Upstream,
        Self::Downstream,
        Self::NewIso,
        Self::Giso,
    ];

    /// Label as written to the ORF table
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Annotated => "annotated",
            Self::Xiso => "Xiso",
            Self::Siso => "Siso",
            Self::Ciso => "Ciso",
            Self::Truncation => "truncation",
            Self::Extension => "extension",
            Self::Niso => "Niso",
            Self::NCiso => "NCiso",
            Self::Internal => "internal",
            Self::StopOverlap => "stop_overlap",
            Self::StartOverlap => "start_overlap",
            Self::Loof => "LOOF",
            Self::Upstream => "upstream",
            Self::Downstream => "downstream",
            Self::NewIso => "new_iso",
            Self::Giso => "Giso",
            Self::Nonstop => "nonstop",
        }
    }

    /// Whether the label is still the unclassified placeholder
    #[must_use]
    pub const fn is_new(self) -> bool {
        matches!(self, Self::New)
    }
}

impl fmt::Display for OrfType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrfType {
    type Err = OrfError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|orftype| orftype.as_str() == s)
            .ok_or_else(|| OrfError::ParseError(format!("unknown ORF type '{s}'")))
    }
}

/// Error types that can occur while identifying and classifying ORFs
#[derive(Error, Debug)]
pub enum OrfError {
    /// Start codon is not three IUPAC nucleotide letters
    #[error("{0} is an invalid codon sequence")]
    InvalidCodon(String),
    /// Output already exists and overwriting was not requested
    #[error("{} exists; use --force to overwrite", .0.display())]
    OutputExists(PathBuf),
    /// File I/O operation failed
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    /// Writing the ORF table failed
    #[error("Table write error: {0}")]
    CsvError(#[from] csv::Error),
    /// Error parsing input data
    #[error("Parse error: {0}")]
    ParseError(String),
    /// A transcript id was referenced but never defined
    #[error("Transcript {0} not found in transcriptome")]
    MissingTranscript(String),
    /// A transcript family id was referenced but never defined
    #[error("Transcript family {0} not found")]
    MissingFamily(String),
    /// A chromosome was referenced but is absent from the genome
    #[error("Chromosome {0} not found in genome")]
    MissingChromosome(String),
    /// A transcript covers genomic positions its family does not
    #[error("Transcript {tid} covers {uncovered} position(s) outside family {tfam}")]
    InconsistentCoverage {
        tfam: String,
        tid: String,
        uncovered: usize,
    },
    /// A transcript-local offset lies beyond the transcript end
    #[error("Offset {offset} outside transcript {tid} (length {length})")]
    CoordinateOutOfRange {
        tid: String,
        offset: usize,
        length: usize,
    },
    /// Worker pool could not be built
    #[error("Failed to configure thread pool: {0}")]
    ThreadPool(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orftype_labels_round_trip_through_from_str() {
        for orftype in OrfType::ALL {
            assert_eq!(orftype.as_str().parse::<OrfType>().unwrap(), orftype);
        }
    }

    #[test]
    fn test_orftype_labels_are_unique() {
        let mut labels: Vec<_> = OrfType::ALL.iter().map(|t| t.as_str()).collect();
        labels.sort_unstable();
        labels.dedup();
        assert_eq!(labels.len(), OrfType::ALL.len());
    }

    #[test]
    fn test_orftype_unknown_label() {
        assert!(matches!(
            "novel".parse::<OrfType>(),
            Err(OrfError::ParseError(_))
        ));
    }

    #[test]
    fn test_default_is_new() {
        assert!(OrfType::default().is_new());
        assert!(!OrfType::Giso.is_new());
    }

    #[test]
    fn test_error_messages() {
        let err = OrfError::InvalidCodon("ATGG".to_string());
        assert_eq!(err.to_string(), "ATGG is an invalid codon sequence");

        let err = OrfError::OutputExists(PathBuf::from("orfs.tsv"));
        assert_eq!(err.to_string(), "orfs.tsv exists; use --force to overwrite");

        let err = OrfError::InconsistentCoverage {
            tfam: "fam1".to_string(),
            tid: "tx1".to_string(),
            uncovered: 4,
        };
        assert_eq!(
            err.to_string(),
            "Transcript tx1 covers 4 position(s) outside family fam1"
        );
    }
}
