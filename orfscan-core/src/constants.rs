// =============================================================================
// =============================================================================

/// Version string for orfscan
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// =============================================================================

/// Length of a codon in base pairs
pub const CODON_LENGTH: usize = 3;

/// Stop codons of the standard genetic code
pub const STOP_CODONS: [&[u8; 3]; 3] = [b"TAG", b"TAA", b"TGA"];

/// Start codon used when none is configured
pub const DEFAULT_START_CODON: &str = "ATG";

// =============================================================================
// =============================================================================

/// IUPAC nucleotide codes and the bases each one stands for.
///
/// `U` is accepted as a synonym of `T`.
pub const IUPAC_DNA: [(u8, &[u8]); 16] = [
    (b'A', b"A"),
    (b'C', b"C"),
    (b'G', b"G"),
    (b'T', b"T"),
    (b'U', b"T"),
    (b'R', b"AG"),
    (b'Y', b"CT"),
    (b'S', b"CG"),
    (b'W', b"AT"),
    (b'K', b"GT"),
    (b'M', b"AC"),
    (b'B', b"CGT"),
    (b'D', b"AGT"),
    (b'H', b"ACT"),
    (b'V', b"ACG"),
    (b'N', b"ACGT"),
];

// =============================================================================
// =============================================================================

/// Default stem of the transcript-family files (`{stem}.txt`, `{stem}.bed`)
pub const DEFAULT_TFAM_STEM: &str = "tfams";

/// Default transcriptome BED file
pub const DEFAULT_TRANSCRIPT_BED: &str = "transcripts.bed";

/// Default output table
pub const DEFAULT_ORF_STORE: &str = "orfs.tsv";

/// Columns of the ORF table, in output order
pub const ORF_TABLE_COLUMNS: [&str; 14] = [
    "tfam",
    "tid",
    "tcoord",
    "tstop",
    "chrom",
    "gcoord",
    "gstop",
    "strand",
    "codon",
    "AAlen",
    "orfname",
    "annot_start",
    "annot_stop",
    "orftype",
];
