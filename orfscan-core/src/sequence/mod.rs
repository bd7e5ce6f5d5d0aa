//! Nucleotide sequences: loading, codon matching and ORF scanning.
//!
//! ## Modules
//!
//! - [`io`]: FASTA reading and spliced transcript extraction
//! - [`codons`]: IUPAC start-codon matching and stop-codon tests
//! - [`scanner`]: per-frame stop index and the ORF scan
//!
//! ## Examples
//!
//! ```rust
//! use orfscan_core::sequence::codons::StartCodonMatcher;
//! use orfscan_core::sequence::scanner::find_all_orfs;
//!
//! let starts = StartCodonMatcher::new(&["ATG"])?;
//! let orfs = find_all_orfs(b"ATGAAATAA", &starts);
//!
//! assert_eq!(orfs.len(), 1);
//! assert_eq!((orfs[0].start, orfs[0].stop), (0, Some(9)));
//! assert_eq!(orfs[0].aa_length(), 2);
//! # Ok::<(), orfscan_core::types::OrfError>(())
//! ```

pub mod codons;
pub mod io;
pub mod scanner;

pub use io::Genome;
