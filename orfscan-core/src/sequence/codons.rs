//! Start and stop codon recognition.
//!
//! Start codons are given as IUPAC patterns and compiled into a single
//! lookup table over the 64 unambiguous trinucleotides, so matching a
//! position costs one table access regardless of how many patterns were
//! configured.

use crate::constants::{CODON_LENGTH, IUPAC_DNA, STOP_CODONS};
use crate::types::OrfError;

const NUM_CODONS: usize = 64;

/// Converts a nucleotide to its 2-bit index (A=0, C=1, G=2, T/U=3).
///
/// Returns `None` for anything else, including ambiguity codes.
#[must_use]
pub const fn base_index(c: u8) -> Option<usize> {
    match c.to_ascii_uppercase() {
        b'A' => Some(0),
        b'C' => Some(1),
        b'G' => Some(2),
        b'T' | b'U' => Some(3),
        _ => None,
    }
}

/// Index of an unambiguous trinucleotide in `0..64`
#[must_use]
pub fn codon_index(codon: &[u8]) -> Option<usize> {
    match codon {
        [a, b, c] => Some(base_index(*a)? * 16 + base_index(*b)? * 4 + base_index(*c)?),
        _ => None,
    }
}

/// Whether `c` is a letter of the IUPAC nucleotide alphabet (case-insensitive)
#[must_use]
pub fn is_iupac_nucleotide(c: u8) -> bool {
    iupac_bases(c).is_some()
}

fn iupac_bases(c: u8) -> Option<&'static [u8]> {
    let upper = c.to_ascii_uppercase();
    IUPAC_DNA
        .iter()
        .find(|(code, _)| *code == upper)
        .map(|(_, bases)| *bases)
}

/// Whether the codon is one of `TAG`, `TAA` or `TGA`
#[inline]
#[must_use]
pub fn is_stop_codon(codon: &[u8]) -> bool {
    STOP_CODONS.iter().any(|stop| stop.as_slice() == codon)
}

/// Compiled set of start-codon patterns.
///
/// # Examples
///
/// ```rust
/// use orfscan_core::sequence::codons::StartCodonMatcher;
///
/// let matcher = StartCodonMatcher::new(&["NTG"])?;
/// assert!(matcher.matches(b"CTG"));
/// assert!(matcher.matches(b"ATG"));
/// assert!(!matcher.matches(b"ATA"));
/// # Ok::<(), orfscan_core::types::OrfError>(())
/// ```
#[derive(Debug, Clone)]
pub struct StartCodonMatcher {
    table: [bool; NUM_CODONS],
}

impl StartCodonMatcher {
    /// Compiles the patterns into a lookup table.
    ///
    /// # Errors
    ///
    /// Returns [`OrfError::InvalidCodon`] if a pattern is not exactly three
    /// IUPAC letters.
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Result<Self, OrfError> {
        let mut table = [false; NUM_CODONS];
        for pattern in patterns {
            let pattern = pattern.as_ref();
            let bases = pattern
                .bytes()
                .map(iupac_bases)
                .collect::<Option<Vec<_>>>()
                .filter(|bases| bases.len() == CODON_LENGTH)
                .ok_or_else(|| OrfError::InvalidCodon(pattern.to_string()))?;

            for &first in bases[0] {
                for &second in bases[1] {
                    for &third in bases[2] {
                        if let Some(index) = codon_index(&[first, second, third]) {
                            table[index] = true;
                        }
                    }
                }
            }
        }
        Ok(Self { table })
    }

    /// Whether the three bases match any configured start pattern
    #[inline]
    #[must_use]
    pub fn matches(&self, codon: &[u8]) -> bool {
        codon_index(codon).is_some_and(|index| self.table[index])
    }

    /// Number of distinct trinucleotides accepted
    #[must_use]
    pub fn num_codons(&self) -> usize {
        self.table.iter().filter(|&&hit| hit).count()
    }
}
