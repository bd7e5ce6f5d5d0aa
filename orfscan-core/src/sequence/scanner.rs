//! Enumeration of candidate ORFs in a spliced transcript sequence.

use crate::constants::CODON_LENGTH;
use crate::sequence::codons::{StartCodonMatcher, is_stop_codon};

/// A start codon and its first in-frame stop, in transcript coordinates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrfSpan {
    /// Offset of the first base of the start codon
    pub start: usize,
    /// Offset just past the stop codon; `None` if the frame never stops
    pub stop: Option<usize>,
    /// Start codon as found in the sequence
    pub codon: String,
}

impl OrfSpan {
    /// Stop offset with 0 standing for "no stop"
    #[must_use]
    pub fn stop_or_zero(&self) -> usize {
        self.stop.unwrap_or(0)
    }

    /// Length of the translated product, excluding the stop codon.
    ///
    /// Nonstop ORFs report 0.
    #[must_use]
    pub fn aa_length(&self) -> usize {
        self.stop
            .map_or(0, |stop| (stop - self.start) / CODON_LENGTH - 1)
    }
}

/// For every offset, the nearest stop codon at or after it in the same frame.
///
/// Built right to left in one pass, so looking up the stop of any start is
/// constant time.
#[derive(Debug)]
pub struct StopIndex {
    next_stop: Vec<Option<usize>>,
}

impl StopIndex {
    pub fn new(sequence: &[u8]) -> Self {
        let length = sequence.len();
        let mut next_stop = vec![None; length];

        for position in (0..length).rev() {
            let codon_end = position + CODON_LENGTH;
            next_stop[position] = if codon_end > length {
                None
            } else if is_stop_codon(&sequence[position..codon_end]) {
                Some(position)
            } else if codon_end < length {
                next_stop[codon_end]
            } else {
                None
            };
        }

        Self { next_stop }
    }

    /// First stop codon starting at or after `position` in its frame
    #[must_use]
    pub fn next_stop(&self, position: usize) -> Option<usize> {
        self.next_stop.get(position).copied().flatten()
    }
}

/// Finds every start codon in `sequence` and pairs it with its stop.
///
/// Starts are not mutually exclusive: overlapping, nested and in-frame
/// downstream starts each produce their own entry. The sequence is
/// expected to be uppercase.
///
/// # Examples
///
/// ```rust
/// use orfscan_core::sequence::codons::StartCodonMatcher;
/// use orfscan_core::sequence::scanner::find_all_orfs;
///
/// let matcher = StartCodonMatcher::new(&["ATG"])?;
/// let orfs = find_all_orfs(b"ATGAAATAA", &matcher);
///
/// assert_eq!(orfs.len(), 1);
/// assert_eq!(orfs[0].start, 0);
/// assert_eq!(orfs[0].stop, Some(9));
/// assert_eq!(orfs[0].codon, "ATG");
/// assert_eq!(orfs[0].aa_length(), 2);
/// # Ok::<(), orfscan_core::types::OrfError>(())
/// ```
pub fn find_all_orfs(sequence: &[u8], starts: &StartCodonMatcher) -> Vec<OrfSpan> {
    if sequence.len() < CODON_LENGTH {
        return Vec::new();
    }

    let stops = StopIndex::new(sequence);
    sequence
        .windows(CODON_LENGTH)
        .enumerate()
        .filter(|(_, codon)| starts.matches(codon))
        .map(|(start, codon)| OrfSpan {
            start,
            stop: stops
                .next_stop(start)
                .map(|stop_position| stop_position + CODON_LENGTH),
            codon: String::from_utf8_lossy(codon).into_owned(),
        })
        .collect()
}
