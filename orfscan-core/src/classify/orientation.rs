use bio::bio_types::strand::Strand;

use crate::types::GenomicCoord;

/// Maps genomic coordinates so that "downstream" always means "larger".
///
/// On the minus strand coordinates are negated; comparisons written for
/// the plus strand then hold unchanged on both strands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Orientation {
    reverse: bool,
}

impl Orientation {
    #[must_use]
    pub fn new(strand: Strand) -> Self {
        Self {
            reverse: strand == Strand::Reverse,
        }
    }

    /// Coordinate in transcription order
    #[inline]
    #[must_use]
    pub const fn oriented(self, position: GenomicCoord) -> GenomicCoord {
        if self.reverse { -position } else { position }
    }

    /// Whether `a` lies strictly upstream of `b`
    #[inline]
    #[must_use]
    pub const fn upstream_of(self, a: GenomicCoord, b: GenomicCoord) -> bool {
        self.oriented(a) < self.oriented(b)
    }
}
