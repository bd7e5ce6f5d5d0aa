use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

use bio::alphabets::dna;
use bio::bio_types::strand::Strand;
use bio::io::fasta;
use log::debug;

use crate::model::SegmentChain;
use crate::types::OrfError;

/// In-memory genome: chromosome name → sequence.
#[derive(Debug, Default)]
pub struct Genome {
    chromosomes: HashMap<String, Vec<u8>>,
}

impl Genome {
    /// Loads every record of a FASTA file.
    ///
    /// # Errors
    ///
    /// Returns [`OrfError::IoError`] if the file cannot be opened and
    /// [`OrfError::ParseError`] for malformed records.
    pub fn from_fasta<P: AsRef<Path>>(path: P) -> Result<Self, OrfError> {
        let reader = fasta::Reader::new(File::open(path)?);
        let genome = reader
            .records()
            .map(|record| {
                let record = record.map_err(|e| OrfError::ParseError(e.to_string()))?;
                Ok::<_, OrfError>((record.id().to_string(), record.seq().to_vec()))
            })
            .collect::<Result<Self, OrfError>>()?;
        debug!("Loaded {} chromosome(s)", genome.len());
        Ok(genome)
    }

    /// Number of chromosomes
    #[must_use]
    pub fn len(&self) -> usize {
        self.chromosomes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chromosomes.is_empty()
    }

    /// Uppercase spliced sequence of a segment chain, 5′→3′ on its strand.
    ///
    /// # Errors
    ///
    /// Returns [`OrfError::MissingChromosome`] if the chain's chromosome is
    /// absent and [`OrfError::CoordinateOutOfRange`] if an exon runs past
    /// the chromosome end.
    pub fn spliced_sequence(&self, chain: &SegmentChain) -> Result<Vec<u8>, OrfError> {
        let chromosome = self
            .chromosomes
            .get(&chain.chrom)
            .ok_or_else(|| OrfError::MissingChromosome(chain.chrom.clone()))?;

        let mut sequence = Vec::with_capacity(chain.len());
        for exon in chain.exons() {
            let block = chromosome
                .get(exon.start as usize..exon.end as usize)
                .ok_or_else(|| OrfError::CoordinateOutOfRange {
                    tid: chain.name.clone(),
                    offset: exon.end as usize,
                    length: chromosome.len(),
                })?;
            sequence.extend_from_slice(block);
        }

        if chain.strand == Strand::Reverse {
            sequence = dna::revcomp(&sequence);
        }
        sequence.make_ascii_uppercase();
        Ok(sequence)
    }
}

impl FromIterator<(String, Vec<u8>)> for Genome {
    fn from_iter<I: IntoIterator<Item = (String, Vec<u8>)>>(iter: I) -> Self {
        Self {
            chromosomes: iter.into_iter().collect(),
        }
    }
}
