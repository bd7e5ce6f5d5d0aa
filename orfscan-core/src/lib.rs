//! # orfscan
//!
//! Transcriptome-wide enumeration of open reading frames and their
//! classification against annotated coding sequences.
//!
//! ## Overview
//!
//! Transcripts are grouped into families whose genomic footprints overlap.
//! Every member transcript of a family is scanned for start codons and the
//! first in-frame stop that follows each of them. ORFs are placed on the
//! genome, ORFs that are identical across alternative transcripts share one
//! name, and each distinct ORF receives one type describing how it relates
//! to the annotated CDSs of its family (annotated, truncation, extension,
//! upstream, novel isoform and so on).
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use orfscan_core::{OrfAnalyzer, config::{InputPaths, OrfConfig, OutputFormat}};
//! use orfscan_core::output::write_results;
//! use std::fs::File;
//!
//! let analyzer = OrfAnalyzer::new(OrfConfig::default());
//! let table = analyzer.analyze(&InputPaths::new("genome.fa"))?;
//!
//! println!("Found {} ORF records", table.len());
//! write_results(&mut File::create("orfs.tsv")?, &table, OutputFormat::Tsv)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Module Organization
//!
//! - [`config`]: Configuration options and input locations
//! - [`engine`]: Parallel per-family processing
//! - [`annotation`]: BED readers, family tables and annotated CDS sets
//! - [`family`]: Per-family ORF discovery, coverage and naming
//! - [`classify`]: ORF type assignment
//! - [`sequence`]: FASTA loading, codon matching and ORF scanning
//! - [`model`]: Spliced genomic features
//! - [`results`]: ORF records and the result table
//! - [`output`]: Delimited text output
//! - [`types`]: ORF types and errors
//!
//! ## Error Handling
//!
//! All fallible operations return [`Result<T, OrfError>`](types::OrfError),
//! covering invalid start codons, unreadable or malformed inputs, families
//! or transcripts missing from the tables, and transcripts that leave
//! their family footprint.

pub mod annotation;
pub mod classify;
pub mod config;
pub mod constants;
pub mod engine;
pub mod family;
pub mod model;
pub mod output;
pub mod results;
pub mod sequence;
pub mod types;

pub use engine::OrfAnalyzer;
pub use results::{OrfRecord, OrfTable};
pub use types::{OrfError, OrfType};
