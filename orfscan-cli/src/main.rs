//! # orfscan CLI
//!
//! Identifies every ORF in a transcriptome and classifies it against the
//! annotated CDSs of its transcript family.
//!
//! ## Usage
//!
//! ```bash
//! # Defaults: tfams.txt/tfams.bed, transcripts.bed, ATG starts, orfs.tsv
//! orfscan genome.fa
//!
//! # Near-cognate starts on eight threads
//! orfscan genome.fa --codons ATG NTG -p 8
//!
//! # Classify against an external CDS set only
//! orfscan genome.fa --ignore-annotations --extracdsbeds refseq_cds.bed
//! ```
//!
//! ## Options
//!
//! - `--tfamstem <STEM>`: Transcript family files STEM.txt and STEM.bed (default: tfams)
//! - `--orfstore <FILE>`: Output table (default: orfs.tsv)
//! - `--inbed <FILE>`: Transcriptome BED file (default: transcripts.bed)
//! - `--codons <CODON>...`: Start codons, IUPAC letters allowed (default: ATG)
//! - `--ignore-annotations`: Do not use the CDSs annotated in the transcriptome
//! - `--extracdsbeds <FILE>...`: Additional BED files of annotated CDSs
//! - `-p, --numproc <N>`: Worker threads (default: all cores)
//! - `--format <FORMAT>`: tsv or csv (default: tsv)
//! - `-f, --force`: Overwrite an existing output table
//! - `-v, --verbose`: Debug logging
//! - `-q, --quiet`: Warnings only

use clap::{Arg, ArgAction, Command, value_parser};
use log::info;
use orfscan_core::config::{InputPaths, OrfConfig, OutputFormat};
use orfscan_core::constants::{
    DEFAULT_ORF_STORE, DEFAULT_START_CODON, DEFAULT_TFAM_STEM, DEFAULT_TRANSCRIPT_BED, VERSION,
};
use orfscan_core::OrfAnalyzer;
use orfscan_core::output::{ensure_writable, write_results};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

fn cli() -> Command {
    Command::new("orfscan")
        .version(VERSION)
        .about("Identify and classify all possible ORFs in a transcriptome")
        .arg(
            Arg::new("genome")
                .value_name("GENOME_FASTA")
                .help("Genome FASTA file")
                .required(true)
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("tfamstem")
                .long("tfamstem")
                .value_name("STEM")
                .help("Transcript family files STEM.txt and STEM.bed")
                .default_value(DEFAULT_TFAM_STEM),
        )
        .arg(
            Arg::new("orfstore")
                .long("orfstore")
                .value_name("FILE")
                .help("Output ORF table")
                .default_value(DEFAULT_ORF_STORE)
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("inbed")
                .long("inbed")
                .value_name("FILE")
                .help("Transcriptome BED file; its CDSs are taken as annotated")
                .default_value(DEFAULT_TRANSCRIPT_BED)
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("codons")
                .long("codons")
                .value_name("CODON")
                .help("Start codons; IUPAC letters allowed, e.g. NTG")
                .num_args(1..)
                .default_value(DEFAULT_START_CODON),
        )
        .arg(
            Arg::new("ignore-annotations")
                .long("ignore-annotations")
                .alias("ignoreannotations")
                .help("Do not use the CDSs annotated in the transcriptome BED")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("extracdsbeds")
                .long("extracdsbeds")
                .value_name("FILE")
                .help("Additional BED files of annotated CDSs")
                .num_args(1..)
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("numproc")
                .short('p')
                .long("numproc")
                .value_name("N")
                .help("Number of worker threads (default: all cores)")
                .value_parser(value_parser!(usize)),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .value_name("FORMAT")
                .help("Output format: tsv or csv")
                .value_parser(["tsv", "csv"])
                .default_value("tsv"),
        )
        .arg(
            Arg::new("force")
                .short('f')
                .long("force")
                .help("Overwrite an existing output table")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Log progress in detail")
                .action(ArgAction::SetTrue)
                .conflicts_with("quiet"),
        )
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .help("Only log warnings and errors")
                .action(ArgAction::SetTrue),
        )
}

/// Main entry point for the orfscan CLI application.
///
/// Parses command-line arguments, checks the start codons and the output
/// target, processes every transcript family and writes the ORF table.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let matches = cli().get_matches();

    let output_format = match matches.get_one::<String>("format").map(String::as_str) {
        Some("csv") => OutputFormat::Csv,
        _ => OutputFormat::Tsv,
    };

    let config = OrfConfig {
        start_codons: matches
            .get_many::<String>("codons")
            .map(|codons| codons.cloned().collect())
            .unwrap_or_else(|| vec![DEFAULT_START_CODON.to_string()]),
        ignore_annotations: matches.get_flag("ignore-annotations"),
        extra_cds_beds: matches
            .get_many::<PathBuf>("extracdsbeds")
            .map(|paths| paths.cloned().collect())
            .unwrap_or_default(),
        num_threads: matches.get_one::<usize>("numproc").copied(),
        quiet: matches.get_flag("quiet"),
        verbose: matches.get_flag("verbose"),
        force: matches.get_flag("force"),
        output_format,
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(config.log_filter()))
        .init();
    config.validate()?;

    let orfstore = matches
        .get_one::<PathBuf>("orfstore")
        .cloned()
        .unwrap_or_else(orfscan_core::config::default_orf_store);
    ensure_writable(&orfstore, config.force)?;

    let mut paths = InputPaths::new(
        matches
            .get_one::<PathBuf>("genome")
            .cloned()
            .ok_or("Missing genome FASTA")?,
    );
    if let Some(inbed) = matches.get_one::<PathBuf>("inbed") {
        paths.transcript_bed.clone_from(inbed);
    }
    if let Some(stem) = matches.get_one::<String>("tfamstem") {
        paths.tfam_stem.clone_from(stem);
    }

    let analyzer = OrfAnalyzer::new(config);
    let table = analyzer.analyze(&paths)?;

    let mut writer = BufWriter::new(File::create(&orfstore)?);
    write_results(&mut writer, &table, analyzer.config.output_format)?;
    writer.flush()?;

    info!(
        "Wrote {} ORF records to {}",
        table.len(),
        orfstore.display()
    );
    Ok(())
}
