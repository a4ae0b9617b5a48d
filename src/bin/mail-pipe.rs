//! CLI tool to run an email pipeline over a mailbox stream.
//!
//! Input is a line-oriented stream where three consecutive lines form one
//! message (sender, recipient, body). Messages surviving the configured
//! stages are written to the output in the same three-line format.

use clap::Parser;
use mailpipe::{PipelineBuilder, Stage};
use std::fs::File;
use std::io::{self, BufReader, Write};
use std::process;

/// Run an email pipeline over a mailbox file.
///
/// Stages are applied in a fixed order: filter (--from), then copy
/// (--copy-to), then delivery to the output.
#[derive(Parser)]
#[command(name = "mail-pipe")]
struct Cli {
    /// Input mailbox file (three lines per message)
    input: String,

    /// Keep only messages sent from this address
    #[arg(short, long)]
    from: Option<String>,

    /// Deliver an extra copy of each message to this address
    #[arg(short, long)]
    copy_to: Option<String>,

    /// Write delivered messages to file instead of stdout
    #[arg(short, long)]
    output: Option<String>,

    /// Show the pipeline configuration on stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    let input = match File::open(&cli.input) {
        Ok(file) => BufReader::new(file),
        Err(e) => {
            eprintln!("Error opening input file '{}': {e}", cli.input);
            process::exit(1);
        }
    };

    let sink: Box<dyn Write> = match &cli.output {
        Some(path) => match File::create(path) {
            Ok(file) => Box::new(file),
            Err(e) => {
                eprintln!("Error creating output file '{path}': {e}");
                process::exit(1);
            }
        },
        None => Box::new(io::stdout()),
    };

    if cli.verbose {
        eprintln!("Input:   {}", cli.input);
        eprintln!("Output:  {}", cli.output.as_deref().unwrap_or("(stdout)"));
        eprintln!("Filter:  {}", cli.from.as_deref().unwrap_or("(none)"));
        eprintln!("Copy to: {}", cli.copy_to.as_deref().unwrap_or("(none)"));
    }

    let mut builder = PipelineBuilder::new(input);
    if let Some(from) = cli.from {
        builder = builder.filter_by(move |email| email.sender == from);
    }
    if let Some(copy_to) = cli.copy_to {
        builder = builder.copy_to(copy_to);
    }
    let mut pipeline = builder.send_to(sink).build();

    if let Err(e) = pipeline.run() {
        eprintln!("Pipeline error: {e}");
        process::exit(1);
    }
}
