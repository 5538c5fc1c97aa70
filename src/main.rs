use std::process;

use clap::Parser;
use huf::compressor::{Compressor, Report};

#[derive(Parser, Debug)]
#[command(about = "Compress a file into a self-describing static Huffman artifact (<stem>.huf)")]
struct Args {
    /// The file to compress
    source_name: String,
    /// Also write the run summary to <artifact>.properties
    #[arg(short, long, default_value_t = false)]
    properties: bool,
    /// Print the run summary as JSON
    #[arg(short, long, default_value_t = false)]
    json: bool,
    /// Print the Huffman table and the code of every symbol
    #[arg(short, long, default_value_t = false)]
    verbose: bool,
}

fn print_report(args: &Args, report: &Report) -> serde_json::Result<()> {
    if args.verbose {
        println!("Huffman table:");
        print!("{}", report.encoder.table());
        println!("Codes:");
        print!("{}", report.encoder.codes());
    }

    if args.json {
        println!("{}", serde_json::to_string(&report.properties)?);
    }

    let props = &report.properties;
    println!(
        "compressed {} into {}: {} bytes -> {} bytes",
        props.source, props.artifact, props.source_bytes, props.artifact_bytes
    );

    Ok(())
}

fn main() {
    let args = Args::parse();

    let compressor = Compressor::new(args.source_name.as_str())
        .set_write_properties(args.properties);

    let report = compressor.compress().unwrap_or_else(|e| {
        eprintln!("Failed compressing {}: {}", args.source_name, e);
        process::exit(1);
    });

    if let Err(e) = print_report(&args, &report) {
        eprintln!("Failed printing the summary: {}", e);
        process::exit(1);
    }
}
