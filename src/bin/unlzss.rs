use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;
use unlzss::{DecodeConfig, Decoder};

#[derive(Parser, Debug)]
#[command(name = "unlzss")]
#[command(about = "Decode LZSS streams with a configurable code word format")]
#[command(version)]
struct Args {
    /// Input file (defaults to stdin; - for stdin)
    input: Option<PathBuf>,

    /// Output file (defaults to stdout; - for stdout)
    output: Option<PathBuf>,

    /// Sliding window size in bytes
    #[arg(short = 'w', long, default_value = "256")]
    window_size: usize,

    /// Reference length width in bits
    #[arg(short = 'l', long, default_value = "8")]
    length_width: u32,

    /// Reference length bias
    #[arg(short = 'b', long, default_value = "0")]
    length_bias: u32,

    /// Reference distance width in bits (0 = derived from the window size)
    #[arg(long, default_value = "0")]
    distance_width: u32,

    /// Flag width in bits
    #[arg(long, default_value = "1")]
    flag_width: u32,

    /// Treat a zero flag as a reference and a non-zero flag as a literal
    #[arg(long)]
    invert_flag: bool,

    /// Count reference distances backward from the end of the window
    #[arg(long)]
    back_distance: bool,

    /// Trace every decoded code word to stderr
    #[arg(long)]
    debug: bool,

    /// Show decoding statistics
    #[arg(short, long)]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long)]
    quiet: bool,
}

/// Forwards library trace records to stderr; installed only for --debug
struct StderrLogger;

impl log::Log for StderrLogger {
    fn enabled(&self, _metadata: &log::Metadata) -> bool {
        true
    }

    fn log(&self, record: &log::Record) {
        eprintln!("{}", record.args());
    }

    fn flush(&self) {}
}

static LOGGER: StderrLogger = StderrLogger;

fn main() -> ExitCode {
    match run() {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(1)
        }
    }
}

fn run() -> Result<u8, Box<dyn std::error::Error>> {
    let args = Args::parse();

    if args.debug {
        log::set_logger(&LOGGER)?;
        log::set_max_level(log::LevelFilter::Trace);
    }

    let config = DecodeConfig {
        window_size: args.window_size,
        length_width: args.length_width,
        length_bias: args.length_bias,
        distance_width: args.distance_width,
        flag_width: args.flag_width,
        flag_zero_means_literal: !args.invert_flag,
        distance_from_end: args.back_distance,
        ..Default::default()
    };
    let decoder = Decoder::new(config)?;

    let input: Box<dyn Read> = match &args.input {
        Some(path) if path.to_str() != Some("-") => {
            Box::new(BufReader::new(File::open(path)?))
        }
        _ => Box::new(io::stdin().lock()),
    };
    let mut output: Box<dyn Write> = match &args.output {
        Some(path) if path.to_str() != Some("-") => {
            Box::new(BufWriter::new(File::create(path)?))
        }
        _ => Box::new(io::stdout().lock()),
    };

    let start = Instant::now();
    let stats = decoder.decode(input, &mut output)?;
    output.flush()?;
    let elapsed = start.elapsed();

    if args.verbose && !args.quiet {
        eprintln!("Decoding complete:");
        eprintln!("  Input bytes:      {}", stats.input_bytes);
        eprintln!("  Output bytes:     {}", stats.output_bytes);
        eprintln!("  Literals:         {}", stats.literal_count);
        eprintln!("  References:       {}", stats.reference_count);
        eprintln!("  Time:             {:.2?}", elapsed);
        eprintln!(
            "  Throughput:       {:.1} MB/s",
            stats.output_bytes as f64 / elapsed.as_secs_f64() / 1_000_000.0
        );
    }

    Ok(0)
}
