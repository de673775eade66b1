/*!
 * Accrete CLI - Command Line Interface
 *
 * Point it at any one chunk of a split file and it reassembles the whole
 * thing, verifying nothing is silently skipped along the way.
 */

use accrete::{
    cli_style::{format_bytes, Theme},
    config::CombineConfig,
    core::{combine, derive_output_name, resolve},
    error::{Result, EXIT_FAILURE, EXIT_SUCCESS},
    logging,
    output::OutputWriter,
};
use clap::Parser;
use dialoguer::{theme::ColorfulTheme, Confirm};
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Parser)]
#[command(name = "accrete")]
#[command(
    version,
    about = "Reassemble split chunk files (.001, .aa, .part1, .chunk1) into a single file",
    long_about = None
)]
struct Cli {
    /// Path to any one of the chunk files (e.g. backup.tar.gz.001)
    #[arg(value_name = "CHUNK")]
    input: PathBuf,

    /// Output file path (default: chunk name with its suffix stripped)
    #[arg(short = 'o', long = "output", value_name = "PATH")]
    output: Option<PathBuf>,

    /// Read/write buffer size in MiB
    #[arg(
        short = 'b',
        long = "buffer-size",
        value_name = "MIB",
        default_value_t = 8,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    buffer_size: u64,

    /// Overwrite an existing output file without prompting
    #[arg(short = 'y', long = "yes")]
    yes: bool,

    /// Suppress the progress bar
    #[arg(short = 'q', long = "quiet")]
    quiet: bool,

    /// Emit the final report as a single JSON object
    #[arg(long = "json")]
    json: bool,

    /// Enable verbose (debug) logging
    #[arg(long = "verbose")]
    verbose: bool,

    /// Write logs as JSON lines to a file instead of stderr
    #[arg(long = "log-file", value_name = "PATH")]
    log_file: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();

    let config = CombineConfig {
        buffer_size: cli.buffer_size as usize * 1024 * 1024,
        show_progress: !cli.quiet && !cli.json,
        assume_yes: cli.yes,
        verbose: cli.verbose,
        log_file: cli.log_file.clone(),
        ..Default::default()
    };

    let writer = OutputWriter::new(cli.json);

    if let Err(e) = logging::init_logging(&config) {
        writer.error(&e.to_string());
        std::process::exit(EXIT_FAILURE);
    }

    if let Err(e) = run(&cli, &config, &writer) {
        writer.error(&e.to_string());
        std::process::exit(EXIT_FAILURE);
    }
}

fn run(cli: &Cli, config: &CombineConfig, writer: &OutputWriter) -> Result<()> {
    let chunk_set = resolve(&cli.input)?;

    if !writer.is_json() {
        println!("Found {} chunk(s):", chunk_set.len());
        for chunk in chunk_set.chunks() {
            if let Some(name) = chunk.file_name() {
                println!("  {}", Theme::muted(name.to_string_lossy()));
            }
        }
    }

    let output_path = match &cli.output {
        Some(path) => path.clone(),
        None => derive_output_name(chunk_set.first()),
    };

    if output_path.exists() && !config.assume_yes && !confirm_overwrite(&output_path) {
        writer.info("Aborted.");
        std::process::exit(EXIT_SUCCESS);
    }

    let total_bytes = chunk_set.total_bytes()?;
    writer.info(&format!(
        "\nCombining {} chunks into: {}",
        chunk_set.len(),
        output_path.display()
    ));
    writer.info(&format!("Total size: {}", format_bytes(total_bytes)));

    debug!(
        chunks = chunk_set.len(),
        output = %output_path.display(),
        buffer_size = config.buffer_size,
        "starting combine"
    );

    let result = combine(&chunk_set, &output_path, config)?;
    writer.report(&result, chunk_set.len());

    Ok(())
}

/// Ask before clobbering an existing output file. A failed prompt (no TTY,
/// closed stdin) counts as a decline.
fn confirm_overwrite(path: &Path) -> bool {
    Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(format!(
            "Output file '{}' already exists. Overwrite?",
            path.display()
        ))
        .default(false)
        .interact()
        .unwrap_or(false)
}
