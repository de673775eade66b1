//! Streaming chunk concatenation
//!
//! Appends every chunk of a [`ChunkSet`] to the output file in set order,
//! reusing one buffer across all chunks and feeding each filled slice into
//! the running digests before it is written out.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use indicatif::{ProgressBar, ProgressStyle};
use tracing::debug;

use crate::config::CombineConfig;
use crate::core::digest::StreamingDigests;
use crate::core::resolver::ChunkSet;
use crate::error::{CombineError, Result};

/// Outcome of a completed combine run
#[derive(Debug, Clone)]
pub struct CombineResult {
    /// Path the combined bytes were written to
    pub output_path: PathBuf,
    /// Total bytes written
    pub bytes_written: u64,
    /// MD5 of the output stream, lowercase hex
    pub md5_hex: String,
    /// SHA-256 of the output stream, lowercase hex
    pub sha256_hex: String,
    /// Wall-clock time spent combining
    pub duration: Duration,
}

impl CombineResult {
    /// Average throughput in bytes per second
    pub fn throughput(&self) -> f64 {
        let secs = self.duration.as_secs_f64();
        if secs > 0.0 {
            self.bytes_written as f64 / secs
        } else {
            0.0
        }
    }
}

/// Concatenate every chunk into `output_path` in set order.
///
/// Creates or truncates the output file. Overwrite confirmation is the
/// caller's job, as is any cleanup of a partial output left behind by an I/O
/// failure.
pub fn combine(
    chunk_set: &ChunkSet,
    output_path: &Path,
    config: &CombineConfig,
) -> Result<CombineResult> {
    if config.buffer_size == 0 {
        return Err(CombineError::config("buffer size must be positive"));
    }

    let start_time = Instant::now();
    let total_bytes = chunk_set.total_bytes()?;

    let progress = if config.show_progress {
        let bar = ProgressBar::new(total_bytes);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({eta})")
                .unwrap()
                .progress_chars("#>-"),
        );
        Some(bar)
    } else {
        None
    };

    let mut output = BufWriter::new(File::create(output_path)?);
    let mut digests = StreamingDigests::new();
    let mut buffer = vec![0u8; config.buffer_size];
    let mut written = 0u64;

    for (index, chunk) in chunk_set.chunks().iter().enumerate() {
        debug!(
            chunk = %chunk.display(),
            index = index + 1,
            total = chunk_set.len(),
            "appending chunk"
        );

        // each handle is scoped to its chunk and closes before the next opens
        let mut reader = BufReader::new(File::open(chunk)?);
        loop {
            let n = reader.read(&mut buffer)?;
            if n == 0 {
                break;
            }
            digests.update(&buffer[..n]);
            output.write_all(&buffer[..n])?;
            written += n as u64;

            if let Some(ref bar) = progress {
                bar.set_position(written);
            }
        }
    }

    output.flush()?;

    if let Some(bar) = progress {
        bar.finish_and_clear();
    }

    let digest_pair = digests.finalize();
    let duration = start_time.elapsed();

    debug!(
        bytes = written,
        elapsed_ms = duration.as_millis() as u64,
        "combine complete"
    );

    Ok(CombineResult {
        output_path: output_path.to_path_buf(),
        bytes_written: written,
        md5_hex: digest_pair.md5_hex,
        sha256_hex: digest_pair.sha256_hex,
        duration,
    })
}
