/*!
 * Accrete - chunked file reassembly
 *
 * Reassembles a file that was split into sequentially named chunks:
 * - Infers the shared base name from any one chunk path
 * - Discovers sibling chunks under the same naming convention
 *   (.001/.002, .aa/.ab, .part1/.part2, .chunk1/.chunk2)
 * - Orders them numerically or lexically as the convention dictates
 * - Streams them into a single output file with running MD5 and
 *   SHA-256 digests for integrity display
 */

pub mod cli_style;
pub mod config;
pub mod core;
pub mod error;
pub mod logging;
pub mod output;

// Re-export commonly used types
pub use config::{CombineConfig, LogLevel, DEFAULT_BUFFER_SIZE};
pub use core::{
    combine, derive_output_name, discover_chunks, infer_base, resolve, ChunkSet, CombineResult,
    Convention, OrderKey,
};
pub use error::{CombineError, Result};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
