/*!
 * Core chunk resolution and combine operations
 */

pub mod combiner;
pub mod convention;
pub mod digest;
pub mod resolver;

pub use combiner::{combine, CombineResult};
pub use convention::{recognize, Convention, OrderKey};
pub use digest::{DigestPair, StreamingDigests};
pub use resolver::{derive_output_name, discover_chunks, infer_base, resolve, ChunkSet};
