//! Streaming digest support
//!
//! Both digests are fed from the same buffers during the combine pass, so
//! the output is hashed exactly once without a second read of the file.

use md5::Md5;
use sha2::{Digest, Sha256};

/// Finalized digests of the combined stream, lowercase hex
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DigestPair {
    pub md5_hex: String,
    pub sha256_hex: String,
}

/// Incremental MD5 + SHA-256 over one byte stream
pub struct StreamingDigests {
    md5: Md5,
    sha256: Sha256,
}

impl StreamingDigests {
    pub fn new() -> Self {
        Self {
            md5: Md5::new(),
            sha256: Sha256::new(),
        }
    }

    /// Feed the next run of bytes into both digests
    pub fn update(&mut self, data: &[u8]) {
        self.md5.update(data);
        self.sha256.update(data);
    }

    /// Consume the hasher and produce both hex digests
    pub fn finalize(self) -> DigestPair {
        DigestPair {
            md5_hex: format!("{:x}", self.md5.finalize()),
            sha256_hex: format!("{:x}", self.sha256.finalize()),
        }
    }
}

impl Default for StreamingDigests {
    fn default() -> Self {
        Self::new()
    }
}
