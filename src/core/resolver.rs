//! Chunk set resolution
//!
//! Turns one reference chunk path into the full ordered set of sibling
//! chunks: infer the base name from the reference, enumerate the directory
//! for names that share it under the same convention, and sort by each
//! suffix's ordering key.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::core::convention::{recognize, Convention, OrderKey};
use crate::error::{CombineError, Result};

/// An ordered set of chunk files sharing one base name and convention.
///
/// Only [`discover_chunks`] constructs this, which guarantees the set is
/// non-empty, every member matched the convention at discovery time, and the
/// members are in concatenation order.
#[derive(Debug, Clone)]
pub struct ChunkSet {
    base: String,
    convention: Convention,
    chunks: Vec<PathBuf>,
}

impl ChunkSet {
    /// Base name shared by every member
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Naming convention every member matched
    pub fn convention(&self) -> Convention {
        self.convention
    }

    /// Member paths in concatenation order
    pub fn chunks(&self) -> &[PathBuf] {
        &self.chunks
    }

    /// Number of chunks in the set
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    /// Always false: discovery never yields an empty set
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// First chunk in concatenation order
    pub fn first(&self) -> &Path {
        &self.chunks[0]
    }

    /// Sum of the current on-disk sizes of all members
    pub fn total_bytes(&self) -> Result<u64> {
        let mut total = 0u64;
        for chunk in &self.chunks {
            total += fs::metadata(chunk)?.len();
        }
        Ok(total)
    }
}

/// Infer the shared base name and naming convention from one chunk's path.
///
/// Fails with [`CombineError::UnrecognizedSuffix`] when the filename carries
/// no recognizable chunk suffix.
pub fn infer_base(reference: &Path) -> Result<(String, Convention)> {
    let name = match reference.file_name().and_then(|n| n.to_str()) {
        Some(n) => n,
        None => {
            return Err(CombineError::unrecognized_suffix(
                reference.to_string_lossy(),
            ))
        }
    };

    let (base, convention) = match recognize(name) {
        Some(found) => found,
        None => return Err(CombineError::unrecognized_suffix(name)),
    };

    debug!(base, convention = %convention, "inferred base name");
    Ok((base.to_string(), convention))
}

/// Enumerate the chunks of `base` in `dir` that match `convention`, in order.
///
/// Candidates must be regular files named `<base>.<suffix>` with a suffix the
/// convention accepts. Entries that merely share the prefix (checksums,
/// chunks of another convention, directories) are left alone.
pub fn discover_chunks(dir: &Path, base: &str, convention: Convention) -> Result<ChunkSet> {
    let prefix = format!("{}.", base);
    let mut found: Vec<(OrderKey, PathBuf)> = Vec::new();

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let file_name = entry.file_name();
        let name = match file_name.to_str() {
            Some(n) => n,
            None => continue,
        };
        let suffix = match name.strip_prefix(&prefix) {
            Some(s) => s,
            None => continue,
        };
        let key = match convention.order_key(suffix) {
            Some(k) => k,
            None => continue,
        };

        let path = entry.path();
        // metadata follows symlinks so a linked chunk still qualifies
        if !fs::metadata(&path)?.is_file() {
            debug!(path = %path.display(), "skipping non-file entry named like a chunk");
            continue;
        }
        found.push((key, path));
    }

    if found.is_empty() {
        return Err(CombineError::no_chunks_found(base, dir));
    }

    found.sort_by(|a, b| a.0.cmp(&b.0));
    let chunks: Vec<PathBuf> = found.into_iter().map(|(_, path)| path).collect();

    debug!(
        base,
        convention = %convention,
        count = chunks.len(),
        "discovered chunk set"
    );

    Ok(ChunkSet {
        base: base.to_string(),
        convention,
        chunks,
    })
}

/// Resolve a reference chunk path into the full ordered [`ChunkSet`].
pub fn resolve(reference: &Path) -> Result<ChunkSet> {
    let (base, convention) = infer_base(reference)?;
    discover_chunks(parent_dir(reference), &base, convention)
}

/// Derive the default output path by stripping the chunk suffix from the
/// first chunk's name. Falls back to appending `.combined` when the name does
/// not strip cleanly, so the combine step always has a usable target.
pub fn derive_output_name(first_chunk: &Path) -> PathBuf {
    let name = match first_chunk.file_name().and_then(|n| n.to_str()) {
        Some(n) => n,
        None => {
            let mut fallback = first_chunk.as_os_str().to_os_string();
            fallback.push(".combined");
            return PathBuf::from(fallback);
        }
    };

    let dir = parent_dir(first_chunk);
    match recognize(name) {
        Some((base, _)) => dir.join(base),
        None => dir.join(format!("{}.combined", name)),
    }
}

/// Parent directory of a path, defaulting to the current directory for bare
/// filenames.
fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    fn touch(dir: &Path, name: &str, contents: &[u8]) -> PathBuf {
        let path = dir.join(name);
        let mut file = File::create(&path).unwrap();
        file.write_all(contents).unwrap();
        path
    }

    #[test]
    fn test_infer_base_numeric() {
        let (base, convention) = infer_base(Path::new("backup.tar.gz.001")).unwrap();
        assert_eq!(base, "backup.tar.gz");
        assert_eq!(convention, Convention::Numeric);
    }

    #[test]
    fn test_infer_base_part() {
        let (base, convention) = infer_base(Path::new("/data/archive.tar.gz.part2")).unwrap();
        assert_eq!(base, "archive.tar.gz");
        assert_eq!(convention, Convention::Part);
    }

    #[test]
    fn test_infer_base_alpha() {
        let (base, convention) = infer_base(Path::new("data.aa")).unwrap();
        assert_eq!(base, "data");
        assert_eq!(convention, Convention::Alpha);
    }

    #[test]
    fn test_infer_base_rejects_plain_extension() {
        let err = infer_base(Path::new("notes.txt")).unwrap_err();
        assert!(matches!(err, CombineError::UnrecognizedSuffix { .. }));
        assert!(err.to_string().contains("notes.txt"));
    }

    #[test]
    fn test_discover_ignores_unrelated_siblings() {
        let dir = tempdir().unwrap();
        touch(dir.path(), "f.001", b"a");
        touch(dir.path(), "f.002", b"b");
        touch(dir.path(), "f.003", b"c");
        touch(dir.path(), "f.sha256", b"checksum");
        touch(dir.path(), "f.part1", b"other convention");
        touch(dir.path(), "f.001.bak", b"backup");

        let set = discover_chunks(dir.path(), "f", Convention::Numeric).unwrap();
        let names: Vec<_> = set
            .chunks()
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["f.001", "f.002", "f.003"]);
    }

    #[test]
    fn test_discover_orders_numerically_not_lexically() {
        let dir = tempdir().unwrap();
        touch(dir.path(), "f.10", b"");
        touch(dir.path(), "f.2", b"");

        let set = discover_chunks(dir.path(), "f", Convention::Numeric).unwrap();
        let names: Vec<_> = set
            .chunks()
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["f.2", "f.10"]);
    }

    #[test]
    fn test_discover_orders_alpha_lexically() {
        let dir = tempdir().unwrap();
        for name in ["x.ba", "x.aa", "x.az", "x.ab"] {
            touch(dir.path(), name, b"");
        }

        let set = discover_chunks(dir.path(), "x", Convention::Alpha).unwrap();
        let names: Vec<_> = set
            .chunks()
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["x.aa", "x.ab", "x.az", "x.ba"]);
    }

    #[test]
    fn test_discover_skips_directories_named_like_chunks() {
        let dir = tempdir().unwrap();
        touch(dir.path(), "f.001", b"a");
        touch(dir.path(), "f.002", b"b");
        fs::create_dir(dir.path().join("f.003")).unwrap();

        let set = discover_chunks(dir.path(), "f", Convention::Numeric).unwrap();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_discover_empty_directory_is_an_error() {
        let dir = tempdir().unwrap();
        let err = discover_chunks(dir.path(), "f", Convention::Numeric).unwrap_err();
        assert!(matches!(err, CombineError::NoChunksFound { .. }));
    }

    #[test]
    fn test_discover_missing_directory_is_io_error() {
        let err =
            discover_chunks(Path::new("/nonexistent-dir-for-test"), "f", Convention::Numeric)
                .unwrap_err();
        assert!(matches!(err, CombineError::Io(_)));
    }

    #[test]
    fn test_resolve_from_reference_path() {
        let dir = tempdir().unwrap();
        touch(dir.path(), "backup.tar.gz.001", b"1");
        touch(dir.path(), "backup.tar.gz.002", b"2");

        let set = resolve(&dir.path().join("backup.tar.gz.002")).unwrap();
        assert_eq!(set.base(), "backup.tar.gz");
        assert_eq!(set.convention(), Convention::Numeric);
        assert_eq!(set.len(), 2);
        assert!(!set.is_empty());
        assert!(set.first().ends_with("backup.tar.gz.001"));
    }

    #[test]
    fn test_total_bytes_sums_all_members() {
        let dir = tempdir().unwrap();
        touch(dir.path(), "f.001", b"abc");
        touch(dir.path(), "f.002", b"defgh");

        let set = discover_chunks(dir.path(), "f", Convention::Numeric).unwrap();
        assert_eq!(set.total_bytes().unwrap(), 8);
    }

    #[test]
    fn test_derive_output_strips_suffix() {
        assert_eq!(
            derive_output_name(Path::new("/data/backup.tar.gz.001")),
            PathBuf::from("/data/backup.tar.gz")
        );
        assert_eq!(
            derive_output_name(Path::new("x.part3")),
            PathBuf::from("./x")
        );
    }

    #[test]
    fn test_derive_output_falls_back_to_combined() {
        assert_eq!(
            derive_output_name(Path::new("/data/weird.bin")),
            PathBuf::from("/data/weird.bin.combined")
        );
    }
}
