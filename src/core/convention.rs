//! Chunk naming conventions and suffix ordering
//!
//! A chunk file is named `<base>.<suffix>` where the suffix identifies the
//! convention the splitting tool used. Matching is mutually exclusive by
//! construction: no suffix can satisfy more than one convention, so the trial
//! order in [`recognize`] documents precedence rather than resolving ties.

use std::fmt;

/// A recognized chunk naming convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Convention {
    /// Purely numeric suffixes: `.001`, `.2`, `.0010`
    Numeric,
    /// Exactly two lowercase letters, the `split` default: `.aa`, `.ab`
    Alpha,
    /// Labeled numeric suffixes: `.part1`, `.part12`
    Part,
    /// Labeled numeric suffixes: `.chunk1`, `.chunk12`
    Chunk,
}

/// Ordering key extracted from a chunk suffix.
///
/// Numeric conventions order by the embedded integer, so `.2` sorts before
/// `.10` regardless of zero padding. Alphabetic suffixes order by the raw
/// string. The variant order makes keys of different kinds comparable without
/// ever mixing within one chunk set.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum OrderKey {
    Index(u64),
    Label(String),
}

impl Convention {
    /// All conventions, in the order they are tried during recognition
    pub const ALL: [Convention; 4] = [
        Convention::Numeric,
        Convention::Alpha,
        Convention::Part,
        Convention::Chunk,
    ];

    /// Extract the ordering key if `suffix` matches this convention.
    ///
    /// Returns `None` for anything that does not match, including digit runs
    /// too large to index with a `u64`.
    pub fn order_key(&self, suffix: &str) -> Option<OrderKey> {
        match self {
            Convention::Numeric => parse_index(suffix).map(OrderKey::Index),
            Convention::Alpha => {
                if is_alpha_pair(suffix) {
                    Some(OrderKey::Label(suffix.to_string()))
                } else {
                    None
                }
            }
            Convention::Part => suffix
                .strip_prefix("part")
                .and_then(parse_index)
                .map(OrderKey::Index),
            Convention::Chunk => suffix
                .strip_prefix("chunk")
                .and_then(parse_index)
                .map(OrderKey::Index),
        }
    }

    /// Whether `suffix` belongs to this convention
    pub fn matches(&self, suffix: &str) -> bool {
        self.order_key(suffix).is_some()
    }
}

impl fmt::Display for Convention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Convention::Numeric => "numeric",
            Convention::Alpha => "alphabetic",
            Convention::Part => "part",
            Convention::Chunk => "chunk",
        };
        f.write_str(name)
    }
}

/// Split `file_name` into its base name and the convention its suffix matches.
///
/// The suffix is everything after the last dot. Returns `None` when the name
/// has no dot, the base would be empty, or the suffix matches no convention.
pub fn recognize(file_name: &str) -> Option<(&str, Convention)> {
    let (base, suffix) = file_name.rsplit_once('.')?;
    if base.is_empty() {
        return None;
    }
    Convention::ALL
        .iter()
        .find(|c| c.matches(suffix))
        .map(|c| (base, *c))
}

/// Parse a chunk index: ASCII digits only, fitting in a u64.
///
/// Stricter than `u64::from_str`, which would also accept a leading `+`.
fn parse_index(digits: &str) -> Option<u64> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

fn is_alpha_pair(suffix: &str) -> bool {
    suffix.len() == 2 && suffix.bytes().all(|b| b.is_ascii_lowercase())
}
