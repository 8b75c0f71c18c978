use std::fmt::{self, Display};

use itertools::Itertools;

/// Properties of a cache, as a bitset.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct CacheFlags(u32);

impl CacheFlags {
    /// The cache holds both instructions and data.
    pub const UNIFIED: u32 = 0x1;

    /// The cache is inclusive of the lower cache levels.
    pub const INCLUSIVE: u32 = 0x2;

    /// The cache uses a complex (hash-based) function to map addresses to sets.
    pub const COMPLEX_INDEXING: u32 = 0x4;

    /// Wraps a raw bitset. Bits without a known meaning are preserved.
    #[must_use]
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    /// The raw bitset.
    #[cfg_attr(test, mutants::skip)] // Trivial getter.
    #[must_use]
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Whether the [`UNIFIED`][Self::UNIFIED] bit is set.
    #[must_use]
    pub const fn is_unified(self) -> bool {
        self.0 & Self::UNIFIED != 0
    }

    /// Whether the [`INCLUSIVE`][Self::INCLUSIVE] bit is set.
    #[must_use]
    pub const fn is_inclusive(self) -> bool {
        self.0 & Self::INCLUSIVE != 0
    }

    /// Whether the [`COMPLEX_INDEXING`][Self::COMPLEX_INDEXING] bit is set.
    #[must_use]
    pub const fn has_complex_indexing(self) -> bool {
        self.0 & Self::COMPLEX_INDEXING != 0
    }
}

impl Display for CacheFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names = [
            (self.is_unified(), "unified"),
            (self.is_inclusive(), "inclusive"),
            (self.has_complex_indexing(), "complex indexing"),
        ];

        let set = names
            .iter()
            .filter(|(set, _)| *set)
            .map(|(_, name)| *name)
            .join(", ");

        if set.is_empty() {
            f.write_str("none")
        } else {
            f.write_str(&set)
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn individual_flags() {
        let flags = CacheFlags::from_bits(CacheFlags::UNIFIED | CacheFlags::COMPLEX_INDEXING);

        assert!(flags.is_unified());
        assert!(!flags.is_inclusive());
        assert!(flags.has_complex_indexing());
        assert_eq!(flags.bits(), 0x5);
    }

    #[test]
    fn unknown_bits_preserved() {
        let flags = CacheFlags::from_bits(0x80);

        assert!(!flags.is_unified());
        assert_eq!(flags.bits(), 0x80);
    }

    #[test]
    fn display() {
        assert_eq!(CacheFlags::default().to_string(), "none");
        assert_eq!(
            CacheFlags::from_bits(0x7).to_string(),
            "unified, inclusive, complex indexing"
        );
        assert_eq!(CacheFlags::from_bits(0x2).to_string(), "inclusive");
    }
}
