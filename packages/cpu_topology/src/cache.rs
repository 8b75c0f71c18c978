use crate::CacheFlags;
use crate::pal::RawCache;

/// One cache instance, shared by a contiguous range of logical processors.
///
/// The processor range indexes into the processor list of the
/// [`NativeTopologyModel`][crate::NativeTopologyModel] the cache came from.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Cache {
    size_bytes: u32,
    associativity: u32,
    sets: u32,
    partitions: u32,
    line_size_bytes: u32,
    flags: CacheFlags,
    processor_start: u32,
    processor_count: u32,
}

impl Cache {
    pub(crate) const fn from_raw(raw: &RawCache) -> Self {
        Self {
            size_bytes: raw.size,
            associativity: raw.associativity,
            sets: raw.sets,
            partitions: raw.partitions,
            line_size_bytes: raw.line_size,
            flags: CacheFlags::from_bits(raw.flags),
            processor_start: raw.processor_start,
            processor_count: raw.processor_count,
        }
    }

    /// Total size of the cache.
    #[cfg_attr(test, mutants::skip)] // Trivial getter.
    #[must_use]
    pub const fn size_bytes(&self) -> u32 {
        self.size_bytes
    }

    /// Number of ways of associativity.
    #[cfg_attr(test, mutants::skip)] // Trivial getter.
    #[must_use]
    pub const fn associativity(&self) -> u32 {
        self.associativity
    }

    /// Number of sets.
    #[cfg_attr(test, mutants::skip)] // Trivial getter.
    #[must_use]
    pub const fn sets(&self) -> u32 {
        self.sets
    }

    /// Number of partitions.
    #[cfg_attr(test, mutants::skip)] // Trivial getter.
    #[must_use]
    pub const fn partitions(&self) -> u32 {
        self.partitions
    }

    /// Size of one cache line.
    #[cfg_attr(test, mutants::skip)] // Trivial getter.
    #[must_use]
    pub const fn line_size_bytes(&self) -> u32 {
        self.line_size_bytes
    }

    /// Cache properties.
    #[cfg_attr(test, mutants::skip)] // Trivial getter.
    #[must_use]
    pub const fn flags(&self) -> CacheFlags {
        self.flags
    }

    /// Index of the first logical processor that shares this cache.
    #[cfg_attr(test, mutants::skip)] // Trivial getter.
    #[must_use]
    pub const fn processor_start(&self) -> u32 {
        self.processor_start
    }

    /// Number of logical processors that share this cache.
    #[cfg_attr(test, mutants::skip)] // Trivial getter.
    #[must_use]
    pub const fn processor_count(&self) -> u32 {
        self.processor_count
    }
}
