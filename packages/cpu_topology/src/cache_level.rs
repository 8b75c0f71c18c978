use derive_more::derive::Display;

/// Selects one level of the cache hierarchy.
#[derive(Clone, Copy, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[non_exhaustive]
pub enum CacheLevel {
    /// Level 1 instruction cache.
    #[display("L1i")]
    L1i,

    /// Level 1 data cache.
    #[display("L1d")]
    L1d,

    /// Level 2 cache.
    #[display("L2")]
    L2,

    /// Level 3 cache.
    #[display("L3")]
    L3,

    /// Level 4 cache.
    #[display("L4")]
    L4,
}

impl CacheLevel {
    /// Every cache level, from closest to the core to furthest away.
    pub const ALL: [Self; 5] = [Self::L1i, Self::L1d, Self::L2, Self::L3, Self::L4];
}
