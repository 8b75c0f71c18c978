use crate::pal::RawTraceCache;

/// A cache of decoded micro-operations, found on some x86 cores.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct TraceCache {
    uops: u32,
    associativity: u32,
}

impl TraceCache {
    pub(crate) const fn from_raw(raw: &RawTraceCache) -> Self {
        Self {
            uops: raw.uops,
            associativity: raw.associativity,
        }
    }

    /// Capacity in micro-operations.
    #[cfg_attr(test, mutants::skip)] // Trivial getter.
    #[must_use]
    pub const fn uops(&self) -> u32 {
        self.uops
    }

    /// Number of ways of associativity.
    #[cfg_attr(test, mutants::skip)] // Trivial getter.
    #[must_use]
    pub const fn associativity(&self) -> u32 {
        self.associativity
    }
}
