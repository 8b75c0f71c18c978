use crate::pal::RawTlb;

/// A translation lookaside buffer.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Tlb {
    entries: u32,
    associativity: u32,
    pages: u64,
}

impl Tlb {
    pub(crate) const fn from_raw(raw: &RawTlb) -> Self {
        Self {
            entries: raw.entries,
            associativity: raw.associativity,
            pages: raw.pages,
        }
    }

    /// Number of entries.
    #[cfg_attr(test, mutants::skip)] // Trivial getter.
    #[must_use]
    pub const fn entries(&self) -> u32 {
        self.entries
    }

    /// Number of ways of associativity.
    #[cfg_attr(test, mutants::skip)] // Trivial getter.
    #[must_use]
    pub const fn associativity(&self) -> u32 {
        self.associativity
    }

    /// Bitmask of the page sizes the buffer can hold.
    #[cfg_attr(test, mutants::skip)] // Trivial getter.
    #[must_use]
    pub const fn pages(&self) -> u64 {
        self.pages
    }
}
