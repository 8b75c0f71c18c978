use crate::{Midr, Uarch};

/// A group of cores sharing one microarchitecture (and one CPUID or MIDR value).
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct UarchInfo {
    pub(crate) uarch: Uarch,
    pub(crate) cpuid: Option<u32>,
    pub(crate) midr: Option<Midr>,
    pub(crate) processor_count: u32,
    pub(crate) core_count: u32,
}

impl UarchInfo {
    /// The microarchitecture shared by the group.
    #[cfg_attr(test, mutants::skip)] // Trivial getter.
    #[must_use]
    pub const fn uarch(&self) -> Uarch {
        self.uarch
    }

    /// The x86 CPUID leaf 1 EAX value shared by the group. Absent on other architectures.
    #[cfg_attr(test, mutants::skip)] // Trivial getter.
    #[must_use]
    pub const fn cpuid(&self) -> Option<u32> {
        self.cpuid
    }

    /// The decoded ARM Main ID Register shared by the group. Absent on other architectures.
    #[cfg_attr(test, mutants::skip)] // Trivial getter.
    #[must_use]
    pub const fn midr(&self) -> Option<Midr> {
        self.midr
    }

    /// Number of logical processors in the group.
    #[cfg_attr(test, mutants::skip)] // Trivial getter.
    #[must_use]
    pub const fn processor_count(&self) -> u32 {
        self.processor_count
    }

    /// Number of cores in the group.
    #[cfg_attr(test, mutants::skip)] // Trivial getter.
    #[must_use]
    pub const fn core_count(&self) -> u32 {
        self.core_count
    }
}
