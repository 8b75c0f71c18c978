use crate::{Cluster, Midr, Package, Uarch, Vendor};

/// A physical core, hosting one or more logical processors (more than one with SMT).
///
/// The parent cluster and package are stored by value.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Core {
    pub(crate) processor_start: u32,
    pub(crate) processor_count: u32,
    pub(crate) core_id: u32,
    pub(crate) cluster: Cluster,
    pub(crate) package: Package,
    pub(crate) vendor: Vendor,
    pub(crate) uarch: Uarch,
    pub(crate) cpuid: Option<u32>,
    pub(crate) midr: Option<Midr>,
    pub(crate) frequency_hz: Option<u64>,
}

impl Core {
    /// Index of the first logical processor on the core.
    #[cfg_attr(test, mutants::skip)] // Trivial getter.
    #[must_use]
    pub const fn processor_start(&self) -> u32 {
        self.processor_start
    }

    /// Number of logical processors on the core.
    #[cfg_attr(test, mutants::skip)] // Trivial getter.
    #[must_use]
    pub const fn processor_count(&self) -> u32 {
        self.processor_count
    }

    /// Identifier of the core within its package.
    #[cfg_attr(test, mutants::skip)] // Trivial getter.
    #[must_use]
    pub const fn core_id(&self) -> u32 {
        self.core_id
    }

    /// The cluster the core belongs to.
    #[cfg_attr(test, mutants::skip)] // Trivial getter.
    #[must_use]
    pub const fn cluster(&self) -> &Cluster {
        &self.cluster
    }

    /// The package the core belongs to.
    #[cfg_attr(test, mutants::skip)] // Trivial getter.
    #[must_use]
    pub const fn package(&self) -> &Package {
        &self.package
    }

    /// The company that designed the core.
    #[cfg_attr(test, mutants::skip)] // Trivial getter.
    #[must_use]
    pub const fn vendor(&self) -> Vendor {
        self.vendor
    }

    /// The microarchitecture of the core.
    #[cfg_attr(test, mutants::skip)] // Trivial getter.
    #[must_use]
    pub const fn uarch(&self) -> Uarch {
        self.uarch
    }

    /// The x86 CPUID leaf 1 EAX value (processor signature). Absent on other architectures.
    #[cfg_attr(test, mutants::skip)] // Trivial getter.
    #[must_use]
    pub const fn cpuid(&self) -> Option<u32> {
        self.cpuid
    }

    /// The decoded ARM Main ID Register. Absent on other architectures.
    #[cfg_attr(test, mutants::skip)] // Trivial getter.
    #[must_use]
    pub const fn midr(&self) -> Option<Midr> {
        self.midr
    }

    /// Nominal clock frequency, if known.
    #[cfg_attr(test, mutants::skip)] // Trivial getter.
    #[must_use]
    pub const fn frequency_hz(&self) -> Option<u64> {
        self.frequency_hz
    }
}
