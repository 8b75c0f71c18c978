use crate::{Midr, Package, Uarch, Vendor};

/// A group of cores within a package that share the same microarchitecture and clock domain.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Cluster {
    pub(crate) processor_start: u32,
    pub(crate) processor_count: u32,
    pub(crate) core_start: u32,
    pub(crate) core_count: u32,
    pub(crate) cluster_id: u32,
    pub(crate) package: Package,
    pub(crate) vendor: Vendor,
    pub(crate) uarch: Uarch,
    pub(crate) cpuid: Option<u32>,
    pub(crate) midr: Option<Midr>,
    pub(crate) frequency_hz: Option<u64>,
}

impl Cluster {
    /// Index of the first logical processor in the cluster.
    #[cfg_attr(test, mutants::skip)] // Trivial getter.
    #[must_use]
    pub const fn processor_start(&self) -> u32 {
        self.processor_start
    }

    /// Number of logical processors in the cluster.
    #[cfg_attr(test, mutants::skip)] // Trivial getter.
    #[must_use]
    pub const fn processor_count(&self) -> u32 {
        self.processor_count
    }

    /// Index of the first core in the cluster.
    #[cfg_attr(test, mutants::skip)] // Trivial getter.
    #[must_use]
    pub const fn core_start(&self) -> u32 {
        self.core_start
    }

    /// Number of cores in the cluster.
    #[cfg_attr(test, mutants::skip)] // Trivial getter.
    #[must_use]
    pub const fn core_count(&self) -> u32 {
        self.core_count
    }

    /// Identifier of the cluster within its package.
    #[cfg_attr(test, mutants::skip)] // Trivial getter.
    #[must_use]
    pub const fn cluster_id(&self) -> u32 {
        self.cluster_id
    }

    /// The package the cluster belongs to.
    #[cfg_attr(test, mutants::skip)] // Trivial getter.
    #[must_use]
    pub const fn package(&self) -> &Package {
        &self.package
    }

    /// The company that designed the cores of the cluster.
    #[cfg_attr(test, mutants::skip)] // Trivial getter.
    #[must_use]
    pub const fn vendor(&self) -> Vendor {
        self.vendor
    }

    /// The microarchitecture of the cores of the cluster.
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
