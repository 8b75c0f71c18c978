use crate::{Cluster, Core, LogicalProcessorId, Midr, Package, ProcessorCache};

/// A logical processor as seen by the native topology provider.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Processor {
    pub(crate) smt_id: u32,
    pub(crate) core: Core,
    pub(crate) cluster: Cluster,
    pub(crate) package: Package,
    pub(crate) linux_id: LogicalProcessorId,
    pub(crate) apic_id: Option<u32>,
    pub(crate) cache: ProcessorCache,
}

impl Processor {
    /// The SMT (hyperthread) index of the processor within its core.
    #[cfg_attr(test, mutants::skip)] // Trivial getter.
    #[must_use]
    pub const fn smt_id(&self) -> u32 {
        self.smt_id
    }

    /// The core hosting this processor.
    #[cfg_attr(test, mutants::skip)] // Trivial getter.
    #[must_use]
    pub const fn core(&self) -> &Core {
        &self.core
    }

    /// The cluster this processor belongs to.
    #[cfg_attr(test, mutants::skip)] // Trivial getter.
    #[must_use]
    pub const fn cluster(&self) -> &Cluster {
        &self.cluster
    }

    /// The package this processor belongs to.
    #[cfg_attr(test, mutants::skip)] // Trivial getter.
    #[must_use]
    pub const fn package(&self) -> &Package {
        &self.package
    }

    /// The identifier the operating system uses for this processor. This is the key that joins
    /// native data with the per-CPU attribute tree (`cpu{linux_id}`).
    #[cfg_attr(test, mutants::skip)] // Trivial getter.
    #[must_use]
    pub const fn linux_id(&self) -> LogicalProcessorId {
        self.linux_id
    }

    /// The x86 APIC ID of the processor. Absent on other architectures.
    #[cfg_attr(test, mutants::skip)] // Trivial getter.
    #[must_use]
    pub const fn apic_id(&self) -> Option<u32> {
        self.apic_id
    }

    /// The decoded ARM Main ID Register of the core hosting this processor.
    #[cfg_attr(test, mutants::skip)] // Trivial delegation.
    #[must_use]
    pub const fn midr(&self) -> Option<Midr> {
        self.core.midr
    }

    /// The caches this processor has access to.
    #[cfg_attr(test, mutants::skip)] // Trivial getter.
    #[must_use]
    pub const fn cache(&self) -> &ProcessorCache {
        &self.cache
    }
}
