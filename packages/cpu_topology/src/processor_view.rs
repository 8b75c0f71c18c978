use crate::{
    Cluster, Core, FrequencyKind, LogicalProcessorId, Package, Processor, ProcessorCache,
    SysfsCpuSnapshot, TopologyId, TopologyIdKind,
};

/// One logical processor with its native topology data joined with its live attribute readings.
///
/// The readings are absent altogether if the attribute tree had no directory for the processor.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProcessorView {
    processor: Processor,
    sysfs: Option<SysfsCpuSnapshot>,
}

impl ProcessorView {
    pub(crate) const fn new(processor: Processor, sysfs: Option<SysfsCpuSnapshot>) -> Self {
        Self { processor, sysfs }
    }

    /// The identifier of the logical processor, shared by both data sources.
    #[cfg_attr(test, mutants::skip)] // Trivial delegation.
    #[must_use]
    pub const fn id(&self) -> LogicalProcessorId {
        self.processor.linux_id
    }

    /// The native topology data of the processor.
    #[cfg_attr(test, mutants::skip)] // Trivial getter.
    #[must_use]
    pub const fn processor(&self) -> &Processor {
        &self.processor
    }

    /// The attribute readings of the processor, if it was found in the attribute tree.
    #[cfg_attr(test, mutants::skip)] // Trivial getter.
    #[must_use]
    pub const fn sysfs(&self) -> Option<&SysfsCpuSnapshot> {
        self.sysfs.as_ref()
    }

    /// The core hosting the processor.
    #[cfg_attr(test, mutants::skip)] // Trivial delegation.
    #[must_use]
    pub const fn core(&self) -> &Core {
        &self.processor.core
    }

    /// The cluster the processor belongs to.
    #[cfg_attr(test, mutants::skip)] // Trivial delegation.
    #[must_use]
    pub const fn cluster(&self) -> &Cluster {
        &self.processor.cluster
    }

    /// The package the processor belongs to.
    #[cfg_attr(test, mutants::skip)] // Trivial delegation.
    #[must_use]
    pub const fn package(&self) -> &Package {
        &self.processor.package
    }

    /// The caches the processor has access to.
    #[cfg_attr(test, mutants::skip)] // Trivial delegation.
    #[must_use]
    pub const fn cache(&self) -> &ProcessorCache {
        &self.processor.cache
    }

    /// Whether the processor was online. Absent if the online list could not be read.
    #[must_use]
    pub fn is_online(&self) -> Option<bool> {
        self.sysfs.and_then(|sysfs| sysfs.is_online())
    }

    /// One of the clock frequency readings of the processor, in Hz.
    #[must_use]
    pub fn frequency_hz(&self, kind: FrequencyKind) -> Option<u64> {
        self.sysfs.and_then(|sysfs| sysfs.frequency_hz(kind))
    }

    /// One of the topology identifiers of the processor, as reported by the attribute tree.
    #[must_use]
    pub fn topology_id(&self, kind: TopologyIdKind) -> Option<TopologyId> {
        self.sysfs.and_then(|sysfs| sysfs.topology_id(kind))
    }
}
