use crate::{FrequencyKind, LogicalProcessorId, TopologyId, TopologyIdKind};

/// The attributes of one logical processor as read from the per-CPU attribute tree at one
/// point in time. Every attribute is independently optional.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct SysfsCpuSnapshot {
    pub(crate) id: LogicalProcessorId,
    pub(crate) is_online: Option<bool>,
    pub(crate) hardware_current_hz: Option<u64>,
    pub(crate) hardware_min_hz: Option<u64>,
    pub(crate) hardware_max_hz: Option<u64>,
    pub(crate) scaling_current_hz: Option<u64>,
    pub(crate) scaling_min_hz: Option<u64>,
    pub(crate) scaling_max_hz: Option<u64>,
    pub(crate) package_id: Option<TopologyId>,
    pub(crate) cluster_id: Option<TopologyId>,
    pub(crate) die_id: Option<TopologyId>,
    pub(crate) core_id: Option<TopologyId>,
}

impl SysfsCpuSnapshot {
    /// The identifier of the logical processor.
    #[cfg_attr(test, mutants::skip)] // Trivial getter.
    #[must_use]
    pub const fn id(&self) -> LogicalProcessorId {
        self.id
    }

    /// Whether the processor was online. See [`SysfsCpu::is_online()`][crate::SysfsCpu::is_online].
    #[cfg_attr(test, mutants::skip)] // Trivial getter.
    #[must_use]
    pub const fn is_online(&self) -> Option<bool> {
        self.is_online
    }

    /// One of the clock frequency readings, in Hz.
    #[must_use]
    pub const fn frequency_hz(&self, kind: FrequencyKind) -> Option<u64> {
        match kind {
            FrequencyKind::HardwareCurrent => self.hardware_current_hz,
            FrequencyKind::HardwareMin => self.hardware_min_hz,
            FrequencyKind::HardwareMax => self.hardware_max_hz,
            FrequencyKind::ScalingCurrent => self.scaling_current_hz,
            FrequencyKind::ScalingMin => self.scaling_min_hz,
            FrequencyKind::ScalingMax => self.scaling_max_hz,
        }
    }

    /// One of the topology identifiers. The "not applicable" sentinel is already mapped to
    /// `None`.
    #[must_use]
    pub const fn topology_id(&self, kind: TopologyIdKind) -> Option<TopologyId> {
        match kind {
            TopologyIdKind::Package => self.package_id,
            TopologyIdKind::Cluster => self.cluster_id,
            TopologyIdKind::Die => self.die_id,
            TopologyIdKind::Core => self.core_id,
        }
    }
}
