use std::collections::{BTreeMap, BTreeSet};
use std::sync::OnceLock;

use crate::{LogicalProcessorId, SysfsCpuSnapshot, TopologyId, TopologyIdKind};

/// Logical processors grouped by the value of one topology identifier.
pub type TopologyGrouping = BTreeMap<TopologyId, BTreeSet<LogicalProcessorId>>;

/// Every logical processor discovered in the per-CPU attribute tree, with derived groupings.
///
/// Groupings are computed on first access and then reused. A grouping is `None` only if not a
/// single processor exposes the identifier it groups by; processors that lack the identifier
/// while others have it are simply left out of the grouping.
///
/// Obtain an instance via [`Sysfs::discover()`][crate::Sysfs::discover].
#[derive(Clone, Debug, Default)]
pub struct SysfsTopologySet {
    cpus: BTreeMap<LogicalProcessorId, SysfsCpuSnapshot>,

    by_package: OnceLock<Option<TopologyGrouping>>,
    by_cluster: OnceLock<Option<TopologyGrouping>>,
    by_die: OnceLock<Option<TopologyGrouping>>,
    by_core: OnceLock<Option<TopologyGrouping>>,
}

impl SysfsTopologySet {
    pub(crate) fn new(cpus: impl IntoIterator<Item = SysfsCpuSnapshot>) -> Self {
        Self {
            cpus: cpus.into_iter().map(|cpu| (cpu.id(), cpu)).collect(),
            ..Self::default()
        }
    }

    /// Number of discovered logical processors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cpus.len()
    }

    /// Whether no logical processor was discovered. An empty set is valid, for example when the
    /// attribute tree is not mounted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cpus.is_empty()
    }

    /// The readings of one logical processor, if it was discovered.
    #[must_use]
    pub fn get(&self, id: LogicalProcessorId) -> Option<&SysfsCpuSnapshot> {
        self.cpus.get(&id)
    }

    /// The readings of every discovered logical processor, in ascending ID order.
    pub fn cpus(&self) -> impl Iterator<Item = &SysfsCpuSnapshot> {
        self.cpus.values()
    }

    /// Logical processors grouped by physical package ID.
    #[cfg_attr(test, mutants::skip)] // Trivial delegation.
    #[must_use]
    pub fn package_groups(&self) -> Option<&TopologyGrouping> {
        self.groups(TopologyIdKind::Package)
    }

    /// Logical processors grouped by cluster ID.
    #[cfg_attr(test, mutants::skip)] // Trivial delegation.
    #[must_use]
    pub fn cluster_groups(&self) -> Option<&TopologyGrouping> {
        self.groups(TopologyIdKind::Cluster)
    }

    /// Logical processors grouped by die ID.
    #[cfg_attr(test, mutants::skip)] // Trivial delegation.
    #[must_use]
    pub fn die_groups(&self) -> Option<&TopologyGrouping> {
        self.groups(TopologyIdKind::Die)
    }

    /// Logical processors grouped by the given topology identifier.
    #[must_use]
    pub fn groups(&self, kind: TopologyIdKind) -> Option<&TopologyGrouping> {
        let cell = match kind {
            TopologyIdKind::Package => &self.by_package,
            TopologyIdKind::Cluster => &self.by_cluster,
            TopologyIdKind::Die => &self.by_die,
            TopologyIdKind::Core => &self.by_core,
        };

        cell.get_or_init(|| self.group_by(kind)).as_ref()
    }

    fn group_by(&self, kind: TopologyIdKind) -> Option<TopologyGrouping> {
        let mut grouping = TopologyGrouping::new();

        for cpu in self.cpus.values() {
            if let Some(id) = cpu.topology_id(kind) {
                grouping.entry(id).or_default().insert(cpu.id());
            }
        }

        (!grouping.is_empty()).then_some(grouping)
    }
}
