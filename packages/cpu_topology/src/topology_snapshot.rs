use tracing::debug;

use crate::{
    Cache, CacheLevel, Cluster, Core, LogicalProcessorId, NativeTopologyModel, Package,
    ProcessorView, SysfsTopologySet, TraceCache, Tlb, UarchInfo,
};

/// A self-contained, immutable picture of the processor topology of the machine at one point in
/// time, joining the native topology with the per-CPU attribute readings.
///
/// Lists are in a deterministic order that does not depend on the order in which the native
/// provider enumerates records:
///
/// * processors by (core ID, SMT ID, logical processor ID);
/// * cores by (core ID, first processor index);
/// * clusters by (cluster ID, first processor index).
///
/// Obtain an instance via [`CpuTopology::snapshot()`][crate::CpuTopology::snapshot].
#[derive(Clone, Debug)]
pub struct TopologySnapshot {
    processors: Vec<ProcessorView>,
    cores: Vec<Core>,
    clusters: Vec<Cluster>,
    native: NativeTopologyModel,
    sysfs: SysfsTopologySet,
}

impl TopologySnapshot {
    pub(crate) fn join(native: NativeTopologyModel, sysfs: SysfsTopologySet) -> Self {
        let mut processors: Vec<_> = native
            .processors()
            .iter()
            .map(|processor| {
                ProcessorView::new(processor.clone(), sysfs.get(processor.linux_id()).copied())
            })
            .collect();

        processors
            .sort_by_key(|view| (view.core().core_id(), view.processor().smt_id(), view.id()));

        let mut cores = native.cores().to_vec();
        cores.sort_by_key(|core| (core.core_id(), core.processor_start()));

        let mut clusters = native.clusters().to_vec();
        clusters.sort_by_key(|cluster| (cluster.cluster_id(), cluster.processor_start()));

        debug!(
            processors = processors.len(),
            cores = cores.len(),
            clusters = clusters.len(),
            packages = native.packages().len(),
            with_sysfs = processors.iter().filter(|view| view.sysfs().is_some()).count(),
            "topology snapshot taken"
        );

        Self {
            processors,
            cores,
            clusters,
            native,
            sysfs,
        }
    }

    /// Number of logical processors reported by the native topology provider.
    #[must_use]
    pub fn total_logical_processor_count(&self) -> usize {
        self.processors.len()
    }

    /// Every logical processor, sorted by (core ID, SMT ID, logical processor ID).
    #[cfg_attr(test, mutants::skip)] // Trivial getter.
    #[must_use]
    pub fn processors(&self) -> &[ProcessorView] {
        &self.processors
    }

    /// The logical processor with the given identifier.
    #[must_use]
    pub fn processor(&self, id: LogicalProcessorId) -> Option<&ProcessorView> {
        self.processors.iter().find(|view| view.id() == id)
    }

    /// Every core, sorted by core ID.
    #[cfg_attr(test, mutants::skip)] // Trivial getter.
    #[must_use]
    pub fn cores(&self) -> &[Core] {
        &self.cores
    }

    /// The first core (in sorted order) with the given core ID. Core IDs are only unique within
    /// a package, so on multi-package machines use [`cores()`][Self::cores] to see all of them.
    #[must_use]
    pub fn core(&self, core_id: u32) -> Option<&Core> {
        self.cores.iter().find(|core| core.core_id() == core_id)
    }

    /// Every cluster, sorted by cluster ID.
    #[cfg_attr(test, mutants::skip)] // Trivial getter.
    #[must_use]
    pub fn clusters(&self) -> &[Cluster] {
        &self.clusters
    }

    /// The first cluster (in sorted order) with the given cluster ID. Cluster IDs are only
    /// unique within a package.
    #[must_use]
    pub fn cluster(&self, cluster_id: u32) -> Option<&Cluster> {
        self.clusters
            .iter()
            .find(|cluster| cluster.cluster_id() == cluster_id)
    }

    /// Every physical package, in provider order.
    #[cfg_attr(test, mutants::skip)] // Trivial delegation.
    #[must_use]
    pub fn packages(&self) -> &[Package] {
        self.native.packages()
    }

    /// The physical package at the given index.
    #[must_use]
    pub fn package(&self, index: usize) -> Option<&Package> {
        self.native.packages().get(index)
    }

    /// Microarchitecture groups.
    #[cfg_attr(test, mutants::skip)] // Trivial delegation.
    #[must_use]
    pub fn uarchs(&self) -> &[UarchInfo] {
        self.native.uarchs()
    }

    /// Every cache instance of the given level.
    #[cfg_attr(test, mutants::skip)] // Trivial delegation.
    #[must_use]
    pub fn caches(&self, level: CacheLevel) -> &[Cache] {
        self.native.caches(level)
    }

    /// Translation lookaside buffers, where the architecture reports them.
    #[cfg_attr(test, mutants::skip)] // Trivial delegation.
    #[must_use]
    pub fn tlbs(&self) -> &[Tlb] {
        self.native.tlbs()
    }

    /// Trace caches, where the architecture reports them.
    #[cfg_attr(test, mutants::skip)] // Trivial delegation.
    #[must_use]
    pub fn trace_caches(&self) -> &[TraceCache] {
        self.native.trace_caches()
    }

    /// The native topology the snapshot was built from, in provider order.
    #[cfg_attr(test, mutants::skip)] // Trivial getter.
    #[must_use]
    pub fn native(&self) -> &NativeTopologyModel {
        &self.native
    }

    /// Every logical processor found in the attribute tree, including any that the native
    /// provider did not report, with the derived groupings.
    #[cfg_attr(test, mutants::skip)] // Trivial getter.
    #[must_use]
    pub fn sysfs(&self) -> &SysfsTopologySet {
        &self.sysfs
    }
}
