use std::fmt::Display;
use std::ops::Range;

use tracing::debug;

use crate::pal::{Bindings, BindingsFacade, RawCache, RawTopology};
use crate::{
    Cache, CacheLevel, Cluster, Core, Error, LogicalProcessorId, Midr, Package, Processor,
    ProcessorCache, Result, TraceCache, Tlb, UarchInfo, uarch_of, vendor_of,
};

/// The static topology of the machine as reported by the native topology provider, with every
/// raw code resolved into a symbol and every cross-reference validated.
///
/// Hierarchy levels refer to each other through contiguous index ranges (a package owns
/// processors `processor_start..processor_start + processor_count`, and so on). Loading
/// guarantees these ranges are consistent:
///
/// * every cache range lies within the processor list;
/// * every core lies within its cluster, and every cluster within its package;
/// * every parent and cache reference points at an existing record;
/// * every processor lies within its core and agrees with it on cluster and package, and every
///   core agrees with its cluster on package;
/// * every cache a processor refers to is shared by that processor.
///
/// Topologies that violate any of this are rejected rather than clamped.
#[derive(Clone, Debug)]
pub struct NativeTopologyModel {
    processors: Vec<Processor>,
    cores: Vec<Core>,
    clusters: Vec<Cluster>,
    packages: Vec<Package>,
    uarchs: Vec<UarchInfo>,
    l1i_caches: Vec<Cache>,
    l1d_caches: Vec<Cache>,
    l2_caches: Vec<Cache>,
    l3_caches: Vec<Cache>,
    l4_caches: Vec<Cache>,
    tlbs: Vec<Tlb>,
    trace_caches: Vec<TraceCache>,
}

impl NativeTopologyModel {
    /// Loads the topology of the current machine from the native topology provider.
    ///
    /// # Errors
    ///
    /// [`Error::Unsupported`] if the provider is not available on this machine or failed.
    /// [`Error::InvalidTopology`] if the provider reported an inconsistent topology.
    #[cfg_attr(test, mutants::skip)] // Real provider is not available in tests.
    pub fn load() -> Result<Self> {
        Self::load_from(&BindingsFacade::target())
    }

    pub(crate) fn load_from(bindings: &impl Bindings) -> Result<Self> {
        let model = Self::from_raw(bindings.load_topology()?)?;

        debug!(
            processors = model.processors.len(),
            cores = model.cores.len(),
            clusters = model.clusters.len(),
            packages = model.packages.len(),
            "loaded native topology"
        );

        Ok(model)
    }

    pub(crate) fn from_raw(raw: RawTopology) -> Result<Self> {
        let all_processors = 0..count_of(raw.processors.len(), "processor")?;
        let all_cores = 0..count_of(raw.cores.len(), "core")?;
        let all_clusters = 0..count_of(raw.clusters.len(), "cluster")?;

        let l1i_caches = resolve_caches(&raw.l1i_caches, CacheLevel::L1i, &all_processors)?;
        let l1d_caches = resolve_caches(&raw.l1d_caches, CacheLevel::L1d, &all_processors)?;
        let l2_caches = resolve_caches(&raw.l2_caches, CacheLevel::L2, &all_processors)?;
        let l3_caches = resolve_caches(&raw.l3_caches, CacheLevel::L3, &all_processors)?;
        let l4_caches = resolve_caches(&raw.l4_caches, CacheLevel::L4, &all_processors)?;

        let packages = raw
            .packages
            .iter()
            .enumerate()
            .map(|(index, package)| {
                let what = format!("package {index}");

                ensure_within(
                    &span(package.processor_start, package.processor_count, &what)?,
                    &all_processors,
                    &what,
                    "processor list",
                )?;
                ensure_within(
                    &span(package.core_start, package.core_count, &what)?,
                    &all_cores,
                    &what,
                    "core list",
                )?;
                ensure_within(
                    &span(package.cluster_start, package.cluster_count, &what)?,
                    &all_clusters,
                    &what,
                    "cluster list",
                )?;

                Ok(Package {
                    name: package.name.clone(),
                    processor_start: package.processor_start,
                    processor_count: package.processor_count,
                    core_start: package.core_start,
                    core_count: package.core_count,
                    cluster_start: package.cluster_start,
                    cluster_count: package.cluster_count,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let clusters = raw
            .clusters
            .iter()
            .enumerate()
            .map(|(index, cluster)| {
                let what = format!("cluster {index}");
                let package = lookup(&packages, cluster.package, &what, "package")?;

                ensure_within(
                    &span(cluster.processor_start, cluster.processor_count, &what)?,
                    &span(package.processor_start, package.processor_count, "package")?,
                    &what,
                    "its package",
                )?;
                ensure_within(
                    &span(cluster.core_start, cluster.core_count, &what)?,
                    &span(package.core_start, package.core_count, "package")?,
                    &what,
                    "its package",
                )?;

                Ok(Cluster {
                    processor_start: cluster.processor_start,
                    processor_count: cluster.processor_count,
                    core_start: cluster.core_start,
                    core_count: cluster.core_count,
                    cluster_id: cluster.cluster_id,
                    package: package.clone(),
                    vendor: vendor_of(cluster.vendor),
                    uarch: uarch_of(cluster.uarch),
                    cpuid: present_unless_zero(cluster.cpuid),
                    midr: present_unless_zero(cluster.midr).map(Midr::decode),
                    frequency_hz: present_unless_zero(cluster.frequency),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let cores = raw
            .cores
            .iter()
            .enumerate()
            .map(|(index, core)| {
                let what = format!("core {index}");
                let cluster = lookup(&clusters, core.cluster, &what, "cluster")?;
                let package = lookup(&packages, core.package, &what, "package")?;

                ensure_within(
                    &span(core.processor_start, core.processor_count, &what)?,
                    &span(cluster.processor_start, cluster.processor_count, "cluster")?,
                    &what,
                    "its cluster",
                )?;
                ensure_contains(
                    &span(cluster.core_start, cluster.core_count, "cluster")?,
                    position(index, &what)?,
                    &what,
                    "the cores of its cluster",
                )?;

                let raw_cluster = lookup(&raw.clusters, core.cluster, &what, "cluster")?;
                ensure_same_parent(
                    core.package,
                    raw_cluster.package,
                    &what,
                    "package",
                    "its cluster",
                )?;

                Ok(Core {
                    processor_start: core.processor_start,
                    processor_count: core.processor_count,
                    core_id: core.core_id,
                    cluster: cluster.clone(),
                    package: package.clone(),
                    vendor: vendor_of(core.vendor),
                    uarch: uarch_of(core.uarch),
                    cpuid: present_unless_zero(core.cpuid),
                    midr: present_unless_zero(core.midr).map(Midr::decode),
                    frequency_hz: present_unless_zero(core.frequency),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let processors = raw
            .processors
            .iter()
            .enumerate()
            .map(|(index, processor)| {
                let what = format!("processor {index}");

                let linux_id =
                    LogicalProcessorId::try_from(processor.linux_id).map_err(|error| {
                        Error::invalid_topology(format!(
                            "{what} has invalid OS processor ID {}: {error}",
                            processor.linux_id
                        ))
                    })?;

                let core = lookup(&cores, processor.core, &what, "core")?;
                let cluster = lookup(&clusters, processor.cluster, &what, "cluster")?;
                let package = lookup(&packages, processor.package, &what, "package")?;

                let at = position(index, &what)?;

                ensure_contains(
                    &span(core.processor_start, core.processor_count, "core")?,
                    at,
                    &what,
                    "the processors of its core",
                )?;

                let raw_core = lookup(&raw.cores, processor.core, &what, "core")?;
                ensure_same_parent(
                    processor.cluster,
                    raw_core.cluster,
                    &what,
                    "cluster",
                    "its core",
                )?;
                ensure_same_parent(
                    processor.package,
                    raw_core.package,
                    &what,
                    "package",
                    "its core",
                )?;

                let resolve_cache = |caches: &[Cache], cache: Option<usize>, level: CacheLevel| {
                    cache_at(caches, cache, at, &what, level)
                };

                Ok(Processor {
                    smt_id: processor.smt_id,
                    core: core.clone(),
                    cluster: cluster.clone(),
                    package: package.clone(),
                    linux_id,
                    apic_id: present_unless_zero(processor.apic_id),
                    cache: ProcessorCache {
                        l1i: resolve_cache(&l1i_caches, processor.l1i, CacheLevel::L1i)?,
                        l1d: resolve_cache(&l1d_caches, processor.l1d, CacheLevel::L1d)?,
                        l2: resolve_cache(&l2_caches, processor.l2, CacheLevel::L2)?,
                        l3: resolve_cache(&l3_caches, processor.l3, CacheLevel::L3)?,
                        l4: resolve_cache(&l4_caches, processor.l4, CacheLevel::L4)?,
                    },
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let uarchs = raw
            .uarchs
            .iter()
            .map(|uarch| UarchInfo {
                uarch: uarch_of(uarch.uarch),
                cpuid: present_unless_zero(uarch.cpuid),
                midr: present_unless_zero(uarch.midr).map(Midr::decode),
                processor_count: uarch.processor_count,
                core_count: uarch.core_count,
            })
            .collect();

        Ok(Self {
            processors,
            cores,
            clusters,
            packages,
            uarchs,
            l1i_caches,
            l1d_caches,
            l2_caches,
            l3_caches,
            l4_caches,
            tlbs: raw.tlbs.iter().map(Tlb::from_raw).collect(),
            trace_caches: raw.trace_caches.iter().map(TraceCache::from_raw).collect(),
        })
    }

    /// Number of logical processors reported by the provider.
    #[must_use]
    pub fn total_logical_processor_count(&self) -> usize {
        self.processors.len()
    }

    /// Logical processors, in provider order.
    #[cfg_attr(test, mutants::skip)] // Trivial getter.
    #[must_use]
    pub fn processors(&self) -> &[Processor] {
        &self.processors
    }

    /// Cores, in provider order.
    #[cfg_attr(test, mutants::skip)] // Trivial getter.
    #[must_use]
    pub fn cores(&self) -> &[Core] {
        &self.cores
    }

    /// Clusters, in provider order.
    #[cfg_attr(test, mutants::skip)] // Trivial getter.
    #[must_use]
    pub fn clusters(&self) -> &[Cluster] {
        &self.clusters
    }

    /// Physical packages, in provider order.
    #[cfg_attr(test, mutants::skip)] // Trivial getter.
    #[must_use]
    pub fn packages(&self) -> &[Package] {
        &self.packages
    }

    /// Microarchitecture groups.
    #[cfg_attr(test, mutants::skip)] // Trivial getter.
    #[must_use]
    pub fn uarchs(&self) -> &[UarchInfo] {
        &self.uarchs
    }

    /// Every cache instance of the given level.
    #[must_use]
    pub fn caches(&self, level: CacheLevel) -> &[Cache] {
        match level {
            CacheLevel::L1i => &self.l1i_caches,
            CacheLevel::L1d => &self.l1d_caches,
            CacheLevel::L2 => &self.l2_caches,
            CacheLevel::L3 => &self.l3_caches,
            CacheLevel::L4 => &self.l4_caches,
        }
    }

    /// Translation lookaside buffers, where the architecture reports them.
    #[cfg_attr(test, mutants::skip)] // Trivial getter.
    #[must_use]
    pub fn tlbs(&self) -> &[Tlb] {
        &self.tlbs
    }

    /// Trace caches, where the architecture reports them.
    #[cfg_attr(test, mutants::skip)] // Trivial getter.
    #[must_use]
    pub fn trace_caches(&self) -> &[TraceCache] {
        &self.trace_caches
    }
}

/// The provider uses `0` to mean "not applicable" for architecture-specific identifiers.
fn present_unless_zero<T: Default + PartialEq>(value: T) -> Option<T> {
    (value != T::default()).then_some(value)
}

fn count_of(len: usize, what: &str) -> Result<u32> {
    u32::try_from(len).map_err(|error| {
        Error::invalid_topology(format!("too many {what} records ({len}): {error}"))
    })
}

fn span(start: u32, count: u32, what: impl Display) -> Result<Range<u32>> {
    start
        .checked_add(count)
        .map(|end| start..end)
        .ok_or_else(|| {
            Error::invalid_topology(format!("{what} range {start}+{count} overflows"))
        })
}

fn ensure_within(
    inner: &Range<u32>,
    outer: &Range<u32>,
    what: impl Display,
    container: impl Display,
) -> Result<()> {
    if inner.start >= outer.start && inner.end <= outer.end {
        return Ok(());
    }

    Err(Error::invalid_topology(format!(
        "{what} covers {inner:?}, which is outside {container} ({outer:?})"
    )))
}

fn ensure_contains(
    range: &Range<u32>,
    index: u32,
    what: impl Display,
    container: impl Display,
) -> Result<()> {
    if range.contains(&index) {
        return Ok(());
    }

    Err(Error::invalid_topology(format!(
        "{what} is outside {container} ({range:?})"
    )))
}

/// Two records that must agree on a parent refer to different ones.
fn ensure_same_parent(
    actual: usize,
    expected: usize,
    what: &str,
    parent: &str,
    via: &str,
) -> Result<()> {
    if actual == expected {
        return Ok(());
    }

    Err(Error::invalid_topology(format!(
        "{what} refers to {parent} {actual} but {via} belongs to {parent} {expected}"
    )))
}

/// Position of a record in its table. Table lengths are checked to fit up front.
fn position(index: usize, what: &str) -> Result<u32> {
    u32::try_from(index).map_err(|error| {
        Error::invalid_topology(format!("{what} is beyond the addressable range: {error}"))
    })
}

fn lookup<'a, T>(records: &'a [T], index: usize, what: &str, target: &str) -> Result<&'a T> {
    records.get(index).ok_or_else(|| {
        Error::invalid_topology(format!("{what} refers to nonexistent {target} {index}"))
    })
}

fn resolve_caches(
    raw: &[RawCache],
    level: CacheLevel,
    all_processors: &Range<u32>,
) -> Result<Vec<Cache>> {
    raw.iter()
        .enumerate()
        .map(|(index, cache)| {
            let what = format!("{level} cache {index}");

            ensure_within(
                &span(cache.processor_start, cache.processor_count, &what)?,
                all_processors,
                &what,
                "processor list",
            )?;

            Ok(Cache::from_raw(cache))
        })
        .collect()
}

/// Resolves a cache reference of the processor at index `processor`, which the cache must be
/// shared by.
fn cache_at(
    caches: &[Cache],
    index: Option<usize>,
    processor: u32,
    what: &str,
    level: CacheLevel,
) -> Result<Option<Cache>> {
    index
        .map(|index| {
            let target = format!("{level} cache");
            let cache = lookup(caches, index, what, &target)?;

            ensure_contains(
                &span(cache.processor_start(), cache.processor_count(), &target)?,
                processor,
                what,
                format_args!("the processors sharing its {target} {index}"),
            )?;

            Ok(*cache)
        })
        .transpose()
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use std::num::NonZero;

    use static_assertions::assert_impl_all;

    use super::*;
    use crate::fake::TopologyBuilder;
    use crate::pal::MockBindings;
    use crate::{Architecture, Implementer, Uarch, Vendor};

    assert_impl_all!(NativeTopologyModel: Send, Sync);

    fn nz(value: u32) -> NonZero<u32> {
        NonZero::new(value).unwrap()
    }

    fn small_machine() -> RawTopology {
        TopologyBuilder::from_counts(nz(1), nz(2), nz(2), nz(2)).build_raw()
    }

    #[test]
    fn valid_topology_loads() {
        let model = NativeTopologyModel::from_raw(small_machine()).unwrap();

        assert_eq!(model.total_logical_processor_count(), 8);
        assert_eq!(model.cores().len(), 4);
        assert_eq!(model.clusters().len(), 2);
        assert_eq!(model.packages().len(), 1);
        assert_eq!(model.caches(CacheLevel::L1d).len(), 4);
        assert_eq!(model.caches(CacheLevel::L2).len(), 2);
        assert_eq!(model.caches(CacheLevel::L3).len(), 1);
        assert!(model.caches(CacheLevel::L4).is_empty());
    }

    #[test]
    fn zero_sentinels_are_absent() {
        let mut raw = small_machine();

        for processor in &mut raw.processors {
            processor.apic_id = 0;
        }

        for core in &mut raw.cores {
            core.cpuid = 0;
            core.midr = 0;
            core.frequency = 0;
        }

        let model = NativeTopologyModel::from_raw(raw).unwrap();

        for processor in model.processors() {
            assert_eq!(processor.apic_id(), None);
            assert_eq!(processor.midr(), None);
            assert_eq!(processor.core().cpuid(), None);
            assert_eq!(processor.core().frequency_hz(), None);
        }
    }

    #[test]
    fn nonzero_identifiers_are_resolved() {
        let mut raw = small_machine();

        for core in &mut raw.cores {
            core.midr = 0x410F_D034;
            core.vendor = Vendor::Arm.code();
            core.uarch = Uarch::CortexA53.code();
        }

        raw.processors[0].apic_id = 7;

        let model = NativeTopologyModel::from_raw(raw).unwrap();
        let processor = &model.processors()[0];

        assert_eq!(processor.apic_id(), Some(7));
        assert_eq!(processor.core().vendor(), Vendor::Arm);
        assert_eq!(processor.core().uarch(), Uarch::CortexA53);

        let midr = processor.midr().unwrap();
        assert_eq!(midr.implementer(), Implementer::Arm);
        assert_eq!(midr.architecture(), Architecture::DefinedByCpuid);
        assert_eq!(midr.part_number(), 0xD03);
    }

    #[test]
    fn cache_range_beyond_processor_count_is_rejected() {
        let mut raw = small_machine();
        raw.l2_caches[1].processor_start = 6;
        raw.l2_caches[1].processor_count = 3;

        let error = NativeTopologyModel::from_raw(raw).unwrap_err();

        assert!(matches!(error, Error::InvalidTopology { .. }), "{error}");
    }

    #[test]
    fn overflowing_cache_range_is_rejected() {
        let mut raw = small_machine();
        raw.l3_caches[0].processor_start = u32::MAX;
        raw.l3_caches[0].processor_count = 2;

        let error = NativeTopologyModel::from_raw(raw).unwrap_err();

        assert!(matches!(error, Error::InvalidTopology { .. }), "{error}");
    }

    #[test]
    fn core_outside_its_cluster_is_rejected() {
        let mut raw = small_machine();
        // Cluster 0 owns processors 0..4, core 0 claims 2..6.
        raw.cores[0].processor_start = 2;
        raw.cores[0].processor_count = 4;

        let error = NativeTopologyModel::from_raw(raw).unwrap_err();

        assert!(matches!(error, Error::InvalidTopology { .. }), "{error}");
    }

    #[test]
    fn cluster_outside_its_package_is_rejected() {
        let mut raw = small_machine();
        raw.packages[0].processor_count = 4;

        let error = NativeTopologyModel::from_raw(raw).unwrap_err();

        assert!(matches!(error, Error::InvalidTopology { .. }), "{error}");
    }

    #[test]
    fn dangling_parent_is_rejected() {
        let mut raw = small_machine();
        raw.processors[3].core = 99;

        let error = NativeTopologyModel::from_raw(raw).unwrap_err();

        assert!(matches!(error, Error::InvalidTopology { .. }), "{error}");
    }

    #[test]
    fn core_in_other_package_than_its_cluster_is_rejected() {
        let mut raw = TopologyBuilder::from_counts(nz(2), nz(1), nz(2), nz(1)).build_raw();
        raw.cores[0].package = 1;

        let error = NativeTopologyModel::from_raw(raw).unwrap_err();

        assert!(matches!(error, Error::InvalidTopology { .. }), "{error}");
    }

    #[test]
    fn core_outside_core_range_of_its_cluster_is_rejected() {
        let mut raw = small_machine();
        // Cluster 0 now owns only core 0 but core 1 still claims it.
        raw.clusters[0].core_count = 1;

        let error = NativeTopologyModel::from_raw(raw).unwrap_err();

        assert!(matches!(error, Error::InvalidTopology { .. }), "{error}");
    }

    #[test]
    fn processor_outside_its_core_is_rejected() {
        let mut raw = small_machine();
        // Core 1 owns processors 2..4.
        raw.processors[0].core = 1;

        let error = NativeTopologyModel::from_raw(raw).unwrap_err();

        assert!(matches!(error, Error::InvalidTopology { .. }), "{error}");
    }

    #[test]
    fn processor_in_other_cluster_than_its_core_is_rejected() {
        let mut raw = small_machine();
        raw.processors[0].cluster = 1;

        let error = NativeTopologyModel::from_raw(raw).unwrap_err();

        assert!(matches!(error, Error::InvalidTopology { .. }), "{error}");
    }

    #[test]
    fn processor_in_other_package_than_its_core_is_rejected() {
        let mut raw = TopologyBuilder::from_counts(nz(2), nz(1), nz(1), nz(1)).build_raw();
        raw.processors[0].package = 1;

        let error = NativeTopologyModel::from_raw(raw).unwrap_err();

        assert!(matches!(error, Error::InvalidTopology { .. }), "{error}");
    }

    #[test]
    fn cache_not_shared_by_processor_is_rejected() {
        let mut raw = small_machine();
        // L2 cache 1 belongs to cluster 1, processors 4..8.
        raw.processors[1].l2 = Some(1);

        let error = NativeTopologyModel::from_raw(raw).unwrap_err();

        assert!(matches!(error, Error::InvalidTopology { .. }), "{error}");
    }

    #[test]
    fn dangling_cache_is_rejected() {
        let mut raw = small_machine();
        raw.processors[0].l4 = Some(0);

        let error = NativeTopologyModel::from_raw(raw).unwrap_err();

        assert!(matches!(error, Error::InvalidTopology { .. }), "{error}");
    }

    #[test]
    fn negative_os_id_is_rejected() {
        let mut raw = small_machine();
        raw.processors[0].linux_id = -1;

        let error = NativeTopologyModel::from_raw(raw).unwrap_err();

        assert!(matches!(error, Error::InvalidTopology { .. }), "{error}");
    }

    #[test]
    fn provider_failure_is_unsupported() {
        let mut bindings = MockBindings::new();
        bindings
            .expect_load_topology()
            .times(1)
            .returning(|| Err(Error::unsupported("library not found")));

        let error = NativeTopologyModel::load_from(&bindings).unwrap_err();

        assert!(matches!(error, Error::Unsupported { .. }), "{error}");
    }

    #[test]
    fn load_from_mock_provider() {
        let mut bindings = MockBindings::new();
        bindings
            .expect_load_topology()
            .times(1)
            .returning(|| Ok(small_machine()));

        let model = NativeTopologyModel::load_from(&bindings).unwrap();

        assert_eq!(model.total_logical_processor_count(), 8);
    }

    #[test]
    fn tlbs_and_trace_caches_pass_through() {
        let raw = TopologyBuilder::from_counts(nz(1), nz(1), nz(1), nz(2))
            .tlb(64, 4, 0x1000)
            .trace_cache(12 * 1024, 8)
            .build_raw();

        let model = NativeTopologyModel::from_raw(raw).unwrap();

        assert_eq!(model.tlbs().len(), 1);
        assert_eq!(model.tlbs()[0].entries(), 64);
        assert_eq!(model.tlbs()[0].pages(), 0x1000);
        assert_eq!(model.trace_caches().len(), 1);
        assert_eq!(model.trace_caches()[0].uops(), 12 * 1024);
    }
}
