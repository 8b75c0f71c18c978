//! Flat records as reported by the native topology provider, before any validation or symbolic
//! resolution. Cross-references between records are indexes into the sibling tables of
//! [`RawTopology`]. Architecture-specific identifiers keep the provider's `0` sentinel.

/// One cache instance (`struct cpuinfo_cache`).
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct RawCache {
    pub(crate) size: u32,
    pub(crate) associativity: u32,
    pub(crate) sets: u32,
    pub(crate) partitions: u32,
    pub(crate) line_size: u32,
    pub(crate) flags: u32,
    pub(crate) processor_start: u32,
    pub(crate) processor_count: u32,
}

/// One translation lookaside buffer (`struct cpuinfo_tlb`).
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct RawTlb {
    pub(crate) entries: u32,
    pub(crate) associativity: u32,
    pub(crate) pages: u64,
}

/// One trace cache (`struct cpuinfo_trace_cache`).
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct RawTraceCache {
    pub(crate) uops: u32,
    pub(crate) associativity: u32,
}

/// One physical package (`struct cpuinfo_package`).
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct RawPackage {
    pub(crate) name: String,
    pub(crate) processor_start: u32,
    pub(crate) processor_count: u32,
    pub(crate) core_start: u32,
    pub(crate) core_count: u32,
    pub(crate) cluster_start: u32,
    pub(crate) cluster_count: u32,
}

/// One cluster of cores (`struct cpuinfo_cluster`).
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct RawCluster {
    pub(crate) processor_start: u32,
    pub(crate) processor_count: u32,
    pub(crate) core_start: u32,
    pub(crate) core_count: u32,
    pub(crate) cluster_id: u32,
    pub(crate) package: usize,
    pub(crate) vendor: u32,
    pub(crate) uarch: u32,
    pub(crate) cpuid: u32,
    pub(crate) midr: u32,
    pub(crate) frequency: u64,
}

/// One core (`struct cpuinfo_core`).
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct RawCore {
    pub(crate) processor_start: u32,
    pub(crate) processor_count: u32,
    pub(crate) core_id: u32,
    pub(crate) cluster: usize,
    pub(crate) package: usize,
    pub(crate) vendor: u32,
    pub(crate) uarch: u32,
    pub(crate) cpuid: u32,
    pub(crate) midr: u32,
    pub(crate) frequency: u64,
}

/// One logical processor (`struct cpuinfo_processor`).
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct RawProcessor {
    pub(crate) smt_id: u32,
    pub(crate) core: usize,
    pub(crate) cluster: usize,
    pub(crate) package: usize,
    pub(crate) linux_id: i32,
    pub(crate) apic_id: u32,
    pub(crate) l1i: Option<usize>,
    pub(crate) l1d: Option<usize>,
    pub(crate) l2: Option<usize>,
    pub(crate) l3: Option<usize>,
    pub(crate) l4: Option<usize>,
}

/// One microarchitecture group (`struct cpuinfo_uarch_info`).
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct RawUarchInfo {
    pub(crate) uarch: u32,
    pub(crate) cpuid: u32,
    pub(crate) midr: u32,
    pub(crate) processor_count: u32,
    pub(crate) core_count: u32,
}

/// Everything the native provider reports about the current machine, in one piece.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct RawTopology {
    pub(crate) processors: Vec<RawProcessor>,
    pub(crate) cores: Vec<RawCore>,
    pub(crate) clusters: Vec<RawCluster>,
    pub(crate) packages: Vec<RawPackage>,
    pub(crate) uarchs: Vec<RawUarchInfo>,
    pub(crate) l1i_caches: Vec<RawCache>,
    pub(crate) l1d_caches: Vec<RawCache>,
    pub(crate) l2_caches: Vec<RawCache>,
    pub(crate) l3_caches: Vec<RawCache>,
    pub(crate) l4_caches: Vec<RawCache>,
    pub(crate) tlbs: Vec<RawTlb>,
    pub(crate) trace_caches: Vec<RawTraceCache>,
}
