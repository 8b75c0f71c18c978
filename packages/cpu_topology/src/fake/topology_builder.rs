use std::num::NonZero;

use crate::fake::FakeBindings;
use crate::pal::{
    RawCache, RawCluster, RawCore, RawPackage, RawProcessor, RawTlb, RawTopology, RawTraceCache,
    RawUarchInfo,
};
use crate::{CacheFlags, Uarch, Vendor};

const L1_SIZE: u32 = 32 * 1024;
const L1_ASSOCIATIVITY: u32 = 8;
const L1_SETS: u32 = L1_SIZE / (L1_ASSOCIATIVITY * LINE_SIZE);
const L2_SIZE: u32 = 1024 * 1024;
const L3_SIZE: u32 = 8 * 1024 * 1024;
const LINE_SIZE: u32 = 64;

/// Builder for a simulated native topology.
///
/// The topology is fully symmetric: every package has the same number of clusters, every
/// cluster the same number of cores and every core the same number of hardware threads. All
/// cores share one vendor, microarchitecture and set of identification registers.
///
/// # Layout
///
/// * Logical processors are numbered sequentially in package, cluster, core, thread order and
///   the OS processor ID equals that sequence number.
/// * Core and cluster IDs start from 0 in every package.
/// * Every core has a private L1 instruction and data cache, every cluster a shared L2 and every
///   package a shared L3. There is no L4.
/// * Architecture-specific identifiers (CPUID, MIDR, frequency) are reported as not
///   applicable unless configured.
///
/// # Example
///
/// ```
/// use std::num::NonZero;
///
/// use cpu_topology::fake::{SysfsBuilder, TopologyBuilder};
/// use cpu_topology::{CpuTopology, Uarch, Vendor};
///
/// let one = NonZero::new(1).unwrap();
/// let four = NonZero::new(4).unwrap();
///
/// let topology = TopologyBuilder::from_counts(one, one, four, one)
///     .vendor(Vendor::Arm)
///     .uarch(Uarch::CortexA76)
///     .midr(0x414F_D0B1);
///
/// let snapshot = CpuTopology::fake(topology, SysfsBuilder::new())
///     .snapshot()
///     .unwrap();
///
/// let core = snapshot.core(0).unwrap();
/// assert_eq!(core.uarch(), Uarch::CortexA76);
/// assert_eq!(core.midr().unwrap().part_number(), 0xD0B);
/// ```
#[derive(Clone, Debug)]
pub struct TopologyBuilder {
    packages: NonZero<u32>,
    clusters_per_package: NonZero<u32>,
    cores_per_cluster: NonZero<u32>,
    threads_per_core: NonZero<u32>,

    vendor: Vendor,
    uarch: Uarch,
    midr: u32,
    cpuid: u32,
    frequency_hz: u64,
    package_name: String,

    tlbs: Vec<RawTlb>,
    trace_caches: Vec<RawTraceCache>,

    available: bool,
}

impl TopologyBuilder {
    /// Creates a symmetric topology with the given shape.
    ///
    /// # Panics
    ///
    /// Panics when building the topology if the total number of logical processors does not
    /// fit in `u32`.
    #[must_use]
    pub fn from_counts(
        packages: NonZero<u32>,
        clusters_per_package: NonZero<u32>,
        cores_per_cluster: NonZero<u32>,
        threads_per_core: NonZero<u32>,
    ) -> Self {
        Self {
            packages,
            clusters_per_package,
            cores_per_cluster,
            threads_per_core,
            vendor: Vendor::Unknown,
            uarch: Uarch::Unknown,
            midr: 0,
            cpuid: 0,
            frequency_hz: 0,
            package_name: "Simulated processor".to_string(),
            tlbs: Vec::new(),
            trace_caches: Vec::new(),
            available: true,
        }
    }

    /// Sets the vendor of every core.
    #[must_use]
    pub fn vendor(mut self, vendor: Vendor) -> Self {
        self.vendor = vendor;
        self
    }

    /// Sets the microarchitecture of every core.
    #[must_use]
    pub fn uarch(mut self, uarch: Uarch) -> Self {
        self.uarch = uarch;
        self
    }

    /// Sets the raw Main ID Register value of every core.
    #[must_use]
    pub fn midr(mut self, midr: u32) -> Self {
        self.midr = midr;
        self
    }

    /// Sets the raw CPUID leaf 1 EAX value of every core.
    #[must_use]
    pub fn cpuid(mut self, cpuid: u32) -> Self {
        self.cpuid = cpuid;
        self
    }

    /// Sets the nominal frequency of every core.
    #[must_use]
    pub fn frequency_hz(mut self, frequency_hz: u64) -> Self {
        self.frequency_hz = frequency_hz;
        self
    }

    /// Sets the name of every package.
    #[must_use]
    pub fn package_name(mut self, name: impl Into<String>) -> Self {
        self.package_name = name.into();
        self
    }

    /// Adds a translation lookaside buffer.
    #[must_use]
    pub fn tlb(mut self, entries: u32, associativity: u32, pages: u64) -> Self {
        self.tlbs.push(RawTlb {
            entries,
            associativity,
            pages,
        });
        self
    }

    /// Adds a trace cache.
    #[must_use]
    pub fn trace_cache(mut self, uops: u32, associativity: u32) -> Self {
        self.trace_caches.push(RawTraceCache {
            uops,
            associativity,
        });
        self
    }

    /// Makes the native topology provider report itself as unavailable, as it would on an
    /// unsupported machine.
    #[must_use]
    pub fn unavailable(mut self) -> Self {
        self.available = false;
        self
    }

    pub(crate) fn build(self) -> FakeBindings {
        let topology = self.available.then(|| self.build_raw());
        FakeBindings::new(topology)
    }

    #[expect(
        clippy::arithmetic_side_effects,
        reason = "counters are bounded by the processor count, which is checked up front"
    )]
    pub(crate) fn build_raw(&self) -> RawTopology {
        let threads = self.threads_per_core.get();
        let cores_per_package = checked_product(
            self.clusters_per_package.get(),
            self.cores_per_cluster.get(),
        );
        let processors_per_cluster = checked_product(self.cores_per_cluster.get(), threads);
        let processors_per_package = checked_product(cores_per_package, threads);
        let total_processors = checked_product(self.packages.get(), processors_per_package);
        let total_cores = checked_product(self.packages.get(), cores_per_package);

        let mut raw = RawTopology::default();

        for package_index in 0..self.packages.get() {
            let package = raw.packages.len();
            let package_processor_start = len_u32(raw.processors.len());

            raw.packages.push(RawPackage {
                name: self.package_name.clone(),
                processor_start: package_processor_start,
                processor_count: processors_per_package,
                core_start: package_index * cores_per_package,
                core_count: cores_per_package,
                cluster_start: package_index * self.clusters_per_package.get(),
                cluster_count: self.clusters_per_package.get(),
            });

            let l3 = raw.l3_caches.len();
            raw.l3_caches.push(shared_cache(
                L3_SIZE,
                16,
                package_processor_start,
                processors_per_package,
            ));

            for cluster_id in 0..self.clusters_per_package.get() {
                let cluster = raw.clusters.len();
                let cluster_processor_start = len_u32(raw.processors.len());

                raw.clusters.push(RawCluster {
                    processor_start: cluster_processor_start,
                    processor_count: processors_per_cluster,
                    core_start: len_u32(raw.cores.len()),
                    core_count: self.cores_per_cluster.get(),
                    cluster_id,
                    package,
                    vendor: self.vendor.code(),
                    uarch: self.uarch.code(),
                    cpuid: self.cpuid,
                    midr: self.midr,
                    frequency: self.frequency_hz,
                });

                let l2 = raw.l2_caches.len();
                raw.l2_caches.push(shared_cache(
                    L2_SIZE,
                    8,
                    cluster_processor_start,
                    processors_per_cluster,
                ));

                for core_in_cluster in 0..self.cores_per_cluster.get() {
                    let core = raw.cores.len();
                    let core_processor_start = len_u32(raw.processors.len());

                    raw.cores.push(RawCore {
                        processor_start: core_processor_start,
                        processor_count: threads,
                        core_id: cluster_id * self.cores_per_cluster.get() + core_in_cluster,
                        cluster,
                        package,
                        vendor: self.vendor.code(),
                        uarch: self.uarch.code(),
                        cpuid: self.cpuid,
                        midr: self.midr,
                        frequency: self.frequency_hz,
                    });

                    let l1i = raw.l1i_caches.len();
                    raw.l1i_caches.push(private_cache(core_processor_start, threads));
                    let l1d = raw.l1d_caches.len();
                    raw.l1d_caches.push(private_cache(core_processor_start, threads));

                    for smt_id in 0..threads {
                        let sequence = raw.processors.len();

                        raw.processors.push(RawProcessor {
                            smt_id,
                            core,
                            cluster,
                            package,
                            linux_id: i32::try_from(sequence)
                                .expect("processor count was checked to fit"),
                            apic_id: len_u32(sequence) << 1,
                            l1i: Some(l1i),
                            l1d: Some(l1d),
                            l2: Some(l2),
                            l3: Some(l3),
                            l4: None,
                        });
                    }
                }
            }
        }

        raw.uarchs.push(RawUarchInfo {
            uarch: self.uarch.code(),
            cpuid: self.cpuid,
            midr: self.midr,
            processor_count: total_processors,
            core_count: total_cores,
        });

        raw.tlbs.clone_from(&self.tlbs);
        raw.trace_caches.clone_from(&self.trace_caches);

        raw
    }
}

fn checked_product(a: u32, b: u32) -> u32 {
    a.checked_mul(b)
        .filter(|product| i32::try_from(*product).is_ok())
        .expect("simulated topology is too large")
}

fn len_u32(len: usize) -> u32 {
    u32::try_from(len).expect("simulated topology is too large")
}

fn private_cache(processor_start: u32, processor_count: u32) -> RawCache {
    RawCache {
        size: L1_SIZE,
        associativity: L1_ASSOCIATIVITY,
        sets: L1_SETS,
        partitions: 1,
        line_size: LINE_SIZE,
        flags: 0,
        processor_start,
        processor_count,
    }
}

#[expect(
    clippy::arithmetic_side_effects,
    reason = "constant cache geometry, cannot overflow"
)]
fn shared_cache(
    size: u32,
    associativity: u32,
    processor_start: u32,
    processor_count: u32,
) -> RawCache {
    RawCache {
        size,
        associativity,
        sets: size / (associativity * LINE_SIZE),
        partitions: 1,
        line_size: LINE_SIZE,
        flags: CacheFlags::UNIFIED | CacheFlags::INCLUSIVE,
        processor_start,
        processor_count,
    }
}
