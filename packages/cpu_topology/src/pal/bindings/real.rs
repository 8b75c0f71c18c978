use crate::Result;
use crate::pal::{Bindings, RawTopology};

/// The native topology provider of the operating system that the build is targeting.
///
/// On Linux this is `libcpuinfo`, loaded from the dynamic loader search path on first use and
/// kept loaded (and initialized) for the rest of the process lifetime. On other operating
/// systems the provider is always unavailable.
#[derive(Debug, Default)]
pub(crate) struct BuildTargetBindings;

// Real bindings depend on the native library being installed, which is not the case on the
// machines that measure coverage.
#[cfg_attr(coverage_nightly, coverage(off))]
impl Bindings for BuildTargetBindings {
    #[cfg(target_os = "linux")]
    fn load_topology(&self) -> Result<RawTopology> {
        linux::CpuinfoLibrary::get()?.read_topology()
    }

    #[cfg(not(target_os = "linux"))]
    fn load_topology(&self) -> Result<RawTopology> {
        Err(crate::Error::unsupported(
            "the native topology provider is only available on Linux",
        ))
    }
}

#[cfg(target_os = "linux")]
#[cfg_attr(coverage_nightly, coverage(off))]
mod linux {
    use std::ffi::{CStr, c_void};
    use std::mem;
    use std::slice;
    use std::sync::OnceLock;

    use tracing::{debug, warn};

    use crate::pal::bindings::ffi::{
        ArchitectureIds, CountFn, CpuinfoCache, CpuinfoCluster, CpuinfoCore, CpuinfoPackage,
        CpuinfoProcessor, CpuinfoUarchInfo, InitializeFn, TableFn,
    };
    use crate::pal::{
        RawCache, RawCluster, RawCore, RawPackage, RawProcessor, RawTopology, RawUarchInfo,
    };
    use crate::{Error, Result};

    /// Names tried in order when loading the library.
    const LIBRARY_NAMES: &[&CStr] = &[c"libcpuinfo.so", c"libcpuinfo.so.0"];

    /// The outcome of the one and only load attempt of this process.
    static LIBRARY: OnceLock<std::result::Result<CpuinfoLibrary, String>> = OnceLock::new();

    /// Entry points of an initialized `libcpuinfo`.
    ///
    /// The library handle itself is intentionally leaked: the library is never unloaded and
    /// never deinitialized, so every table pointer it hands out stays valid for the rest of the
    /// process lifetime.
    #[derive(Debug)]
    pub(super) struct CpuinfoLibrary {
        get_processors: TableFn<CpuinfoProcessor>,
        get_processors_count: CountFn,
        get_cores: TableFn<CpuinfoCore>,
        get_cores_count: CountFn,
        get_clusters: TableFn<CpuinfoCluster>,
        get_clusters_count: CountFn,
        get_packages: TableFn<CpuinfoPackage>,
        get_packages_count: CountFn,
        get_uarchs: TableFn<CpuinfoUarchInfo>,
        get_uarchs_count: CountFn,
        get_l1i_caches: TableFn<CpuinfoCache>,
        get_l1i_caches_count: CountFn,
        get_l1d_caches: TableFn<CpuinfoCache>,
        get_l1d_caches_count: CountFn,
        get_l2_caches: TableFn<CpuinfoCache>,
        get_l2_caches_count: CountFn,
        get_l3_caches: TableFn<CpuinfoCache>,
        get_l3_caches_count: CountFn,
        get_l4_caches: TableFn<CpuinfoCache>,
        get_l4_caches_count: CountFn,
    }

    impl CpuinfoLibrary {
        /// Loads and initializes the library on first call; later calls return the cached
        /// outcome, including a cached failure.
        pub(super) fn get() -> Result<&'static Self> {
            LIBRARY
                .get_or_init(|| {
                    let result = Self::open();

                    if let Err(reason) = &result {
                        warn!(reason, "native topology provider unavailable");
                    }

                    result
                })
                .as_ref()
                .map_err(|reason| Error::unsupported(reason.clone()))
        }

        fn open() -> std::result::Result<Self, String> {
            let handle = LIBRARY_NAMES
                .iter()
                .find_map(|name| {
                    // SAFETY: The name is a NUL-terminated string; no other preconditions.
                    let handle = unsafe { libc::dlopen(name.as_ptr(), libc::RTLD_NOW) };

                    (!handle.is_null()).then(|| {
                        debug!(
                            library = %name.to_string_lossy(),
                            "loaded native topology provider"
                        );
                        handle
                    })
                })
                .ok_or_else(|| {
                    format!(
                        "libcpuinfo could not be loaded (tried {})",
                        LIBRARY_NAMES
                            .iter()
                            .map(|name| name.to_string_lossy())
                            .collect::<Vec<_>>()
                            .join(", ")
                    )
                })?;

            // SAFETY: The requested function pointer type matches the C declaration.
            let initialize: InitializeFn = unsafe { symbol(handle, c"cpuinfo_initialize")? };

            #[expect(
                clippy::multiple_unsafe_ops_per_block,
                reason = "every operation is a symbol lookup with the same safety argument"
            )]
            // SAFETY: The requested function pointer types match the C declarations.
            let library = unsafe {
                Self {
                    get_processors: symbol(handle, c"cpuinfo_get_processors")?,
                    get_processors_count: symbol(handle, c"cpuinfo_get_processors_count")?,
                    get_cores: symbol(handle, c"cpuinfo_get_cores")?,
                    get_cores_count: symbol(handle, c"cpuinfo_get_cores_count")?,
                    get_clusters: symbol(handle, c"cpuinfo_get_clusters")?,
                    get_clusters_count: symbol(handle, c"cpuinfo_get_clusters_count")?,
                    get_packages: symbol(handle, c"cpuinfo_get_packages")?,
                    get_packages_count: symbol(handle, c"cpuinfo_get_packages_count")?,
                    get_uarchs: symbol(handle, c"cpuinfo_get_uarchs")?,
                    get_uarchs_count: symbol(handle, c"cpuinfo_get_uarchs_count")?,
                    get_l1i_caches: symbol(handle, c"cpuinfo_get_l1i_caches")?,
                    get_l1i_caches_count: symbol(handle, c"cpuinfo_get_l1i_caches_count")?,
                    get_l1d_caches: symbol(handle, c"cpuinfo_get_l1d_caches")?,
                    get_l1d_caches_count: symbol(handle, c"cpuinfo_get_l1d_caches_count")?,
                    get_l2_caches: symbol(handle, c"cpuinfo_get_l2_caches")?,
                    get_l2_caches_count: symbol(handle, c"cpuinfo_get_l2_caches_count")?,
                    get_l3_caches: symbol(handle, c"cpuinfo_get_l3_caches")?,
                    get_l3_caches_count: symbol(handle, c"cpuinfo_get_l3_caches_count")?,
                    get_l4_caches: symbol(handle, c"cpuinfo_get_l4_caches")?,
                    get_l4_caches_count: symbol(handle, c"cpuinfo_get_l4_caches_count")?,
                }
            };

            // SAFETY: No preconditions. Initialization is idempotent and thread-safe.
            let initialized = unsafe { initialize() };

            if !initialized {
                return Err("cpuinfo_initialize() reported failure".to_string());
            }

            Ok(library)
        }

        pub(super) fn read_topology(&self) -> Result<RawTopology> {
            // SAFETY: The library is initialized and never deinitialized, so every table stays
            // valid and unchanged for the rest of the process lifetime.
            let processors = unsafe { table(self.get_processors, self.get_processors_count) };
            // SAFETY: As above.
            let cores = unsafe { table(self.get_cores, self.get_cores_count) };
            // SAFETY: As above.
            let clusters = unsafe { table(self.get_clusters, self.get_clusters_count) };
            // SAFETY: As above.
            let packages = unsafe { table(self.get_packages, self.get_packages_count) };
            // SAFETY: As above.
            let uarchs = unsafe { table(self.get_uarchs, self.get_uarchs_count) };
            // SAFETY: As above.
            let l1i = unsafe { table(self.get_l1i_caches, self.get_l1i_caches_count) };
            // SAFETY: As above.
            let l1d = unsafe { table(self.get_l1d_caches, self.get_l1d_caches_count) };
            // SAFETY: As above.
            let l2 = unsafe { table(self.get_l2_caches, self.get_l2_caches_count) };
            // SAFETY: As above.
            let l3 = unsafe { table(self.get_l3_caches, self.get_l3_caches_count) };
            // SAFETY: As above.
            let l4 = unsafe { table(self.get_l4_caches, self.get_l4_caches_count) };

            if processors.is_empty() {
                return Err(Error::unsupported(
                    "libcpuinfo reported no logical processors",
                ));
            }

            let processors = processors
                .iter()
                .map(|processor| {
                    Ok(RawProcessor {
                        smt_id: processor.smt_id,
                        core: required_index(processor.core, cores, "processor core")?,
                        cluster: required_index(processor.cluster, clusters, "processor cluster")?,
                        package: required_index(processor.package, packages, "processor package")?,
                        linux_id: processor.linux_id,
                        apic_id: processor.apic_id_or_zero(),
                        l1i: optional_index(processor.cache.l1i, l1i, "L1i cache")?,
                        l1d: optional_index(processor.cache.l1d, l1d, "L1d cache")?,
                        l2: optional_index(processor.cache.l2, l2, "L2 cache")?,
                        l3: optional_index(processor.cache.l3, l3, "L3 cache")?,
                        l4: optional_index(processor.cache.l4, l4, "L4 cache")?,
                    })
                })
                .collect::<Result<Vec<_>>>()?;

            let cores = cores
                .iter()
                .map(|core| {
                    Ok(RawCore {
                        processor_start: core.processor_start,
                        processor_count: core.processor_count,
                        core_id: core.core_id,
                        cluster: required_index(core.cluster, clusters, "core cluster")?,
                        package: required_index(core.package, packages, "core package")?,
                        vendor: core.vendor,
                        uarch: core.uarch,
                        cpuid: core.cpuid(),
                        midr: core.midr(),
                        frequency: core.frequency,
                    })
                })
                .collect::<Result<Vec<_>>>()?;

            let clusters = clusters
                .iter()
                .map(|cluster| {
                    Ok(RawCluster {
                        processor_start: cluster.processor_start,
                        processor_count: cluster.processor_count,
                        core_start: cluster.core_start,
                        core_count: cluster.core_count,
                        cluster_id: cluster.cluster_id,
                        package: required_index(cluster.package, packages, "cluster package")?,
                        vendor: cluster.vendor,
                        uarch: cluster.uarch,
                        cpuid: cluster.cpuid(),
                        midr: cluster.midr(),
                        frequency: cluster.frequency,
                    })
                })
                .collect::<Result<Vec<_>>>()?;

            let packages = packages
                .iter()
                .map(|package| RawPackage {
                    name: package.name_lossy(),
                    processor_start: package.processor_start,
                    processor_count: package.processor_count,
                    core_start: package.core_start,
                    core_count: package.core_count,
                    cluster_start: package.cluster_start,
                    cluster_count: package.cluster_count,
                })
                .collect();

            let uarchs = uarchs
                .iter()
                .map(|uarch| RawUarchInfo {
                    uarch: uarch.uarch,
                    cpuid: uarch.cpuid(),
                    midr: uarch.midr(),
                    processor_count: uarch.processor_count,
                    core_count: uarch.core_count,
                })
                .collect();

            Ok(RawTopology {
                processors,
                cores,
                clusters,
                packages,
                uarchs,
                l1i_caches: l1i.iter().map(raw_cache).collect(),
                l1d_caches: l1d.iter().map(raw_cache).collect(),
                l2_caches: l2.iter().map(raw_cache).collect(),
                l3_caches: l3.iter().map(raw_cache).collect(),
                l4_caches: l4.iter().map(raw_cache).collect(),
                // libcpuinfo exposes no TLB or trace cache tables.
                tlbs: Vec::new(),
                trace_caches: Vec::new(),
            })
        }
    }

    /// Resolves a symbol of the library into a typed function pointer.
    ///
    /// # Safety
    ///
    /// `F` must be an `unsafe extern "C" fn` type matching the C declaration of the symbol.
    unsafe fn symbol<F: Copy>(handle: *mut c_void, name: &CStr) -> std::result::Result<F, String> {
        // SAFETY: The handle came from a successful dlopen() and is never closed; the name is a
        // NUL-terminated string.
        let address = unsafe { libc::dlsym(handle, name.as_ptr()) };

        if address.is_null() {
            return Err(format!(
                "libcpuinfo does not export {}",
                name.to_string_lossy()
            ));
        }

        debug_assert_eq!(mem::size_of::<F>(), mem::size_of::<*mut c_void>());

        // SAFETY: Caller guarantees that F is a function pointer type of the right signature,
        // which is pointer-sized.
        Ok(unsafe { mem::transmute_copy::<*mut c_void, F>(&address) })
    }

    /// Borrows one of the library tables.
    ///
    /// # Safety
    ///
    /// The library must be initialized and stay initialized for `'static`.
    unsafe fn table<T>(items: TableFn<T>, count: CountFn) -> &'static [T] {
        // SAFETY: Forwarding the caller's guarantee.
        let items = unsafe { items() };
        // SAFETY: Forwarding the caller's guarantee.
        let count = unsafe { count() };

        if items.is_null() || count == 0 {
            return &[];
        }

        // SAFETY: The library guarantees `count` contiguous initialized records at `items`,
        // valid for as long as the library stays initialized.
        unsafe { slice::from_raw_parts(items, count as usize) }
    }

    /// Converts a pointer into an index of the table it points into.
    ///
    /// `None` if the pointer is outside the table or not on an element boundary.
    fn index_of<T>(item: *const T, table: &[T]) -> Option<usize> {
        let element_size = mem::size_of::<T>();
        let byte_offset = item.addr().checked_sub(table.as_ptr().addr())?;

        if byte_offset.checked_rem(element_size)? != 0 {
            return None;
        }

        let index = byte_offset.checked_div(element_size)?;

        (index < table.len()).then_some(index)
    }

    fn required_index<T>(item: *const T, table: &[T], what: &str) -> Result<usize> {
        index_of(item, table).ok_or_else(|| {
            Error::invalid_topology(format!("{what} reference does not point into its table"))
        })
    }

    fn optional_index<T>(item: *const T, table: &[T], what: &str) -> Result<Option<usize>> {
        if item.is_null() {
            return Ok(None);
        }

        required_index(item, table, what).map(Some)
    }

    fn raw_cache(cache: &CpuinfoCache) -> RawCache {
        RawCache {
            size: cache.size,
            associativity: cache.associativity,
            sets: cache.sets,
            partitions: cache.partitions,
            line_size: cache.line_size,
            flags: cache.flags,
            processor_start: cache.processor_start,
            processor_count: cache.processor_count,
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn index_of_element() {
            let table = [10_u64, 11, 12, 13];

            assert_eq!(index_of(table.as_ptr(), &table), Some(0));
            assert_eq!(index_of(table.as_ptr().wrapping_add(3), &table), Some(3));
        }

        #[test]
        fn index_of_pointer_between_elements() {
            let table = [10_u64, 11, 12, 13];
            let inside_first = table.as_ptr().cast::<u8>().wrapping_add(3).cast::<u64>();
            let inside_last = table.as_ptr().cast::<u8>().wrapping_add(25).cast::<u64>();

            assert_eq!(index_of(inside_first, &table), None);
            assert_eq!(index_of(inside_last, &table), None);
        }

        #[test]
        fn index_of_pointer_outside_table() {
            let table = [10_u64, 11, 12, 13];
            let before = table.as_ptr().wrapping_sub(1);
            let after = table.as_ptr().wrapping_add(4);

            assert_eq!(index_of(before, &table), None);
            assert_eq!(index_of(after, &table), None);
            assert_eq!(index_of(std::ptr::null(), &table), None);
        }
    }
}
