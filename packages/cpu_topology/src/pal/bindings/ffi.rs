//! `repr(C)` mirrors of the `libcpuinfo` data structures as laid out on Linux.
//!
//! Some fields only exist on some architectures: x86 adds the APIC ID to processors and the
//! CPUID signature to cores, clusters and microarchitecture groups, whereas ARM adds the MIDR
//! in the same position. Other architectures have neither.

use std::ffi::{c_char, c_int};

/// Length of the NUL-padded package name field.
pub(crate) const PACKAGE_NAME_MAX: usize = 48;

#[derive(Clone, Copy, Debug)]
#[repr(C)]
pub(crate) struct CpuinfoCache {
    pub(crate) size: u32,
    pub(crate) associativity: u32,
    pub(crate) sets: u32,
    pub(crate) partitions: u32,
    pub(crate) line_size: u32,
    pub(crate) flags: u32,
    pub(crate) processor_start: u32,
    pub(crate) processor_count: u32,
}

#[derive(Clone, Copy, Debug)]
#[repr(C)]
pub(crate) struct CpuinfoProcessorCaches {
    pub(crate) l1i: *const CpuinfoCache,
    pub(crate) l1d: *const CpuinfoCache,
    pub(crate) l2: *const CpuinfoCache,
    pub(crate) l3: *const CpuinfoCache,
    pub(crate) l4: *const CpuinfoCache,
}

#[derive(Clone, Copy, Debug)]
#[repr(C)]
pub(crate) struct CpuinfoProcessor {
    pub(crate) smt_id: u32,
    pub(crate) core: *const CpuinfoCore,
    pub(crate) cluster: *const CpuinfoCluster,
    pub(crate) package: *const CpuinfoPackage,
    pub(crate) linux_id: c_int,
    #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
    pub(crate) apic_id: u32,
    pub(crate) cache: CpuinfoProcessorCaches,
}

#[derive(Clone, Copy, Debug)]
#[repr(C)]
pub(crate) struct CpuinfoCore {
    pub(crate) processor_start: u32,
    pub(crate) processor_count: u32,
    pub(crate) core_id: u32,
    pub(crate) cluster: *const CpuinfoCluster,
    pub(crate) package: *const CpuinfoPackage,
    pub(crate) vendor: u32,
    pub(crate) uarch: u32,
    #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
    pub(crate) cpuid: u32,
    #[cfg(any(target_arch = "arm", target_arch = "aarch64"))]
    pub(crate) midr: u32,
    pub(crate) frequency: u64,
}

#[derive(Clone, Copy, Debug)]
#[repr(C)]
pub(crate) struct CpuinfoCluster {
    pub(crate) processor_start: u32,
    pub(crate) processor_count: u32,
    pub(crate) core_start: u32,
    pub(crate) core_count: u32,
    pub(crate) cluster_id: u32,
    pub(crate) package: *const CpuinfoPackage,
    pub(crate) vendor: u32,
    pub(crate) uarch: u32,
    #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
    pub(crate) cpuid: u32,
    #[cfg(any(target_arch = "arm", target_arch = "aarch64"))]
    pub(crate) midr: u32,
    pub(crate) frequency: u64,
}

#[derive(Clone, Copy, Debug)]
#[repr(C)]
pub(crate) struct CpuinfoPackage {
    pub(crate) name: [c_char; PACKAGE_NAME_MAX],
    pub(crate) processor_start: u32,
    pub(crate) processor_count: u32,
    pub(crate) core_start: u32,
    pub(crate) core_count: u32,
    pub(crate) cluster_start: u32,
    pub(crate) cluster_count: u32,
}

#[derive(Clone, Copy, Debug)]
#[repr(C)]
pub(crate) struct CpuinfoUarchInfo {
    pub(crate) uarch: u32,
    #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
    pub(crate) cpuid: u32,
    #[cfg(any(target_arch = "arm", target_arch = "aarch64"))]
    pub(crate) midr: u32,
    pub(crate) processor_count: u32,
    pub(crate) core_count: u32,
}

/// Architecture-specific identifiers, normalized to the provider's `0` sentinel where the field
/// does not exist on the build target.
pub(crate) trait ArchitectureIds {
    fn cpuid(&self) -> u32;
    fn midr(&self) -> u32;
}

macro_rules! architecture_ids {
    ($($record:ty),+) => {
        $(
            impl ArchitectureIds for $record {
                #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
                fn cpuid(&self) -> u32 {
                    self.cpuid
                }

                #[cfg(not(any(target_arch = "x86", target_arch = "x86_64")))]
                fn cpuid(&self) -> u32 {
                    0
                }

                #[cfg(any(target_arch = "arm", target_arch = "aarch64"))]
                fn midr(&self) -> u32 {
                    self.midr
                }

                #[cfg(not(any(target_arch = "arm", target_arch = "aarch64")))]
                fn midr(&self) -> u32 {
                    0
                }
            }
        )+
    };
}

architecture_ids!(CpuinfoCore, CpuinfoCluster, CpuinfoUarchInfo);

impl CpuinfoProcessor {
    #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
    pub(crate) fn apic_id_or_zero(&self) -> u32 {
        self.apic_id
    }

    #[cfg(not(any(target_arch = "x86", target_arch = "x86_64")))]
    pub(crate) fn apic_id_or_zero(&self) -> u32 {
        0
    }
}

impl CpuinfoPackage {
    /// The package name up to the first NUL byte, with invalid UTF-8 replaced.
    pub(crate) fn name_lossy(&self) -> String {
        let bytes: Vec<u8> = self
            .name
            .iter()
            .map(|c| u8::from_ne_bytes(c.to_ne_bytes()))
            .take_while(|b| *b != 0)
            .collect();

        String::from_utf8_lossy(&bytes).into_owned()
    }
}

pub(crate) type InitializeFn = unsafe extern "C" fn() -> bool;
pub(crate) type CountFn = unsafe extern "C" fn() -> u32;
pub(crate) type TableFn<T> = unsafe extern "C" fn() -> *const T;

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use std::mem::size_of;

    use super::*;

    #[test]
    fn cache_layout() {
        assert_eq!(size_of::<CpuinfoCache>(), 32);
    }

    #[cfg(target_arch = "x86_64")]
    #[test]
    fn x86_64_layouts() {
        assert_eq!(size_of::<CpuinfoProcessor>(), 80);
        assert_eq!(size_of::<CpuinfoCore>(), 56);
        assert_eq!(size_of::<CpuinfoCluster>(), 56);
        assert_eq!(size_of::<CpuinfoPackage>(), 72);
        assert_eq!(size_of::<CpuinfoUarchInfo>(), 16);
    }

    #[test]
    fn package_name_stops_at_nul() {
        let mut package = CpuinfoPackage {
            name: [0; PACKAGE_NAME_MAX],
            processor_start: 0,
            processor_count: 0,
            core_start: 0,
            core_count: 0,
            cluster_start: 0,
            cluster_count: 0,
        };

        for (slot, byte) in package.name.iter_mut().zip(b"Test CPU\0garbage") {
            *slot = c_char::from_ne_bytes(byte.to_ne_bytes());
        }

        assert_eq!(package.name_lossy(), "Test CPU");
    }
}
