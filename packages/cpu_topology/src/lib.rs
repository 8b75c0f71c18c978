#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Discovers the processor hierarchy of the current machine and identifies the
//! microarchitecture of every core.
//!
//! Two independent data sources are combined:
//!
//! * The native topology provider (`libcpuinfo`), which reports the static hierarchy of packages,
//!   clusters, cores and logical processors, their caches and the identification registers of
//!   every core. Raw vendor and microarchitecture codes are resolved into [`Vendor`] and
//!   [`Uarch`] and ARM Main ID Register values are decoded into [`Midr`].
//! * The per-CPU attribute tree (`/sys/devices/system/cpu` on Linux), which reports the live
//!   state of every logical processor: whether it is online, its clock frequencies and the
//!   topology identifiers the kernel assigned to it.
//!
//! [`CpuTopology::snapshot()`] joins both into a [`TopologySnapshot`] in which every logical
//! processor is a [`ProcessorView`] carrying both its static description and its live readings.
//!
//! # Example
//!
//! ```
//! use cpu_topology::{CacheLevel, CpuTopology, FrequencyKind};
//!
//! let Ok(snapshot) = CpuTopology::current().snapshot() else {
//!     println!("CPU topology is not available on this machine");
//!     return;
//! };
//!
//! for processor in snapshot.processors() {
//!     let core = processor.core();
//!
//!     println!(
//!         "cpu{} core {} {} ({}): {:?} Hz",
//!         processor.id(),
//!         core.core_id(),
//!         core.uarch(),
//!         core.vendor(),
//!         processor.frequency_hz(FrequencyKind::ScalingCurrent),
//!     );
//! }
//!
//! for cache in snapshot.caches(CacheLevel::L2) {
//!     println!(
//!         "L2: {} bytes shared by {} processors",
//!         cache.size_bytes(),
//!         cache.processor_count()
//!     );
//! }
//! ```
//!
//! # Partial data
//!
//! The native topology is mandatory: if the provider is not available, taking a snapshot fails
//! with [`Error::Unsupported`]. Everything read from the attribute tree is best-effort: any
//! single reading that is missing or malformed is `None` and does not affect any other reading.
//!
//! # Testing
//!
//! With the `test-util` feature enabled, the [`fake`] module can simulate arbitrary machines
//! for testing code that consumes this package.

mod cache;
mod cache_flags;
mod cache_level;
mod cluster;
mod code_table;
mod cpu_topology;
mod error;
mod frequency_kind;
mod midr;
mod native_topology_model;
mod package;
mod pal;
mod primitive_types;
mod processor;
mod processor_cache;
mod processor_core;
mod processor_view;
mod sysfs;
mod sysfs_cpu;
mod sysfs_cpu_snapshot;
mod sysfs_topology_set;
mod tlb;
mod topology_id_kind;
mod topology_snapshot;
mod trace_cache;
mod uarch;
mod uarch_info;
mod vendor;

#[cfg(any(test, feature = "test-util"))]
pub mod fake;

pub use cache::*;
pub use cache_flags::*;
pub use cache_level::*;
pub use cluster::*;
pub use cpu_topology::*;
pub use error::*;
pub use frequency_kind::*;
pub use midr::*;
pub use native_topology_model::*;
pub use package::*;
pub use primitive_types::*;
pub use processor::*;
pub use processor_cache::*;
pub use processor_core::*;
pub use processor_view::*;
pub use sysfs::*;
pub use sysfs_cpu::*;
pub use sysfs_cpu_snapshot::*;
pub use sysfs_topology_set::*;
pub use tlb::*;
pub use topology_id_kind::*;
pub use topology_snapshot::*;
pub use trace_cache::*;
pub use uarch::*;
pub use uarch_info::*;
pub use vendor::*;
