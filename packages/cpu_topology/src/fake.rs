//! Simulated machines for testing.
//!
//! A simulated machine consists of a native topology described by a [`TopologyBuilder`] and an
//! attribute tree described by a [`SysfsBuilder`]. The two are independent, just like on a
//! real machine, so tests can describe disagreeing or partially missing data sources.
//!
//! Only available when the `test-util` feature is enabled.
//!
//! # Example
//!
//! ```
//! use std::num::NonZero;
//!
//! use cpu_topology::fake::{SysfsBuilder, TopologyBuilder};
//! use cpu_topology::{CpuTopology, FrequencyKind, Uarch};
//!
//! let one = NonZero::new(1).unwrap();
//! let four = NonZero::new(4).unwrap();
//!
//! // One package with a single cluster of four single-threaded Cortex-A55 cores.
//! let topology = TopologyBuilder::from_counts(one, one, four, one).uarch(Uarch::CortexA55);
//!
//! // Processor 3 is offline and only processor 0 exposes its scaling frequency.
//! let sysfs = SysfsBuilder::new()
//!     .cpus(0..4)
//!     .online_cpus([0, 1, 2])
//!     .frequency_khz(0, FrequencyKind::ScalingCurrent, 1_200_000);
//!
//! let snapshot = CpuTopology::fake(topology, sysfs).snapshot().unwrap();
//!
//! assert_eq!(snapshot.processor(3).unwrap().is_online(), Some(false));
//! assert_eq!(
//!     snapshot.processor(0).unwrap().frequency_hz(FrequencyKind::ScalingCurrent),
//!     Some(1_200_000_000)
//! );
//! ```

mod bindings;
pub(crate) use bindings::*;

mod filesystem;
pub(crate) use filesystem::*;

mod sysfs_builder;
pub use sysfs_builder::*;

mod topology_builder;
pub use topology_builder::*;
