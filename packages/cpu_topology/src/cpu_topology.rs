use std::path::PathBuf;

#[cfg(any(test, feature = "test-util"))]
use crate::fake::{SysfsBuilder, TopologyBuilder};
use crate::pal::BindingsFacade;
use crate::{NativeTopologyModel, Result, Sysfs, TopologySnapshot};

/// Source of [`TopologySnapshot`]s for one machine.
///
/// Each call to [`snapshot()`][Self::snapshot] queries both data sources again and builds an
/// entirely new result; nothing is cached between calls. Callers that want to follow changes
/// (frequency scaling, processors going offline) call it again on their own schedule.
///
/// # Example
///
/// ```
/// use cpu_topology::{CpuTopology, Error};
///
/// match CpuTopology::current().snapshot() {
///     Ok(snapshot) => {
///         for processor in snapshot.processors() {
///             println!(
///                 "cpu{}: core {} smt {} online {:?}",
///                 processor.id(),
///                 processor.core().core_id(),
///                 processor.processor().smt_id(),
///                 processor.is_online()
///             );
///         }
///     }
///     Err(Error::Unsupported { reason }) => println!("topology unsupported: {reason}"),
///     Err(error) => println!("topology unavailable: {error}"),
/// }
/// ```
#[derive(Clone, Debug)]
pub struct CpuTopology {
    bindings: BindingsFacade,
    sysfs: Sysfs,
}

impl CpuTopology {
    /// Queries the current machine.
    #[must_use]
    pub fn current() -> Self {
        Self::new(BindingsFacade::target(), Sysfs::current())
    }

    /// Queries the current machine, reading the per-CPU attribute tree from `root` instead of
    /// the default location.
    #[must_use]
    pub fn with_sysfs_root(root: impl Into<PathBuf>) -> Self {
        Self::new(BindingsFacade::target(), Sysfs::at_root(root))
    }

    /// Queries a simulated machine.
    ///
    /// Only available when the `test-util` feature is enabled.
    ///
    /// # Example
    ///
    /// ```
    /// use std::num::NonZero;
    ///
    /// use cpu_topology::CpuTopology;
    /// use cpu_topology::fake::{SysfsBuilder, TopologyBuilder};
    ///
    /// let two = NonZero::new(2).unwrap();
    /// let topology = TopologyBuilder::from_counts(two, two, two, two);
    /// let sysfs = SysfsBuilder::new().cpus(0..16).online("0-15");
    ///
    /// let snapshot = CpuTopology::fake(topology, sysfs).snapshot().unwrap();
    ///
    /// assert_eq!(snapshot.total_logical_processor_count(), 16);
    /// ```
    #[cfg(any(test, feature = "test-util"))]
    #[must_use]
    pub fn fake(topology: TopologyBuilder, sysfs: SysfsBuilder) -> Self {
        Self::new(
            BindingsFacade::from_fake(topology.build()),
            Sysfs::fake(sysfs),
        )
    }

    pub(crate) const fn new(bindings: BindingsFacade, sysfs: Sysfs) -> Self {
        Self { bindings, sysfs }
    }

    /// Takes a fresh snapshot of the topology.
    ///
    /// The native topology is mandatory: if it cannot be loaded, the whole snapshot fails.
    /// The attribute tree is best-effort: processors missing from it (or an entirely missing
    /// tree) simply have no readings.
    ///
    /// # Errors
    ///
    /// [`Error::Unsupported`][crate::Error::Unsupported] if the native topology provider is not
    /// available on this machine. This is distinct from a successful but empty result.
    ///
    /// [`Error::InvalidTopology`][crate::Error::InvalidTopology] if the provider reported an
    /// inconsistent topology.
    pub fn snapshot(&self) -> Result<TopologySnapshot> {
        let native = NativeTopologyModel::load_from(&self.bindings)?;
        let sysfs = self.sysfs.discover();

        Ok(TopologySnapshot::join(native, sysfs))
    }
}
