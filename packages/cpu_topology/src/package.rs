/// A physical package (socket) and the ranges of processors, cores and clusters it contains.
///
/// Ranges index into the corresponding lists of the
/// [`NativeTopologyModel`][crate::NativeTopologyModel] the package came from.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Package {
    pub(crate) name: String,
    pub(crate) processor_start: u32,
    pub(crate) processor_count: u32,
    pub(crate) core_start: u32,
    pub(crate) core_count: u32,
    pub(crate) cluster_start: u32,
    pub(crate) cluster_count: u32,
}

impl Package {
    /// The marketing name of the package as reported by the hardware, or an empty string if
    /// the hardware does not report one.
    #[cfg_attr(test, mutants::skip)] // Trivial getter.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Index of the first logical processor in the package.
    #[cfg_attr(test, mutants::skip)] // Trivial getter.
    #[must_use]
    pub const fn processor_start(&self) -> u32 {
        self.processor_start
    }

    /// Number of logical processors in the package.
    #[cfg_attr(test, mutants::skip)] // Trivial getter.
    #[must_use]
    pub const fn processor_count(&self) -> u32 {
        self.processor_count
    }

    /// Index of the first core in the package.
    #[cfg_attr(test, mutants::skip)] // Trivial getter.
    #[must_use]
    pub const fn core_start(&self) -> u32 {
        self.core_start
    }

    /// Number of cores in the package.
    #[cfg_attr(test, mutants::skip)] // Trivial getter.
    #[must_use]
    pub const fn core_count(&self) -> u32 {
        self.core_count
    }

    /// Index of the first cluster in the package.
    #[cfg_attr(test, mutants::skip)] // Trivial getter.
    #[must_use]
    pub const fn cluster_start(&self) -> u32 {
        self.cluster_start
    }

    /// Number of clusters in the package.
    #[cfg_attr(test, mutants::skip)] // Trivial getter.
    #[must_use]
    pub const fn cluster_count(&self) -> u32 {
        self.cluster_count
    }
}
