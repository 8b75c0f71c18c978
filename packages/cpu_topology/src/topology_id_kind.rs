use derive_more::derive::Display;

/// Selects one of the topology identifiers of a logical processor.
#[derive(Clone, Copy, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[non_exhaustive]
pub enum TopologyIdKind {
    /// `topology/physical_package_id`
    #[display("package")]
    Package,

    /// `topology/cluster_id`
    #[display("cluster")]
    Cluster,

    /// `topology/die_id`
    #[display("die")]
    Die,

    /// `topology/core_id`
    #[display("core")]
    Core,
}

impl TopologyIdKind {
    /// Every topology identifier.
    pub const ALL: [Self; 4] = [Self::Package, Self::Cluster, Self::Die, Self::Core];

    /// Path of the attribute file, relative to the per-CPU directory. The file holds a decimal
    /// integer, or `-1` if the identifier does not apply to this machine.
    #[must_use]
    pub const fn relative_path(self) -> &'static str {
        match self {
            Self::Package => "topology/physical_package_id",
            Self::Cluster => "topology/cluster_id",
            Self::Die => "topology/die_id",
            Self::Core => "topology/core_id",
        }
    }
}
