/// Identifies one schedulable hardware thread.
///
/// This matches the numeric identifier used by the operating system, e.g. the `N` in
/// `/sys/devices/system/cpu/cpuN` on Linux. It is stable for the lifetime of a boot and is the
/// key used to join native topology records with per-CPU attribute readings.
///
/// The values used are not guaranteed to be sequential/contiguous.
pub type LogicalProcessorId = u32;

/// An identifier read from one of the per-CPU topology attribute files (package, cluster, die or
/// core ID).
///
/// The actual values are architecture and platform dependent and are only meaningful for
/// comparison with other values of the same kind.
pub type TopologyId = i64;
