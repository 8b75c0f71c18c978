use std::fmt::Debug;

use crate::LogicalProcessorId;

/// Linux exposes the CPU hierarchy as a tree of small text files under
/// `/sys/devices/system/cpu`. This trait abstracts that tree to allow it to be mocked or faked.
///
/// The scope of this trait is limited to the per-CPU attribute tree. All I/O is synchronous and
/// blocking because it hits an in-memory pseudo-filesystem, never a real storage device.
///
/// Every read is independently fallible and reports failure as `None`; a missing or unreadable
/// file is an expected outcome, not an error.
#[cfg_attr(test, mockall::automock)]
pub(crate) trait Filesystem: Debug + Send + Sync + 'static {
    /// Names of all entries directly under the CPU root directory (e.g. `cpu0`, `cpufreq`,
    /// `online`). Empty if the directory cannot be listed.
    fn list_root_entries(&self) -> Vec<String>;

    /// Whether the `cpu{cpu}` directory exists under the CPU root directory.
    fn cpu_directory_exists(&self, cpu: LogicalProcessorId) -> bool;

    /// Contents of the machine-wide `online` file under the CPU root directory.
    ///
    /// This is a cpulist format file ("0-3,5,7-8" style list).
    fn get_online_contents(&self) -> Option<String>;

    /// Contents of the file at `relative_path` inside the `cpu{cpu}` directory, for example
    /// `topology/core_id` or `cpufreq/scaling_cur_freq`.
    fn get_cpu_attribute_contents(
        &self,
        cpu: LogicalProcessorId,
        relative_path: &str,
    ) -> Option<String>;
}
