use std::path::PathBuf;

use tracing::debug;

#[cfg(any(test, feature = "test-util"))]
use crate::fake::SysfsBuilder;
use crate::pal::{BuildTargetFilesystem, DEFAULT_CPU_ROOT, Filesystem, FilesystemFacade};
use crate::sysfs_cpu::read_online_list;
use crate::{LogicalProcessorId, Result, SysfsCpu, SysfsTopologySet};

/// Entry point to the per-CPU attribute tree (`/sys/devices/system/cpu` on Linux).
///
/// # Example
///
/// ```
/// use cpu_topology::{FrequencyKind, Sysfs};
///
/// let sysfs = Sysfs::current();
/// let cpus = sysfs.discover();
///
/// for cpu in cpus.cpus() {
///     let max = cpu.frequency_hz(FrequencyKind::HardwareMax);
///     println!("cpu{}: online {:?}, max {max:?} Hz", cpu.id(), cpu.is_online());
/// }
/// ```
#[derive(Clone, Debug)]
pub struct Sysfs {
    filesystem: FilesystemFacade,
}

impl Sysfs {
    /// Reads the attribute tree of the current machine.
    #[must_use]
    pub fn current() -> Self {
        Self::at_root(DEFAULT_CPU_ROOT)
    }

    /// Reads an attribute tree rooted at `root` instead of the default location, for example a
    /// copy captured from another machine or the tree as mounted inside a container.
    #[must_use]
    pub fn at_root(root: impl Into<PathBuf>) -> Self {
        Self::from_facade(FilesystemFacade::target(BuildTargetFilesystem::new(root)))
    }

    /// Reads a simulated attribute tree.
    ///
    /// Only available when the `test-util` feature is enabled.
    #[cfg(any(test, feature = "test-util"))]
    #[must_use]
    pub fn fake(builder: SysfsBuilder) -> Self {
        Self::from_facade(FilesystemFacade::from_fake(builder.build()))
    }

    pub(crate) const fn from_facade(filesystem: FilesystemFacade) -> Self {
        Self { filesystem }
    }

    /// Opens the live view of one logical processor.
    ///
    /// # Errors
    ///
    /// [`Error::CpuNotFound`][crate::Error::CpuNotFound] if the tree has no directory for the
    /// processor.
    pub fn cpu(&self, id: LogicalProcessorId) -> Result<SysfsCpu> {
        SysfsCpu::new(id, self.filesystem.clone())
    }

    /// Discovers every logical processor in the tree and reads all of their attributes.
    ///
    /// Only `cpu<digits>` directory entries are considered; everything else in the root
    /// directory is skipped. The machine-wide `online` list is read once for all processors.
    /// Never fails: an unreadable tree yields an empty set.
    #[must_use]
    pub fn discover(&self) -> SysfsTopologySet {
        let ids: Vec<_> = self
            .filesystem
            .list_root_entries()
            .into_iter()
            .filter_map(|name| {
                let id = parse_cpu_directory_name(&name);

                if id.is_none() {
                    debug!(name, "skipping non-processor entry in CPU root directory");
                }

                id
            })
            .collect();

        if ids.is_empty() {
            return SysfsTopologySet::new(Vec::new());
        }

        let online = read_online_list(&self.filesystem);

        SysfsTopologySet::new(ids.into_iter().map(|id| {
            SysfsCpu::new_unchecked(id, self.filesystem.clone())
                .snapshot_with_online(online.as_ref().map(|online| online.contains(&id)))
        }))
    }
}

/// Parses `cpu<digits>` into the processor ID. Anything else (`cpufreq`, `cpuidle`, `online`,
/// `cpu` alone, IDs that do not fit) is rejected.
fn parse_cpu_directory_name(name: &str) -> Option<LogicalProcessorId> {
    let digits = name.strip_prefix("cpu")?;

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    digits.parse().ok()
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use static_assertions::assert_impl_all;

    use super::*;
    use crate::pal::MockFilesystem;
    use crate::{Error, TopologyIdKind};

    assert_impl_all!(Sysfs: Send, Sync, Clone);

    #[test]
    fn cpu_directory_names() {
        assert_eq!(parse_cpu_directory_name("cpu0"), Some(0));
        assert_eq!(parse_cpu_directory_name("cpu17"), Some(17));
        assert_eq!(parse_cpu_directory_name("cpu"), None);
        assert_eq!(parse_cpu_directory_name("cpufreq"), None);
        assert_eq!(parse_cpu_directory_name("cpuidle"), None);
        assert_eq!(parse_cpu_directory_name("cpu+1"), None);
        assert_eq!(parse_cpu_directory_name("cpu-1"), None);
        assert_eq!(parse_cpu_directory_name("online"), None);
        assert_eq!(parse_cpu_directory_name("cpu99999999999"), None);
    }

    #[test]
    fn discover_skips_unrelated_entries() {
        let mut filesystem = MockFilesystem::new();
        filesystem.expect_list_root_entries().returning(|| {
            ["cpu0", "cpufreq", "cpu1", "online", "cpuidle", "cpu10", "possible"]
                .map(str::to_string)
                .to_vec()
        });
        filesystem
            .expect_get_online_contents()
            .returning(|| Some("0-1,10\n".to_string()));
        filesystem
            .expect_get_cpu_attribute_contents()
            .returning(|cpu, path| {
                (path == TopologyIdKind::Package.relative_path()).then(|| format!("{}\n", cpu % 2))
            });

        let set = Sysfs::from_facade(FilesystemFacade::from_mock(filesystem)).discover();

        let ids: Vec<_> = set.cpus().map(|cpu| cpu.id()).collect();
        assert_eq!(ids, vec![0, 1, 10]);
        assert!(set.cpus().all(|cpu| cpu.is_online() == Some(true)));

        let groups = set.package_groups().unwrap();
        assert_eq!(groups.len(), 2);
    }

    #[test]
    fn discover_reads_online_list_once() {
        let mut filesystem = MockFilesystem::new();
        filesystem
            .expect_list_root_entries()
            .returning(|| ["cpu0", "cpu1", "cpu2"].map(str::to_string).to_vec());
        filesystem
            .expect_get_online_contents()
            .times(1)
            .returning(|| Some("0,2\n".to_string()));
        filesystem
            .expect_get_cpu_attribute_contents()
            .returning(|_, _| None);

        let set = Sysfs::from_facade(FilesystemFacade::from_mock(filesystem)).discover();

        let online: Vec<_> = set.cpus().map(|cpu| cpu.is_online()).collect();
        assert_eq!(online, vec![Some(true), Some(false), Some(true)]);
    }

    #[test]
    fn discover_malformed_online_list_leaves_state_unknown() {
        let mut filesystem = MockFilesystem::new();
        filesystem
            .expect_list_root_entries()
            .returning(|| ["cpu0", "cpu1"].map(str::to_string).to_vec());
        filesystem
            .expect_get_online_contents()
            .times(1)
            .returning(|| Some("0-\n".to_string()));
        filesystem
            .expect_get_cpu_attribute_contents()
            .returning(|_, _| None);

        let set = Sysfs::from_facade(FilesystemFacade::from_mock(filesystem)).discover();

        assert_eq!(set.len(), 2);
        assert!(set.cpus().all(|cpu| cpu.is_online().is_none()));
    }

    #[test]
    fn discover_unreadable_root_is_empty() {
        let mut filesystem = MockFilesystem::new();
        filesystem.expect_list_root_entries().returning(Vec::new);

        let set = Sysfs::from_facade(FilesystemFacade::from_mock(filesystem)).discover();

        assert!(set.is_empty());
    }

    #[test]
    fn cpu_not_found() {
        let mut filesystem = MockFilesystem::new();
        filesystem
            .expect_cpu_directory_exists()
            .returning(|_| false);

        let sysfs = Sysfs::from_facade(FilesystemFacade::from_mock(filesystem));

        assert!(matches!(sysfs.cpu(3), Err(Error::CpuNotFound { id: 3 })));
    }
}
