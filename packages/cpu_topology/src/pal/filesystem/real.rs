use std::fs;
use std::path::{Path, PathBuf};

use tracing::trace;

use crate::LogicalProcessorId;
use crate::pal::Filesystem;

/// Where the kernel mounts the per-CPU attribute tree.
pub(crate) const DEFAULT_CPU_ROOT: &str = "/sys/devices/system/cpu";

/// The per-CPU attribute tree of the operating system that the build is targeting, read from a
/// configurable root directory.
///
/// The root is normally [`DEFAULT_CPU_ROOT`] but can point at a captured copy of the tree, which
/// is how the integration tests exercise this type.
#[derive(Debug)]
pub(crate) struct BuildTargetFilesystem {
    root: PathBuf,
}

impl BuildTargetFilesystem {
    pub(crate) fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn cpu_directory(&self, cpu: LogicalProcessorId) -> PathBuf {
        self.root.join(format!("cpu{cpu}"))
    }

    fn read(path: &Path) -> Option<String> {
        match fs::read_to_string(path) {
            Ok(contents) => Some(contents),
            Err(error) => {
                trace!(path = %path.display(), %error, "sysfs file unreadable");
                None
            }
        }
    }
}

// Real filesystem access is covered by the tempfile-based integration tests.
#[cfg_attr(coverage_nightly, coverage(off))]
impl Filesystem for BuildTargetFilesystem {
    fn list_root_entries(&self) -> Vec<String> {
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(error) => {
                trace!(root = %self.root.display(), %error, "CPU root directory unreadable");
                return Vec::new();
            }
        };

        entries
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| entry.file_name().into_string().ok())
            .collect()
    }

    fn cpu_directory_exists(&self, cpu: LogicalProcessorId) -> bool {
        self.cpu_directory(cpu).is_dir()
    }

    fn get_online_contents(&self) -> Option<String> {
        Self::read(&self.root.join("online"))
    }

    fn get_cpu_attribute_contents(
        &self,
        cpu: LogicalProcessorId,
        relative_path: &str,
    ) -> Option<String> {
        Self::read(&self.cpu_directory(cpu).join(relative_path))
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn attribute_paths_are_relative_to_cpu_directory() {
        let filesystem = BuildTargetFilesystem::new(DEFAULT_CPU_ROOT);

        assert_eq!(
            filesystem.cpu_directory(12),
            Path::new("/sys/devices/system/cpu/cpu12")
        );
    }

    #[test]
    fn missing_root_degrades_to_empty() {
        let filesystem = BuildTargetFilesystem::new("/definitely/not/a/real/cpu/root");

        assert!(filesystem.list_root_entries().is_empty());
        assert!(!filesystem.cpu_directory_exists(0));
        assert!(filesystem.get_online_contents().is_none());
        assert!(
            filesystem
                .get_cpu_attribute_contents(0, "topology/core_id")
                .is_none()
        );
    }
}
