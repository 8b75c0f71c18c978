use crate::fake::FakeFilesystem;
use crate::{FrequencyKind, LogicalProcessorId, TopologyId, TopologyIdKind};

/// Builder for a simulated per-CPU attribute tree.
///
/// Starts out empty: no processor directories, no `online` list and no attributes. Attributes
/// are only visible for processors added via [`cpus()`][Self::cpus].
///
/// # Example
///
/// ```
/// use cpu_topology::fake::SysfsBuilder;
/// use cpu_topology::{FrequencyKind, Sysfs, TopologyIdKind};
///
/// let sysfs = Sysfs::fake(
///     SysfsBuilder::new()
///         .cpus([0, 1])
///         .online("0-1")
///         .topology_id(1, TopologyIdKind::Core, 1)
///         .frequency_khz(1, FrequencyKind::HardwareMax, 3_000_000),
/// );
///
/// let cpu = sysfs.cpu(1).unwrap();
///
/// assert_eq!(cpu.is_online(), Some(true));
/// assert_eq!(cpu.topology_id(TopologyIdKind::Core), Some(1));
/// assert_eq!(cpu.frequency_hz(FrequencyKind::HardwareMax), Some(3_000_000_000));
/// assert!(sysfs.cpu(2).is_err());
/// ```
#[derive(Clone, Debug, Default)]
pub struct SysfsBuilder {
    filesystem: FakeFilesystem,
}

impl SysfsBuilder {
    /// Creates an empty attribute tree.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds processor directories.
    #[must_use]
    pub fn cpus(mut self, ids: impl IntoIterator<Item = LogicalProcessorId>) -> Self {
        self.filesystem.cpus.extend(ids);
        self
    }

    /// Sets the raw contents of the `online` list. The contents are not validated, so this can
    /// also simulate a malformed list.
    #[must_use]
    pub fn online(mut self, contents: impl Into<String>) -> Self {
        self.filesystem.online = Some(contents.into());
        self
    }

    /// Sets the `online` list to exactly the given processors.
    #[must_use]
    pub fn online_cpus(self, ids: impl IntoIterator<Item = LogicalProcessorId>) -> Self {
        let list = cpulist::emit(ids);
        self.online(format!("{list}\n"))
    }

    /// Sets the raw contents of an attribute file of one processor.
    #[must_use]
    pub fn attribute(
        mut self,
        cpu: LogicalProcessorId,
        relative_path: impl Into<String>,
        contents: impl Into<String>,
    ) -> Self {
        self.filesystem
            .attributes
            .entry(cpu)
            .or_default()
            .insert(relative_path.into(), contents.into());
        self
    }

    /// Sets one of the frequency readings of one processor, in kHz as the kernel reports it.
    #[must_use]
    pub fn frequency_khz(self, cpu: LogicalProcessorId, kind: FrequencyKind, khz: u64) -> Self {
        self.attribute(cpu, kind.relative_path(), format!("{khz}\n"))
    }

    /// Sets one of the topology identifiers of one processor. Use `-1` to simulate an
    /// identifier that does not apply.
    #[must_use]
    pub fn topology_id(
        self,
        cpu: LogicalProcessorId,
        kind: TopologyIdKind,
        id: TopologyId,
    ) -> Self {
        self.attribute(cpu, kind.relative_path(), format!("{id}\n"))
    }

    pub(crate) fn build(self) -> FakeFilesystem {
        self.filesystem
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::pal::Filesystem;

    #[test]
    fn online_cpus_renders_range_list() {
        let filesystem = SysfsBuilder::new().online_cpus([0, 1, 2, 3, 5, 7, 8]).build();

        assert_eq!(
            filesystem.get_online_contents().as_deref(),
            Some("0-3,5,7-8\n")
        );
    }

    #[test]
    fn attributes_of_unknown_cpus_are_invisible() {
        let filesystem = SysfsBuilder::new()
            .cpus([0])
            .topology_id(0, TopologyIdKind::Core, 0)
            .topology_id(1, TopologyIdKind::Core, 1)
            .build();

        assert_eq!(
            filesystem
                .get_cpu_attribute_contents(0, "topology/core_id")
                .as_deref(),
            Some("0\n")
        );
        assert!(
            filesystem
                .get_cpu_attribute_contents(1, "topology/core_id")
                .is_none()
        );
        assert!(!filesystem.cpu_directory_exists(1));
    }

    #[test]
    fn root_listing_mixes_in_non_processor_entries() {
        let filesystem = SysfsBuilder::new().cpus([0, 1]).online("0-1").build();

        let entries = filesystem.list_root_entries();

        assert!(entries.contains(&"cpu0".to_string()));
        assert!(entries.contains(&"cpu1".to_string()));
        assert!(entries.contains(&"online".to_string()));
        assert!(entries.contains(&"cpufreq".to_string()));
    }
}
