use std::collections::BTreeSet;
use std::str::FromStr;

use tracing::trace;

use crate::pal::{Filesystem, FilesystemFacade};
use crate::{
    Error, FrequencyKind, LogicalProcessorId, Result, SysfsCpuSnapshot, TopologyId,
    TopologyIdKind,
};

/// Sysfs files report frequencies in kHz.
const HZ_PER_KHZ: u64 = 1000;

/// Value of a topology identifier file when the identifier does not apply.
const NOT_APPLICABLE: TopologyId = -1;

/// Live view of the attributes of one logical processor in the per-CPU attribute tree.
///
/// Every accessor reads the underlying file again and is independently best-effort: a missing,
/// unreadable or malformed file yields `None` for that one attribute and affects nothing else.
/// Use [`snapshot()`][Self::snapshot] to read everything at once.
///
/// Obtain an instance via [`Sysfs::cpu()`][crate::Sysfs::cpu].
#[derive(Clone, Debug)]
pub struct SysfsCpu {
    id: LogicalProcessorId,
    filesystem: FilesystemFacade,
}

impl SysfsCpu {
    /// Creates a view of a processor whose directory is known to exist.
    pub(crate) const fn new_unchecked(
        id: LogicalProcessorId,
        filesystem: FilesystemFacade,
    ) -> Self {
        Self { id, filesystem }
    }

    /// Creates a view of a processor, failing if its directory does not exist.
    pub(crate) fn new(id: LogicalProcessorId, filesystem: FilesystemFacade) -> Result<Self> {
        if !filesystem.cpu_directory_exists(id) {
            return Err(Error::CpuNotFound { id });
        }

        Ok(Self::new_unchecked(id, filesystem))
    }

    /// The identifier of the logical processor.
    #[cfg_attr(test, mutants::skip)] // Trivial getter.
    #[must_use]
    pub const fn id(&self) -> LogicalProcessorId {
        self.id
    }

    /// Whether the processor is online, according to the machine-wide `online` list.
    ///
    /// `None` if the list is missing or malformed. A malformed list is never partially used.
    #[must_use]
    pub fn is_online(&self) -> Option<bool> {
        read_online_list(&self.filesystem).map(|online| online.contains(&self.id))
    }

    /// One of the clock frequency readings of the processor, in Hz.
    ///
    /// `None` if the file does not exist (common, as not every kernel exposes every reading)
    /// or cannot be parsed.
    #[must_use]
    pub fn frequency_hz(&self, kind: FrequencyKind) -> Option<u64> {
        let khz: u64 = self.read_integer(kind.relative_path())?;

        let hz = khz.checked_mul(HZ_PER_KHZ);

        if hz.is_none() {
            trace!(cpu = self.id, %kind, khz, "frequency overflows when converted to Hz");
        }

        hz
    }

    /// One of the topology identifiers of the processor.
    ///
    /// `None` if the file does not exist, cannot be parsed or holds the "not applicable"
    /// sentinel `-1`.
    #[must_use]
    pub fn topology_id(&self, kind: TopologyIdKind) -> Option<TopologyId> {
        self.read_integer(kind.relative_path())
            .filter(|id| *id != NOT_APPLICABLE)
    }

    /// Reads every attribute of the processor once.
    #[must_use]
    pub fn snapshot(&self) -> SysfsCpuSnapshot {
        self.snapshot_with_online(self.is_online())
    }

    /// Reads every attribute of the processor once, except the online state, which the caller
    /// has already determined from the machine-wide list.
    pub(crate) fn snapshot_with_online(&self, is_online: Option<bool>) -> SysfsCpuSnapshot {
        SysfsCpuSnapshot {
            id: self.id,
            is_online,
            hardware_current_hz: self.frequency_hz(FrequencyKind::HardwareCurrent),
            hardware_min_hz: self.frequency_hz(FrequencyKind::HardwareMin),
            hardware_max_hz: self.frequency_hz(FrequencyKind::HardwareMax),
            scaling_current_hz: self.frequency_hz(FrequencyKind::ScalingCurrent),
            scaling_min_hz: self.frequency_hz(FrequencyKind::ScalingMin),
            scaling_max_hz: self.frequency_hz(FrequencyKind::ScalingMax),
            package_id: self.topology_id(TopologyIdKind::Package),
            cluster_id: self.topology_id(TopologyIdKind::Cluster),
            die_id: self.topology_id(TopologyIdKind::Die),
            core_id: self.topology_id(TopologyIdKind::Core),
        }
    }

    /// Reads the first line of a single-value attribute file as a decimal integer.
    fn read_integer<T: FromStr>(&self, relative_path: &str) -> Option<T> {
        let contents = self
            .filesystem
            .get_cpu_attribute_contents(self.id, relative_path)?;

        let value = contents.lines().next().unwrap_or_default().trim();

        let parsed = value.parse().ok();

        if parsed.is_none() {
            trace!(cpu = self.id, relative_path, value, "attribute is not an integer");
        }

        parsed
    }
}

/// Reads and parses the machine-wide `online` list.
///
/// `None` if the list is missing or malformed. A malformed list is never partially used.
pub(crate) fn read_online_list(
    filesystem: &FilesystemFacade,
) -> Option<BTreeSet<LogicalProcessorId>> {
    let contents = filesystem.get_online_contents()?;

    match cpulist::parse(contents.trim()) {
        Ok(online) => Some(online.into_iter().collect()),
        Err(error) => {
            trace!(%error, "malformed online list");
            None
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use static_assertions::assert_impl_all;

    use super::*;
    use crate::pal::MockFilesystem;

    assert_impl_all!(SysfsCpu: Send, Sync);

    fn cpu_with_online(id: LogicalProcessorId, online: Option<&'static str>) -> SysfsCpu {
        let mut filesystem = MockFilesystem::new();
        filesystem
            .expect_get_online_contents()
            .returning(move || online.map(str::to_string));

        SysfsCpu::new_unchecked(id, FilesystemFacade::from_mock(filesystem))
    }

    fn cpu_with_attribute(path: &'static str, contents: Option<&'static str>) -> SysfsCpu {
        let mut filesystem = MockFilesystem::new();
        filesystem
            .expect_get_cpu_attribute_contents()
            .returning(move |_, requested| {
                if requested == path {
                    contents.map(str::to_string)
                } else {
                    None
                }
            });

        SysfsCpu::new_unchecked(0, FilesystemFacade::from_mock(filesystem))
    }

    #[test]
    fn construction_fails_for_missing_directory() {
        let mut filesystem = MockFilesystem::new();
        filesystem
            .expect_cpu_directory_exists()
            .returning(|cpu| cpu < 4);

        let facade = FilesystemFacade::from_mock(filesystem);

        assert_eq!(SysfsCpu::new(3, facade.clone()).unwrap().id(), 3);
        assert!(matches!(
            SysfsCpu::new(4, facade),
            Err(Error::CpuNotFound { id: 4 })
        ));
    }

    #[test]
    fn online_membership() {
        assert_eq!(cpu_with_online(5, Some("0-3,5,7-8\n")).is_online(), Some(true));
        assert_eq!(cpu_with_online(4, Some("0-3,5,7-8\n")).is_online(), Some(false));
        assert_eq!(cpu_with_online(8, Some("0-3,5,7-8")).is_online(), Some(true));
        assert_eq!(cpu_with_online(9, Some("0-3,5,7-8")).is_online(), Some(false));
    }

    #[test]
    fn online_malformed_is_absent() {
        for id in 0..10 {
            assert_eq!(cpu_with_online(id, Some("a-b")).is_online(), None);
            assert_eq!(cpu_with_online(id, Some("0-1-2")).is_online(), None);
            assert_eq!(cpu_with_online(id, Some("\n")).is_online(), None);
        }
    }

    #[test]
    fn online_missing_is_absent() {
        assert_eq!(cpu_with_online(0, None).is_online(), None);
    }

    #[test]
    fn frequency_is_converted_to_hz() {
        let cpu = cpu_with_attribute("cpufreq/scaling_max_freq", Some("2400000\n"));

        assert_eq!(
            cpu.frequency_hz(FrequencyKind::ScalingMax),
            Some(2_400_000_000)
        );
        assert_eq!(cpu.frequency_hz(FrequencyKind::ScalingMin), None);
        assert_eq!(cpu.frequency_hz(FrequencyKind::HardwareCurrent), None);
    }

    #[test]
    fn frequency_malformed_is_absent() {
        let cpu = cpu_with_attribute("cpufreq/cpuinfo_max_freq", Some("fast\n"));
        assert_eq!(cpu.frequency_hz(FrequencyKind::HardwareMax), None);

        let cpu = cpu_with_attribute("cpufreq/cpuinfo_max_freq", Some("-100\n"));
        assert_eq!(cpu.frequency_hz(FrequencyKind::HardwareMax), None);
    }

    #[test]
    fn frequency_overflow_is_absent() {
        let cpu = cpu_with_attribute("cpufreq/cpuinfo_max_freq", Some("18446744073709551615"));

        assert_eq!(cpu.frequency_hz(FrequencyKind::HardwareMax), None);
    }

    #[test]
    fn topology_id_sentinel_is_absent() {
        let cpu = cpu_with_attribute("topology/die_id", Some("-1\n"));

        assert_eq!(cpu.topology_id(TopologyIdKind::Die), None);
    }

    #[test]
    fn topology_id_value() {
        let cpu = cpu_with_attribute("topology/physical_package_id", Some("1\n"));

        assert_eq!(cpu.topology_id(TopologyIdKind::Package), Some(1));
        assert_eq!(cpu.topology_id(TopologyIdKind::Core), None);
    }

    #[test]
    fn only_first_line_is_used() {
        let cpu = cpu_with_attribute("topology/core_id", Some("  7  \nextra\n"));

        assert_eq!(cpu.topology_id(TopologyIdKind::Core), Some(7));
    }

    #[test]
    fn snapshot_reads_everything_independently() {
        let mut filesystem = MockFilesystem::new();
        filesystem
            .expect_get_online_contents()
            .returning(|| Some("0-1\n".to_string()));
        filesystem
            .expect_get_cpu_attribute_contents()
            .returning(|_, path| match path {
                "cpufreq/cpuinfo_min_freq" => Some("300000\n".to_string()),
                "cpufreq/cpuinfo_max_freq" => Some("bogus\n".to_string()),
                "topology/physical_package_id" => Some("0\n".to_string()),
                "topology/cluster_id" => Some("-1\n".to_string()),
                "topology/core_id" => Some("1\n".to_string()),
                _ => None,
            });

        let snapshot =
            SysfsCpu::new_unchecked(1, FilesystemFacade::from_mock(filesystem)).snapshot();

        assert_eq!(snapshot.id(), 1);
        assert_eq!(snapshot.is_online(), Some(true));
        assert_eq!(
            snapshot.frequency_hz(FrequencyKind::HardwareMin),
            Some(300_000_000)
        );
        assert_eq!(snapshot.frequency_hz(FrequencyKind::HardwareMax), None);
        assert_eq!(snapshot.frequency_hz(FrequencyKind::ScalingCurrent), None);
        assert_eq!(snapshot.topology_id(TopologyIdKind::Package), Some(0));
        assert_eq!(snapshot.topology_id(TopologyIdKind::Cluster), None);
        assert_eq!(snapshot.topology_id(TopologyIdKind::Die), None);
        assert_eq!(snapshot.topology_id(TopologyIdKind::Core), Some(1));
    }
}
