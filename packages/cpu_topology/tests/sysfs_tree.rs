//! Integration tests that read a per-CPU attribute tree laid out on disk, exercising the real
//! filesystem reader end to end.

#![cfg(not(miri))]

use std::fs;
use std::path::Path;

use cpu_topology::{CpuTopology, Error, FrequencyKind, Sysfs, TopologyIdKind};
use tempfile::TempDir;

fn write(root: &Path, relative_path: &str, contents: &str) {
    let path = root.join(relative_path);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

/// Four processors in two packages. Processor 3 is offline and has no cpufreq directory.
fn sample_tree() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();

    write(root, "online", "0-2\n");
    write(root, "possible", "0-3\n");
    fs::create_dir_all(root.join("cpufreq/policy0")).unwrap();
    fs::create_dir_all(root.join("cpuidle")).unwrap();

    for cpu in 0..4 {
        write(
            root,
            &format!("cpu{cpu}/topology/physical_package_id"),
            &format!("{}\n", cpu / 2),
        );
        write(
            root,
            &format!("cpu{cpu}/topology/core_id"),
            &format!("{}\n", cpu % 2),
        );
        write(root, &format!("cpu{cpu}/topology/die_id"), "-1\n");
    }

    for cpu in 0..3 {
        write(
            root,
            &format!("cpu{cpu}/cpufreq/scaling_cur_freq"),
            "1800000\n",
        );
        write(
            root,
            &format!("cpu{cpu}/cpufreq/cpuinfo_max_freq"),
            "3200000\n",
        );
    }

    write(root, "cpu2/cpufreq/scaling_min_freq", "not a number\n");

    dir
}

#[test]
fn discovers_only_processor_directories() {
    let dir = sample_tree();

    let set = Sysfs::at_root(dir.path()).discover();

    let ids: Vec<_> = set.cpus().map(|cpu| cpu.id()).collect();
    assert_eq!(ids, vec![0, 1, 2, 3]);
}

#[test]
fn reads_online_state() {
    let dir = sample_tree();
    let sysfs = Sysfs::at_root(dir.path());

    assert_eq!(sysfs.cpu(0).unwrap().is_online(), Some(true));
    assert_eq!(sysfs.cpu(2).unwrap().is_online(), Some(true));
    assert_eq!(sysfs.cpu(3).unwrap().is_online(), Some(false));
}

#[test]
fn reads_frequencies_in_hz() {
    let dir = sample_tree();
    let cpu = Sysfs::at_root(dir.path()).cpu(1).unwrap();

    assert_eq!(
        cpu.frequency_hz(FrequencyKind::ScalingCurrent),
        Some(1_800_000_000)
    );
    assert_eq!(
        cpu.frequency_hz(FrequencyKind::HardwareMax),
        Some(3_200_000_000)
    );
    assert_eq!(cpu.frequency_hz(FrequencyKind::HardwareCurrent), None);
}

#[test]
fn degraded_readings_are_isolated() {
    let dir = sample_tree();
    let sysfs = Sysfs::at_root(dir.path());

    let cpu2 = sysfs.cpu(2).unwrap();
    assert_eq!(cpu2.frequency_hz(FrequencyKind::ScalingMin), None);
    assert_eq!(
        cpu2.frequency_hz(FrequencyKind::ScalingCurrent),
        Some(1_800_000_000)
    );

    let cpu3 = sysfs.cpu(3).unwrap();
    assert_eq!(cpu3.frequency_hz(FrequencyKind::ScalingCurrent), None);
    assert_eq!(cpu3.topology_id(TopologyIdKind::Package), Some(1));
    assert_eq!(cpu3.topology_id(TopologyIdKind::Die), None);
}

#[test]
fn groups_by_package_and_core() {
    let dir = sample_tree();

    let set = Sysfs::at_root(dir.path()).discover();

    let packages = set.package_groups().unwrap();
    assert_eq!(packages.len(), 2);
    assert_eq!(packages[&0].iter().copied().collect::<Vec<_>>(), vec![0, 1]);
    assert_eq!(packages[&1].iter().copied().collect::<Vec<_>>(), vec![2, 3]);

    let cores = set.groups(TopologyIdKind::Core).unwrap();
    assert_eq!(cores[&0].iter().copied().collect::<Vec<_>>(), vec![0, 2]);

    assert!(set.die_groups().is_none());
}

#[test]
fn missing_processor_is_not_found() {
    let dir = sample_tree();

    let result = Sysfs::at_root(dir.path()).cpu(4);

    assert!(matches!(result, Err(Error::CpuNotFound { id: 4 })));
}

#[test]
fn missing_root_is_empty() {
    let dir = tempfile::tempdir().unwrap();

    let set = Sysfs::at_root(dir.path().join("does-not-exist")).discover();

    assert!(set.is_empty());
}

#[test]
fn snapshot_with_custom_root_is_complete_or_unsupported() {
    let dir = sample_tree();

    // Whether the native provider exists depends on the machine running the tests.
    match CpuTopology::with_sysfs_root(dir.path()).snapshot() {
        Ok(snapshot) => assert!(snapshot.total_logical_processor_count() > 0),
        Err(Error::Unsupported { .. }) => {}
        Err(error) => panic!("unexpected error: {error}"),
    }
}
