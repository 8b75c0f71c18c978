//! Prints the processor hierarchy of the current machine, followed by the live readings of
//! every logical processor.

use cpu_topology::{CacheLevel, CpuTopology, Error, FrequencyKind, TopologyIdKind};

fn main() {
    let snapshot = match CpuTopology::current().snapshot() {
        Ok(snapshot) => snapshot,
        Err(Error::Unsupported { reason }) => {
            println!("CPU topology is not available on this machine: {reason}");
            return;
        }
        Err(error) => {
            eprintln!("Failed to read CPU topology: {error}");
            return;
        }
    };

    println!(
        "{} logical processors, {} cores, {} clusters, {} packages",
        snapshot.total_logical_processor_count(),
        snapshot.cores().len(),
        snapshot.clusters().len(),
        snapshot.packages().len()
    );

    for package in snapshot.packages() {
        println!(
            "Package '{}': {} processors, {} cores, {} clusters",
            package.name(),
            package.processor_count(),
            package.core_count(),
            package.cluster_count()
        );
    }

    for uarch in snapshot.uarchs() {
        match uarch.midr() {
            Some(midr) => println!(
                "{}: {} cores, {} processors, {midr}",
                uarch.uarch(),
                uarch.core_count(),
                uarch.processor_count()
            ),
            None => println!(
                "{}: {} cores, {} processors",
                uarch.uarch(),
                uarch.core_count(),
                uarch.processor_count()
            ),
        }
    }

    for level in CacheLevel::ALL {
        for cache in snapshot.caches(level) {
            println!(
                "{level}: {} KiB, {}-way, {}-byte lines, {} ({} processors)",
                cache.size_bytes() / 1024,
                cache.associativity(),
                cache.line_size_bytes(),
                cache.flags(),
                cache.processor_count()
            );
        }
    }

    println!();

    for processor in snapshot.processors() {
        let core = processor.core();

        println!(
            "cpu{:<4} core {:<3} smt {} {:<16} online {:<5} cur {:>10} max {:>10} package {}",
            processor.id(),
            core.core_id(),
            processor.processor().smt_id(),
            core.uarch().to_string(),
            format_option(processor.is_online()),
            format_option(processor.frequency_hz(FrequencyKind::ScalingCurrent)),
            format_option(processor.frequency_hz(FrequencyKind::HardwareMax)),
            format_option(processor.topology_id(TopologyIdKind::Package))
        );
    }
}

fn format_option<T: ToString>(value: Option<T>) -> String {
    value.map_or_else(|| "-".to_string(), |value| value.to_string())
}
