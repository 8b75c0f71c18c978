use std::collections::BTreeSet;

use foldhash::HashMap;

use crate::LogicalProcessorId;
use crate::pal::Filesystem;

/// In-memory per-CPU attribute tree.
#[derive(Clone, Debug, Default)]
pub(crate) struct FakeFilesystem {
    pub(crate) cpus: BTreeSet<LogicalProcessorId>,
    pub(crate) online: Option<String>,
    pub(crate) attributes: HashMap<LogicalProcessorId, HashMap<String, String>>,
}

impl Filesystem for FakeFilesystem {
    fn list_root_entries(&self) -> Vec<String> {
        // A real tree also holds entries that are not processors.
        let mut entries: Vec<String> = ["cpufreq", "cpuidle", "possible"]
            .into_iter()
            .map(str::to_string)
            .collect();

        if self.online.is_some() {
            entries.push("online".to_string());
        }

        entries.extend(self.cpus.iter().map(|cpu| format!("cpu{cpu}")));

        entries
    }

    fn cpu_directory_exists(&self, cpu: LogicalProcessorId) -> bool {
        self.cpus.contains(&cpu)
    }

    fn get_online_contents(&self) -> Option<String> {
        self.online.clone()
    }

    fn get_cpu_attribute_contents(
        &self,
        cpu: LogicalProcessorId,
        relative_path: &str,
    ) -> Option<String> {
        if !self.cpus.contains(&cpu) {
            return None;
        }

        self.attributes.get(&cpu)?.get(relative_path).cloned()
    }
}
