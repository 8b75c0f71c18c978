use std::fmt::Debug;
use std::sync::Arc;

use crate::LogicalProcessorId;
#[cfg(any(test, feature = "test-util"))]
use crate::fake::FakeFilesystem;
#[cfg(test)]
use crate::pal::MockFilesystem;
use crate::pal::{BuildTargetFilesystem, Filesystem};

/// Enum to hide the different filesystem implementations behind a single wrapper type.
#[derive(Clone)]
pub(crate) enum FilesystemFacade {
    Target(Arc<BuildTargetFilesystem>),

    #[cfg(any(test, feature = "test-util"))]
    Fake(Arc<FakeFilesystem>),

    #[cfg(test)]
    Mock(Arc<MockFilesystem>),
}

impl FilesystemFacade {
    pub(crate) fn target(filesystem: BuildTargetFilesystem) -> Self {
        Self::Target(Arc::new(filesystem))
    }

    #[cfg(any(test, feature = "test-util"))]
    pub(crate) fn from_fake(fake: FakeFilesystem) -> Self {
        Self::Fake(Arc::new(fake))
    }

    #[cfg(test)]
    pub(crate) fn from_mock(mock: MockFilesystem) -> Self {
        Self::Mock(Arc::new(mock))
    }
}

impl Filesystem for FilesystemFacade {
    fn list_root_entries(&self) -> Vec<String> {
        match self {
            Self::Target(filesystem) => filesystem.list_root_entries(),
            #[cfg(any(test, feature = "test-util"))]
            Self::Fake(fake) => fake.list_root_entries(),
            #[cfg(test)]
            Self::Mock(mock) => mock.list_root_entries(),
        }
    }

    fn cpu_directory_exists(&self, cpu: LogicalProcessorId) -> bool {
        match self {
            Self::Target(filesystem) => filesystem.cpu_directory_exists(cpu),
            #[cfg(any(test, feature = "test-util"))]
            Self::Fake(fake) => fake.cpu_directory_exists(cpu),
            #[cfg(test)]
            Self::Mock(mock) => mock.cpu_directory_exists(cpu),
        }
    }

    fn get_online_contents(&self) -> Option<String> {
        match self {
            Self::Target(filesystem) => filesystem.get_online_contents(),
            #[cfg(any(test, feature = "test-util"))]
            Self::Fake(fake) => fake.get_online_contents(),
            #[cfg(test)]
            Self::Mock(mock) => mock.get_online_contents(),
        }
    }

    fn get_cpu_attribute_contents(
        &self,
        cpu: LogicalProcessorId,
        relative_path: &str,
    ) -> Option<String> {
        match self {
            Self::Target(filesystem) => filesystem.get_cpu_attribute_contents(cpu, relative_path),
            #[cfg(any(test, feature = "test-util"))]
            Self::Fake(fake) => fake.get_cpu_attribute_contents(cpu, relative_path),
            #[cfg(test)]
            Self::Mock(mock) => mock.get_cpu_attribute_contents(cpu, relative_path),
        }
    }
}

#[cfg_attr(coverage_nightly, coverage(off))] // No API contract to test.
impl Debug for FilesystemFacade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Target(inner) => inner.fmt(f),
            #[cfg(any(test, feature = "test-util"))]
            Self::Fake(inner) => inner.fmt(f),
            #[cfg(test)]
            Self::Mock(inner) => inner.fmt(f),
        }
    }
}
