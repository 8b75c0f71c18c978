#![cfg_attr(coverage_nightly, coverage(off))]

use std::fmt::Debug;
#[cfg(any(test, feature = "test-util"))]
use std::sync::Arc;

use crate::Result;
#[cfg(any(test, feature = "test-util"))]
use crate::fake::FakeBindings;
#[cfg(test)]
use crate::pal::MockBindings;
use crate::pal::{Bindings, BuildTargetBindings, RawTopology};

/// Enum to hide the real/fake/mock choice behind a single wrapper type.
#[derive(Clone)]
pub(crate) enum BindingsFacade {
    Target(&'static BuildTargetBindings),

    #[cfg(any(test, feature = "test-util"))]
    Fake(Arc<FakeBindings>),

    #[cfg(test)]
    Mock(Arc<MockBindings>),
}

impl BindingsFacade {
    pub(crate) const fn target() -> Self {
        Self::Target(&BuildTargetBindings)
    }

    #[cfg(any(test, feature = "test-util"))]
    pub(crate) fn from_fake(fake: FakeBindings) -> Self {
        Self::Fake(Arc::new(fake))
    }

    #[cfg(test)]
    pub(crate) fn from_mock(mock: MockBindings) -> Self {
        Self::Mock(Arc::new(mock))
    }
}

impl Bindings for BindingsFacade {
    fn load_topology(&self) -> Result<RawTopology> {
        match self {
            Self::Target(bindings) => bindings.load_topology(),
            #[cfg(any(test, feature = "test-util"))]
            Self::Fake(fake) => fake.load_topology(),
            #[cfg(test)]
            Self::Mock(mock) => mock.load_topology(),
        }
    }
}

impl Debug for BindingsFacade {
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
