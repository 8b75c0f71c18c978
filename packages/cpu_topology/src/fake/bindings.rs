use crate::pal::{Bindings, RawTopology};
use crate::{Error, Result};

/// Native topology provider that returns a pre-built topology, or fails as an unavailable
/// provider would.
#[derive(Clone, Debug)]
pub(crate) struct FakeBindings {
    topology: Option<RawTopology>,
}

impl FakeBindings {
    pub(crate) const fn new(topology: Option<RawTopology>) -> Self {
        Self { topology }
    }
}

impl Bindings for FakeBindings {
    fn load_topology(&self) -> Result<RawTopology> {
        self.topology
            .clone()
            .ok_or_else(|| Error::unsupported("the fake topology provider is unavailable"))
    }
}
