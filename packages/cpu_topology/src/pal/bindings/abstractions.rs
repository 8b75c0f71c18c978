use std::fmt::Debug;

use crate::Result;
use crate::pal::RawTopology;

/// Bindings for the native topology provider. This trait allows the provider to be mocked or
/// faked.
///
/// The contract is all-or-nothing: either every table is returned, fully resolved into indexes,
/// or the call fails and nothing is returned.
#[cfg_attr(test, mockall::automock)]
pub(crate) trait Bindings: Debug + Send + Sync + 'static {
    /// Reads the complete topology of the current machine from the provider.
    ///
    /// # Errors
    ///
    /// [`Error::Unsupported`][crate::Error::Unsupported] if the provider is unavailable on this
    /// machine or failed to initialize.
    fn load_topology(&self) -> Result<RawTopology>;
}
