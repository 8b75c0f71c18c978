//! Platform Abstraction Layer (PAL). Everything that touches the operating system or the native
//! topology library goes through the traits defined here, so the layers above can be tested
//! against mocks and fakes.

mod bindings;
pub(crate) use bindings::*;

mod filesystem;
pub(crate) use filesystem::*;
