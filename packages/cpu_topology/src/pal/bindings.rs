mod abstractions;
pub(crate) use abstractions::*;

mod facade;
pub(crate) use facade::*;

#[cfg(target_os = "linux")]
mod ffi;

mod real;
pub(crate) use real::*;

mod records;
pub(crate) use records::*;
