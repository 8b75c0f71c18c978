#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Utilities for parsing and emitting strings in the range-list format that Linux uses in files
//! such as `/sys/devices/system/cpu/online` to describe a set of processor IDs.
//!
//! Example range-list string: `0-3,5,7-8`
//!
//! # Format
//!
//! The value is a comma-separated list of one or more tokens, where each token is either:
//!
//! * a single decimal integer (e.g. `5`)
//! * an inclusive range of decimal integers (e.g. `0-3`), where the start is not greater than
//!   the end
//!
//! Nothing else is accepted. There is no stride operator, no whitespace, no sign characters and
//! no empty tokens. If any single token is malformed, the whole string is rejected - there is no
//! partial result.
//!
//! Files read from the operating system usually end with a newline. Trim the content before
//! handing it to [`parse()`].
//!
//! The identifiers in the list are of size `u32`.
//!
//! # Example
//!
//! ```
//! let online = cpulist::parse("0-3,5,7-8").unwrap();
//! assert_eq!(online, vec![0, 1, 2, 3, 5, 7, 8]);
//!
//! assert!(cpulist::contains("0-3,5,7-8", 5).unwrap());
//! assert!(!cpulist::contains("0-3,5,7-8", 4).unwrap());
//!
//! println!("As range-list: {}", cpulist::emit(online));
//! ```
//!
//! Malformed input is an error, never a partial result:
//!
//! ```
//! assert!(cpulist::parse("a-b").is_err());
//! assert!(cpulist::parse("1-2-3").is_err());
//! ```

mod emit;
mod error;
mod parse;

pub use emit::*;
pub use error::*;
pub use parse::*;

pub(crate) type Item = u32;
