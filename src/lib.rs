#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![warn(clippy::all, clippy::cargo, clippy::nursery, missing_docs)]
#![doc = include_str!("../README.md")]

/// Unit conversions and default parameters.
pub mod constants;
/// Shared numerical aliases and complex helpers.
pub mod math;
/// Circuit notation scanner and shunting-yard parser.
pub mod parser;
/// Circuit components, combination rules, and evaluation.
pub mod circuits;
/// Frequency sweep builders and post-processing helpers.
pub mod sweep;
/// Error types shared between modules.
pub mod errors;

/// Common exports for downstream crates.
pub mod prelude;

pub use circuits::Circuit;
pub use errors::EisError;
pub use parser::parse;
