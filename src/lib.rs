#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![warn(clippy::all, clippy::cargo, clippy::nursery, missing_docs)]
#![doc = include_str!("../README.md")]

/// Numeric constants, unit scales and solver tolerances.
pub mod constants;
/// Strongly typed unit helpers and quantity abstractions.
pub mod units;
/// Shared mathematical utilities.
pub mod math;
/// Series RLC components, parameters and closed-form solvers.
pub mod circuits;
/// Time and frequency sample-grid builders.
pub mod sweep;
/// Chart descriptions and image rendering.
pub mod render;
/// Named scalar report writer.
pub mod report;
/// High-level experiment configuration and driver.
pub mod simulation;
/// Error types shared between modules.
pub mod errors;

/// Common exports for downstream crates.
pub mod prelude;
