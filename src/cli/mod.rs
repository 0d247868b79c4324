//! Command Line Interface (CLI) layer.
//!
//! This module defines argument parsing (`args`), error types (`errors`),
//! and the orchestration logic (`runner`) for the sketch and download
//! flows. It wires user-provided options to the library functionality
//! exposed via `pencilsketch::api`.
//!
//! If you are embedding the renderer into another application, prefer using
//! the high-level `pencilsketch::api` module instead of calling the CLI code.
pub mod args;
pub mod errors;
pub mod runner;

pub use args::CliArgs;
pub use runner::run;
