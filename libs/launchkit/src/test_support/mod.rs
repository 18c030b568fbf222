//! Test utilities for launcher integration tests.

#![allow(clippy::must_use_candidate, clippy::new_without_default)]

mod fake;
pub mod harness;
mod journal;

pub use fake::{RecordingEnvironment, RecordingToolkit};
pub use harness::{LaunchHarness, LaunchHarnessBuilder, LaunchOutcome};
pub use journal::{Event, Journal};
