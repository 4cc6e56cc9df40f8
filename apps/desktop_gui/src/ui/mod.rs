//! UI layer for the desktop grading form.

pub mod app;

pub use app::{GraderApp, StartupConfig};
