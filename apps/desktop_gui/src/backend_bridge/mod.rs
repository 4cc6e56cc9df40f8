//! Backend worker: owns the tokio runtime and the submission controller.

pub mod commands;
pub mod runtime;
pub mod view;
