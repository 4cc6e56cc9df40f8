//! Types shared between the grading client core and its front ends.

pub mod domain;
pub mod error;
pub mod protocol;
