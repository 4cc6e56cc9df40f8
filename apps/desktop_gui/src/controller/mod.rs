//! Controller layer: UI events and reducer-like state transitions.

pub mod events;
pub mod reducer;
