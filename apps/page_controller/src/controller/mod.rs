//! Controller layer: page events, pure state transitions, and command orchestration.

pub mod effects;
pub mod events;
pub mod orchestration;
pub mod reducer;
