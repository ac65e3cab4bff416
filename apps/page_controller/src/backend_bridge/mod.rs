//! Bridge between the page controller and the backend worker.

pub mod commands;
pub mod runtime;
