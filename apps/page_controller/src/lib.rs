//! Client-side behaviour of the career recommendation pages.
//!
//! A [`PageController`] drives one page load over a headless [`Document`]:
//! DOM events and backend completions go in, document mutations, timers and
//! backend commands come out. The backend itself is reached through
//! [`client_core::CareerBackend`] on a worker thread started by
//! [`backend_bridge::runtime::launch`].

pub mod backend_bridge;
pub mod config;
pub mod controller;
pub mod dom;
pub mod filters;
pub mod forms;
pub mod markup;
pub mod page;
pub mod render;
pub mod scheduler;
pub mod state;

pub use backend_bridge::commands::BackendCommand;
pub use config::{PageTimings, Settings};
pub use controller::events::PageEvent;
pub use dom::{Document, NodeId, NodeSpec};
pub use page::{Notice, PageController};
