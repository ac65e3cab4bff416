pub mod domain;
pub mod endpoints;
pub mod protocol;
