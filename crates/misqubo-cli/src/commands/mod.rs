//! CLI command implementations.

pub mod common;
pub mod encode;
pub mod graph;
pub mod run;
pub mod solve;
pub mod verify;
pub mod version;
