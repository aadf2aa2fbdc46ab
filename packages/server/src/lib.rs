// Project Summary Service - API Core
//
// HTTP surface over the summary pipeline: configuration, routing, error
// mapping. Drive and Gemini access live in their own crates.

pub mod config;
pub mod server;

pub use config::*;
