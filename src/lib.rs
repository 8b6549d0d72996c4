//! wildfacts library
//!
//! Multi-source resolution of wildlife facts. The binary is a thin wrapper
//! around [`pipeline::Pipeline`]; the modules are public for integration tests.

pub mod cache;
pub mod cli;
pub mod data;
pub mod fetcher;
pub mod image;
pub mod pipeline;
