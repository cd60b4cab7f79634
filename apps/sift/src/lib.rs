//! # sift
//!
//! CLI and HTTP front ends for the sift-core search engine.
//!
//! Exposed as a library so integration tests can build the router
//! (`sift::api::create_router`) without starting a real server.

pub mod api;
pub mod cli;
pub mod render;
pub mod source;
