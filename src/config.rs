//! Configuration loader and schema types.
//!
//! This module exposes the settings that drive a build (paths, site URLs,
//! catalog credentials, feed and deploy options) and helpers to load them
//! from disk and the environment.

mod load;
mod schema;

pub use schema::*;
