//! Library entry for catalog-scroll exposing the catalog store, sources and
//! runtime for the binary and integration tests.

pub mod app;
pub mod args;
pub mod config;
pub mod logic;
pub mod sources;
pub mod state;
