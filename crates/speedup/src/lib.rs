//! speedup library — application logic for the speedup benchmark runner.

pub mod app;
pub mod config;
pub mod errors;
