//! Ingests pipe-delimited transaction files from a directory into a
//! relational store, then moves each run's files to a completed or error
//! directory depending on whether anything in the run was skipped.

pub mod engine;
pub mod models;
pub mod orchestrator;
pub mod processing;
pub mod relocation;
pub mod settings;
pub mod source;
pub mod storage;

#[cfg(test)]
mod test_support;
