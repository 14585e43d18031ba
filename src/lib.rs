//! Intrusion Detection System batch prediction client
//!
//! Uploads network traffic CSVs to the prediction service, tracks upload
//! progress, keeps a bounded run history and derives chart views and CSV
//! summaries from the returned statistics.

pub mod analysis;
pub mod cli;
pub mod config;
pub mod errors;
pub mod service;
pub mod storage;
pub mod types;
pub mod utils;
pub mod workflow;
