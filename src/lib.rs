//! Retail Pulse visit processing service
//!
//! Accepts batches of store visits (store id plus image URLs), validates
//! the store ids against a preloaded reference dataset, and processes each
//! job asynchronously: every image is downloaded, decoded, and measured.
//! Clients poll job status by identifier.

pub mod app_state;
pub mod config;
pub mod models;
pub mod routes;
pub mod services;
