//! Outlay - Personal expense tracker with budget enforcement
//!
//! This library provides the core functionality for the Outlay expense
//! tracker. Every expense is recorded against a per-user category and
//! checked against that category's budget before it reaches the ledger.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (categories, budgets, expenses, outcomes)
//! - `storage`: JSON file storage layer
//! - `services`: Business logic layer (enforcement, reports, import)
//! - `export`: CSV export
//! - `cli`: Command handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use outlay::config::{paths::OutlayPaths, settings::Settings};
//!
//! let paths = OutlayPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod models;
pub mod services;
pub mod storage;

pub use error::OutlayError;
