//! Infrastructure layer module
//!
//! This module contains all infrastructure adapters and external
//! integrations:
//! - File-backed credential cache
//! - Isolated helper execution (process groups / job objects)
//! - Configuration management
//! - Logging infrastructure
//!
//! Infrastructure implementations satisfy the port traits defined in the
//! domain layer.

pub mod cache;
pub mod config;
pub mod exec;
pub mod logging;
