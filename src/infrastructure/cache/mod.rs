//! File-backed credential cache.

pub mod file_store;

pub use file_store::FileCredentialCache;
