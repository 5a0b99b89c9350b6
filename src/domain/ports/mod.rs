//! Port trait definitions (Hexagonal Architecture)
//!
//! This module defines the trait interfaces that infrastructure adapters must
//! implement:
//! - `CredentialCache`: Persisted storage for resolved secrets
//! - `HelperRunner`: Bounded execution of a helper shell command
//!
//! These traits define the contracts that allow the resolver to be
//! independent of specific infrastructure implementations.

pub mod credential_cache;
pub mod helper_runner;

pub use credential_cache::CredentialCache;
pub use helper_runner::HelperRunner;
