//! Service layer: credential resolution orchestration.

pub mod resolver;

pub use resolver::CredentialResolver;
