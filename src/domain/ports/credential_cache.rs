use crate::domain::errors::CacheError;
use crate::domain::models::{CachedCredential, Secret};

/// Storage interface for resolved credentials
///
/// One entry is kept per distinct helper command string. Implementations
/// must guarantee that entries for different commands never collide and
/// that the persisted form is only accessible to the owning user.
pub trait CredentialCache: Send + Sync {
    /// Look up the cached entry for a helper command
    ///
    /// # Arguments
    /// * `helper_cmd` - The exact helper command string
    ///
    /// # Returns
    /// * `Ok(Some(entry))` if an entry produced by this command exists
    /// * `Ok(None)` if no entry exists or the stored entry belongs to a
    ///   different command
    /// * `Err(CacheError)` if the entry exists but cannot be read or parsed
    fn read(&self, helper_cmd: &str) -> Result<Option<CachedCredential>, CacheError>;

    /// Persist a freshly resolved credential, overwriting any prior entry
    ///
    /// # Arguments
    /// * `helper_cmd` - The exact helper command string that produced the key
    /// * `api_key` - The resolved secret
    ///
    /// # Returns
    /// * `Ok(())` on success
    /// * `Err(CacheError)` on I/O or serialization failure
    fn write(&self, helper_cmd: &str, api_key: &Secret) -> Result<(), CacheError>;
}
