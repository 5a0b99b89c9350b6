//! Credential cache stored as one JSON file per helper command.
//!
//! Each distinct command maps deterministically to a file named by the hex
//! SHA-256 of the command string, so commands never collide and the same
//! command always reaches the same slot. Entries are overwritten whole on
//! every successful fetch; nothing here ever deletes a file.

use std::fs;
use std::io::Write as _;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};

use crate::domain::errors::CacheError;
use crate::domain::models::{CachedCredential, Secret};
use crate::domain::ports::CredentialCache;

/// File-backed implementation of [`CredentialCache`].
///
/// The cache directory is created on first write with mode `0o700`; entry
/// files are created with mode `0o600`. Both restrictions are Unix-only; on
/// other platforms the default ACLs of the per-user directory apply.
#[derive(Debug, Clone)]
pub struct FileCredentialCache {
    dir: PathBuf,
}

impl FileCredentialCache {
    /// Use an explicit cache directory.
    pub const fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Use the default per-user cache directory,
    /// `~/.config/credhelper/.cache`.
    pub fn with_default_dir() -> Result<Self, CacheError> {
        Ok(Self::new(Self::default_dir()?))
    }

    /// The default per-user cache directory.
    pub fn default_dir() -> Result<PathBuf, CacheError> {
        let home = dirs::home_dir().ok_or(CacheError::NoCacheDir)?;
        Ok(home.join(".config").join("credhelper").join(".cache"))
    }

    /// The cache file path for a helper command.
    pub fn entry_path(&self, helper_cmd: &str) -> PathBuf {
        let digest = Sha256::digest(helper_cmd.as_bytes());
        self.dir.join(format!("{}.json", hex::encode(digest)))
    }

    fn ensure_dir(&self) -> Result<(), CacheError> {
        fs::create_dir_all(&self.dir)?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&self.dir, fs::Permissions::from_mode(0o700))?;
        }
        Ok(())
    }
}

/// Create `path` with owner-only permissions and write `data` to it.
///
/// The mode is set at creation, not with a follow-up chmod, so the file is
/// never observable with wider permissions.
fn write_restricted(path: &Path, data: &[u8]) -> std::io::Result<()> {
    let mut options = fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    let mut file = options.open(path)?;
    file.write_all(data)
}

impl CredentialCache for FileCredentialCache {
    fn read(&self, helper_cmd: &str) -> Result<Option<CachedCredential>, CacheError> {
        let path = self.entry_path(helper_cmd);
        let data = match fs::read(&path) {
            Ok(data) => data,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };

        let entry: CachedCredential = serde_json::from_slice(&data)?;

        // An entry written by a different command (renamed file, truncated
        // hash collision) must never be served.
        if entry.helper_cmd != helper_cmd {
            return Ok(None);
        }

        Ok(Some(entry))
    }

    fn write(&self, helper_cmd: &str, api_key: &Secret) -> Result<(), CacheError> {
        self.ensure_dir()?;
        let entry = CachedCredential::new(helper_cmd, api_key.clone());
        let data = serde_json::to_vec_pretty(&entry)?;
        write_restricted(&self.entry_path(helper_cmd), &data)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn cache_in_tempdir() -> (tempfile::TempDir, FileCredentialCache) {
        let dir = tempdir().unwrap();
        let cache = FileCredentialCache::new(dir.path().join("cache"));
        (dir, cache)
    }

    #[test]
    fn test_read_missing_entry_is_none() {
        let (_dir, cache) = cache_in_tempdir();
        assert!(cache.read("echo key").unwrap().is_none());
    }

    #[test]
    fn test_write_then_read_round_trips() {
        let (_dir, cache) = cache_in_tempdir();
        cache.write("echo key", &Secret::new("k1")).unwrap();

        let entry = cache.read("echo key").unwrap().unwrap();
        assert_eq!(entry.api_key.expose(), "k1");
        assert_eq!(entry.helper_cmd, "echo key");
    }

    #[test]
    fn test_distinct_commands_use_distinct_files() {
        let (_dir, cache) = cache_in_tempdir();
        assert_ne!(cache.entry_path("echo one"), cache.entry_path("echo two"));

        cache.write("echo one", &Secret::new("one")).unwrap();
        cache.write("echo two", &Secret::new("two")).unwrap();
        assert_eq!(cache.read("echo one").unwrap().unwrap().api_key.expose(), "one");
        assert_eq!(cache.read("echo two").unwrap().unwrap().api_key.expose(), "two");
    }

    #[test]
    fn test_entry_file_name_is_lowercase_hex_digest() {
        let (_dir, cache) = cache_in_tempdir();
        let path = cache.entry_path("echo key");
        let name = path.file_name().unwrap().to_str().unwrap();
        let stem = name.strip_suffix(".json").unwrap();

        assert_eq!(stem.len(), 64);
        assert!(stem
            .chars()
            .all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_same_command_maps_to_same_file() {
        let (_dir, cache) = cache_in_tempdir();
        assert_eq!(cache.entry_path("echo key"), cache.entry_path("echo key"));
    }

    #[test]
    fn test_corrupt_entry_is_an_error() {
        let (_dir, cache) = cache_in_tempdir();
        cache.write("echo key", &Secret::new("k1")).unwrap();
        fs::write(cache.entry_path("echo key"), b"not json").unwrap();

        assert!(matches!(
            cache.read("echo key"),
            Err(CacheError::Parse(_))
        ));
    }

    #[test]
    fn test_entry_for_other_command_is_ignored() {
        let (_dir, cache) = cache_in_tempdir();
        cache.write("echo one", &Secret::new("one")).unwrap();

        // Simulate a file landing in the wrong slot.
        fs::create_dir_all(cache.entry_path("echo two").parent().unwrap()).unwrap();
        fs::copy(cache.entry_path("echo one"), cache.entry_path("echo two")).unwrap();

        assert!(cache.read("echo two").unwrap().is_none());
    }

    #[test]
    fn test_overwrite_replaces_entry() {
        let (_dir, cache) = cache_in_tempdir();
        cache.write("echo key", &Secret::new("old")).unwrap();
        cache.write("echo key", &Secret::new("new")).unwrap();

        let entry = cache.read("echo key").unwrap().unwrap();
        assert_eq!(entry.api_key.expose(), "new");
    }

    #[cfg(unix)]
    #[test]
    fn test_entry_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let (_dir, cache) = cache_in_tempdir();
        cache.write("echo key", &Secret::new("k1")).unwrap();

        let mode = fs::metadata(cache.entry_path("echo key"))
            .unwrap()
            .permissions()
            .mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[cfg(unix)]
    #[test]
    fn test_cache_dir_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let (_dir, cache) = cache_in_tempdir();
        cache.write("echo key", &Secret::new("k1")).unwrap();

        let mode = fs::metadata(cache.dir.clone())
            .unwrap()
            .permissions()
            .mode();
        assert_eq!(mode & 0o777, 0o700);
    }
}
