//! Session token storage and the injectable session context.
//!
//! The token returned by `/news/login` is stored in `<base>/session.json`
//! under the `authToken` key, with restricted permissions (0600).
//! Tokens are never logged or displayed.

use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::config::paths;

/// Opaque authentication token issued by the API.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionToken(String);

impl SessionToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionToken(<redacted>)")
    }
}

/// Persistent backing for the session token.
pub trait TokenStore: Send + Sync {
    /// Reads the stored token, if any.
    ///
    /// # Errors
    /// Returns an error if the store exists but cannot be read.
    fn load(&self) -> Result<Option<SessionToken>>;

    /// Replaces the stored token.
    ///
    /// # Errors
    /// Returns an error if the token cannot be persisted.
    fn save(&self, token: &SessionToken) -> Result<()>;

    /// Deletes the stored token. Succeeds when nothing is stored.
    ///
    /// # Errors
    /// Returns an error if an existing token cannot be removed.
    fn clear(&self) -> Result<()>;
}

/// On-disk session file layout.
#[derive(Debug, Default, Serialize, Deserialize)]
struct SessionFile {
    #[serde(rename = "authToken", default, skip_serializing_if = "Option::is_none")]
    auth_token: Option<String>,
}

/// Token store backed by a JSON file.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the default location (`<base>/session.json`).
    pub fn default_location() -> Self {
        Self::new(paths::session_path())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Result<Option<SessionToken>> {
        let path = &self.path;
        if !path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read session from {}", path.display()))?;
        let file: SessionFile = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse session from {}", path.display()))?;

        Ok(file
            .auth_token
            .filter(|t| !t.is_empty())
            .map(SessionToken::new))
    }

    /// Writes a fresh 0600 sibling file and renames it over the session file.
    fn save(&self, token: &SessionToken) -> Result<()> {
        let path = &self.path;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let file = SessionFile {
            auth_token: Some(token.as_str().to_string()),
        };
        let contents =
            serde_json::to_string_pretty(&file).context("Failed to serialize session")?;

        let tmp_path = path.with_extension("json.tmp");
        remove_if_exists(&tmp_path)?;
        write_private(&tmp_path, contents.as_bytes())?;
        fs::rename(&tmp_path, path).with_context(|| {
            format!(
                "Failed to rename {} to {}",
                tmp_path.display(),
                path.display()
            )
        })
    }

    fn clear(&self) -> Result<()> {
        remove_if_exists(&self.path)
    }
}

fn remove_if_exists(path: &Path) -> Result<()> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e).with_context(|| format!("Failed to remove {}", path.display())),
    }
}

/// Creates `path` (which must not exist yet) readable by the owner only.
fn write_private(path: &Path, contents: &[u8]) -> Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let mut out = options
        .open(path)
        .with_context(|| format!("Failed to open {} for writing", path.display()))?;
    out.write_all(contents)
        .with_context(|| format!("Failed to write to {}", path.display()))?;
    out.sync_all()
        .with_context(|| format!("Failed to flush {}", path.display()))
}

/// In-process token store; nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<SessionToken>>,
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Result<Option<SessionToken>> {
        Ok(self
            .token
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }

    fn save(&self, token: &SessionToken) -> Result<()> {
        *self.token.lock().unwrap_or_else(PoisonError::into_inner) = Some(token.clone());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        *self.token.lock().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }
}

struct SessionInner {
    store: Box<dyn TokenStore>,
    token: RwLock<Option<SessionToken>>,
}

/// Shared handle to the current session.
///
/// Cloning is cheap; all clones observe the same token. The token is read
/// from the store once at construction and written through on every change,
/// so `token()` never touches the store.
#[derive(Clone)]
pub struct SessionContext {
    inner: Arc<SessionInner>,
}

impl fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionContext")
            .field("authenticated", &self.is_authenticated())
            .finish_non_exhaustive()
    }
}

impl SessionContext {
    /// Creates a context over `store`, loading any persisted token.
    ///
    /// # Errors
    /// Returns an error if the store cannot be read.
    pub fn load(store: impl TokenStore + 'static) -> Result<Self> {
        let token = store.load()?;
        Ok(Self {
            inner: Arc::new(SessionInner {
                store: Box::new(store),
                token: RwLock::new(token),
            }),
        })
    }

    /// Creates a context over the default session file.
    ///
    /// # Errors
    /// Returns an error if the session file exists but cannot be read.
    pub fn from_default_location() -> Result<Self> {
        Self::load(FileTokenStore::default_location())
    }

    /// Creates an empty, non-persistent context.
    pub fn in_memory() -> Self {
        Self {
            inner: Arc::new(SessionInner {
                store: Box::new(MemoryTokenStore::default()),
                token: RwLock::new(None),
            }),
        }
    }

    /// Current token, if logged in.
    pub fn token(&self) -> Option<SessionToken> {
        self.inner
            .token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Stores or clears the token.
    ///
    /// The in-memory value only changes once the store accepted the write.
    ///
    /// # Errors
    /// Returns an error if the store rejects the write.
    pub fn set_token(&self, token: Option<SessionToken>) -> Result<()> {
        match &token {
            Some(t) => self.inner.store.save(t)?,
            None => self.inner.store.clear()?,
        }
        *self
            .inner
            .token
            .write()
            .unwrap_or_else(PoisonError::into_inner) = token;
        Ok(())
    }

    pub fn is_authenticated(&self) -> bool {
        self.inner
            .token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// Clears the session.
    ///
    /// # Errors
    /// Returns an error if the stored token cannot be removed.
    pub fn logout(&self) -> Result<()> {
        self.set_token(None)?;
        tracing::info!("logged out");
        Ok(())
    }
}
