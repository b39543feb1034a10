use {
    serde_json::Value,
    std::{fs, io, path::PathBuf},
};

// The one slot this subsystem ever writes. Overwritten on each successful
// login; clearing it (logout) belongs to another component.
const SESSION_KEY: &str = "usuario";

#[derive(thiserror::Error, Debug)]
pub enum SessionStoreError {
    #[error("failed to access the session storage")]
    Io(#[from] io::Error),
    #[error("the stored session record is not valid JSON")]
    Corrupt(#[from] serde_json::Error),
}

/// Persistent single-slot storage for the session record.
///
/// The record is whatever JSON the server answered with on a successful
/// login, kept verbatim; no shape beyond "valid JSON" is enforced.
pub trait SessionStore {
    fn get(&self) -> Result<Option<Value>, SessionStoreError>;

    fn set(&self, record: &Value) -> Result<(), SessionStoreError>;
}

/// File-backed store used by the kiosk binary: the slot lives at
/// `<dir>/usuario.json`.
pub struct FileSessionStore {
    dir: PathBuf,
}

impl FileSessionStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn slot_path(&self) -> PathBuf {
        self.dir.join(format!("{}.json", SESSION_KEY))
    }
}

impl SessionStore for FileSessionStore {
    fn get(&self) -> Result<Option<Value>, SessionStoreError> {
        let bytes = match fs::read(self.slot_path()) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Ok(Some(serde_json::from_slice(&bytes)?))
    }

    fn set(&self, record: &Value) -> Result<(), SessionStoreError> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.slot_path(), serde_json::to_vec_pretty(record)?)?;
        Ok(())
    }
}
