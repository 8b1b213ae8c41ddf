use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use tracing::{debug, info};

use huddle_types::models::Message;

use crate::MessageLog;
use crate::error::{Result, StoreError};

/// Default file name for the JSON message log.
pub const DEFAULT_DATA_FILE: &str = "chat.json";

/// The whole log as one pretty-printed JSON array.
///
/// Every `append` reads the file, pushes one entry and rewrites it in full.
/// The rewrite is not crash-atomic: a crash mid-write can truncate the file.
pub struct JsonFileLog {
    path: PathBuf,
}

impl JsonFileLog {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| StoreError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        info!("Message log file: {}", path.display());
        Ok(Self { path })
    }

    fn load(&self) -> Result<Vec<Message>> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(StoreError::Io {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        // A freshly touched file counts as an empty log.
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }

        serde_json::from_slice(&bytes).map_err(|source| StoreError::Json {
            path: self.path.clone(),
            source,
        })
    }

    fn save(&self, messages: &[Message]) -> Result<()> {
        let data = serde_json::to_vec_pretty(messages).map_err(|source| StoreError::Json {
            path: self.path.clone(),
            source,
        })?;

        fs::write(&self.path, data).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })
    }
}

impl MessageLog for JsonFileLog {
    fn backend(&self) -> &'static str {
        "json"
    }

    fn append(&mut self, message: Message) -> Result<()> {
        let mut messages = self.load()?;
        messages.push(message);
        self.save(&messages)?;
        debug!("Appended message, log now holds {}", messages.len());
        Ok(())
    }

    fn list(&self) -> Result<Vec<Message>> {
        self.load()
    }
}
