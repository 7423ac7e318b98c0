use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tempfile::NamedTempFile;
use thiserror::Error;

use crate::models::ProjectSnapshot;

/// 持久化错误
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO错误: {0}")]
    Io(#[from] std::io::Error),

    #[error("序列化失败: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("存储不可用: {0}")]
    Unavailable(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// 项目存储
pub trait ProjectStore: Send + Sync {
    fn save(&self, snapshot: &ProjectSnapshot) -> StoreResult<()>;
}

/// 以 JSON 文件保存项目快照
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> StoreResult<ProjectSnapshot> {
        let content = std::fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

impl ProjectStore for JsonFileStore {
    fn save(&self, snapshot: &ProjectSnapshot) -> StoreResult<()> {
        let json = serde_json::to_vec_pretty(snapshot)?;
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(&json)?;
        tmp.persist(&self.path).map_err(|e| StoreError::Io(e.error))?;

        log::debug!("项目已保存到 {}", self.path.display());
        Ok(())
    }
}

/// 内存存储，保留每次保存的快照
#[derive(Debug, Default)]
pub struct MemoryStore {
    saved: Mutex<Vec<ProjectSnapshot>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }

    pub fn save_count(&self) -> usize {
        self.saved.lock().map(|s| s.len()).unwrap_or(0)
    }

    pub fn latest(&self) -> Option<ProjectSnapshot> {
        self.saved.lock().ok().and_then(|s| s.last().cloned())
    }
}

impl ProjectStore for MemoryStore {
    fn save(&self, snapshot: &ProjectSnapshot) -> StoreResult<()> {
        let mut saved = self
            .saved
            .lock()
            .map_err(|_| StoreError::Unavailable("内存存储锁已损坏".to_string()))?;
        saved.push(snapshot.clone());
        Ok(())
    }
}
