// src/store.rs

use crate::{
    error::{AppError, AppResult},
    utils,
};
use async_trait::async_trait;
use log::debug;
use std::{
    io::Write,
    path::{Path, PathBuf},
};
use tempfile::NamedTempFile;

/// 下载结果的保存位置，由用户在下载开始前授权一次。
///
/// 核心流程只会调用 `write`，不会创建或删除目录。
#[async_trait]
pub trait DestinationStore: Send + Sync {
    /// 用于总结报告的显示名称
    fn display_name(&self) -> String;

    /// 完整写入 `bytes`，只有内容全部交付后才返回 `Ok`。
    async fn write(&self, filename: &str, bytes: &[u8]) -> AppResult<u64>;
}

/// 本地目录。先写入同目录下的临时文件，再原子地重命名为目标文件名。
#[derive(Debug, Clone)]
pub struct DirectoryStore {
    root: PathBuf,
}

impl DirectoryStore {
    /// 打开一个已存在的目录
    pub fn open(root: &Path) -> AppResult<Self> {
        let root = dunce::canonicalize(root)?;
        if !root.is_dir() {
            return Err(AppError::UserInputError(format!(
                "保存位置 '{}' 不是目录",
                root.display()
            )));
        }
        Ok(Self { root })
    }
}

#[async_trait]
impl DestinationStore for DirectoryStore {
    fn display_name(&self) -> String {
        self.root.display().to_string()
    }

    async fn write(&self, filename: &str, bytes: &[u8]) -> AppResult<u64> {
        let target = utils::secure_join_filename(&self.root, filename)?;
        let mut temp = NamedTempFile::new_in(&self.root)?;
        temp.write_all(bytes)?;
        temp.as_file().sync_all()?;
        temp.persist(&target)?;
        debug!("已写入 {} 字节到 '{}'", bytes.len(), target.display());
        Ok(bytes.len() as u64)
    }
}

#[cfg(feature = "testing")]
pub use memory::MemoryStore;

#[cfg(feature = "testing")]
mod memory {
    use super::*;
    use std::{
        collections::{BTreeMap, HashSet},
        sync::Mutex,
    };

    /// 内存中的保存位置，可以指定某些文件名写入失败。
    #[derive(Debug, Default)]
    pub struct MemoryStore {
        files: Mutex<BTreeMap<String, Vec<u8>>>,
        failing: HashSet<String>,
    }

    impl MemoryStore {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn failing_on(filenames: &[&str]) -> Self {
            Self {
                files: Mutex::default(),
                failing: filenames.iter().map(|s| s.to_string()).collect(),
            }
        }

        pub fn files(&self) -> BTreeMap<String, Vec<u8>> {
            self.files.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl DestinationStore for MemoryStore {
        fn display_name(&self) -> String {
            "memory".to_string()
        }

        async fn write(&self, filename: &str, bytes: &[u8]) -> AppResult<u64> {
            if self.failing.contains(filename) {
                return Err(AppError::Io(std::io::Error::new(
                    std::io::ErrorKind::StorageFull,
                    "simulated write failure",
                )));
            }
            self.files
                .lock()
                .unwrap()
                .insert(filename.to_string(), bytes.to_vec());
            Ok(bytes.len() as u64)
        }
    }
}
