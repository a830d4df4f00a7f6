use crate::domain::ports::Storage;
use crate::utils::error::Result;
use crate::utils::validation::has_extension;
use std::path::{Path, PathBuf};

/// Filesystem storage; relative paths resolve against `base_path`.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: String,
}

impl LocalStorage {
    pub fn new(base_path: String) -> Self {
        Self { base_path }
    }

    pub fn resolve(&self, path: &str) -> PathBuf {
        Path::new(&self.base_path).join(path)
    }
}

impl Storage for LocalStorage {
    async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let data = tokio::fs::read(self.resolve(path)).await?;
        Ok(data)
    }

    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let full_path = self.resolve(path);

        if let Some(parent) = full_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        tokio::fs::write(full_path, data).await?;
        Ok(())
    }

    async fn file_size(&self, path: &str) -> Result<u64> {
        let metadata = tokio::fs::metadata(self.resolve(path)).await?;
        Ok(metadata.len())
    }

    async fn list_files(&self, dir: &str, extension: &str) -> Result<Vec<String>> {
        let mut entries = match tokio::fs::read_dir(self.resolve(dir)).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("Directory {} does not exist, treating as empty", dir);
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };

        let mut names = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            if !entry.file_type().await?.is_file() {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                if has_extension(name, extension) {
                    names.push(name.to_string());
                }
            }
        }
        names.sort();
        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_write_creates_parent_directories() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path().to_str().unwrap().to_string());

        storage.write_file("out/nested/spec.md", b"# Spec").await.unwrap();
        assert_eq!(storage.read_file("out/nested/spec.md").await.unwrap(), b"# Spec");
        assert_eq!(storage.file_size("out/nested/spec.md").await.unwrap(), 6);
    }

    #[tokio::test]
    async fn test_list_files_filters_by_extension() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path().to_str().unwrap().to_string());
        storage.write_file("consultants/b.md", b"b").await.unwrap();
        storage.write_file("consultants/a.MD", b"a").await.unwrap();
        storage.write_file("consultants/notes.txt", b"n").await.unwrap();
        storage.write_file("consultants/sub/c.md", b"c").await.unwrap();

        let files = storage.list_files("consultants", "md").await.unwrap();
        assert_eq!(files, vec!["a.MD", "b.md"]);
        assert!(storage.list_files("missing", "md").await.unwrap().is_empty());
    }
}
