use crate::core::Storage;
use crate::utils::error::Result;
use glob::MatchOptions;
use std::fs;
use std::path::{Path, PathBuf};

/// Filesystem-backed storage. Relative paths resolve against the working directory.
#[derive(Debug, Clone, Default)]
pub struct LocalStorage;

impl LocalStorage {
    pub fn new() -> Self {
        Self
    }
}

impl Storage for LocalStorage {
    async fn list_matching(&self, dir: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
        // 目錄名稱可能含有 glob 特殊字元，只讓 pattern 生效
        let escaped_dir = glob::Pattern::escape(&dir.to_string_lossy());
        let full_pattern = Path::new(&escaped_dir).join(pattern);
        let options = MatchOptions {
            case_sensitive: true,
            require_literal_separator: true,
            require_literal_leading_dot: true,
        };

        let mut paths = Vec::new();
        for entry in glob::glob_with(&full_pattern.to_string_lossy(), options)? {
            let path = entry?;
            if path.is_file() {
                paths.push(path);
            }
        }
        paths.sort();
        Ok(paths)
    }

    async fn read_file(&self, path: &Path) -> Result<Vec<u8>> {
        let data = fs::read(path)?;
        Ok(data)
    }

    async fn write_file(&self, path: &Path, data: &[u8]) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        fs::write(path, data)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_list_matching_skips_dirs_and_hidden_files() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("49192_b.png"), b"b").unwrap();
        fs::write(dir.path().join("49192_a.png"), b"a").unwrap();
        fs::write(dir.path().join(".49192_hidden.png"), b"h").unwrap();
        fs::write(dir.path().join("slice_1.png"), b"s").unwrap();
        fs::create_dir(dir.path().join("49192_dir")).unwrap();

        let storage = LocalStorage::new();
        let found = storage.list_matching(dir.path(), "49192*").await.unwrap();

        assert_eq!(
            found,
            vec![dir.path().join("49192_a.png"), dir.path().join("49192_b.png")]
        );
    }

    #[tokio::test]
    async fn test_list_matching_escapes_directory() {
        let root = TempDir::new().unwrap();
        let odd = root.path().join("sprites[v2]");
        fs::create_dir(&odd).unwrap();
        fs::write(odd.join("a.png"), b"a").unwrap();

        let found = LocalStorage::new().list_matching(&odd, "*.png").await.unwrap();
        assert_eq!(found, vec![odd.join("a.png")]);
    }

    #[tokio::test]
    async fn test_write_creates_parent_dirs() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("nested/out/alt.png");

        let storage = LocalStorage::new();
        storage.write_file(&target, b"data").await.unwrap();

        assert_eq!(storage.read_file(&target).await.unwrap(), b"data".to_vec());
    }
}
