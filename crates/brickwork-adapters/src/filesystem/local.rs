//! Local filesystem adapter using std::fs.

use std::io;
use std::path::{Path, PathBuf};

use brickwork_core::{
    application::{ApplicationError, ports::Filesystem},
    error::{BrickworkError, BrickworkResult},
};
use walkdir::WalkDir;

/// Directory never descended into when listing a checkout.
const VCS_DIR: &str = ".git";

/// Production filesystem implementation using `std::fs`.
#[derive(Debug, Clone, Copy)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    /// Create a new local filesystem adapter.
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for LocalFilesystem {
    fn read_to_string(&self, path: &Path) -> BrickworkResult<String> {
        std::fs::read_to_string(path).map_err(|e| map_io_error(path, e, "read file"))
    }

    fn write_file(&self, path: &Path, content: &str) -> BrickworkResult<()> {
        std::fs::write(path, content).map_err(|e| map_io_error(path, e, "write file"))
    }

    fn create_dir_all(&self, path: &Path) -> BrickworkResult<()> {
        std::fs::create_dir_all(path).map_err(|e| map_io_error(path, e, "create directory"))
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn copy_dir_all(&self, from: &Path, to: &Path) -> BrickworkResult<()> {
        for entry in WalkDir::new(from) {
            let entry = entry.map_err(|e| walk_error(from, e))?;
            let relative = entry
                .path()
                .strip_prefix(from)
                .map_err(|e| ApplicationError::FilesystemError {
                    path: entry.path().to_path_buf(),
                    reason: e.to_string(),
                })?;
            let dest = to.join(relative);

            if entry.file_type().is_dir() {
                self.create_dir_all(&dest)?;
            } else if entry.file_type().is_file() {
                std::fs::copy(entry.path(), &dest)
                    .map_err(|e| map_io_error(&dest, e, "copy file"))?;
            }
        }
        Ok(())
    }

    fn canonicalize(&self, path: &Path) -> BrickworkResult<PathBuf> {
        std::fs::canonicalize(path).map_err(|e| map_io_error(path, e, "resolve path"))
    }

    fn list_files(&self, root: &Path) -> BrickworkResult<Vec<PathBuf>> {
        let walker = WalkDir::new(root)
            .min_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| e.file_name() != VCS_DIR);

        let mut files = Vec::new();
        for entry in walker {
            let entry = entry.map_err(|e| walk_error(root, e))?;
            if entry.file_type().is_file() {
                files.push(entry.into_path());
            }
        }
        files.sort();
        Ok(files)
    }
}

fn map_io_error(path: &Path, e: io::Error, operation: &str) -> BrickworkError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: format!("Failed to {}: {}", operation, e),
    }
    .into()
}

fn walk_error(root: &Path, e: walkdir::Error) -> BrickworkError {
    ApplicationError::FilesystemError {
        path: e.path().unwrap_or(root).to_path_buf(),
        reason: format!("directory walk error: {e}"),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn copy_dir_all_copies_nested_tree() {
        let tmp = TempDir::new().unwrap();
        let from = tmp.path().join("blog");
        std::fs::create_dir_all(from.join("templates/blog")).unwrap();
        std::fs::write(from.join("apps.py"), "x").unwrap();
        std::fs::write(from.join("templates/blog/index.html"), "<p>").unwrap();

        let to = tmp.path().join("project/blog");
        std::fs::create_dir_all(tmp.path().join("project")).unwrap();
        LocalFilesystem::new().copy_dir_all(&from, &to).unwrap();

        assert_eq!(std::fs::read_to_string(to.join("apps.py")).unwrap(), "x");
        assert!(to.join("templates/blog/index.html").is_file());
    }

    #[test]
    fn list_files_skips_git_and_sorts() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        std::fs::create_dir_all(root.join(".git/objects")).unwrap();
        std::fs::write(root.join(".git/objects/brick.yaml"), "").unwrap();
        std::fs::create_dir_all(root.join("b")).unwrap();
        std::fs::write(root.join("b/apps.py"), "").unwrap();
        std::fs::write(root.join("a.txt"), "").unwrap();

        let files = LocalFilesystem::new().list_files(root).unwrap();
        assert_eq!(files, vec![root.join("a.txt"), root.join("b/apps.py")]);
    }

    #[test]
    fn canonicalize_resolves_current_dir() {
        let tmp = TempDir::new().unwrap();
        let shop = tmp.path().join("bricks/shop");
        std::fs::create_dir_all(&shop).unwrap();

        let resolved = LocalFilesystem::new()
            .canonicalize(&shop.join("."))
            .unwrap();
        assert_eq!(resolved.file_name().unwrap(), "shop");
    }

    #[test]
    fn read_missing_file_is_filesystem_error() {
        let err = LocalFilesystem::new()
            .read_to_string(Path::new("/definitely/not/here.txt"))
            .unwrap_err();
        assert!(err.to_string().contains("Failed to read file"));
    }
}
