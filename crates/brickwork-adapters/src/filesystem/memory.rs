//! In-memory filesystem adapter for testing.

use std::{
    collections::{BTreeMap, BTreeSet},
    path::{Component, Path, PathBuf},
    sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use brickwork_core::{
    application::{ApplicationError, ports::Filesystem},
    error::BrickworkResult,
};

/// In-memory filesystem for testing.
///
/// Clones share the same tree, so a test can keep one handle for assertions
/// while the service owns another.
#[derive(Debug, Clone)]
pub struct MemoryFilesystem {
    inner: Arc<RwLock<MemoryFilesystemInner>>,
}

#[derive(Debug, Default)]
struct MemoryFilesystemInner {
    files: BTreeMap<PathBuf, String>,
    directories: BTreeSet<PathBuf>,
}

impl MemoryFilesystemInner {
    fn add_dirs(&mut self, path: &Path) {
        let mut current = PathBuf::new();
        for component in path.components() {
            current.push(component);
            self.directories.insert(current.clone());
        }
    }
}

impl MemoryFilesystem {
    /// Create a new empty memory filesystem.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(MemoryFilesystemInner::default())),
        }
    }

    /// Seed a file, creating its parent directories (testing helper).
    pub fn with_file(self, path: impl AsRef<Path>, content: &str) -> Self {
        self.insert_file(path, content);
        self
    }

    /// Seed a file in place, creating its parent directories.
    pub fn insert_file(&self, path: impl AsRef<Path>, content: &str) {
        let path = path.as_ref();
        let mut inner = self.inner.write().unwrap_or_else(|e| e.into_inner());
        if let Some(parent) = path.parent() {
            inner.add_dirs(parent);
        }
        inner.files.insert(path.to_path_buf(), content.to_string());
    }

    /// Read a file's content (testing helper).
    pub fn read_file(&self, path: impl AsRef<Path>) -> Option<String> {
        let inner = self.inner.read().ok()?;
        inner.files.get(path.as_ref()).cloned()
    }

    /// All file paths, sorted.
    pub fn all_files(&self) -> Vec<PathBuf> {
        let inner = self.inner.read().unwrap_or_else(|e| e.into_inner());
        inner.files.keys().cloned().collect()
    }

    fn read_guard(&self) -> BrickworkResult<RwLockReadGuard<'_, MemoryFilesystemInner>> {
        self.inner.read().map_err(|_| lock_error())
    }

    fn write_guard(&self) -> BrickworkResult<RwLockWriteGuard<'_, MemoryFilesystemInner>> {
        self.inner.write().map_err(|_| lock_error())
    }
}

impl Default for MemoryFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for MemoryFilesystem {
    fn read_to_string(&self, path: &Path) -> BrickworkResult<String> {
        let inner = self.read_guard()?;
        inner.files.get(path).cloned().ok_or_else(|| {
            ApplicationError::FilesystemError {
                path: path.to_path_buf(),
                reason: "No such file".into(),
            }
            .into()
        })
    }

    fn write_file(&self, path: &Path, content: &str) -> BrickworkResult<()> {
        let mut inner = self.write_guard()?;

        // Ensure parent exists
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !inner.directories.contains(parent) {
                return Err(ApplicationError::FilesystemError {
                    path: path.to_path_buf(),
                    reason: "Parent directory does not exist".into(),
                }
                .into());
            }
        }

        inner.files.insert(path.to_path_buf(), content.to_string());
        Ok(())
    }

    fn create_dir_all(&self, path: &Path) -> BrickworkResult<()> {
        self.write_guard()?.add_dirs(path);
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        let inner = self.inner.read().unwrap_or_else(|e| e.into_inner());
        inner.files.contains_key(path) || inner.directories.contains(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        let inner = self.inner.read().unwrap_or_else(|e| e.into_inner());
        inner.directories.contains(path)
    }

    fn copy_dir_all(&self, from: &Path, to: &Path) -> BrickworkResult<()> {
        let mut inner = self.write_guard()?;

        let dirs: Vec<PathBuf> = inner
            .directories
            .iter()
            .filter_map(|d| d.strip_prefix(from).ok().map(|rel| to.join(rel)))
            .collect();
        let files: Vec<(PathBuf, String)> = inner
            .files
            .iter()
            .filter_map(|(p, c)| p.strip_prefix(from).ok().map(|rel| (to.join(rel), c.clone())))
            .collect();

        inner.add_dirs(to);
        for dir in dirs {
            inner.add_dirs(&dir);
        }
        inner.files.extend(files);
        Ok(())
    }

    /// Lexical only; there is no working directory to resolve against.
    fn canonicalize(&self, path: &Path) -> BrickworkResult<PathBuf> {
        let mut resolved = PathBuf::new();
        for component in path.components() {
            match component {
                Component::CurDir => {}
                Component::ParentDir => {
                    resolved.pop();
                }
                other => resolved.push(other),
            }
        }
        Ok(resolved)
    }

    fn list_files(&self, root: &Path) -> BrickworkResult<Vec<PathBuf>> {
        let inner = self.read_guard()?;
        Ok(inner
            .files
            .keys()
            .filter(|p| p.starts_with(root))
            .filter(|p| {
                p.strip_prefix(root)
                    .map(|rel| !rel.components().any(|c| c.as_os_str() == ".git"))
                    .unwrap_or(false)
            })
            .cloned()
            .collect())
    }
}

fn lock_error() -> brickwork_core::error::BrickworkError {
    ApplicationError::FilesystemError {
        path: PathBuf::from("<memory>"),
        reason: "lock poisoned".into(),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_requires_parent() {
        let fs = MemoryFilesystem::new();
        assert!(fs.write_file(Path::new("/p/a.txt"), "x").is_err());
        fs.create_dir_all(Path::new("/p")).unwrap();
        fs.write_file(Path::new("/p/a.txt"), "x").unwrap();
        assert_eq!(fs.read_file("/p/a.txt").as_deref(), Some("x"));
    }

    #[test]
    fn copy_dir_all_duplicates_subtree() {
        let fs = MemoryFilesystem::new()
            .with_file("/brick/blog/apps.py", "app")
            .with_file("/brick/blog/templates/blog/index.html", "<p>");
        fs.copy_dir_all(Path::new("/brick/blog"), Path::new("/proj/blog"))
            .unwrap();
        assert_eq!(fs.read_file("/proj/blog/apps.py").as_deref(), Some("app"));
        assert!(fs.is_dir(Path::new("/proj/blog/templates/blog")));
        assert!(fs.exists(Path::new("/brick/blog/apps.py")));
    }

    #[test]
    fn list_files_excludes_vcs_dir() {
        let fs = MemoryFilesystem::new()
            .with_file("/r/.git/HEAD", "ref")
            .with_file("/r/blog/apps.py", "")
            .with_file("/other/x", "");
        assert_eq!(
            fs.list_files(Path::new("/r")).unwrap(),
            vec![PathBuf::from("/r/blog/apps.py")]
        );
    }

    #[test]
    fn canonicalize_folds_dot_components() {
        let fs = MemoryFilesystem::new();
        assert_eq!(
            fs.canonicalize(Path::new("/bricks/shop/./static/..")).unwrap(),
            PathBuf::from("/bricks/shop")
        );
    }
}
