//! Shared resource-buffer contract and directory indexing

use kindle_core::{KindleError, Result};
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

/// Where all game resources are stored, relative to the working directory
pub const RES_DIR: &str = "game/resources/";

/// Outcome of a bulk load
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LoadReport {
    /// Resources decoded and cached
    pub loaded: usize,
    /// Files ignored because their extension is not supported
    pub skipped: usize,
    /// Supported files that failed to load
    pub failed: usize,
}

impl LoadReport {
    pub fn total(&self) -> usize {
        self.loaded + self.skipped + self.failed
    }
}

/// An in-memory cache of one kind of game resource (images, sounds, ...)
///
/// Resources are addressed by their path relative to [`root`](Self::root),
/// always `/`-separated. Loading is explicit; lookups never touch the disk.
pub trait ResourceBuffer {
    /// What `get_res` hands out. Expected to be cheap to clone.
    type Resource;

    /// Human-readable resource kind for log output
    fn kind(&self) -> &str;

    /// Directory the resource names are relative to
    fn root(&self) -> &Path;

    /// Lowercase file extensions this buffer can load, without the dot
    fn supported_extensions(&self) -> &[&'static str];

    /// Load and cache a single resource, replacing any cached copy
    fn load(&mut self, name: &str) -> Result<()>;

    fn res_exists(&self, name: &str) -> bool;

    fn get_res(&self, name: &str) -> Option<Self::Resource>;

    /// Index every file under `root` and try to load each one
    ///
    /// Unsupported files are skipped and failures are logged; neither stops
    /// the rest of the load.
    fn load_all(&mut self) -> LoadReport {
        let kind = self.kind().to_string();
        log::info!("Preloading {kind} from {}", self.root().display());

        let mut report = LoadReport::default();
        let names = match index_directory(self.root()) {
            Ok(names) => names,
            Err(e) => {
                log::warn!("Could not index {kind}: {e}");
                return report;
            }
        };

        let count = names.len();
        for (i, name) in names.iter().enumerate() {
            if !extension_supported(self.supported_extensions(), name) {
                log::debug!("Skipping {name}: unsupported extension");
                report.skipped += 1;
                continue;
            }
            match self.load(name) {
                Ok(()) => report.loaded += 1,
                Err(e) => {
                    log::warn!("Failed to load {kind} '{name}': {e}");
                    report.failed += 1;
                }
            }
            log::debug!("Loading {kind}... {}", count - i - 1);
        }

        log::info!(
            "Loaded {} {kind} ({} skipped, {} failed)",
            report.loaded,
            report.skipped,
            report.failed
        );
        report
    }
}

/// List every file under `root` (recursively) as a `/`-separated path
/// relative to `root`, sorted
///
/// A missing or unreadable root is an error. Nested directories and entries
/// that cannot be read are logged and skipped. Symlinked files are listed;
/// symlinked directories are not followed.
pub fn index_directory(root: &Path) -> Result<Vec<String>> {
    if !root.is_dir() {
        return Err(KindleError::ResourceNotFound(format!(
            "resource directory {}",
            root.display()
        )));
    }
    Ok(walk_files(root, scan_dir)?)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EntryKind {
    File,
    Dir,
}

fn walk_files(
    root: &Path,
    mut scan: impl FnMut(&Path) -> io::Result<Vec<(PathBuf, EntryKind)>>,
) -> io::Result<Vec<String>> {
    let mut names = Vec::new();
    let mut pending = Vec::new();
    sort_entries(root, scan(root)?, &mut names, &mut pending);

    while let Some(dir) = pending.pop() {
        match scan(&dir) {
            Ok(entries) => sort_entries(root, entries, &mut names, &mut pending),
            Err(e) => log::warn!("Skipping unreadable directory {}: {e}", dir.display()),
        }
    }

    names.sort();
    Ok(names)
}

fn sort_entries(
    root: &Path,
    entries: Vec<(PathBuf, EntryKind)>,
    names: &mut Vec<String>,
    pending: &mut Vec<PathBuf>,
) {
    for (path, kind) in entries {
        match kind {
            EntryKind::Dir => pending.push(path),
            EntryKind::File => {
                if let Some(name) = relative_name(root, &path) {
                    names.push(name);
                } else {
                    log::debug!("Skipping {}: name is not valid UTF-8", path.display());
                }
            }
        }
    }
}

fn scan_dir(dir: &Path) -> io::Result<Vec<(PathBuf, EntryKind)>> {
    let mut entries = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                log::warn!("Skipping unreadable entry in {}: {e}", dir.display());
                continue;
            }
        };
        let path = entry.path();
        let file_type = match entry.file_type() {
            Ok(file_type) => file_type,
            Err(e) => {
                log::warn!("Skipping {}: {e}", path.display());
                continue;
            }
        };

        if file_type.is_dir() {
            entries.push((path, EntryKind::Dir));
        } else if file_type.is_file() {
            entries.push((path, EntryKind::File));
        } else if file_type.is_symlink() {
            match fs::metadata(&path) {
                Ok(meta) if meta.is_file() => entries.push((path, EntryKind::File)),
                Ok(_) => log::debug!("Not following symlink {}", path.display()),
                Err(e) => log::warn!("Skipping broken symlink {}: {e}", path.display()),
            }
        }
    }
    Ok(entries)
}

fn relative_name(root: &Path, path: &Path) -> Option<String> {
    let rel = path.strip_prefix(root).ok()?;
    let parts: Option<Vec<&str>> = rel
        .components()
        .map(|c| match c {
            Component::Normal(s) => s.to_str(),
            _ => None,
        })
        .collect();
    Some(parts?.join("/"))
}

/// Whether the file extension of `name` is in `supported` (case-insensitive)
pub fn extension_supported(supported: &[&str], name: &str) -> bool {
    Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| supported.iter().any(|s| s.eq_ignore_ascii_case(ext)))
}

/// Resolve a resource name under `root`, rejecting names that would escape it
pub fn resolve_resource(root: &Path, name: &str) -> Result<PathBuf> {
    let rel = Path::new(name);
    let escapes = rel
        .components()
        .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
    if name.is_empty() || escapes {
        return Err(KindleError::ResourceNotFound(name.to_string()));
    }

    let path = root.join(rel);
    if !path.is_file() {
        return Err(KindleError::ResourceNotFound(name.to_string()));
    }
    Ok(path)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn temp_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!("kindle_test_{}", uuid::Uuid::new_v4()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_index_directory_recursive_and_sorted() {
        let root = temp_dir();
        fs::create_dir_all(root.join("ui/icons")).unwrap();
        fs::write(root.join("b.png"), b"x").unwrap();
        fs::write(root.join("a.wav"), b"x").unwrap();
        fs::write(root.join("ui/icons/close.png"), b"x").unwrap();

        let names = index_directory(&root).unwrap();
        assert_eq!(names, vec!["a.wav", "b.png", "ui/icons/close.png"]);

        fs::remove_dir_all(&root).ok();
    }

    #[test]
    fn test_unreadable_subdirectory_is_skipped() {
        let root = temp_dir();
        fs::create_dir_all(root.join("locked")).unwrap();
        fs::create_dir_all(root.join("open")).unwrap();
        fs::write(root.join("a.png"), b"x").unwrap();
        fs::write(root.join("locked/hidden.png"), b"x").unwrap();
        fs::write(root.join("open/b.png"), b"x").unwrap();

        let names = walk_files(&root, |dir| {
            if dir.ends_with("locked") {
                Err(io::Error::from(io::ErrorKind::PermissionDenied))
            } else {
                scan_dir(dir)
            }
        })
        .unwrap();
        assert_eq!(names, vec!["a.png", "open/b.png"]);

        let root_error = walk_files(&root, |_| Err(io::Error::from(io::ErrorKind::PermissionDenied)));
        assert!(root_error.is_err());

        fs::remove_dir_all(&root).ok();
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinks() {
        use std::os::unix::fs::symlink;

        let root = temp_dir();
        let outside = temp_dir();
        fs::write(outside.join("shared.png"), b"x").unwrap();
        fs::write(root.join("own.png"), b"x").unwrap();
        symlink(outside.join("shared.png"), root.join("linked.png")).unwrap();
        symlink(outside.join("gone.png"), root.join("dangling.png")).unwrap();
        // a link back to the root must not loop
        symlink(&root, root.join("loop")).unwrap();

        let names = index_directory(&root).unwrap();
        assert_eq!(names, vec!["linked.png", "own.png"]);

        fs::remove_dir_all(&root).ok();
        fs::remove_dir_all(&outside).ok();
    }

    #[test]
    fn test_index_missing_directory() {
        let root = std::env::temp_dir().join(format!("kindle_missing_{}", uuid::Uuid::new_v4()));
        let err = index_directory(&root).unwrap_err();
        assert!(matches!(err, KindleError::ResourceNotFound(_)));
    }

    #[test]
    fn test_extension_supported() {
        let supported = ["png", "jpg"];
        assert!(extension_supported(&supported, "hero.png"));
        assert!(extension_supported(&supported, "dir/HERO.PNG"));
        assert!(extension_supported(&supported, "photo.JpG"));
        assert!(!extension_supported(&supported, "notes.txt"));
        assert!(!extension_supported(&supported, "png"));
        // substring matches do not count
        assert!(!extension_supported(&supported, "archive.png.bak"));
    }

    #[test]
    fn test_resolve_resource_rejects_escape() {
        let root = temp_dir();
        fs::write(root.join("ok.png"), b"x").unwrap();

        assert!(resolve_resource(&root, "ok.png").is_ok());
        assert!(matches!(
            resolve_resource(&root, "../ok.png"),
            Err(KindleError::ResourceNotFound(_))
        ));
        assert!(resolve_resource(&root, "").is_err());
        assert!(resolve_resource(&root, "missing.png").is_err());

        fs::remove_dir_all(&root).ok();
    }

    #[test]
    fn test_load_report_total() {
        let report = LoadReport {
            loaded: 3,
            skipped: 2,
            failed: 1,
        };
        assert_eq!(report.total(), 6);
    }
}
