//! Source file export and import.

use std::fs;
use std::path::{Path, PathBuf};

use crate::editor::{CursorPlacement, Editor};
use crate::error::FileError;

/// Filename used for exports.
pub const DEFAULT_EXPORT_NAME: &str = "code.py";

/// Acknowledgment returned after a successful import.
pub const IMPORT_ACK: &str = "Code loaded!";

const ACCEPTED_EXTENSIONS: [&str; 2] = ["py", "txt"];

/// Writes the editor's text to `dir/code.py`, returning the written path.
pub fn export_source(editor: &dyn Editor, dir: &Path) -> Result<PathBuf, FileError> {
    let path = dir.join(DEFAULT_EXPORT_NAME);
    fs::write(&path, editor.value()).map_err(|source| FileError::Io {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}

/// Replaces the editor's contents with the file at `path`.
pub fn import_source(editor: &mut dyn Editor, path: &Path) -> Result<&'static str, FileError> {
    if !is_accepted(path) {
        return Err(FileError::UnsupportedExtension {
            path: path.to_path_buf(),
        });
    }
    let text = fs::read_to_string(path).map_err(|source| FileError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    editor.set_value(&text, CursorPlacement::End);
    Ok(IMPORT_ACK)
}

/// Directory tree that import and export are confined to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workspace {
    root: PathBuf,
}

impl Workspace {
    /// Opens `root`, which must be an existing directory.
    pub fn open(root: impl AsRef<Path>) -> Result<Self, FileError> {
        let root = root.as_ref();
        let canonical = root.canonicalize().map_err(|source| FileError::Io {
            path: root.to_path_buf(),
            source,
        })?;
        Ok(Workspace { root: canonical })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolves `requested` to a canonical path inside the root. Relative
    /// paths are taken from the root; symlinks and `..` are followed before
    /// the containment check.
    pub fn resolve(&self, requested: &Path) -> Result<PathBuf, FileError> {
        let joined = self.root.join(requested);
        match joined.canonicalize() {
            Ok(path) if path.starts_with(&self.root) => Ok(path),
            Ok(_) => Err(FileError::OutsideWorkspace {
                path: requested.to_path_buf(),
            }),
            // A missing entry is only reported as missing when its parent
            // is inside the root.
            Err(source) => {
                let parent = joined.parent().and_then(|p| p.canonicalize().ok());
                match (parent, joined.file_name()) {
                    (Some(parent), Some(_)) if parent.starts_with(&self.root) => {
                        Err(FileError::Io {
                            path: requested.to_path_buf(),
                            source,
                        })
                    }
                    _ => Err(FileError::OutsideWorkspace {
                        path: requested.to_path_buf(),
                    }),
                }
            }
        }
    }

    /// [`export_source`] into a directory inside the root.
    pub fn export(&self, editor: &dyn Editor, dir: &Path) -> Result<PathBuf, FileError> {
        let dir = self.resolve(dir)?;
        export_source(editor, &dir)
    }

    /// [`import_source`] from a file inside the root.
    pub fn import(&self, editor: &mut dyn Editor, path: &Path) -> Result<&'static str, FileError> {
        if !is_accepted(path) {
            return Err(FileError::UnsupportedExtension {
                path: path.to_path_buf(),
            });
        }
        let path = self.resolve(path)?;
        import_source(editor, &path)
    }
}

/// Returns `true` for `.py` and `.txt` files.
pub fn is_accepted(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ACCEPTED_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::SourceBuffer;

    #[test]
    fn export_then_import_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let original = "name = input('Name: ')\nprint('hi', name)\n\n\ttrailing  ";
        let source = SourceBuffer::new(original);

        let path = export_source(&source, dir.path()).unwrap();
        assert_eq!(path.file_name().unwrap(), DEFAULT_EXPORT_NAME);

        let mut target = SourceBuffer::new("something else");
        let ack = import_source(&mut target, &path).unwrap();
        assert_eq!(ack, IMPORT_ACK);
        assert_eq!(target.value(), original);
    }

    #[test]
    fn import_rejects_other_extensions() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.md");
        fs::write(&path, "x").unwrap();
        let mut buf = SourceBuffer::new("keep");
        assert!(matches!(
            import_source(&mut buf, &path),
            Err(FileError::UnsupportedExtension { .. })
        ));
        assert_eq!(buf.value(), "keep");
    }

    #[test]
    fn import_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut buf = SourceBuffer::default();
        assert!(matches!(
            import_source(&mut buf, &dir.path().join("gone.py")),
            Err(FileError::Io { .. })
        ));
    }

    #[test]
    fn workspace_round_trip_with_relative_paths() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("src")).unwrap();
        let workspace = Workspace::open(dir.path()).unwrap();

        let path = workspace
            .export(&SourceBuffer::new("print(1)\n"), Path::new("src"))
            .unwrap();
        assert!(path.starts_with(workspace.root()));

        let mut target = SourceBuffer::default();
        workspace
            .import(&mut target, Path::new("src/code.py"))
            .unwrap();
        assert_eq!(target.value(), "print(1)\n");
    }

    #[test]
    fn workspace_rejects_escapes() {
        let outer = tempfile::tempdir().unwrap();
        let inner = outer.path().join("ws");
        fs::create_dir(&inner).unwrap();
        let secret = outer.path().join("secrets.txt");
        fs::write(&secret, "API_KEY=hunter2").unwrap();
        let workspace = Workspace::open(&inner).unwrap();

        let mut buf = SourceBuffer::new("keep");
        for path in [secret.as_path(), Path::new("../secrets.txt")] {
            assert!(matches!(
                workspace.import(&mut buf, path),
                Err(FileError::OutsideWorkspace { .. })
            ));
        }
        assert!(matches!(
            workspace.import(&mut buf, Path::new("../absent.py")),
            Err(FileError::OutsideWorkspace { .. })
        ));
        assert!(matches!(
            workspace.export(&buf, outer.path()),
            Err(FileError::OutsideWorkspace { .. })
        ));
        assert_eq!(buf.value(), "keep");
        assert!(!outer.path().join(DEFAULT_EXPORT_NAME).exists());
    }

    #[cfg(unix)]
    #[test]
    fn workspace_follows_symlinks_before_checking() {
        let outer = tempfile::tempdir().unwrap();
        let inner = outer.path().join("ws");
        fs::create_dir(&inner).unwrap();
        fs::write(outer.path().join("secrets.txt"), "x").unwrap();
        std::os::unix::fs::symlink(outer.path().join("secrets.txt"), inner.join("link.txt"))
            .unwrap();
        let workspace = Workspace::open(&inner).unwrap();

        let mut buf = SourceBuffer::default();
        assert!(matches!(
            workspace.import(&mut buf, Path::new("link.txt")),
            Err(FileError::OutsideWorkspace { .. })
        ));
    }

    #[test]
    fn workspace_missing_file_inside_root_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let workspace = Workspace::open(dir.path()).unwrap();
        let mut buf = SourceBuffer::default();
        assert!(matches!(
            workspace.import(&mut buf, Path::new("gone.py")),
            Err(FileError::Io { .. })
        ));
    }

    #[test]
    fn accepted_extensions() {
        assert!(is_accepted(Path::new("a.py")));
        assert!(is_accepted(Path::new("a.TXT")));
        assert!(!is_accepted(Path::new("a")));
        assert!(!is_accepted(Path::new("a.rs")));
    }
}
