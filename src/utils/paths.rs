//! Path resolution helpers.

use std::env;
use std::path::{Component, Path, PathBuf};

/// Resolve a user-supplied path to an absolute one.
///
/// `~` expands to the home directory and relative paths are joined to `cwd`.
/// Existing paths are canonicalized; missing ones are normalized lexically so
/// two spellings of the same location still compare equal.
pub fn resolve_path(path: &Path, cwd: &Path) -> PathBuf {
    let expanded = expand_home(path);
    let absolute = if expanded.is_absolute() { expanded } else { cwd.join(expanded) };

    match absolute.canonicalize() {
        Ok(canonical) => canonical,
        Err(_) => canonicalize_parent(&normalize_path(&absolute)),
    }
}

/// Lexically remove `.` and `..` components.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push(component);
                }
            }
            other => out.push(other),
        }
    }
    out
}

// A file that does not exist yet may still sit under a symlinked directory.
fn canonicalize_parent(path: &Path) -> PathBuf {
    match (path.parent(), path.file_name()) {
        (Some(parent), Some(name)) => match parent.canonicalize() {
            Ok(dir) => dir.join(name),
            Err(_) => path.to_path_buf(),
        },
        _ => path.to_path_buf(),
    }
}

fn expand_home(path: &Path) -> PathBuf {
    let Ok(rest) = path.strip_prefix("~") else {
        return path.to_path_buf();
    };
    match env::var_os("HOME").or_else(|| env::var_os("USERPROFILE")) {
        Some(home) => PathBuf::from(home).join(rest),
        None => path.to_path_buf(),
    }
}
