use std::ffi::OsString;
use std::path::{Component, Path, PathBuf};

/// Resolve `.` and `..` components lexically, without touching the filesystem.
///
/// `..` never climbs above the root of an absolute path; on a relative path
/// it is kept when there is nothing left to pop.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                Some(Component::ParentDir) | Some(Component::CurDir) | None => {
                    out.push("..");
                }
            },
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Join a relative import specifier onto the importing file's directory.
pub fn join_specifier(importer: &Path, specifier: &str) -> PathBuf {
    let dir = importer.parent().unwrap_or_else(|| Path::new(""));
    normalize(&dir.join(specifier))
}

/// Path of `target` inside `root`, `/`-separated.
///
/// `None` when the target escapes the root, is unrelated to it, or is the
/// root itself. Both paths are expected to be normalized.
pub fn relative_to(root: &Path, target: &Path) -> Option<String> {
    let rest = target.strip_prefix(root).ok()?;
    let parts: Vec<String> = rest
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    if parts.is_empty() {
        return None;
    }
    Some(parts.join("/"))
}

/// Find the file an import target refers to: the path itself, the path with
/// each extension appended, then `index.<ext>` inside it when it is a directory.
pub fn resolve_module_file(target: &Path, extensions: &[String]) -> Option<PathBuf> {
    if target.is_file() {
        return Some(target.to_path_buf());
    }
    for ext in extensions {
        let mut candidate: OsString = target.as_os_str().to_owned();
        candidate.push(".");
        candidate.push(ext);
        let candidate = PathBuf::from(candidate);
        if candidate.is_file() {
            return Some(candidate);
        }
    }
    if target.is_dir() {
        for ext in extensions {
            let candidate = target.join(format!("index.{ext}"));
            if candidate.is_file() {
                return Some(candidate);
            }
        }
    }
    None
}
