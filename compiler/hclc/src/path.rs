//! Path policy: registry keys, output names and base directories.
//!
//! All three functions are lexical. None of them touch the filesystem, so a
//! path that does not exist yet normalizes the same way as one that does.

use std::fmt;
use std::path::{Component, Path, PathBuf};

use crate::config::CompilerConfig;
use crate::error::CompileError;

/// A lexically normalized path, used as the compiled-file registry key.
///
/// Two spellings of the same file (`./src/../a.hcl`, `a.hcl`) produce equal
/// `CanonicalPath`s.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct CanonicalPath(PathBuf);

impl CanonicalPath {
    pub fn as_path(&self) -> &Path {
        &self.0
    }

    pub fn into_path_buf(self) -> PathBuf {
        self.0
    }
}

impl AsRef<Path> for CanonicalPath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl fmt::Display for CanonicalPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.display().fmt(f)
    }
}

/// Normalize a path by resolving `.` and `..` components.
///
/// - `.` is dropped and repeated separators collapse.
/// - `..` removes the preceding normal component. With nothing to remove it
///   is kept in a relative path and dropped directly under the root.
/// - An empty result is `.`.
///
/// Never fails: any input normalizes to something.
pub fn normalize(path: impl AsRef<Path>) -> CanonicalPath {
    let mut result = PathBuf::new();
    // Normal components currently in `result` that a `..` may pop.
    let mut poppable = 0usize;

    for component in path.as_ref().components() {
        match component {
            Component::Prefix(_) | Component::RootDir => result.push(component),
            Component::CurDir => {}
            Component::ParentDir => {
                if poppable > 0 {
                    result.pop();
                    poppable -= 1;
                } else if !result.has_root() {
                    result.push(component);
                }
            }
            Component::Normal(segment) => {
                result.push(segment);
                poppable += 1;
            }
        }
    }

    if result.as_os_str().is_empty() {
        result.push(".");
    }
    CanonicalPath(result)
}

/// Derive the output file for `source` by swapping the source extension for
/// the target extension: `lib/module.hcl` → `lib/module.js`.
///
/// `source` must end in `.<source_extension>`; anything else is
/// [`CompileError::InvalidExtension`].
pub fn output_path(source: &Path, config: &CompilerConfig) -> Result<PathBuf, CompileError> {
    let suffix = format!(".{}", config.source_extension);
    let stem = source
        .file_name()
        .and_then(|name| name.to_str())
        .and_then(|name| name.strip_suffix(&suffix));

    match stem {
        Some(stem) => Ok(source.with_file_name(format!("{stem}.{}", config.target_extension))),
        None => Err(CompileError::InvalidExtension {
            path: source.to_path_buf(),
            expected: config.source_extension.clone(),
        }),
    }
}

/// Directory that relative imports in `source` are resolved against.
///
/// A bare file name (`a.hcl`) lives in `.`.
pub fn base_directory(source: &Path) -> PathBuf {
    match source.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

#[cfg(test)]
mod tests;
