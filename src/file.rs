//! File-system conveniences
//!
//! Path-string helpers (`get_file_name`, `get_file_extension`) work on the
//! text of the path and treat every platform separator as a boundary. The
//! rest touch the disk and release their handles before returning.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf, is_separator};

use crate::error::{Error, Result};

/// Append each line of `path` to `out`, line terminators stripped
pub fn read_file_to_list(path: impl AsRef<Path>, out: &mut Vec<String>) -> Result<()> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| Error::io(path, e))?;
    let before = out.len();
    for line in BufReader::new(file).lines() {
        out.push(line.map_err(|e| Error::io(path, e))?);
    }
    log::debug!("Read {} lines from {}", out.len() - before, path.display());
    Ok(())
}

/// Complete contents of an existing file
pub fn get_bytes(path: impl AsRef<Path>) -> Result<Vec<u8>> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(Error::NotFound(path.to_path_buf()));
    }
    std::fs::read(path).map_err(|e| Error::io_or_not_found(path, e))
}

/// All lines of `path` concatenated with no separator between them.
///
/// Line breaks are dropped: `"a\nb\n"` reads as `"ab"`.
pub fn get_file_content_as_string(path: impl AsRef<Path>) -> Result<String> {
    let mut lines = Vec::new();
    read_file_to_list(path, &mut lines)?;
    Ok(lines.concat())
}

/// Split a file name into its stem and extension at the last dot
fn split_name(name: &str) -> (&str, Option<&str>) {
    match name.rfind('.') {
        Some(i) => (&name[..i], Some(&name[i + 1..])),
        None => (name, None),
    }
}

/// Strip a trailing `" (N)"` copy suffix, returning the base and `N`
fn strip_copy_suffix(stem: &str) -> Option<(&str, u32)> {
    let inner = stem.strip_suffix(')')?;
    let open = inner.rfind(" (")?;
    let index = inner[open + 2..].parse().ok()?;
    Some((&inner[..open], index))
}

fn copy_name(base: &str, index: u32, ext: Option<&str>) -> String {
    match ext {
        Some(ext) => format!("{} ({}).{}", base, index, ext),
        None => format!("{} ({})", base, index),
    }
}

/// Absolute path next to `path` that does not exist yet.
///
/// `dir/photo.jpg` becomes `dir/photo (1).jpg`, then `(2)`, and so on until a
/// free name is found. A name that already carries a copy suffix is kept when
/// free, otherwise numbering restarts at `(2)` on the same base name. Not safe
/// against a concurrent writer claiming the name first.
pub fn generate_file_name(path: impl AsRef<Path>) -> Result<PathBuf> {
    let path = path.as_ref();
    let absolute = std::path::absolute(path).map_err(|e| Error::io(path, e))?;
    let name = absolute
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| {
            Error::InvalidArgument(format!("Path has no file name: {}", path.display()))
        })?;
    let dir = absolute.parent().map(Path::to_path_buf).unwrap_or_default();

    let (stem, ext) = split_name(&name);
    let (base, mut index) = match strip_copy_suffix(stem) {
        Some((base, _)) => {
            if !absolute.exists() {
                return Ok(absolute);
            }
            (base, 2)
        }
        None => (stem, 1),
    };

    loop {
        let candidate = dir.join(copy_name(base, index, ext));
        if !candidate.exists() {
            log::debug!("Generated file name {}", candidate.display());
            return Ok(candidate);
        }
        index = index.checked_add(1).ok_or_else(|| {
            Error::InvalidArgument(format!("No free copy number left for {}", path.display()))
        })?;
    }
}

/// Directory containing the running executable
pub fn get_executed_path() -> Option<PathBuf> {
    let exe = std::env::current_exe().ok()?;
    let location = exe.to_string_lossy();
    let cut = location.rfind(is_separator)?;
    let dir = PathBuf::from(&location[..cut]);
    std::path::absolute(&dir).ok().or(Some(dir))
}

/// [`get_file_extension`] without the leading dot
pub fn file_extension(path: &str) -> Option<String> {
    get_file_extension(path, false)
}

/// Text after the last dot of the file-name portion of `path`.
///
/// `None` when the name has no dot or ends with one.
pub fn get_file_extension(path: &str, include_dot: bool) -> Option<String> {
    let name = file_name(path)?;
    if name.ends_with('.') {
        return None;
    }
    let dot = name.rfind('.')?;
    let start = if include_dot { dot } else { dot + 1 };
    Some(name[start..].to_string())
}

/// Whether the extension of `path` matches any of `extensions`, ignoring ASCII case
pub fn compare_file_extensions<I, S>(path: &str, extensions: I) -> Result<bool>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut extensions = extensions.into_iter().peekable();
    if extensions.peek().is_none() {
        return Err(Error::InvalidArgument(
            "Provided extension set is empty".to_string(),
        ));
    }
    let ext = file_extension(path).ok_or_else(|| {
        Error::InvalidArgument(format!(
            "Provided file does not include an extension: {}",
            path
        ))
    })?;
    Ok(extensions.any(|candidate| candidate.as_ref().eq_ignore_ascii_case(&ext)))
}

/// [`get_file_name`] in verify mode
pub fn file_name(path: &str) -> Option<String> {
    get_file_name(path, true)
}

/// Name portion of `path`.
///
/// In verify mode this is the text after the last separator (or the whole
/// path). Otherwise the disk is consulted and an existing directory yields
/// `None`. Either way a path ending in a separator has no name.
pub fn get_file_name(path: &str, verify_file: bool) -> Option<String> {
    if path.ends_with(is_separator) {
        return None;
    }
    if verify_file {
        let name = match path.rfind(is_separator) {
            Some(i) => &path[i + 1..],
            None => path,
        };
        Some(name.to_string())
    } else {
        let p = Path::new(path);
        if p.is_dir() {
            return None;
        }
        p.file_name().map(|n| n.to_string_lossy().into_owned())
    }
}

/// Directory for `path`: itself if it is a directory, else its parent, else
/// the executing directory, else `.`
pub fn get_directory(path: impl AsRef<Path>) -> PathBuf {
    let path = path.as_ref();
    if path.is_dir() {
        return path.to_path_buf();
    }
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => get_executed_path().unwrap_or_else(|| PathBuf::from(".")),
    }
}
