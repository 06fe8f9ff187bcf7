//! Output file name resolution.
//!
//! Turns the raw file name field of a row into the name actually written to
//! the destination directory: the name is decoded with the configured
//! [`Charset`] and, when a file of that name already exists, disambiguated
//! with a millisecond timestamp so that an existing file is never reused.
//!
//! Names stay bytes until they become a path. Without a legacy charset the
//! field is written to disk exactly as it appears in the input table, valid
//! UTF-8 or not.
//!
//! ```rust
//! use rowfetch::charset::Charset;
//! use rowfetch::naming::{disambiguate, resolve_file_name};
//!
//! let name = resolve_file_name(b"a.jpg", Charset::Identity, |_| false).unwrap();
//! assert_eq!(name, b"a.jpg");
//!
//! assert_eq!(disambiguate(b"a.jpg", 1700000000000), b"a_1700000000000.jpg");
//! ```

use crate::charset::{Charset, DecodeError};

use std::ffi::OsStr;
use std::path::{Component, Path, PathBuf};
use tracing::debug;

/// Resolve the final file name for a raw file name field.
///
/// `exists` reports whether a name is already taken in the destination
/// directory. The disambiguated name is not checked again: two collisions
/// within the same millisecond would produce the same name.
pub fn resolve_file_name<F>(raw: &[u8], charset: Charset, exists: F) -> Result<Vec<u8>, DecodeError>
where
    F: Fn(&[u8]) -> bool,
{
    let decoded = charset.decode(raw)?;
    if exists(&decoded) {
        let renamed = disambiguate(&decoded, now_millis());
        debug!(
            "{} already exists, writing to {} instead",
            String::from_utf8_lossy(&decoded),
            String::from_utf8_lossy(&renamed)
        );
        return Ok(renamed);
    }
    Ok(decoded)
}

/// Insert `_<millis>` between the base name and the extension.
pub fn disambiguate(name: &[u8], millis: i64) -> Vec<u8> {
    let (base, ext) = split_extension(name);
    let mut renamed = Vec::with_capacity(name.len() + 16);
    renamed.extend_from_slice(base);
    renamed.push(b'_');
    renamed.extend_from_slice(millis.to_string().as_bytes());
    renamed.extend_from_slice(ext);
    renamed
}

/// Split a name into its base and its extension.
///
/// The extension starts at the last `.` of the final `/`-separated
/// component and includes it; it is empty when there is no such dot.
pub fn split_extension(name: &[u8]) -> (&[u8], &[u8]) {
    let component_start = name.iter().rposition(|b| *b == b'/').map_or(0, |i| i + 1);
    match name[component_start..].iter().rposition(|b| *b == b'.') {
        Some(dot) => name.split_at(component_start + dot),
        None => (name, &name[name.len()..]),
    }
}

/// Path of `name` inside `directory`.
///
/// Returns `None` when the name is empty, would land outside the directory
/// (absolute path, root or `..` components), or cannot be a file name on
/// this platform.
pub fn destination_path(directory: &Path, name: &[u8]) -> Option<PathBuf> {
    let relative = Path::new(os_str(name)?);
    let mut components = relative.components().peekable();
    components.peek()?;
    if components.any(|c| !matches!(c, Component::Normal(_) | Component::CurDir)) {
        return None;
    }
    Some(directory.join(relative))
}

#[cfg(unix)]
fn os_str(name: &[u8]) -> Option<&OsStr> {
    use std::os::unix::ffi::OsStrExt;
    Some(OsStr::from_bytes(name))
}

// Elsewhere file names must be Unicode.
#[cfg(not(unix))]
fn os_str(name: &[u8]) -> Option<&OsStr> {
    std::str::from_utf8(name).ok().map(OsStr::new)
}

fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
