//! Upload naming and path-safety helpers.
//!
//! Uploaded files live flat inside one configured directory and are
//! referenced from entity records by a relative `uploads/<name>` path.
//! Everything that turns a client-supplied name or stored reference into a
//! filesystem path goes through this module so no request can escape the
//! upload directory.

use std::path::{Path, PathBuf};

use crate::error::CoreError;

/// Prefix under which stored files are referenced and served.
pub const UPLOADS_PREFIX: &str = "uploads";

/// Reduce a client-supplied filename to a safe single path component.
///
/// Strips any directory parts, then keeps only alphanumerics, `.`, `-`
/// and `_`. Falls back to `"file"` when nothing survives.
pub fn sanitize_filename(original: &str) -> String {
    let base = original
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(original);

    let cleaned: String = base
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'))
        .collect();

    if cleaned.trim_matches('.').is_empty() {
        "file".to_string()
    } else {
        cleaned
    }
}

/// Build the name a new upload is stored under.
///
/// A random UUID prefix keeps concurrent uploads of the same filename from
/// overwriting each other.
pub fn stored_filename(original: &str) -> String {
    format!("{}-{}", uuid::Uuid::new_v4(), sanitize_filename(original))
}

/// The relative reference recorded in entity records for a stored file.
pub fn stored_reference(filename: &str) -> String {
    format!("{UPLOADS_PREFIX}/{filename}")
}

/// Resolve a stored `uploads/<name>` reference back to a path inside
/// `upload_dir`.
///
/// Rejects references that lack the prefix, are absolute, or contain parent
/// components, so a crafted `deleted_images` entry cannot reach outside the
/// upload directory.
pub fn resolve_reference(upload_dir: &Path, reference: &str) -> Result<PathBuf, CoreError> {
    let name = reference
        .strip_prefix(&format!("{UPLOADS_PREFIX}/"))
        .ok_or_else(|| {
            CoreError::Validation(format!("Invalid upload reference '{reference}'"))
        })?;

    let relative = Path::new(name);
    let escapes = relative.components().any(|c| {
        !matches!(
            c,
            std::path::Component::Normal(_) | std::path::Component::CurDir
        )
    });
    if name.is_empty() || escapes {
        return Err(CoreError::Validation(format!(
            "Invalid upload reference '{reference}'"
        )));
    }

    Ok(upload_dir.join(relative))
}
