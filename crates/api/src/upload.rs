//! Multipart upload collaborator.
//!
//! Walks a multipart request once, writing file parts into the configured
//! upload directory and collecting text parts by field name. Handlers only
//! ever see the resulting [`UploadForm`]: text values plus stored relative
//! references like `uploads/<name>`.

use std::collections::HashMap;
use std::path::Path;

use axum::extract::Multipart;
use vitrine_core::error::CoreError;
use vitrine_core::storage;

use crate::error::{AppError, AppResult};

/// Gallery-image cap per request, matching the storefront admin UI.
pub const MAX_IMAGES: usize = 15;

/// Field name carrying gallery image files.
const IMAGES_FIELD: &str = "images";

/// Field name carrying the single thumbnail file.
const THUMBNAIL_FIELD: &str = "thumbnail";

/// A fully collected multipart form.
#[derive(Debug, Default)]
pub struct UploadForm {
    texts: HashMap<String, Vec<String>>,
    /// Stored references for uploaded gallery images, in submission order.
    pub images: Vec<String>,
    /// Stored reference for the uploaded thumbnail, if one was sent.
    pub thumbnail: Option<String>,
}

impl UploadForm {
    /// First value of a text field, if present.
    pub fn text(&self, name: &str) -> Option<&str> {
        self.texts
            .get(name)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// All values of a repeated text field.
    pub fn all(&self, name: &str) -> &[String] {
        self.texts.get(name).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Drain a multipart request into an [`UploadForm`].
///
/// File parts named `images` (up to [`MAX_IMAGES`]) and `thumbnail` are
/// written to `upload_dir` under a unique sanitized name; file parts under
/// any other name are ignored. Everything else is collected as text.
///
/// A failure partway (malformed part, image cap) discards the files the
/// request had already stored, so a rejected upload leaves nothing behind.
pub async fn collect(multipart: Multipart, upload_dir: &Path) -> AppResult<UploadForm> {
    let mut form = UploadForm::default();
    match fill(&mut form, multipart, upload_dir).await {
        Ok(()) => Ok(form),
        Err(e) => {
            discard_stored_files(upload_dir, &form).await;
            Err(e)
        }
    }
}

async fn fill(
    form: &mut UploadForm,
    mut multipart: Multipart,
    upload_dir: &Path,
) -> AppResult<()> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let name = field.name().unwrap_or("").to_string();

        match (name.as_str(), field.file_name().map(str::to_string)) {
            (IMAGES_FIELD, Some(filename)) => {
                if form.images.len() >= MAX_IMAGES {
                    return Err(AppError::Core(CoreError::Validation(format!(
                        "At most {MAX_IMAGES} images per request"
                    ))));
                }
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                form.images.push(store_file(upload_dir, &filename, &data).await?);
            }
            (THUMBNAIL_FIELD, Some(filename)) => {
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                form.thumbnail = Some(store_file(upload_dir, &filename, &data).await?);
            }
            (_, Some(_)) => {} // file under an unknown field name: ignore
            (_, None) => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                form.texts.entry(name).or_default().push(text);
            }
        }
    }

    Ok(())
}

/// Best-effort removal of every file a form stored.
///
/// Used on error paths where the request will not be persisted, so the
/// stored files would otherwise be orphaned. Individual removal failures
/// are logged and swallowed; the caller's error is the one that matters.
pub async fn discard_stored_files(upload_dir: &Path, form: &UploadForm) {
    for reference in form.images.iter().chain(form.thumbnail.iter()) {
        if let Err(e) = remove_stored_file(upload_dir, reference).await {
            tracing::warn!(reference = %reference, error = %e, "Failed to discard stored upload");
        }
    }
}

/// Pass through `result`, discarding the form's stored files first when it
/// is an error. Lets handlers validate after [`collect`] without leaking
/// the files a rejected request uploaded.
pub async fn or_discard<T>(
    upload_dir: &Path,
    form: &UploadForm,
    result: AppResult<T>,
) -> AppResult<T> {
    if result.is_err() {
        discard_stored_files(upload_dir, form).await;
    }
    result
}

/// Write one uploaded file and return its stored reference.
async fn store_file(upload_dir: &Path, filename: &str, data: &[u8]) -> AppResult<String> {
    let stored_name = storage::stored_filename(filename);

    tokio::fs::create_dir_all(upload_dir)
        .await
        .map_err(|e| CoreError::Storage(format!("Creating upload dir: {e}")))?;
    tokio::fs::write(upload_dir.join(&stored_name), data)
        .await
        .map_err(|e| CoreError::Storage(format!("Writing '{stored_name}': {e}")))?;

    Ok(storage::stored_reference(&stored_name))
}

/// Best-effort removal of a stored file behind a reference.
///
/// A reference that does not resolve inside the upload dir, or whose file
/// is already gone, is a no-op. A failed deletion of a file that does
/// exist is surfaced as a storage error rather than silently ignored.
pub async fn remove_stored_file(upload_dir: &Path, reference: &str) -> AppResult<()> {
    let path = match storage::resolve_reference(upload_dir, reference) {
        Ok(path) => path,
        Err(_) => {
            tracing::warn!(reference, "Ignoring removal of unresolvable upload reference");
            return Ok(());
        }
    };

    match tokio::fs::remove_file(&path).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(AppError::Core(CoreError::Storage(format!(
            "Deleting '{reference}': {e}"
        )))),
    }
}
