use crate::api::{ImageFile, ImageUploader};
use anyhow::{Context, Result};
use tracing::warn;

/// Upload `files` one after the other, returning their URLs in the same
/// order.
///
/// The first failure aborts the batch. URLs already handed out by the host
/// are dropped, not deleted.
pub async fn upload_all(uploader: &dyn ImageUploader, files: &[ImageFile]) -> Result<Vec<String>> {
    let mut urls = Vec::with_capacity(files.len());

    for file in files {
        match uploader.upload(file).await {
            Ok(url) => urls.push(url),
            Err(err) => {
                if !urls.is_empty() {
                    warn!("Abandoning {} uploaded image(s) after a failed upload", urls.len());
                }
                return Err(err).with_context(|| format!("Image upload failed for {}", file.file_name));
            }
        }
    }

    Ok(urls)
}
