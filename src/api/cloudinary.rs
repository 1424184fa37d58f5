use crate::api::traits::ImageUploader;
use crate::api::types::ImageFile;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info, warn};

/// Unsigned upload to a Cloudinary preset
pub struct CloudinaryUploader {
    client: Client,
    upload_url: String,
    upload_preset: String,
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    secure_url: Option<String>,
}

impl CloudinaryUploader {
    pub fn new(client: Client, cloud_name: &str, upload_preset: &str) -> Self {
        Self {
            client,
            upload_url: format!("https://api.cloudinary.com/v1_1/{}/image/upload", cloud_name),
            upload_preset: upload_preset.to_string(),
        }
    }

    pub fn upload_url(&self) -> &str {
        &self.upload_url
    }
}

#[async_trait]
impl ImageUploader for CloudinaryUploader {
    async fn upload(&self, file: &ImageFile) -> Result<String> {
        debug!("Uploading {} ({} bytes)", file.file_name, file.bytes.len());

        let part = Part::bytes(file.bytes.clone())
            .file_name(file.file_name.clone())
            .mime_str(&file.mime_type())
            .context("Invalid image MIME type")?;
        let form = Form::new()
            .part("file", part)
            .text("upload_preset", self.upload_preset.clone());

        let response = self
            .client
            .post(&self.upload_url)
            .multipart(form)
            .send()
            .await
            .with_context(|| format!("Failed to upload {}", file.file_name))?;

        if !response.status().is_success() {
            warn!("Image upload returned status: {}", response.status());
            anyhow::bail!("Failed to upload {}: {}", file.file_name, response.status());
        }

        let body: UploadResponse = response
            .json()
            .await
            .context("Failed to decode upload response")?;
        let url = body
            .secure_url
            .context("Upload response is missing secure_url")?;

        info!("Uploaded {} -> {}", file.file_name, url);
        Ok(url)
    }
}
