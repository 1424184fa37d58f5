use anyhow::{Context, Result};
use std::env;
use std::time::Duration;

const DEFAULT_API_URL: &str = "http://localhost:3000";
const DEFAULT_CLOUD_NAME: &str = "dodacbzhu";
const DEFAULT_UPLOAD_PRESET: &str = "homy_project";

/// Endpoints and transport settings.
///
/// Listings default to `/properties`; backends that expose them as `/houses`
/// set `HOMY_HOUSES_RESOURCE=houses`.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub api_url: String,
    pub houses_resource: String,
    pub reservations_resource: String,
    pub cloudinary_cloud_name: String,
    pub cloudinary_upload_preset: String,
    /// `None` leaves the transport default in place
    pub http_timeout: Option<Duration>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            houses_resource: "properties".to_string(),
            reservations_resource: "reservations".to_string(),
            cloudinary_cloud_name: DEFAULT_CLOUD_NAME.to_string(),
            cloudinary_upload_preset: DEFAULT_UPLOAD_PRESET.to_string(),
            http_timeout: None,
        }
    }
}

impl AppConfig {
    /// Read `.env` if there is one, then the process environment
    pub fn load() -> Result<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; unset or blank keys keep their default
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let http_timeout = match get("HOMY_HTTP_TIMEOUT_SECS") {
            Some(raw) => {
                let secs: u64 = raw
                    .trim()
                    .parse()
                    .with_context(|| format!("HOMY_HTTP_TIMEOUT_SECS is not a number of seconds: {}", raw))?;
                Some(Duration::from_secs(secs))
            }
            None => None,
        };

        Ok(Self {
            api_url: get("HOMY_API_URL").unwrap_or(defaults.api_url),
            houses_resource: get("HOMY_HOUSES_RESOURCE").unwrap_or(defaults.houses_resource),
            reservations_resource: get("HOMY_RESERVATIONS_RESOURCE")
                .unwrap_or(defaults.reservations_resource),
            cloudinary_cloud_name: get("CLOUDINARY_CLOUD_NAME").unwrap_or(defaults.cloudinary_cloud_name),
            cloudinary_upload_preset: get("CLOUDINARY_UPLOAD_PRESET")
                .unwrap_or(defaults.cloudinary_upload_preset),
            http_timeout,
        })
    }
}
