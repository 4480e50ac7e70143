//! Saving renderings to disk.

use anyhow::{bail, Context, Result};
use reqwest::Client;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;
use tracing::info;

use crate::config::Config;
use crate::errors::ApiError;
use crate::library::GeneratedDesign;
use crate::observability::telemetry::sanitize_for_log;
use crate::orchestrator::Workspace;

/// Pause between the two files of a "both" download so their timestamps
/// differ.
pub const BOTH_DOWNLOAD_GAP: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    Blueprint,
    Exterior,
}

impl ArtifactKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ArtifactKind::Blueprint => "blueprint",
            ArtifactKind::Exterior => "exterior",
        }
    }
}

/// What the user asked to download.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadTarget {
    Blueprint,
    Exterior,
    Both,
}

impl FromStr for DownloadTarget {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "blueprint" | "bp" => Ok(DownloadTarget::Blueprint),
            "exterior" | "ext" => Ok(DownloadTarget::Exterior),
            "both" | "all" => Ok(DownloadTarget::Both),
            other => Err(format!("Unknown download target '{}'", other)),
        }
    }
}

/// `<product>-<kind>-<timestamp_ms>.png`
pub fn artifact_file_name(product: &str, kind: ArtifactKind, timestamp_ms: i64) -> String {
    format!("{}-{}-{}.png", product, kind.as_str(), timestamp_ms)
}

pub struct Downloader {
    client: Client,
    dir: PathBuf,
    product: String,
}

impl Downloader {
    pub fn new(config: &Config) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.image_search.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            dir: config.studio.download_dir.clone(),
            product: config.studio.product_name.clone(),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Fetch one image reference and write it under the download directory.
    pub async fn download_image(&self, kind: ArtifactKind, image: &str) -> Result<PathBuf> {
        let response = self
            .client
            .get(image)
            .send()
            .await
            .map_err(ApiError::from)
            .with_context(|| format!("Failed to fetch {} image", kind.as_str()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::HttpStatus {
                status: status.as_u16(),
                message: format!("downloading {}", sanitize_for_log(image)),
            }
            .into());
        }
        let bytes = response.bytes().await.map_err(ApiError::from)?;

        tokio::fs::create_dir_all(&self.dir)
            .await
            .with_context(|| format!("Failed to create {}", self.dir.display()))?;
        let name = artifact_file_name(
            &self.product,
            kind,
            chrono::Utc::now().timestamp_millis(),
        );
        let path = self.dir.join(name);
        tokio::fs::write(&path, &bytes)
            .await
            .with_context(|| format!("Failed to write {}", path.display()))?;

        info!(path = %path.display(), bytes = bytes.len(), "Saved rendering");
        Ok(path)
    }

    /// Download the workspace's images for `target`. For `Both`, the
    /// blueprint is saved first.
    pub async fn download_workspace(
        &self,
        workspace: &Workspace,
        target: DownloadTarget,
    ) -> Result<Vec<PathBuf>> {
        self.download_pair(workspace.blueprint(), workspace.exterior(), target)
            .await
    }

    /// Download the images of a saved library design.
    pub async fn download_design(
        &self,
        design: &GeneratedDesign,
        target: DownloadTarget,
    ) -> Result<Vec<PathBuf>> {
        self.download_pair(
            design.blueprint_url.as_deref(),
            design.exterior_url.as_deref(),
            target,
        )
        .await
    }

    async fn download_pair(
        &self,
        blueprint: Option<&str>,
        exterior: Option<&str>,
        target: DownloadTarget,
    ) -> Result<Vec<PathBuf>> {
        let wanted: &[ArtifactKind] = match target {
            DownloadTarget::Blueprint => &[ArtifactKind::Blueprint],
            DownloadTarget::Exterior => &[ArtifactKind::Exterior],
            DownloadTarget::Both => &[ArtifactKind::Blueprint, ArtifactKind::Exterior],
        };

        let available: Vec<(ArtifactKind, &str)> = wanted
            .iter()
            .filter_map(|&kind| {
                let image = match kind {
                    ArtifactKind::Blueprint => blueprint,
                    ArtifactKind::Exterior => exterior,
                };
                image.map(|img| (kind, img))
            })
            .collect();
        if available.is_empty() {
            bail!("Nothing to download: generate the image first");
        }

        let mut saved = Vec::with_capacity(available.len());
        for (i, (kind, image)) in available.into_iter().enumerate() {
            if i > 0 {
                tokio::time::sleep(BOTH_DOWNLOAD_GAP).await;
            }
            saved.push(self.download_image(kind, image).await?);
        }
        Ok(saved)
    }
}
