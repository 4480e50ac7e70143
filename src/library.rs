//! Design library
//!
//! In-memory, newest-first collection of saved generation results. Each
//! entry carries five mock quality scores drawn at save time; they exist for
//! the comparison matrix and mean nothing about the images.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::api::types::ImageRef;
use crate::design::DesignConfig;
use crate::errors::StudioError;
use crate::random::SharedRandom;

pub const SCORE_MIN: u8 = 7;
pub const SCORE_MAX: u8 = 10;
/// Designs averaging strictly more than this are flagged as recommended.
pub const RECOMMENDED_ABOVE: f64 = 9.0;

/// Score slot names, in storage order.
pub const METRICS: [&str; 5] = [
    "Architectural Detail",
    "Lighting Quality",
    "Material Rendering",
    "Composition",
    "Realism Score",
];

/// A saved snapshot of a workspace. Immutable once saved.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeneratedDesign {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub config: DesignConfig,
    pub blueprint_url: Option<ImageRef>,
    pub exterior_url: Option<ImageRef>,
    pub scores: [u8; 5],
    pub generation_time: Option<f64>,
}

impl GeneratedDesign {
    /// First eight characters of the id, enough to address it in the shell.
    pub fn short_id(&self) -> &str {
        self.id.get(..8).unwrap_or(&self.id)
    }

    pub fn average_score(&self) -> f64 {
        average(&self.scores)
    }

    pub fn is_recommended(&self) -> bool {
        self.average_score() > RECOMMENDED_ABOVE
    }
}

pub fn average(scores: &[u8]) -> f64 {
    if scores.is_empty() {
        return 0.0;
    }
    scores.iter().map(|&s| s as f64).sum::<f64>() / scores.len() as f64
}

pub fn format_average(scores: &[u8]) -> String {
    format!("{:.1}", average(scores))
}

/// One row of the comparison matrix.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompareRow {
    pub metric: String,
    /// One cell per design, in library order
    pub cells: Vec<String>,
}

/// Header of one comparison column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompareColumn {
    /// `#N`, where the oldest design is `#1`
    pub label: String,
    pub short_id: String,
    /// Style slug, short enough for a column
    pub style: String,
    pub date: String,
    pub recommended: bool,
}

pub struct Library {
    designs: Vec<GeneratedDesign>,
    rng: SharedRandom,
}

impl Library {
    pub fn new(rng: SharedRandom) -> Self {
        Self {
            designs: Vec::new(),
            rng,
        }
    }

    /// Snapshot a result into the library, newest first.
    pub fn save(
        &mut self,
        config: DesignConfig,
        blueprint_url: Option<ImageRef>,
        exterior_url: Option<ImageRef>,
        generation_time: Option<f64>,
    ) -> &GeneratedDesign {
        let mut scores = [0u8; 5];
        for score in scores.iter_mut() {
            *score = self.rng.between(SCORE_MIN as u32, SCORE_MAX as u32) as u8;
        }

        let design = GeneratedDesign {
            id: Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            config,
            blueprint_url,
            exterior_url,
            scores,
            generation_time,
        };
        info!(id = %design.id, "Saved design to library");
        self.designs.insert(0, design);
        &self.designs[0]
    }

    /// Remove a design by exact id. Returns false if nothing matched.
    pub fn delete(&mut self, id: &str) -> bool {
        let before = self.designs.len();
        self.designs.retain(|d| d.id != id);
        let removed = self.designs.len() != before;
        if removed {
            info!(id, "Deleted design from library");
        }
        removed
    }

    pub fn get(&self, id: &str) -> Option<&GeneratedDesign> {
        self.designs.iter().find(|d| d.id == id)
    }

    /// Resolve an exact id or a unique id prefix.
    pub fn resolve(&self, needle: &str) -> Result<&GeneratedDesign, StudioError> {
        let needle = needle.trim();
        if let Some(design) = self.get(needle) {
            return Ok(design);
        }
        if needle.is_empty() {
            return Err(StudioError::DesignNotFound(String::new()));
        }

        let mut matches = self.designs.iter().filter(|d| d.id.starts_with(needle));
        match (matches.next(), matches.count()) {
            (Some(design), 0) => Ok(design),
            (Some(_), rest) => Err(StudioError::AmbiguousId {
                prefix: needle.to_string(),
                count: rest + 1,
            }),
            (None, _) => Err(StudioError::DesignNotFound(needle.to_string())),
        }
    }

    pub fn len(&self) -> usize {
        self.designs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.designs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &GeneratedDesign> {
        self.designs.iter()
    }

    pub fn designs(&self) -> &[GeneratedDesign] {
        &self.designs
    }

    /// Column headers for the comparison matrix, in library order.
    pub fn compare_columns(&self) -> Vec<CompareColumn> {
        let total = self.designs.len();
        self.designs
            .iter()
            .enumerate()
            .map(|(i, d)| CompareColumn {
                label: format!("#{}", total - i),
                short_id: d.short_id().to_string(),
                style: d.config.style().slug().to_string(),
                date: d.timestamp.format("%Y-%m-%d").to_string(),
                recommended: d.is_recommended(),
            })
            .collect()
    }

    /// Metric-by-design score table with a trailing average row.
    pub fn compare_matrix(&self) -> Vec<CompareRow> {
        let mut rows: Vec<CompareRow> = METRICS
            .iter()
            .enumerate()
            .map(|(i, metric)| CompareRow {
                metric: metric.to_string(),
                cells: self
                    .designs
                    .iter()
                    .map(|d| format!("{}/10", d.scores[i]))
                    .collect(),
            })
            .collect();
        rows.push(CompareRow {
            metric: "Average".to_string(),
            cells: self
                .designs
                .iter()
                .map(|d| format_average(&d.scores))
                .collect(),
        });
        rows
    }
}
