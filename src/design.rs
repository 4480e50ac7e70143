//! Design configuration model
//!
//! The parameters describing a desired home: style, room counts, lot size,
//! optional features and free-text notes. Every write goes through a setter
//! that clamps to the slider bounds and snaps to the slider step, so a
//! `DesignConfig` can never hold an out-of-range value.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const BEDROOMS_MIN: u8 = 1;
pub const BEDROOMS_MAX: u8 = 8;
pub const BATHROOMS_MIN: f32 = 1.0;
pub const BATHROOMS_MAX: f32 = 8.0;
pub const BATHROOMS_STEP: f32 = 0.5;
pub const LEVELS_MIN: u8 = 1;
pub const LEVELS_MAX: u8 = 4;
pub const LOT_SIZE_MIN: u32 = 100;
pub const LOT_SIZE_MAX: u32 = 2000;
pub const LOT_SIZE_STEP: u32 = 50;

/// The fixed catalog of optional features.
pub const AVAILABLE_FEATURES: &[&str] = &[
    "Swimming Pool",
    "Home Office",
    "Garage",
    "Basement",
    "Rooftop Terrace",
    "Garden",
    "Solar Panels",
    "Smart Home System",
    "Wine Cellar",
    "Home Gym",
    "Guest Suite",
    "Media Room",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HomeStyle {
    #[serde(rename = "Modern Minimalist")]
    Modern,
    #[serde(rename = "Traditional Family")]
    Traditional,
    #[serde(rename = "Luxury Villa")]
    Luxury,
    #[serde(rename = "Compact Urban")]
    Urban,
    #[serde(rename = "Eco-Friendly Sustainable")]
    Eco,
}

impl HomeStyle {
    pub const ALL: [HomeStyle; 5] = [
        HomeStyle::Modern,
        HomeStyle::Traditional,
        HomeStyle::Luxury,
        HomeStyle::Urban,
        HomeStyle::Eco,
    ];

    pub fn label(self) -> &'static str {
        match self {
            HomeStyle::Modern => "Modern Minimalist",
            HomeStyle::Traditional => "Traditional Family",
            HomeStyle::Luxury => "Luxury Villa",
            HomeStyle::Urban => "Compact Urban",
            HomeStyle::Eco => "Eco-Friendly Sustainable",
        }
    }

    pub fn slug(self) -> &'static str {
        match self {
            HomeStyle::Modern => "modern",
            HomeStyle::Traditional => "traditional",
            HomeStyle::Luxury => "luxury",
            HomeStyle::Urban => "urban",
            HomeStyle::Eco => "eco",
        }
    }

    pub fn template(self) -> &'static StyleTemplate {
        // HOME_STYLES is ordered like ALL
        let idx = Self::ALL.iter().position(|s| *s == self).unwrap_or(0);
        &HOME_STYLES[idx]
    }
}

impl fmt::Display for HomeStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for HomeStyle {
    type Err = String;

    /// Accepts the full label, the slug, or a 1-based gallery position.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        if let Ok(pos) = needle.parse::<usize>() {
            return pos
                .checked_sub(1)
                .and_then(|i| Self::ALL.get(i).copied())
                .ok_or_else(|| format!("No style at position {}", pos));
        }
        Self::ALL
            .iter()
            .copied()
            .find(|style| style.label().to_lowercase() == needle || style.slug() == needle)
            .ok_or_else(|| format!("Unknown style '{}'", s.trim()))
    }
}

/// An entry of the home style gallery.
#[derive(Debug, Clone, Copy)]
pub struct StyleTemplate {
    pub style: HomeStyle,
    pub description: &'static str,
    pub preview_image: &'static str,
}

pub static HOME_STYLES: [StyleTemplate; 5] = [
    StyleTemplate {
        style: HomeStyle::Modern,
        description: "Clean lines, open spaces, floor-to-ceiling windows.",
        preview_image: "https://images.unsplash.com/photo-1600607686527-6fb886090705?auto=format&fit=crop&w=400&q=80",
    },
    StyleTemplate {
        style: HomeStyle::Traditional,
        description: "Classic architecture, warm materials, welcoming atmosphere.",
        preview_image: "https://images.unsplash.com/photo-1568605114967-8130f3a36994?auto=format&fit=crop&w=400&q=80",
    },
    StyleTemplate {
        style: HomeStyle::Luxury,
        description: "Grand entrance, premium materials, elegant design.",
        preview_image: "https://images.unsplash.com/photo-1613490493576-7fde63acd811?auto=format&fit=crop&w=400&q=80",
    },
    StyleTemplate {
        style: HomeStyle::Urban,
        description: "Space-efficient, modern urban design, vertical living.",
        preview_image: "https://images.unsplash.com/photo-1486406146926-c627a92ad1ab?auto=format&fit=crop&w=400&q=80",
    },
    StyleTemplate {
        style: HomeStyle::Eco,
        description: "Green roof, solar panels, natural materials, passive design.",
        preview_image: "https://images.unsplash.com/photo-1510798831971-661eb04b3739?auto=format&fit=crop&w=400&q=80",
    },
];

/// Resolve a user-typed feature name to its catalog spelling.
pub fn catalog_feature(name: &str) -> Option<&'static str> {
    let needle = name.trim();
    AVAILABLE_FEATURES
        .iter()
        .copied()
        .find(|f| f.eq_ignore_ascii_case(needle))
}

/// The user's design parameters.
///
/// Fields are private; the setters are the only way to change them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DesignConfig {
    style: HomeStyle,
    bedrooms: u8,
    bathrooms: f32,
    levels: u8,
    lot_size: u32,
    features: Vec<String>,
    custom_instructions: String,
}

impl Default for DesignConfig {
    /// The studio's initial configuration.
    fn default() -> Self {
        Self {
            style: HomeStyle::Luxury,
            bedrooms: 4,
            bathrooms: 3.0,
            levels: 2,
            lot_size: 800,
            features: vec![
                "Garage".to_string(),
                "Garden".to_string(),
                "Swimming Pool".to_string(),
            ],
            custom_instructions: String::new(),
        }
    }
}

impl DesignConfig {
    /// The default configuration seeded with a template's style.
    pub fn from_template(style: HomeStyle) -> Self {
        Self {
            style,
            ..Self::default()
        }
    }

    pub fn style(&self) -> HomeStyle {
        self.style
    }
    pub fn bedrooms(&self) -> u8 {
        self.bedrooms
    }
    pub fn bathrooms(&self) -> f32 {
        self.bathrooms
    }
    pub fn levels(&self) -> u8 {
        self.levels
    }
    pub fn lot_size(&self) -> u32 {
        self.lot_size
    }
    pub fn features(&self) -> &[String] {
        &self.features
    }
    pub fn custom_instructions(&self) -> &str {
        &self.custom_instructions
    }

    /// True when the notes contain something other than whitespace.
    pub fn has_custom_instructions(&self) -> bool {
        !self.custom_instructions.trim().is_empty()
    }

    pub fn set_style(&mut self, style: HomeStyle) {
        self.style = style;
    }

    pub fn set_bedrooms(&mut self, value: i64) {
        self.bedrooms = value.clamp(BEDROOMS_MIN as i64, BEDROOMS_MAX as i64) as u8;
    }

    pub fn set_bathrooms(&mut self, value: f64) {
        let value = if value.is_finite() { value } else { BATHROOMS_MIN as f64 };
        let snapped = (value / BATHROOMS_STEP as f64).round() * BATHROOMS_STEP as f64;
        self.bathrooms = snapped.clamp(BATHROOMS_MIN as f64, BATHROOMS_MAX as f64) as f32;
    }

    pub fn set_levels(&mut self, value: i64) {
        self.levels = value.clamp(LEVELS_MIN as i64, LEVELS_MAX as i64) as u8;
    }

    pub fn set_lot_size(&mut self, value: i64) {
        let (min, max, step) = (
            LOT_SIZE_MIN as i64,
            LOT_SIZE_MAX as i64,
            LOT_SIZE_STEP as i64,
        );
        // Clamp before snapping so extreme inputs cannot overflow.
        let value = value.clamp(min, max);
        let snapped = (value + step / 2) / step * step;
        self.lot_size = snapped.clamp(min, max) as u32;
    }

    pub fn set_custom_instructions(&mut self, text: impl Into<String>) {
        self.custom_instructions = text.into();
    }

    /// Add a catalog feature if missing, remove it if present.
    ///
    /// Returns the new membership, or `None` when the name is not in the
    /// catalog.
    pub fn toggle_feature(&mut self, name: &str) -> Option<bool> {
        let feature = catalog_feature(name)?;
        if let Some(pos) = self.features.iter().position(|f| f == feature) {
            self.features.remove(pos);
            Some(false)
        } else {
            self.features.push(feature.to_string());
            Some(true)
        }
    }

    pub fn clear_features(&mut self) {
        self.features.clear();
    }

    pub fn has_feature(&self, name: &str) -> bool {
        self.features.iter().any(|f| f.eq_ignore_ascii_case(name.trim()))
    }
}
