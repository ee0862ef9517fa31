//! Per-element Configuration
//!
//! Parses the stringly-typed key/value state a page author attaches to a
//! managed image: `urltemplate`, `action`, `aspectratio`.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::host::ImageHost;
use crate::ElementId;

/// Configuration error for one element.
///
/// Aborts that element's processing for the current sweep only; other
/// elements in the sweep are unaffected.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing urltemplate")]
    MissingUrlTemplate,

    #[error("Missing action")]
    MissingAction,

    #[error("Unknown action: {0}")]
    UnknownAction(String),

    #[error("Invalid aspectratio: {0}")]
    InvalidAspectRatio(String),
}

/// Server-side operation requested through the URL template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    /// Uniform thumbnail; the service derives the height itself.
    Thumbnail,
    /// Free resize to an exact width/height.
    Resize,
    /// Resize onto a matte background, which may exceed the source size.
    Matte,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Thumbnail => "thumbnail",
            Action::Resize => "resize",
            Action::Matte => "matte",
        }
    }
}

impl FromStr for Action {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "thumbnail" => Ok(Action::Thumbnail),
            "resize" => Ok(Action::Resize),
            "matte" => Ok(Action::Matte),
            other => Err(ConfigError::UnknownAction(other.to_string())),
        }
    }
}

/// Locked width:height ratio, e.g. `"16:9"`.
///
/// When present, the requested ratio never follows the element's rendered
/// box, and undersized sources may be requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AspectRatio {
    pub w: u32,
    pub h: u32,
}

impl AspectRatio {
    pub fn ratio(&self) -> f64 {
        self.w as f64 / self.h as f64
    }
}

impl FromStr for AspectRatio {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ConfigError::InvalidAspectRatio(s.to_string());
        let (w, h) = s.split_once(':').ok_or_else(invalid)?;
        let w: u32 = w.trim().parse().map_err(|_| invalid())?;
        let h: u32 = h.trim().parse().map_err(|_| invalid())?;
        if w == 0 || h == 0 {
            return Err(invalid());
        }
        Ok(AspectRatio { w, h })
    }
}

/// Parsed configuration of one managed image.
#[derive(Debug, Clone)]
pub struct ImageConfig {
    pub url_template: String,
    pub action: Action,
    pub aspect_ratio: Option<AspectRatio>,
}

impl ImageConfig {
    /// Read and parse an element's configuration from the host.
    pub fn read(host: &dyn ImageHost, id: ElementId) -> Result<Self, ConfigError> {
        let url_template = host
            .config_value(id, "urltemplate")
            .ok_or(ConfigError::MissingUrlTemplate)?;
        let action = host
            .config_value(id, "action")
            .ok_or(ConfigError::MissingAction)?
            .parse()?;
        let aspect_ratio = host
            .config_value(id, "aspectratio")
            .map(|s| s.parse())
            .transpose()?;

        Ok(ImageConfig {
            url_template,
            action,
            aspect_ratio,
        })
    }

    /// True when this element may request more pixels than the source has.
    pub fn allow_undersized(&self) -> bool {
        self.aspect_ratio.is_some() || self.action == Action::Matte
    }
}
