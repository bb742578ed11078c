use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::Context;

use crate::foundation::error::{CanvasError, CanvasResult};

/// Recording knobs. Every field has a default, so `{}` is a valid config.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CanvasConfig {
    /// Draw blurred fill rects, rounded rects and circles as a single analytic shadow.
    pub blurred_rrect_fast_path: bool,
    /// Clip to the bounds passed to `save_layer` when no backdrop filter is requested.
    pub clip_layer_bounds: bool,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            blurred_rrect_fast_path: true,
            clip_layer_bounds: true,
        }
    }
}

impl CanvasConfig {
    pub fn from_reader<R: std::io::Read>(r: R) -> CanvasResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| CanvasError::serde(format!("parse canvas config: {e}")))
    }

    pub fn from_json_str(s: &str) -> CanvasResult<Self> {
        serde_json::from_str(s)
            .map_err(|e| CanvasError::serde(format!("parse canvas config: {e}")))
    }

    pub fn from_path(path: impl AsRef<Path>) -> CanvasResult<Self> {
        let path = path.as_ref();
        let f =
            File::open(path).with_context(|| format!("open canvas config '{}'", path.display()))?;
        Self::from_reader(BufReader::new(f))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/recording/config.rs"]
mod tests;
