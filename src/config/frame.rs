use crate::pipeline::PipelineParams;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Where the tools write their artefacts. Every entry is optional.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct FrameOutputConfig {
    /// Cycle report (`CycleOutput` as JSON).
    pub json_out: Option<PathBuf>,
    /// Ground-plane warp of the input frame.
    pub birdseye_image: Option<PathBuf>,
}

/// Configuration shared by `track_frame` and `birdseye`.
#[derive(Clone, Debug, Deserialize)]
pub struct FrameToolConfig {
    pub input: PathBuf,
    #[serde(default)]
    pub pipeline: PipelineParams,
    #[serde(default)]
    pub output: FrameOutputConfig,
}

pub fn load_config(path: &Path) -> Result<FrameToolConfig, String> {
    let contents = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    parse_config(&contents).map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
}

pub fn parse_config(json: &str) -> Result<FrameToolConfig, String> {
    serde_json::from_str(json).map_err(|e| e.to_string())
}
