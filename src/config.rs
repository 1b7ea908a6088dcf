use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::parse::is_valid_joint_name;

/// Settings for one conversion run. Every field has a default, so a TOML file
/// only needs the keys it wants to change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub target_fps: u32,
    pub extract: ExtractConfig,
    pub output: OutputConfig,
}

/// Track extraction settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractConfig {
    /// Name of the directory that holds the per-frame camera records.
    pub playback_directory: String,
    /// Source frame time used when the playback directory reports zero frames.
    pub fallback_frame_time: f64,
}

/// Output file settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Appended to the input file stem to build the output file name.
    pub suffix: String,
    /// Name of the BVH root joint.
    pub root_name: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            target_fps: 30,
            extract: ExtractConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            playback_directory: "Playback".to_string(),
            fallback_frame_time: 1.0 / 60.0,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            suffix: "_camera.bvh".to_string(),
            root_name: "MdtCam".to_string(),
        }
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::IoError)?;
        Self::load_from_str(&content)
    }

    pub fn load_from_str(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content).map_err(ConfigError::ParseError)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.target_fps == 0 {
            return Err(ConfigError::ValidationError(
                "Target fps must be positive".to_string(),
            ));
        }
        let fallback = self.extract.fallback_frame_time;
        if !fallback.is_finite() || fallback <= 0.0 {
            return Err(ConfigError::ValidationError(
                "Fallback frame time must be a positive number".to_string(),
            ));
        }
        if self.extract.playback_directory.is_empty() {
            return Err(ConfigError::ValidationError(
                "Playback directory name must not be empty".to_string(),
            ));
        }
        if self.output.suffix.is_empty() {
            return Err(ConfigError::ValidationError(
                "Output suffix must not be empty".to_string(),
            ));
        }
        let root = &self.output.root_name;
        if !is_valid_joint_name(root) {
            return Err(ConfigError::ValidationError(format!(
                "Invalid root joint name '{}'",
                root
            )));
        }
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(std::io::Error),

    #[error("Parse error: {0}")]
    ParseError(toml::de::Error),

    #[error("Validation error: {0}")]
    ValidationError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_command_line_defaults() {
        let config = Config::default();
        assert_eq!(config.target_fps, 30);
        assert_eq!(config.extract.playback_directory, "Playback");
        assert_eq!(config.extract.fallback_frame_time, 1.0 / 60.0);
        assert_eq!(config.output.suffix, "_camera.bvh");
        assert_eq!(config.output.root_name, "MdtCam");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = Config::load_from_str("target_fps = 24\n[output]\nroot_name = \"Cam\"\n")
            .unwrap();
        assert_eq!(config.target_fps, 24);
        assert_eq!(config.output.root_name, "Cam");
        assert_eq!(config.output.suffix, "_camera.bvh");
        assert_eq!(config.extract, ExtractConfig::default());
    }

    #[test]
    fn empty_toml_is_default() {
        assert_eq!(Config::load_from_str("").unwrap(), Config::default());
    }

    #[test]
    fn rejects_zero_fps() {
        let err = Config::load_from_str("target_fps = 0").unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn rejects_bad_fallback_frame_time() {
        let err = Config::load_from_str("[extract]\nfallback_frame_time = -1.0").unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn rejects_root_name_with_spaces() {
        let err = Config::load_from_str("[output]\nroot_name = \"my cam\"").unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn rejects_root_name_the_reader_cannot_parse() {
        let err = Config::load_from_str("[output]\nroot_name = \"Cam-1\"").unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn accepted_root_name_round_trips() {
        use crate::bvh::{camera_joint, write_bvh_with};
        use crate::parse::load_bvh_from_string;

        let config = Config::load_from_str("[output]\nroot_name = \"Cam_1\"").unwrap();
        let text = write_bvh_with(&camera_joint(&config.output.root_name), &[], 30.0);
        let (metadata, _) = load_bvh_from_string(&text).unwrap();
        assert_eq!(metadata.root.name, "Cam_1");
    }

    #[test]
    fn reports_syntax_errors() {
        let err = Config::load_from_str("target_fps = ").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }
}
