//! JSON runtime configuration shared by the binaries.
//!
//! Every section is optional; missing fields take their `Default`.
//!
//! ```json
//! {
//!   "input": "data/keyboard.png",
//!   "output": { "json_out": "out/report.json", "debug_dir": "out/debug", "format": "both" },
//!   "preset": "standard",
//!   "binarizer": { "kind": "adaptive", "block_size": 51, "offset": 5.0 },
//!   "recognizer": { "enabled": true, "lang": "eng" },
//!   "params": { "zoning": { "min_candidates": 5 } },
//!   "min_confidence": 60.0
//! }
//! ```

use crate::binarize::BinarizerChoice;
use crate::candidates::DetectorPreset;
use crate::ocr::{NullRecognizer, TextRecognizer};
use crate::pipeline::AnalyzerParams;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Both,
}

impl OutputFormat {
    pub fn includes_text(self) -> bool {
        matches!(self, OutputFormat::Text | OutputFormat::Both)
    }

    pub fn includes_json(self) -> bool {
        matches!(self, OutputFormat::Json | OutputFormat::Both)
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub json_out: Option<PathBuf>,
    pub debug_dir: Option<PathBuf>,
    pub format: OutputFormat,
}

impl OutputConfig {
    /// Where the batch report goes: `json_out` when set, else
    /// `<output_dir>/report.json`.
    pub fn report_path(&self, output_dir: &Path) -> PathBuf {
        self.json_out
            .clone()
            .unwrap_or_else(|| output_dir.join("report.json"))
    }

    /// Directory for per-image reports. `force` (the `--save-debug` flag)
    /// selects `<output_dir>/debug` when no `debug_dir` is configured.
    pub fn debug_dir_for(&self, output_dir: &Path, force: bool) -> Option<PathBuf> {
        match (&self.debug_dir, force) {
            (Some(dir), _) => Some(dir.clone()),
            (None, true) => Some(output_dir.join("debug")),
            (None, false) => None,
        }
    }
}

/// Which text recognizer the binaries use.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct RecognizerSettings {
    /// `false` runs geometry only.
    pub enabled: bool,
    pub lang: String,
    pub dpi: i32,
}

impl Default for RecognizerSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            lang: "eng".to_string(),
            dpi: 300,
        }
    }
}

impl RecognizerSettings {
    /// Tesseract when enabled and compiled in, otherwise [`NullRecognizer`].
    pub fn build(&self) -> Box<dyn TextRecognizer> {
        #[cfg(feature = "tesseract")]
        if self.enabled {
            return Box::new(crate::ocr::TesseractRecognizer {
                lang: self.lang.clone(),
                dpi: self.dpi,
                ..Default::default()
            });
        }
        if self.enabled {
            log::warn!("OCR requested without the `tesseract` feature; running geometry only");
        }
        Box::new(NullRecognizer)
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Image for the single-image demo, directory for batch runs.
    pub input: PathBuf,
    pub output: OutputConfig,
    pub params: AnalyzerParams,
    /// Named detector configuration; replaces `params.detector` when set.
    pub preset: Option<DetectorPreset>,
    pub binarizer: BinarizerChoice,
    pub recognizer: RecognizerSettings,
    /// Layout confidence below which batch results are listed as uncertain.
    pub min_confidence: f32,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::new(),
            output: OutputConfig::default(),
            params: AnalyzerParams::default(),
            preset: None,
            binarizer: BinarizerChoice::default(),
            recognizer: RecognizerSettings::default(),
            min_confidence: 60.0,
        }
    }
}

impl RuntimeConfig {
    /// Analyzer parameters with the preset applied.
    pub fn analyzer_params(&self) -> AnalyzerParams {
        match self.preset {
            Some(preset) => self.params.clone().with_preset(preset),
            None => self.params.clone(),
        }
    }
}

pub fn load_config(path: &Path) -> Result<RuntimeConfig, String> {
    let contents = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    serde_json::from_str(&contents)
        .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::candidates::{DetectorKind, DetectorOptions};

    #[test]
    fn loads_partial_config_with_preset() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.json");
        fs::write(
            &path,
            r#"{
                "input": "kb.png",
                "output": { "json_out": "out.json", "format": "json" },
                "preset": "exploration",
                "recognizer": { "enabled": false },
                "min_confidence": 45.0
            }"#,
        )
        .unwrap();
        let config = load_config(&path).unwrap();
        assert_eq!(config.input, PathBuf::from("kb.png"));
        assert!(config.output.format.includes_json());
        assert!(!config.output.format.includes_text());
        assert_eq!(config.min_confidence, 45.0);
        let params = config.analyzer_params();
        assert_eq!(params.detector_kind, DetectorKind::Box);
        assert_eq!(params.detector, DetectorOptions::exploration());
    }

    #[test]
    fn output_paths_prefer_configured_locations() {
        let out = Path::new("runs/today");
        let defaults = OutputConfig::default();
        assert_eq!(defaults.report_path(out), out.join("report.json"));
        assert_eq!(defaults.debug_dir_for(out, false), None);
        assert_eq!(defaults.debug_dir_for(out, true), Some(out.join("debug")));

        let configured = OutputConfig {
            json_out: Some(PathBuf::from("custom/batch.json")),
            debug_dir: Some(PathBuf::from("custom/debug")),
            format: OutputFormat::Json,
        };
        assert_eq!(configured.report_path(out), PathBuf::from("custom/batch.json"));
        assert_eq!(
            configured.debug_dir_for(out, false),
            Some(PathBuf::from("custom/debug"))
        );
    }

    #[test]
    fn invalid_zone_table_is_reported() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("bad.json");
        fs::write(
            &path,
            r#"{ "params": { "zoning": { "bands": { "SPACE": { "rowOffsetMin": 1.0, "rowOffsetMax": 0.0 } } } } }"#,
        )
        .unwrap();
        let err = load_config(&path).unwrap_err();
        assert!(err.starts_with("Failed to parse config"), "{err}");
    }

    #[test]
    fn missing_config_names_the_path() {
        let err = load_config(Path::new("/nowhere/config.json")).unwrap_err();
        assert!(err.contains("/nowhere/config.json"));
    }
}
