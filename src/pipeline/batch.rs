use super::analyzer::KeyboardAnalyzer;
use crate::binarize::Binarizer;
use crate::classify::{ClassificationVerdict, Layout};
use crate::diagnostics::{AnalysisReport, PipelineTrace};
use crate::diagnostics::timing::elapsed_ms;
use crate::ocr::TextRecognizer;
use log::warn;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Outcome of one image of a batch.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchEntry {
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verdict: Option<ClassificationVerdict>,
    /// Set when the image could not be loaded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub elapsed_ms: f64,
    /// Stage diagnostics of the analysis; kept out of `report.json`.
    #[serde(skip)]
    pub trace: Option<PipelineTrace>,
}

impl BatchEntry {
    /// A verdict with a known layout.
    pub fn is_success(&self) -> bool {
        self.verdict
            .as_ref()
            .is_some_and(|v| v.layout != Layout::Unknown)
    }

    /// The full per-image report, when the image was analyzed.
    pub fn analysis_report(&self) -> Option<AnalysisReport> {
        let verdict = self.verdict.clone()?;
        let trace = self.trace.clone()?;
        Some(AnalysisReport { verdict, trace })
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LowConfidence {
    pub path: String,
    pub layout: String,
    pub confidence: f32,
}

/// Aggregate statistics of a batch.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchSummary {
    pub total: usize,
    /// Images whose layout was determined.
    pub successful: usize,
    pub failed: usize,
    /// `successful / total × 100`.
    pub success_rate: f32,
    /// Verdict count per layout label; unreadable images are not counted.
    pub layout_distribution: BTreeMap<String, usize>,
    /// Known layouts whose layout confidence is below the caller threshold.
    pub low_confidence: Vec<LowConfidence>,
}

impl BatchSummary {
    pub fn summarize(entries: &[BatchEntry], min_confidence: f32) -> Self {
        let total = entries.len();
        let successful = entries.iter().filter(|e| e.is_success()).count();
        let mut layout_distribution = BTreeMap::new();
        let mut low_confidence = Vec::new();
        for (entry, verdict) in entries
            .iter()
            .filter_map(|e| e.verdict.as_ref().map(|v| (e, v)))
        {
            *layout_distribution
                .entry(verdict.layout.to_string())
                .or_insert(0) += 1;
            if verdict.layout != Layout::Unknown && verdict.layout_confidence < min_confidence {
                low_confidence.push(LowConfidence {
                    path: entry.path.clone(),
                    layout: verdict.layout_label.clone(),
                    confidence: verdict.layout_confidence,
                });
            }
        }
        let success_rate = if total > 0 {
            successful as f32 / total as f32 * 100.0
        } else {
            0.0
        };
        Self {
            total,
            successful,
            failed: total - successful,
            success_rate,
            layout_distribution,
            low_confidence,
        }
    }
}

/// Summary plus per-image entries, as written to `report.json`.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchReport {
    pub summary: BatchSummary,
    pub entries: Vec<BatchEntry>,
}

/// Analyze every path; results come back in input order. Unreadable images
/// are recorded as failed entries and never reach the analyzer.
pub fn analyze_batch(
    paths: &[PathBuf],
    analyzer: &KeyboardAnalyzer,
    binarizer: &dyn Binarizer,
    recognizer: &dyn TextRecognizer,
) -> Vec<BatchEntry> {
    let run = |path: &PathBuf| analyze_one(path, analyzer, binarizer, recognizer);
    #[cfg(feature = "parallel")]
    {
        paths.par_iter().map(run).collect()
    }
    #[cfg(not(feature = "parallel"))]
    {
        paths.iter().map(run).collect()
    }
}

fn analyze_one(
    path: &Path,
    analyzer: &KeyboardAnalyzer,
    binarizer: &dyn Binarizer,
    recognizer: &dyn TextRecognizer,
) -> BatchEntry {
    let start = Instant::now();
    let (verdict, trace, error) = match analyzer.analyze_path(path, binarizer, recognizer) {
        Ok(report) => (Some(report.verdict), Some(report.trace), None),
        Err(err) => {
            warn!("analyze_batch: skipping {}: {err}", path.display());
            (None, None, Some(err))
        }
    };
    BatchEntry {
        path: path.display().to_string(),
        verdict,
        error,
        elapsed_ms: elapsed_ms(start),
        trace,
    }
}
