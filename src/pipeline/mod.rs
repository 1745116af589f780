//! End-to-end orchestration.
//!
//! [`KeyboardAnalyzer`] runs the four stages on one image in strict order:
//! candidate detection on the key mask, zoning on the candidates, OCR voting
//! on the anchor crops and classification fusion. [`analyze_batch`] runs many
//! images, one per `rayon` worker when the `parallel` feature is enabled, and
//! [`BatchSummary`] aggregates the verdicts.
//!
//! ```no_run
//! use keyboard_detector::binarize::OtsuBinarizer;
//! use keyboard_detector::image::io::load_grayscale_image;
//! use keyboard_detector::ocr::NullRecognizer;
//! use keyboard_detector::{AnalyzerParams, KeyboardAnalyzer};
//! use std::path::Path;
//!
//! # fn main() -> Result<(), String> {
//! let gray = load_grayscale_image(Path::new("keyboard.png"))?;
//! let analyzer = KeyboardAnalyzer::new(AnalyzerParams::default());
//! let report =
//!     analyzer.analyze_image(&gray.as_view(), &OtsuBinarizer::default(), &NullRecognizer);
//! println!("{} ({:.0}%)", report.verdict.layout_label, report.verdict.confidence);
//! # Ok(())
//! # }
//! ```

mod analyzer;
mod batch;
pub mod params;

pub use analyzer::KeyboardAnalyzer;
pub use batch::{analyze_batch, BatchEntry, BatchReport, BatchSummary, LowConfidence};
pub use params::AnalyzerParams;
