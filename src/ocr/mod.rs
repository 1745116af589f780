//! Constrained text recognition with majority voting.
//!
//! A patch is rendered through several [`VariantKind`]s and read once per
//! (variant, [`RecognizerConfig`]) pair. The normalized readings are voted on
//! and the winner is reported with `confidence = votes / valid × 100`.
//!
//! The raw recognizer is a black box behind [`TextRecognizer`]. Closures
//! implement it, [`NullRecognizer`] disables OCR and, with the `tesseract`
//! feature, [`TesseractRecognizer`] shells out to Tesseract.

pub mod normalize;
#[cfg(feature = "tesseract")]
pub mod tesseract;
pub mod variants;
pub mod voting;

pub use normalize::normalize_text;
#[cfg(feature = "tesseract")]
pub use tesseract::TesseractRecognizer;
pub use variants::{render_variant, VariantKind};
pub use voting::{tally, OcrOptions, OcrOutcome, OcrVote, VotingEngine};

use image::GrayImage;
use serde::{Deserialize, Serialize};

/// Characters a reading may contain.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Charset {
    #[default]
    Letters,
    Alphanumeric,
}

impl Charset {
    pub fn whitelist(self) -> &'static str {
        match self {
            Charset::Letters => "ABCDEFGHIJKLMNOPQRSTUVWXYZ",
            Charset::Alphanumeric => "ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789",
        }
    }

    #[inline]
    pub fn allows(self, c: char) -> bool {
        match self {
            Charset::Letters => c.is_ascii_uppercase(),
            Charset::Alphanumeric => c.is_ascii_uppercase() || c.is_ascii_digit(),
        }
    }
}

/// Expected layout of the text in a patch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TextShape {
    #[default]
    IsolatedCharacter,
    ShortWord,
}

/// One recognizer configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecognizerConfig {
    pub shape: TextShape,
    pub charset: Charset,
}

impl RecognizerConfig {
    pub const fn new(shape: TextShape, charset: Charset) -> Self {
        Self { shape, charset }
    }

    pub const fn character(charset: Charset) -> Self {
        Self::new(TextShape::IsolatedCharacter, charset)
    }

    pub const fn word(charset: Charset) -> Self {
        Self::new(TextShape::ShortWord, charset)
    }
}

/// Raw text recognizer. Returns an empty string when nothing can be read.
pub trait TextRecognizer: Send + Sync {
    fn recognize(&self, patch: &GrayImage, config: &RecognizerConfig) -> String;
}

impl<F> TextRecognizer for F
where
    F: Fn(&GrayImage, &RecognizerConfig) -> String + Send + Sync,
{
    fn recognize(&self, patch: &GrayImage, config: &RecognizerConfig) -> String {
        self(patch, config)
    }
}

/// Recognizer that never reads anything; used for geometry-only runs.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullRecognizer;

impl TextRecognizer for NullRecognizer {
    fn recognize(&self, _patch: &GrayImage, _config: &RecognizerConfig) -> String {
        String::new()
    }
}
