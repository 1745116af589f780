use super::normalize::normalize_text;
use super::variants::{render_variant, VariantKind};
use super::{Charset, RecognizerConfig, TextRecognizer, TextShape};
use image::GrayImage;
use log::debug;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// One recognizer reading and the (variant, configuration) pair behind it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OcrVote {
    pub variant: VariantKind,
    pub config: RecognizerConfig,
    /// Reading after normalization.
    pub text: String,
}

/// Result of a vote.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OcrOutcome {
    /// Winning reading; empty when nothing survived.
    pub text: String,
    /// `winner_votes / valid × 100`, 0 when nothing survived.
    pub confidence: f32,
    pub winner_votes: usize,
    /// Readings that survived the empty/short filters.
    pub valid: usize,
    pub votes: Vec<OcrVote>,
}

impl OcrOutcome {
    /// Winning text truncated to `max_len` characters.
    pub fn key_sequence(&self, max_len: usize) -> String {
        self.text.chars().take(max_len).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Majority vote over normalized readings.
///
/// Empty readings and word-mode readings shorter than `min_word_len` are
/// ignored. Ties go to the reading seen first.
pub fn tally(votes: Vec<OcrVote>, min_word_len: usize) -> OcrOutcome {
    let mut counts: Vec<(&str, usize)> = Vec::new();
    let mut valid = 0usize;
    for vote in &votes {
        let len = vote.text.chars().count();
        let too_short = vote.config.shape == TextShape::ShortWord && len < min_word_len;
        if len == 0 || too_short {
            continue;
        }
        valid += 1;
        match counts.iter_mut().find(|(t, _)| *t == vote.text) {
            Some((_, n)) => *n += 1,
            None => counts.push((&vote.text, 1)),
        }
    }

    let mut winner: Option<(&str, usize)> = None;
    for &(text, n) in &counts {
        if winner.map_or(true, |(_, best)| n > best) {
            winner = Some((text, n));
        }
    }
    let (text, winner_votes) = winner
        .map(|(t, n)| (t.to_string(), n))
        .unwrap_or_default();
    let confidence = if valid > 0 {
        winner_votes as f32 / valid as f32 * 100.0
    } else {
        0.0
    };
    OcrOutcome {
        text,
        confidence,
        winner_votes,
        valid,
        votes,
    }
}

/// Variants and configurations used by the voting engine.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrOptions {
    pub variants: Vec<VariantKind>,
    /// Configurations for single-key reads.
    pub character_configs: Vec<RecognizerConfig>,
    /// Configurations for strip and label reads.
    pub word_configs: Vec<RecognizerConfig>,
    pub min_word_len: usize,
    /// Length the winning reading is truncated to before layout scoring.
    pub key_sequence_len: usize,
    /// Maximum number of keys in the top-row strip.
    pub row_strip_keys: usize,
    /// Pixels added around each anchor crop.
    pub crop_padding: usize,
}

impl Default for OcrOptions {
    fn default() -> Self {
        Self {
            variants: VariantKind::ALL.to_vec(),
            character_configs: vec![
                RecognizerConfig::character(Charset::Letters),
                RecognizerConfig::character(Charset::Alphanumeric),
            ],
            word_configs: vec![
                RecognizerConfig::word(Charset::Letters),
                RecognizerConfig::word(Charset::Alphanumeric),
            ],
            min_word_len: 3,
            key_sequence_len: 10,
            row_strip_keys: 10,
            crop_padding: 2,
        }
    }
}

impl OcrOptions {
    pub fn with_variants(mut self, variants: Vec<VariantKind>) -> Self {
        self.variants = variants;
        self
    }

    pub fn with_key_sequence_len(mut self, len: usize) -> Self {
        self.key_sequence_len = len;
        self
    }

    pub fn with_row_strip_keys(mut self, keys: usize) -> Self {
        self.row_strip_keys = keys;
        self
    }

    pub fn configs_for(&self, shape: TextShape) -> &[RecognizerConfig] {
        match shape {
            TextShape::IsolatedCharacter => &self.character_configs,
            TextShape::ShortWord => &self.word_configs,
        }
    }
}

/// Fans a patch out over variants × configurations and votes on the readings.
pub struct VotingEngine<'r> {
    recognizer: &'r dyn TextRecognizer,
    options: &'r OcrOptions,
}

impl<'r> VotingEngine<'r> {
    pub fn new(recognizer: &'r dyn TextRecognizer, options: &'r OcrOptions) -> Self {
        Self {
            recognizer,
            options,
        }
    }

    /// Render `patch` through every configured variant and read it with the
    /// configurations matching `shape`.
    pub fn read(&self, patch: &GrayImage, shape: TextShape) -> OcrOutcome {
        if patch.width() == 0 || patch.height() == 0 {
            return OcrOutcome::default();
        }
        let rendered: Vec<(VariantKind, GrayImage)> = self
            .options
            .variants
            .iter()
            .map(|&kind| (kind, render_variant(patch, kind)))
            .collect();
        self.vote(&rendered, self.options.configs_for(shape))
    }

    /// Read pre-rendered `(variant, patch)` pairs with each configuration.
    pub fn vote(
        &self,
        rendered: &[(VariantKind, GrayImage)],
        configs: &[RecognizerConfig],
    ) -> OcrOutcome {
        let jobs: Vec<(VariantKind, &GrayImage, RecognizerConfig)> = rendered
            .iter()
            .flat_map(|(kind, img)| configs.iter().map(move |cfg| (*kind, img, *cfg)))
            .collect();
        let votes = self.run_jobs(&jobs);
        let outcome = tally(votes, self.options.min_word_len);
        debug!(
            "VotingEngine::vote text={:?} confidence={:.1} ({}/{} valid, {} reads)",
            outcome.text,
            outcome.confidence,
            outcome.winner_votes,
            outcome.valid,
            jobs.len()
        );
        outcome
    }

    fn run_jobs(&self, jobs: &[(VariantKind, &GrayImage, RecognizerConfig)]) -> Vec<OcrVote> {
        let read = |&(variant, img, config): &(VariantKind, &GrayImage, RecognizerConfig)| {
            let raw = self.recognizer.recognize(img, &config);
            OcrVote {
                variant,
                config,
                text: normalize_text(&raw, config.charset),
            }
        };
        #[cfg(feature = "parallel")]
        {
            jobs.par_iter().map(read).collect()
        }
        #[cfg(not(feature = "parallel"))]
        {
            jobs.iter().map(read).collect()
        }
    }
}
