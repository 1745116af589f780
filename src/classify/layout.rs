//! Layout evidence: zoned letter scoring on OCR text and the geometric shape
//! of the top-left letter key.
use super::{ClassifierThresholds, Layout};
use crate::types::KeyRegion;
use serde::Serialize;

/// Per-layout scores.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutScores {
    pub azerty: f32,
    pub qwerty: f32,
    pub qwertz: f32,
}

impl LayoutScores {
    fn add(&mut self, azerty: f32, qwerty: f32, qwertz: f32) {
        self.azerty += azerty;
        self.qwerty += qwerty;
        self.qwertz += qwertz;
    }

    pub fn clamped(&self) -> Self {
        Self {
            azerty: self.azerty.clamp(0.0, 100.0),
            qwerty: self.qwerty.clamp(0.0, 100.0),
            qwertz: self.qwertz.clamp(0.0, 100.0),
        }
    }

    pub fn get(&self, layout: Layout) -> f32 {
        match layout {
            Layout::Azerty => self.azerty,
            Layout::Qwerty => self.qwerty,
            Layout::Qwertz => self.qwertz,
            Layout::Unknown => 0.0,
        }
    }

    /// Layouts ordered by descending score; ties keep AZERTY, QWERTY, QWERTZ order.
    pub fn ranked(&self) -> [(Layout, f32); 3] {
        let mut out = [
            (Layout::Azerty, self.azerty),
            (Layout::Qwerty, self.qwerty),
            (Layout::Qwertz, self.qwertz),
        ];
        out.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        out
    }
}

/// Split a reading into left, center and right thirds.
fn thirds(text: &str) -> (String, String, String) {
    let chars: Vec<char> = text.chars().collect();
    let n = chars.len();
    let left_end = n.div_ceil(3);
    let center_end = (2 * n).div_ceil(3);
    (
        chars[..left_end].iter().collect(),
        chars[left_end..center_end].iter().collect(),
        chars[center_end..].iter().collect(),
    )
}

/// Raw (unclamped) zoned scores of a top-row reading.
pub fn score_layout_text(text: &str) -> LayoutScores {
    let (left, center, right) = thirds(text);
    let mut s = LayoutScores::default();
    let left_has = |c| left.contains(c);
    let center_has = |c| center.contains(c);
    let right_has = |c| right.contains(c);

    if left_has('A') {
        s.add(60.0, 0.0, 0.0);
    }
    if left_has('Z') {
        s.add(40.0, 0.0, 0.0);
    }
    if left_has('Q') {
        s.add(0.0, 50.0, 50.0);
    }
    if left_has('W') {
        s.add(0.0, 50.0, 50.0);
    }
    if center_has('A') {
        s.add(-20.0, 30.0, 30.0);
    }
    let z_late = center_has('Z') || right_has('Z');
    if z_late {
        s.add(-30.0, -30.0, 60.0);
    }
    if (center_has('Y') || right_has('Y')) && !z_late {
        s.add(0.0, 20.0, -20.0);
    }
    if left_has('A') && center_has('A') {
        s.add(20.0, 0.0, 0.0);
    }
    if left_has('Z') && left_has('Q') {
        s.add(-50.0, 50.0, 50.0);
    }
    s
}

/// OCR-based layout decision.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OcrLayout {
    pub layout: Layout,
    /// `best_score × vote_confidence / 100`; 0 when unknown.
    pub confidence: f32,
    pub best_score: f32,
    pub scores: LayoutScores,
    pub ambiguous: bool,
}

/// Score `text` and decide, weighting the winning score by the vote confidence.
pub fn ocr_layout(text: &str, vote_confidence: f32, th: &ClassifierThresholds) -> OcrLayout {
    let raw = score_layout_text(text);
    let clamped = raw.clamped();
    let ranked = raw.ranked();
    let (best, best_raw) = ranked[0];
    let best_score = clamped.get(best);
    let runner_up = clamped.get(ranked[1].0);

    if best_raw < th.min_layout_score {
        return OcrLayout {
            scores: raw,
            best_score,
            ..Default::default()
        };
    }
    if best_score - runner_up < th.ambiguity_margin {
        return OcrLayout {
            scores: raw,
            best_score,
            ambiguous: true,
            ..Default::default()
        };
    }
    OcrLayout {
        layout: best,
        confidence: best_score * vote_confidence.clamp(0.0, 100.0) / 100.0,
        best_score,
        scores: raw,
        ambiguous: false,
    }
}

/// Geometric evidence from the top-left letter key.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeometricLayout {
    /// `Layout::Azerty`, or `Layout::Qwerty` standing for the QWERTY family.
    pub layout: Layout,
    pub center_row_norm: f32,
    pub extent: f32,
}

/// AZERTY when the key's mass sits low and the key is sparse; otherwise the
/// QWERTY family.
pub fn geometric_layout(tl: &KeyRegion, th: &ClassifierThresholds) -> GeometricLayout {
    let center_row_norm = tl.normalized_center_row();
    let extent = tl.extent;
    let layout = if center_row_norm > th.tl_center_y_azerty && extent < th.tl_extent_azerty {
        Layout::Azerty
    } else {
        Layout::Qwerty
    };
    GeometricLayout {
        layout,
        center_row_norm,
        extent,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BBox;

    #[test]
    fn thirds_use_ceiling_bounds() {
        let (l, c, r) = thirds("AZERTYUIOP");
        assert_eq!((l.as_str(), c.as_str(), r.as_str()), ("AZER", "TYU", "IOP"));
        let (l, c, r) = thirds("A");
        assert_eq!((l.as_str(), c.as_str(), r.as_str()), ("A", "", ""));
        assert_eq!(thirds(""), (String::new(), String::new(), String::new()));
    }

    #[test]
    fn azerty_row_scores_full() {
        let s = score_layout_text("AZERTYUIOP").clamped();
        assert_eq!(s.azerty, 100.0);
        assert!(s.qwerty < 40.0);
    }

    #[test]
    fn qwerty_and_qwertz_rows_are_told_apart() {
        let th = ClassifierThresholds::default();
        let y = ocr_layout("QWERTYUIOP", 100.0, &th);
        assert_eq!(y.layout, Layout::Qwerty);
        let z = ocr_layout("QWERTZUIOP", 100.0, &th);
        assert_eq!(z.layout, Layout::Qwertz);
        let a = ocr_layout("AZERTYUIOP", 50.0, &th);
        assert_eq!(a.layout, Layout::Azerty);
        assert!((a.confidence - 50.0).abs() < 1e-4);
    }

    #[test]
    fn weak_or_ambiguous_readings_are_unknown() {
        let th = ClassifierThresholds::default();
        let weak = ocr_layout("XXXX", 100.0, &th);
        assert_eq!((weak.layout, weak.confidence), (Layout::Unknown, 0.0));
        // Q alone: QWERTY and QWERTZ tie
        let tie = ocr_layout("Q", 100.0, &th);
        assert_eq!(tie.layout, Layout::Unknown);
        assert!(tie.ambiguous);
    }

    #[test]
    fn geometric_rule() {
        let th = ClassifierThresholds::default();
        let tl = KeyRegion::from_bbox(1, BBox::new(100, 0, 200, 70), 3150)
            .with_centroid(162.0, 35.0);
        let g = geometric_layout(&tl, &th);
        assert_eq!(g.layout, Layout::Azerty);
        assert!((g.extent - 0.45).abs() < 1e-6);
        let dense = tl.clone().with_extent(0.9);
        assert_eq!(geometric_layout(&dense, &th).layout, Layout::Qwerty);
    }
}
