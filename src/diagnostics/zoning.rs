use crate::types::BBox;
use crate::zoning::{AnchorMap, ZoneName, ZoningAttempt};
use serde::Serialize;

/// Owned copy of one located anchor.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnchorSummary {
    pub zone: ZoneName,
    pub label: u32,
    pub bbox: BBox,
    pub centroid: [f32; 2],
    pub aspect_ratio: f32,
    pub extent: f32,
}

#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoningStage {
    pub anchors: Vec<AnchorSummary>,
    pub h_ref: f32,
    pub attempt: ZoningAttempt,
    pub undetermined: bool,
    pub critical_found: usize,
    /// Box of the top letter row handed to OCR.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row_strip: Option<BBox>,
}

impl ZoningStage {
    pub fn from_anchors(anchors: &AnchorMap<'_>, row_strip: Option<BBox>) -> Self {
        Self {
            anchors: anchors
                .iter()
                .map(|(zone, r)| AnchorSummary {
                    zone,
                    label: r.label,
                    bbox: r.bbox,
                    centroid: r.centroid,
                    aspect_ratio: r.aspect_ratio(),
                    extent: r.extent,
                })
                .collect(),
            h_ref: anchors.h_ref,
            attempt: anchors.attempt,
            undetermined: anchors.undetermined,
            critical_found: anchors.critical_found(),
            row_strip,
        }
    }

    pub fn anchor(&self, zone: ZoneName) -> Option<&AnchorSummary> {
        self.anchors.iter().find(|a| a.zone == zone)
    }
}
