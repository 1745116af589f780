//! Anchor-key discovery from relative geometry.
//!
//! The spacebar is found first among the bottom-most candidates. Every other
//! anchor is then searched relative to it: vertical positions in multiples of
//! a robust key height `h_ref` ([`ZoneBandTable`]) and horizontal positions in
//! fractions of the spacebar width. When exactly two of the four critical
//! anchors are found, a second, relaxed attempt fills the missing SHIFT and
//! OS_KEY slots.

pub mod bands;
mod locator;
pub mod options;
mod strip;

pub use bands::{RelaxationPolicy, ZoneBand, ZoneBandTable};
pub use locator::ZoneLocator;
pub use options::ZoningOptions;
pub use strip::row_strip_bbox;

use crate::types::KeyRegion;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Fixed roles an anchor key can take.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ZoneName {
    Space,
    Shift,
    TopLeftLetter,
    OsKey,
    EnterKey,
}

impl ZoneName {
    pub const COUNT: usize = 5;
    pub const ALL: [ZoneName; Self::COUNT] = [
        ZoneName::Space,
        ZoneName::Shift,
        ZoneName::TopLeftLetter,
        ZoneName::OsKey,
        ZoneName::EnterKey,
    ];
    /// Anchors counted by the degradation policy.
    pub const CRITICAL: [ZoneName; 4] = [
        ZoneName::Space,
        ZoneName::Shift,
        ZoneName::TopLeftLetter,
        ZoneName::OsKey,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ZoneName::Space => "SPACE",
            ZoneName::Shift => "SHIFT",
            ZoneName::TopLeftLetter => "TOP_LEFT_LETTER",
            ZoneName::OsKey => "OS_KEY",
            ZoneName::EnterKey => "ENTER_KEY",
        }
    }
}

impl fmt::Display for ZoneName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which pass of the locator produced the map.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZoningAttempt {
    #[default]
    Strict,
    Relaxed,
}

/// Named anchors borrowed from the candidate list of one image.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AnchorMap<'a> {
    pub(crate) slots: [Option<&'a KeyRegion>; ZoneName::COUNT],
    /// Reference key height in pixels; 0 when undetermined.
    pub h_ref: f32,
    pub attempt: ZoningAttempt,
    /// Set when the candidate set was too small to zone.
    pub undetermined: bool,
}

impl<'a> AnchorMap<'a> {
    /// Map with every anchor absent.
    pub fn undetermined() -> Self {
        Self {
            undetermined: true,
            ..Self::default()
        }
    }

    #[inline]
    pub fn get(&self, zone: ZoneName) -> Option<&'a KeyRegion> {
        self.slots[zone.index()]
    }

    pub(crate) fn set(&mut self, zone: ZoneName, region: Option<&'a KeyRegion>) {
        self.slots[zone.index()] = region;
    }

    pub fn space(&self) -> Option<&'a KeyRegion> {
        self.get(ZoneName::Space)
    }

    pub fn shift(&self) -> Option<&'a KeyRegion> {
        self.get(ZoneName::Shift)
    }

    pub fn top_left_letter(&self) -> Option<&'a KeyRegion> {
        self.get(ZoneName::TopLeftLetter)
    }

    pub fn os_key(&self) -> Option<&'a KeyRegion> {
        self.get(ZoneName::OsKey)
    }

    pub fn enter_key(&self) -> Option<&'a KeyRegion> {
        self.get(ZoneName::EnterKey)
    }

    /// Number of SPACE, SHIFT, TOP_LEFT_LETTER and OS_KEY found.
    pub fn critical_found(&self) -> usize {
        ZoneName::CRITICAL
            .iter()
            .filter(|z| self.get(**z).is_some())
            .count()
    }

    /// Present anchors in zone order.
    pub fn iter(&self) -> impl Iterator<Item = (ZoneName, &'a KeyRegion)> + '_ {
        ZoneName::ALL
            .into_iter()
            .filter_map(move |z| self.get(z).map(|r| (z, r)))
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    fn is_assigned(&self, region: &KeyRegion) -> bool {
        self.slots
            .iter()
            .flatten()
            .any(|r| std::ptr::eq(*r, region))
    }
}
