//! Shape and statistics helpers shared by the detector and the classifiers.
//!
//! - [`hull`] – convex-hull area of a pixel set (used for solidity).
//! - [`topology`] – Euler number via bit-quad counting.
//! - [`stats`] – robust 1D statistics and the principal axis of a point cloud.

pub mod hull;
pub mod stats;
pub mod topology;

use serde::{Deserialize, Serialize};

pub use hull::convex_hull_area;
pub use stats::{mean_std, median, percentile, principal_axis_deg};
pub use topology::euler_number;

/// Pixel neighbourhood used for labeling and topology.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Connectivity {
    Four,
    #[default]
    Eight,
}
