use keyboard_detector::types::{BBox, KeyRegion};
use keyboard_detector::zoning::{
    RelaxationPolicy, ZoneLocator, ZoneName, ZoningAttempt, ZoningOptions,
};

fn region(label: u32, row: usize, col: usize, h: usize, w: usize) -> KeyRegion {
    KeyRegion::from_bbox(label, BBox::new(row, col, row + h, col + w), w * h)
}

/// Spacebar, SHIFT, top-left letter and a short top row; even coordinates so
/// halving stays exact.
fn keyboard_regions() -> Vec<KeyRegion> {
    let mut regions = vec![
        region(1, 460, 100, 80, 600),
        region(2, 366, 100, 70, 92),
        region(3, 176, 100, 70, 70),
        region(4, 466, 10, 70, 80), // OS key: dx = 50 - 400
    ];
    for (i, col) in [180, 260, 340].into_iter().enumerate() {
        regions.push(region(10 + i as u32, 176, col, 70, 70));
    }
    regions
}

fn labels(regions: &[KeyRegion]) -> Vec<(ZoneName, u32)> {
    ZoneLocator::default()
        .locate(regions)
        .iter()
        .map(|(zone, r)| (zone, r.label))
        .collect()
}

#[test]
fn single_wide_region_is_the_spacebar() {
    let regions = vec![region(7, 400, 50, 60, 500)];
    let anchors = ZoneLocator::new(ZoningOptions::default()).locate(&regions);
    assert_eq!(anchors.space().map(|r| r.label), Some(7));
    for zone in [
        ZoneName::Shift,
        ZoneName::TopLeftLetter,
        ZoneName::OsKey,
        ZoneName::EnterKey,
    ] {
        assert!(anchors.get(zone).is_none(), "{zone} should be absent");
    }
}

#[test]
fn empty_candidates_are_undetermined() {
    let anchors = ZoneLocator::default().locate(&[]);
    assert!(anchors.undetermined);
    assert!(anchors.is_empty());
}

#[test]
fn too_few_candidates_are_undetermined() {
    let regions = keyboard_regions();
    let locator = ZoneLocator::new(ZoningOptions::default().with_min_candidates(20));
    let anchors = locator.locate(&regions);
    assert!(anchors.undetermined);
    assert!(anchors.space().is_none());
}

#[test]
fn anchors_are_invariant_to_uniform_scaling() {
    let regions = keyboard_regions();
    let reference = labels(&regions);
    assert_eq!(
        reference,
        vec![
            (ZoneName::Space, 1),
            (ZoneName::Shift, 2),
            (ZoneName::TopLeftLetter, 3),
            (ZoneName::OsKey, 4),
        ]
    );
    for factor in [0.5f32, 2.0] {
        let scaled: Vec<KeyRegion> = regions.iter().map(|r| r.scaled(factor)).collect();
        assert_eq!(labels(&scaled), reference, "factor {factor}");
    }
}

#[test]
fn relaxed_attempt_recovers_shift_outside_strict_band() {
    // SHIFT centre 2.5 h_ref above the spacebar: outside (0.9, 2.3), inside
    // the relaxed (0.72, 2.76).
    let mut regions = vec![
        region(1, 460, 100, 80, 600),
        region(2, 290, 100, 70, 92),
        region(3, 176, 100, 70, 70),
    ];
    for (i, col) in [180, 260, 340].into_iter().enumerate() {
        regions.push(region(10 + i as u32, 176, col, 70, 70));
    }
    let anchors = ZoneLocator::default().locate(&regions);
    assert_eq!(anchors.attempt, ZoningAttempt::Relaxed);
    assert_eq!(anchors.shift().map(|r| r.label), Some(2));
    assert_eq!(anchors.top_left_letter().map(|r| r.label), Some(3));
    assert_eq!(anchors.critical_found(), 3);
}

#[test]
fn strict_pass_is_kept_when_three_anchors_are_found() {
    let regions = keyboard_regions();
    let anchors = ZoneLocator::default().locate(&regions);
    assert_eq!(anchors.attempt, ZoningAttempt::Strict);
    assert_eq!(anchors.critical_found(), 4);
}

/// Spacebar centred at (500, 800), 600 wide, plus a top-left letter row; no
/// SHIFT, so the strict pass ends with two critical anchors.
fn wide_frame_with(os_key: KeyRegion) -> Vec<KeyRegion> {
    let mut regions = vec![region(1, 460, 500, 80, 600), os_key];
    for (i, col) in [500, 580, 660, 740].into_iter().enumerate() {
        regions.push(region(10 + i as u32, 176, col, 70, 70));
    }
    regions
}

#[test]
fn relaxed_attempt_widens_the_os_window() {
    // dx = 350 - 800 = -0.75 w_space: past the strict 0.7, inside the relaxed 0.8
    let regions = wide_frame_with(region(4, 466, 310, 70, 80));
    let anchors = ZoneLocator::default().locate(&regions);
    assert_eq!(anchors.attempt, ZoningAttempt::Relaxed);
    assert_eq!(anchors.os_key().map(|r| r.label), Some(4));
    assert_eq!(anchors.top_left_letter().map(|r| r.label), Some(10));
    assert!(anchors.shift().is_none());
}

#[test]
fn relaxed_os_window_still_has_an_outer_limit() {
    // dx = 290 - 800 = -0.85 w_space
    let regions = wide_frame_with(region(4, 466, 250, 70, 80));
    let anchors = ZoneLocator::default().locate(&regions);
    assert_eq!(anchors.attempt, ZoningAttempt::Relaxed);
    assert!(anchors.os_key().is_none());
    assert_eq!(anchors.critical_found(), 2);
}

#[test]
fn relaxed_attempt_widens_the_os_row_tolerance() {
    // Centre 0.6 h_ref above the spacebar: past the strict 0.5, inside 0.65.
    let regions = wide_frame_with(region(4, 423, 460, 70, 80));
    let strict = ZoneLocator::new(ZoningOptions {
        relaxation: RelaxationPolicy {
            os_tolerance_scale: 1.0,
            ..RelaxationPolicy::default()
        },
        ..ZoningOptions::default()
    })
    .locate(&regions);
    assert!(strict.os_key().is_none());

    let anchors = ZoneLocator::default().locate(&regions);
    assert_eq!(anchors.attempt, ZoningAttempt::Relaxed);
    assert_eq!(anchors.os_key().map(|r| r.label), Some(4));
}
