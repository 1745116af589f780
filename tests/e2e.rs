mod common;

use common::synthetic_keyboard::{render_keyboard, scripted_recognizer, Format, OsLegend};
use keyboard_detector::binarize::OtsuBinarizer;
use keyboard_detector::classify::{
    AnchorReadings, Classifier, HostOs, KeyboardFormat, Layout, LayoutMethod,
};
use keyboard_detector::image::ImageU8;
use keyboard_detector::ocr::{NullRecognizer, OcrOutcome};
use keyboard_detector::types::{BBox, KeyRegion};
use keyboard_detector::zoning::{ZoneLocator, ZoneName, ZoningOptions};
use keyboard_detector::{AnalyzerParams, KeyboardAnalyzer};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn synthetic_iso_keyboard_is_iso_mac_azerty() {
    init_logging();
    let kb = render_keyboard(Format::Iso, OsLegend::Ring);
    let gray = ImageU8::packed(kb.width, kb.height, &kb.data);
    let recognizer = scripted_recognizer("AZERTYUIOP", "A", "CMD");

    let analyzer = KeyboardAnalyzer::new(AnalyzerParams::default());
    let report = analyzer.analyze_image(&gray, &OtsuBinarizer::default(), &recognizer);
    let zoning = &report.trace.zoning;

    let space = zoning.anchor(ZoneName::Space).expect("spacebar");
    assert_eq!(space.bbox.min_col, kb.key("space").col);
    let shift = zoning.anchor(ZoneName::Shift).expect("shift");
    assert_eq!(shift.bbox.min_col, kb.key("shift").col);
    assert_eq!(zoning.critical_found, 4);

    let v = &report.verdict;
    assert_eq!(v.format, KeyboardFormat::Iso);
    assert_eq!(v.format_confidence, 90.0);
    assert_eq!(v.os, HostOs::Mac);
    assert_eq!(v.os_confidence, 85.0);
    assert_eq!(v.layout, Layout::Azerty);
    assert_eq!(v.layout_method, LayoutMethod::Ocr);
    assert_eq!(v.layout_label, "AZERTY [OCR:100%]");
    assert_eq!(v.ocr_text, "AZERTYUIOP");
}

#[test]
fn synthetic_ansi_keyboard_is_ansi_through_enter() {
    init_logging();
    let kb = render_keyboard(Format::Ansi, OsLegend::FourPanes);
    let gray = ImageU8::packed(kb.width, kb.height, &kb.data);

    let report = KeyboardAnalyzer::default().analyze_image(
        &gray,
        &OtsuBinarizer::default(),
        &NullRecognizer,
    );
    let v = &report.verdict;
    assert_eq!(v.format, KeyboardFormat::Ansi);
    let enter_ratio = report.trace.classification.format.enter_ratio.expect("enter");
    assert!(enter_ratio < 0.7, "enter ratio {enter_ratio}");
    assert_eq!(v.os, HostOs::Windows);
    assert_eq!(report.trace.classification.os.euler, Some(4));
    // No OCR: the top-left letter shape decides, and a centred legend is QWERTY-like.
    assert_eq!(v.layout_method, LayoutMethod::Geometric);
    assert_eq!(v.layout_label, "QWERTY/QWERTZ [Geo]");
}

#[test]
fn repeated_runs_are_identical() {
    let kb = render_keyboard(Format::Iso, OsLegend::FourPanes);
    let gray = ImageU8::packed(kb.width, kb.height, &kb.data);
    let recognizer = scripted_recognizer("QWERTZUIOP", "Q", "WIN");
    let analyzer = KeyboardAnalyzer::default();

    let a = analyzer.analyze_image(&gray, &OtsuBinarizer::default(), &recognizer);
    let b = analyzer.analyze_image(&gray, &OtsuBinarizer::default(), &recognizer);
    assert_eq!(a.verdict, b.verdict);
    assert_eq!(
        serde_json::to_string(&a.verdict).unwrap(),
        serde_json::to_string(&b.verdict).unwrap()
    );
    assert_eq!(a.verdict.layout, Layout::Qwertz);
}

#[test]
fn blank_image_degrades_to_unknown() {
    let data = vec![30u8; 320 * 200];
    let gray = ImageU8::packed(320, 200, &data);
    let report =
        KeyboardAnalyzer::default().analyze_image(&gray, &OtsuBinarizer::default(), &NullRecognizer);
    assert!(report.verdict.is_unknown());
    assert_eq!(report.verdict.confidence, 0.0);
}

fn region(label: u32, row: usize, col: usize, h: usize, w: usize) -> KeyRegion {
    KeyRegion::from_bbox(label, BBox::new(row, col, row + h, col + w), w * h)
}

#[test]
fn geometric_azerty_when_ocr_is_weak() {
    let mut regions = vec![
        region(1, 460, 100, 80, 600), // spacebar, centre (500, 400)
        region(2, 315, 100, 70, 91),  // SHIFT centred on row 350, ratio 1.3
        KeyRegion::from_bbox(3, BBox::new(150, 100, 250, 170), 3150).with_centroid(212.0, 135.0),
    ];
    for (i, col) in [200, 280, 360, 440].into_iter().enumerate() {
        regions.push(region(10 + i as u32, 177, col, 70, 70));
    }

    let anchors = ZoneLocator::new(ZoningOptions::default()).locate(&regions);
    assert!((anchors.h_ref - 70.0).abs() < 1e-3, "h_ref {}", anchors.h_ref);
    assert_eq!(anchors.space().map(|r| r.label), Some(1));
    assert_eq!(anchors.shift().map(|r| (r.label, r.row())), Some((2, 350.0)));
    assert_eq!(anchors.top_left_letter().map(|r| r.label), Some(3));
    assert!(anchors.enter_key().is_none());

    let readings = AnchorReadings {
        row_strip: OcrOutcome {
            text: "QWERTYUIOP".into(),
            confidence: 30.0,
            ..Default::default()
        },
        ..Default::default()
    };
    let data = vec![0u8; 800 * 600];
    let gray = ImageU8::packed(800, 600, &data);
    let v = Classifier::default().classify(&anchors, &gray, &readings);

    assert_eq!(v.format, KeyboardFormat::Iso);
    assert_eq!(v.layout, Layout::Azerty);
    assert_eq!(v.layout_label, "AZERTY [Geo]");
    assert_eq!(v.layout_confidence, 50.0);
    assert_eq!(v.layout_method, LayoutMethod::Geometric);
}
