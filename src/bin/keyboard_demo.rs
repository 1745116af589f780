use keyboard_detector::config::{self, OutputFormat, RuntimeConfig};
use keyboard_detector::image::io::{
    load_grayscale_image, save_grayscale_u8, save_mask_png, save_patch, write_json_file,
    GrayImageU8,
};
use keyboard_detector::image::crop_gray;
use keyboard_detector::{AnalysisReport, Binarizer, KeyboardAnalyzer};
use std::env;
use std::path::Path;

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn usage() -> String {
    "Usage: keyboard_demo <config.json>".to_string()
}

fn run() -> Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config = config::load_config(Path::new(&config_path))?;
    if config.input.as_os_str().is_empty() {
        return Err(format!("{config_path}: `input` image is required"));
    }

    let gray = load_grayscale_image(&config.input)?;
    let analyzer = KeyboardAnalyzer::new(config.analyzer_params());
    let recognizer = config.recognizer.build();
    let mut report = analyzer.analyze_image(&gray.as_view(), &config.binarizer, &*recognizer);
    report.trace.input.path = Some(config.input.display().to_string());

    let format = config.output.format;
    if format.includes_text() {
        print_text_summary(&report);
    }

    if format.includes_json() {
        if let Some(path) = &config.output.json_out {
            write_json_file(path, &report)?;
            println!("JSON report written to {}", path.display());
        } else {
            let json = serde_json::to_string_pretty(&report)
                .map_err(|e| format!("Failed to serialize JSON: {e}"))?;
            if format == OutputFormat::Both {
                println!("\nJSON report:\n{json}");
            } else {
                println!("{json}");
            }
        }
    }

    if let Some(dir) = &config.output.debug_dir {
        save_debug_artifacts(dir, &gray, &report, &config)?;
        if format.includes_text() {
            println!("Debug artifacts written to {}", dir.display());
        } else {
            eprintln!("Debug artifacts written to {}", dir.display());
        }
    }

    Ok(())
}

fn print_text_summary(report: &AnalysisReport) {
    let v = &report.verdict;
    let trace = &report.trace;
    println!("Keyboard summary");
    println!("  format: {} ({:.0}%)", v.format, v.format_confidence);
    println!("  os:     {} ({:.0}%)", v.os, v.os_confidence);
    println!("  layout: {} ({:.0}%)", v.layout_label, v.layout_confidence);
    println!("  confidence: {:.1}", v.confidence);
    if !v.ocr_text.is_empty() {
        println!("  ocr text: {}", v.ocr_text);
    }

    let cand = &trace.candidates;
    println!(
        "\nCandidates: {} kept of {} components (before band {}), band rows [{:.1}, {:.1}] tilt={:.1}°",
        cand.candidates,
        cand.diagnostics.components,
        cand.diagnostics.candidates_before_band,
        cand.band_min,
        cand.band_max,
        cand.diagnostics.tilt_deg
    );

    let zoning = &trace.zoning;
    println!(
        "\nZoning: h_ref={:.1} attempt={:?} anchors={}/4{}",
        zoning.h_ref,
        zoning.attempt,
        zoning.critical_found,
        if zoning.undetermined { " (undetermined)" } else { "" }
    );
    for a in &zoning.anchors {
        println!(
            "  {:<16} #{:<4} rows {}..{} cols {}..{} ratio={:.2}",
            a.zone.as_str(),
            a.label,
            a.bbox.min_row,
            a.bbox.max_row,
            a.bbox.min_col,
            a.bbox.max_col,
            a.aspect_ratio
        );
    }

    let readings = &trace.ocr.readings;
    println!("\nOCR:");
    for (name, r) in [
        ("top-left letter", &readings.top_left_letter),
        ("row strip", &readings.row_strip),
        ("os key", &readings.os_key),
    ] {
        println!(
            "  {:<16} {:?} {:.0}% ({}/{} votes)",
            name, r.text, r.confidence, r.winner_votes, r.valid
        );
    }

    let timings: Vec<String> = trace
        .timings
        .stages
        .iter()
        .map(|s| format!("{}={:.3}", s.label, s.elapsed_ms))
        .collect();
    println!(
        "\nTimings (ms): {} total={:.3}",
        timings.join(" "),
        trace.timings.total_ms
    );
}

fn save_debug_artifacts(
    dir: &Path,
    gray: &GrayImageU8,
    report: &AnalysisReport,
    config: &RuntimeConfig,
) -> Result<(), String> {
    std::fs::create_dir_all(dir)
        .map_err(|e| format!("Failed to create debug dir {}: {e}", dir.display()))?;

    write_json_file(&dir.join("analysis_report.json"), report)?;
    write_json_file(&dir.join("candidates.json"), &report.trace.candidates)?;
    write_json_file(&dir.join("zoning.json"), &report.trace.zoning)?;

    save_grayscale_u8(gray, &dir.join("gray.png"))?;
    let view = gray.as_view();
    let mask = config.binarizer.binarize(&view);
    save_mask_png(&mask, &dir.join("mask.png"))?;

    for anchor in &report.trace.zoning.anchors {
        let patch = crop_gray(&view, &anchor.bbox);
        let name = format!("anchor_{}.png", anchor.zone.as_str().to_lowercase());
        save_patch(&patch, &dir.join(name))?;
    }
    if let Some(strip) = &report.trace.zoning.row_strip {
        save_patch(&crop_gray(&view, strip), &dir.join("row_strip.png"))?;
    }

    Ok(())
}
