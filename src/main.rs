use keyboard_detector::config::{self, RuntimeConfig};
use keyboard_detector::image::io::{list_image_files, write_json_file};
use keyboard_detector::pipeline::{analyze_batch, BatchEntry, BatchReport, BatchSummary};
use keyboard_detector::KeyboardAnalyzer;
use std::env;
use std::path::{Path, PathBuf};
use std::time::Instant;

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn usage() -> String {
    "Usage: keyboard-detector <input_dir> [--output DIR] [--config FILE] \
     [--min-confidence N] [--no-ocr] [--save-debug]"
        .to_string()
}

struct BatchArgs {
    config: RuntimeConfig,
    output: PathBuf,
    save_debug: bool,
}

fn parse_args() -> Result<BatchArgs, String> {
    let mut args = env::args().skip(1);
    let mut input: Option<PathBuf> = None;
    let mut output = PathBuf::from("outputs");
    let mut config_path: Option<PathBuf> = None;
    let mut min_confidence: Option<f32> = None;
    let mut no_ocr = false;
    let mut save_debug = false;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--output" => output = args.next().map(PathBuf::from).ok_or_else(usage)?,
            "--config" => config_path = Some(args.next().map(PathBuf::from).ok_or_else(usage)?),
            "--min-confidence" => {
                let raw = args.next().ok_or_else(usage)?;
                let value = raw
                    .parse::<f32>()
                    .map_err(|e| format!("Invalid --min-confidence {raw}: {e}"))?;
                min_confidence = Some(value);
            }
            "--no-ocr" => no_ocr = true,
            "--save-debug" => save_debug = true,
            "-h" | "--help" => return Err(usage()),
            other if other.starts_with("--") => {
                return Err(format!("Unknown option {other}\n{}", usage()))
            }
            other => input = Some(PathBuf::from(other)),
        }
    }

    let mut config = match &config_path {
        Some(path) => config::load_config(path)?,
        None => RuntimeConfig::default(),
    };
    if let Some(dir) = input {
        config.input = dir;
    }
    if config.input.as_os_str().is_empty() {
        return Err(usage());
    }
    if let Some(value) = min_confidence {
        config.min_confidence = value;
    }
    if no_ocr {
        config.recognizer.enabled = false;
    }
    Ok(BatchArgs {
        config,
        output,
        save_debug,
    })
}

fn run() -> Result<(), String> {
    let BatchArgs {
        config,
        output,
        save_debug,
    } = parse_args()?;

    let files = list_image_files(&config.input)?;
    if files.is_empty() {
        return Err(format!("No PNG images found in {}", config.input.display()));
    }
    let text = config.output.format.includes_text();
    let report_path = config.output.report_path(&output);
    let debug_dir = config.output.debug_dir_for(&output, save_debug);
    if text {
        println!("Input:  {}", config.input.display());
        println!("Report: {}", report_path.display());
        println!("Images: {}", files.len());
    }

    let analyzer = KeyboardAnalyzer::new(config.analyzer_params());
    let recognizer = config.recognizer.build();
    let start = Instant::now();
    let entries = analyze_batch(&files, &analyzer, &config.binarizer, &*recognizer);
    let elapsed = start.elapsed().as_secs_f64();

    if text {
        for entry in &entries {
            match (&entry.verdict, &entry.error) {
                (Some(v), _) => println!(
                    "  {}: {} | {} | {} ({:.0}%)",
                    file_name(&entry.path),
                    v.format,
                    v.os,
                    v.layout_label,
                    v.confidence
                ),
                (None, Some(err)) => println!("  {}: failed: {err}", file_name(&entry.path)),
                (None, None) => {}
            }
        }
    }

    if let Some(dir) = &debug_dir {
        save_debug_reports(dir, &entries)?;
        if text {
            println!("Debug reports written to {}", dir.display());
        } else {
            eprintln!("Debug reports written to {}", dir.display());
        }
    }

    let summary = BatchSummary::summarize(&entries, config.min_confidence);
    if text {
        print_summary(&summary, config.min_confidence, elapsed);
    }
    let batch = BatchReport { summary, entries };
    write_json_file(&report_path, &batch)?;
    if text {
        println!("\nReport written to {}", report_path.display());
    } else {
        let json = serde_json::to_string_pretty(&batch)
            .map_err(|e| format!("Failed to serialize JSON: {e}"))?;
        println!("{json}");
        eprintln!("Report written to {}", report_path.display());
    }
    Ok(())
}

fn print_summary(summary: &BatchSummary, min_confidence: f32, elapsed_s: f64) {
    println!("\nSummary");
    println!("  total:      {}", summary.total);
    println!("  successful: {}", summary.successful);
    println!("  failed:     {}", summary.failed);
    println!("  success:    {:.2}%", summary.success_rate);
    println!("  elapsed:    {elapsed_s:.2} s");
    for (layout, count) in &summary.layout_distribution {
        println!("  {layout:<8} {count}");
    }
    if !summary.low_confidence.is_empty() {
        println!(
            "\n{} image(s) below {min_confidence:.0}% layout confidence:",
            summary.low_confidence.len()
        );
        for low in &summary.low_confidence {
            println!(
                "  - {}: {} ({:.0}%)",
                file_name(&low.path),
                low.layout,
                low.confidence
            );
        }
    }
}

/// Per-image analysis reports, one JSON file per analyzed image.
fn save_debug_reports(dir: &Path, entries: &[BatchEntry]) -> Result<(), String> {
    for entry in entries {
        let Some(report) = entry.analysis_report() else {
            continue;
        };
        let stem = Path::new(&entry.path)
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "image".to_string());
        write_json_file(&dir.join(format!("{stem}.json")), &report)?;
    }
    Ok(())
}

fn file_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string())
}
