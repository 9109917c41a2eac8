use sliding_windows::config::scan::{self, FeatureConfig, RuntimeConfig};
use sliding_windows::features::RawPixels;
use sliding_windows::image::io::{load_image, save_overlay, write_json_file};
use sliding_windows::types::WindowRect;
use sliding_windows::{WindowScanner, WindowSet};
use std::env;
use std::path::Path;

const OVERLAY_COLOR: [u8; 3] = [255, 0, 0];

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config = scan::load_config(Path::new(&config_path))?;

    let image = load_image(&config.input)?;
    let mut scanner = WindowScanner::new(config.params.clone());
    if config.features == FeatureConfig::RawPixels {
        scanner = scanner.with_extractor(Box::new(RawPixels));
    }

    let set = scanner
        .scan(image.as_view())
        .map_err(|e| format!("Scan of {} failed: {e}", config.input.display()))?;

    print_text_summary(&config, &set);

    match &config.output.json_out {
        Some(path) => {
            write_json_file(path, &set)?;
            println!("JSON report written to {}", path.display());
        }
        None => {
            let json = serde_json::to_string_pretty(&set)
                .map_err(|e| format!("Failed to serialize JSON: {e}"))?;
            println!("\nJSON report:\n{json}");
        }
    }

    if let Some(path) = &config.output.overlay {
        let rects: Vec<WindowRect> = match config.output.overlay_scale {
            Some(s) => set.windows_at_scale(s).map(|w| w.rect).collect(),
            None => set.rects(),
        };
        save_overlay(path, image.as_view(), &rects, OVERLAY_COLOR)?;
        println!("Overlay with {} windows written to {}", rects.len(), path.display());
    }

    Ok(())
}

fn print_text_summary(config: &RuntimeConfig, set: &WindowSet) {
    let p = &config.params;
    println!("Sliding-window summary");
    println!("  input: {}", config.input.display());
    println!(
        "  window: {}x{} (rows x cols), ratio {:.3}, stride {}, max scales {}",
        p.win_rows, p.win_cols, p.scale_ratio, p.stride, p.max_num_scales
    );
    println!("  windows: {} (capacity hint {})", set.len(), set.capacity_hint);
    println!("  features: {}", set.features().len());
    println!("  elapsed_ms: {:.3}", set.elapsed_ms);
    for level in &set.levels {
        println!("    {}", level.summary());
    }
}

fn usage() -> String {
    "Usage: slide_demo <config.json>".to_string()
}
