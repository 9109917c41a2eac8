use sliding_windows::features::RawPixels;
use sliding_windows::image::ImageU8;
use sliding_windows::{ScanParams, WindowScanner};

fn main() {
    // Demo stub: scans a synthetic 8-bit gradient with the default parameters
    let w = 640usize;
    let h = 480usize;
    let gray: Vec<u8> = (0..h)
        .flat_map(|y| (0..w).map(move |x| ((x + y) / 5 % 256) as u8))
        .collect();
    let img = ImageU8::gray(w, h, &gray);

    let scanner = WindowScanner::new(ScanParams::default()).with_extractor(Box::new(RawPixels));
    match scanner.scan(img) {
        Ok(set) => println!(
            "windows={} scales={} elapsed_ms={:.3}",
            set.len(),
            set.num_scales(),
            set.elapsed_ms
        ),
        Err(err) => {
            eprintln!("Error: {err}");
            std::process::exit(1);
        }
    }
}
