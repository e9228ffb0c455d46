use std::{path::PathBuf, time::Duration};

use anyhow::{anyhow, Result};
use clap::Parser;
use eframe::egui;
use rand::seq::SliceRandom;

use imageslider::app::{ImageSliderApp, STATUS_BAR_HEIGHT};
use imageslider::fs_utils::collect_images;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum SortOrder {
    Filename,
    Randomize,
    Modified,
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Drag-to-scroll image slider")]
struct Args {
    /// Directory that contains the images to show
    #[arg(value_name = "DIRECTORY")]
    directory: PathBuf,

    /// Width of the drawing surface in logical pixels
    #[arg(long, default_value_t = 640)]
    width: u32,

    /// Height of the drawing surface in logical pixels
    #[arg(long, default_value_t = 400)]
    height: u32,

    /// Give up on loading after this many seconds
    #[arg(short, long, default_value_t = 30)]
    timeout: u64,

    /// Recurse into subdirectories to find images (disabled by default)
    #[arg(short = 'r', long = "recursive", default_value_t = false)]
    recursive: bool,

    /// Invert order of shown images (ignored for randomize)
    #[arg(short = 'i', long = "inverse-order", default_value_t = false)]
    inverse: bool,

    /// Order in which images are shown
    #[arg(short = 'o', long, value_enum, default_value_t = SortOrder::Filename)]
    order: SortOrder,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let mut files = collect_images(&args.directory, args.recursive)?;
    if files.is_empty() {
        return Err(anyhow!(
            "No supported image files found in {}. Supported formats are: {}",
            args.directory.display(),
            imageslider::fs_utils::SUPPORTED_EXTENSIONS.join(", ")
        ));
    }
    match args.order {
        SortOrder::Filename => files.sort(),
        SortOrder::Randomize => files.shuffle(&mut rand::thread_rng()),
        SortOrder::Modified => files.sort_by_key(|path| {
            std::fs::metadata(path).and_then(|m| m.modified()).ok()
        }),
    }
    if args.inverse && args.order != SortOrder::Randomize {
        files.reverse();
    }

    let viewport = egui::vec2(args.width as f32, args.height as f32);
    let timeout = Duration::from_secs(args.timeout);

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(egui::vec2(viewport.x, viewport.y + STATUS_BAR_HEIGHT))
            .with_resizable(false),
        ..Default::default()
    };

    eframe::run_native(
        "ImageSlider",
        native_options,
        Box::new(move |_cc| {
            Ok(Box::new(ImageSliderApp::new(files, viewport, timeout)) as Box<dyn eframe::App>)
        }),
    )?;

    Ok(())
}
