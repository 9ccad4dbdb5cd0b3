use argh::FromArgs;
use std::path::{Path, PathBuf};

use canny::image::PixelBuffer;
use canny::imgproc::canny::{canny_stages, CannyConfig, Thresholds};
use canny::io::{functional as F, png};

#[derive(FromArgs)]
/// Detect the edges of an image and write them as a binary PNG mask
struct Args {
    /// path to an input image
    #[argh(option, short = 'i')]
    image_path: PathBuf,

    /// path to the output PNG file
    #[argh(option, short = 'o')]
    output_path: PathBuf,

    /// path to a JSON file with the pipeline configuration
    #[argh(option)]
    config: Option<PathBuf>,

    /// standard deviation of the gaussian kernel
    #[argh(option)]
    sigma: Option<f64>,

    /// number of taps of the gaussian kernel (odd)
    #[argh(option)]
    kernel_length: Option<usize>,

    /// magnitude above which a ridge pixel seeds an edge
    #[argh(option)]
    high: Option<u8>,

    /// magnitude above which an edge is extended from a seed
    #[argh(option)]
    low: Option<u8>,

    /// directory where every intermediate stage is written
    #[argh(option)]
    stages_dir: Option<PathBuf>,
}

fn load_config(args: &Args) -> Result<CannyConfig, Box<dyn std::error::Error>> {
    let mut config = match &args.config {
        Some(path) => serde_json::from_str(&std::fs::read_to_string(path)?)?,
        None => CannyConfig::default(),
    };

    if let Some(sigma) = args.sigma {
        config = config.with_sigma(sigma);
    }
    if let Some(kernel_length) = args.kernel_length {
        config = config.with_kernel_length(kernel_length);
    }
    let thresholds = Thresholds {
        high: args.high.unwrap_or(config.thresholds.high),
        low: args.low.unwrap_or(config.thresholds.low),
    };
    config = config.with_thresholds(thresholds);

    config.validate()?;
    Ok(config)
}

fn write_stages(
    dir: &Path,
    stages: &[(&str, &PixelBuffer)],
) -> Result<(), Box<dyn std::error::Error>> {
    std::fs::create_dir_all(dir)?;
    for (name, image) in stages {
        let path = dir.join(format!("{name}.png"));
        png::write_image_png_mono8(&path, image)?;
        log::debug!("wrote {}", path.display());
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args: Args = argh::from_env();

    let config = load_config(&args)?;
    log::info!("{config:?}");

    // read the image as grayscale
    let gray = F::read_image_any_mono8(&args.image_path)?;
    log::info!("read {} ({})", args.image_path.display(), gray.size());

    let stages = canny_stages(&gray, &config, |stage| log::info!("{stage}"))?;

    png::write_image_png_mono8(&args.output_path, &stages.edges)?;
    log::info!("wrote {}", args.output_path.display());

    if let Some(dir) = &args.stages_dir {
        write_stages(
            dir,
            &[
                ("smoothed_x", &stages.smoothed_x),
                ("smoothed_y", &stages.smoothed_y),
                ("dx", &stages.dx),
                ("dy", &stages.dy),
                ("magnitude", &stages.magnitude),
                ("suppressed", &stages.suppressed),
                ("edges", &stages.edges),
            ],
        )?;
    }

    Ok(())
}
