use std::path::PathBuf;

use clap::Parser;
use yuv_frame_rs::image_pipeline::{
    ConversionConfig, PixelFormat, Point, TiffCompression, YuvToTiffPipeline, brightness,
    with_brightness,
};
use yuv_frame_rs::logger;

use tracing::{error, info};

#[derive(Parser)]
#[command(version, about = "Convert raw NV12/YUY2 camera frames to TIFF")]
struct Options {
    /// Raw frame file
    #[arg(short, long)]
    input: PathBuf,

    /// TIFF file to write
    #[arg(short, long, default_value = "output.tiff")]
    output: PathBuf,

    #[arg(long)]
    width: usize,

    #[arg(long)]
    height: usize,

    /// nv12 or yuy2
    #[arg(short, long, default_value = "nv12")]
    format: PixelFormat,

    /// Write RGB instead of RGBA
    #[arg(long)]
    ignore_alpha: bool,

    /// Decode rows in parallel
    #[arg(long)]
    parallel: bool,

    /// none, lzw, deflate-fast, deflate, deflate-best
    #[arg(long, default_value = "none")]
    compression: TiffCompression,

    /// Log the colour at X,Y of the decoded frame
    #[arg(long, value_parser = parse_point)]
    sample: Option<Point>,

    /// Adjust the sampled colour to this brightness
    #[arg(long, requires = "sample")]
    brightness: Option<f64>,

    /// Log per-step timings
    #[arg(long)]
    timings: bool,
}

fn parse_point(s: &str) -> Result<Point, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y, got {s}"))?;
    let x = x.trim().parse::<f64>().map_err(|e| e.to_string())?;
    let y = y.trim().parse::<f64>().map_err(|e| e.to_string())?;
    Ok(Point::new(x, y))
}

fn main() -> anyhow::Result<()> {
    logger::init();
    let options = Options::parse();

    let config = ConversionConfig::builder()
        .ignore_alpha(options.ignore_alpha)
        .parallel(options.parallel)
        .compression(options.compression)
        .build();
    let pipeline = YuvToTiffPipeline::new(options.format, config);

    info!(
        format = %options.format,
        width = options.width,
        height = options.height,
        "YUV to TIFF pipeline initialized"
    );

    let (image, timings) = match pipeline.convert_file_with_timings(
        &options.input,
        &options.output,
        options.width,
        options.height,
    ) {
        Ok(result) => result,
        Err(e) => {
            error!("Conversion failed: {}", e);
            return Err(e.into());
        }
    };
    info!("Conversion successful!");

    if options.timings {
        timings.log_summary();
    }

    if let Some(point) = options.sample {
        let color = image.color_at(point)?;
        info!(x = point.x, y = point.y, ?color, brightness = brightness(color), "Sampled colour");

        if let Some(target) = options.brightness {
            let adjusted = with_brightness(color, target)?;
            info!(?adjusted, brightness = brightness(adjusted), "Adjusted colour");
        }
    }

    Ok(())
}
