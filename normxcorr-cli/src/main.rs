//! Command-line front end for normxcorr.
//!
//! Loads a template and a search image, runs the match, and reports the best
//! offset. Rendering lives here, not in the core: the correlation surface can
//! be written as a grayscale PNG (negative scores clamp to zero when
//! quantizing, a documented lossy step) and the match rectangle can be drawn
//! onto a copy of the search image.

use clap::Parser;
use image::GrayImage;
use normxcorr::{load_gray_raster, match_template, CorrelationSurface, MatchResult, Raster};
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "FFT-based normalized cross-correlation template matcher")]
struct Cli {
    /// Template image (the patch to locate).
    #[arg(short, long, value_name = "FILE")]
    template: PathBuf,
    /// Search image (the image to locate the template in).
    #[arg(short, long, value_name = "FILE")]
    search: PathBuf,
    /// Write the correlation surface as a grayscale PNG.
    #[arg(long, value_name = "FILE")]
    surface: Option<PathBuf>,
    /// Write the search image with the match rectangle drawn.
    #[arg(long, value_name = "FILE")]
    mark: Option<PathBuf>,
    /// Emit the result as JSON instead of the text report.
    #[arg(long)]
    json: bool,
    /// Enable tracing output for performance profiling.
    #[arg(long)]
    trace: bool,
}

#[derive(Debug, Serialize)]
struct Report {
    col: usize,
    row: usize,
    score: f32,
    surface_width: usize,
    surface_height: usize,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    if cli.trace {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .init();
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let template = load_gray_raster(&cli.template)?;
    let search = load_gray_raster(&cli.search)?;

    let (surface, peak) = match_template(&template, &search)?;

    if let Some(path) = &cli.surface {
        write_surface_png(&surface, path)?;
    }
    if let Some(path) = &cli.mark {
        write_marked_png(&search, &template, peak, path)?;
    }

    if cli.json {
        let report = Report {
            col: peak.x,
            row: peak.y,
            score: peak.score,
            surface_width: surface.width(),
            surface_height: surface.height(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        // The text report follows the historical convention of clamping the
        // score into [0, 1]; the JSON output carries the signed value.
        let clamped = peak.score.clamp(0.0, 1.0);
        println!(
            "Match Coords: ({},{}) And Score In Range 0 to 1: ({clamped:.4})",
            peak.x, peak.y
        );
    }
    Ok(())
}

/// Quantizes the surface to 8-bit grayscale. Negative scores clamp to zero.
fn write_surface_png(
    surface: &CorrelationSurface,
    path: &PathBuf,
) -> Result<(), Box<dyn std::error::Error>> {
    let pixels: Vec<u8> = surface
        .scores()
        .iter()
        .map(|&v| (v.clamp(0.0, 1.0) * 255.0).round() as u8)
        .collect();
    let img = GrayImage::from_raw(surface.width() as u32, surface.height() as u32, pixels)
        .ok_or("surface buffer does not match its dimensions")?;
    img.save(path)?;
    Ok(())
}

/// Draws the match rectangle onto a copy of the search image.
fn write_marked_png(
    search: &Raster,
    template: &Raster,
    peak: MatchResult,
    path: &PathBuf,
) -> Result<(), Box<dyn std::error::Error>> {
    let width = search.width();
    let height = search.height();
    let mut pixels: Vec<u8> = search
        .as_slice()
        .iter()
        .map(|&v| (v.clamp(0.0, 1.0) * 255.0).round() as u8)
        .collect();

    let x1 = (peak.x + template.width()).min(width).saturating_sub(1);
    let y1 = (peak.y + template.height()).min(height).saturating_sub(1);
    for x in peak.x..=x1 {
        pixels[peak.y * width + x] = 255;
        pixels[y1 * width + x] = 255;
    }
    for y in peak.y..=y1 {
        pixels[y * width + peak.x] = 255;
        pixels[y * width + x1] = 255;
    }

    let img = GrayImage::from_raw(width as u32, height as u32, pixels)
        .ok_or("search buffer does not match its dimensions")?;
    img.save(path)?;
    Ok(())
}
