//! Launcher icon derivation.
//!
//! One source image is decoded once and resized to a fixed set of square
//! density variants, written as `mipmap-<density>/ic_launcher.png` under the
//! shell's resource directory.

use std::fs;
use std::path::Path;

use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat};

use crate::error::{Error, Result};

/// Density qualifier -> square pixel edge length of the derived launcher icon.
pub const DENSITIES: [(&str, u32); 5] = [
    ("mdpi", 48),
    ("hdpi", 72),
    ("xhdpi", 96),
    ("xxhdpi", 144),
    ("xxxhdpi", 192),
];

/// Outcome of one density variant.
#[derive(Debug)]
pub struct IconReport {
    pub density: &'static str,
    pub edge: u32,
    pub result: std::result::Result<(), Error>,
}

/// Derive all density variants of the launcher icon from `source`.
///
/// Failing to decode the source image aborts the stage. Densities are
/// processed independently afterwards: a failed resize or write is recorded in
/// its [`IconReport`] and does not prevent the remaining variants (no
/// rollback). Existing icons are overwritten.
pub fn derive_icons(source: &Path, res_dir: &Path) -> Result<Vec<IconReport>> {
    let image = image::open(source)?;
    tracing::debug!(
        "Deriving launcher icons from {} ({}x{})",
        source.display(),
        image.width(),
        image.height()
    );

    let mut reports = Vec::with_capacity(DENSITIES.len());
    for (density, edge) in DENSITIES {
        let result = write_variant(&image, edge, res_dir, density);
        if let Err(error) = &result {
            tracing::debug!("Icon variant {} failed: {}", density, error);
        }
        reports.push(IconReport {
            density,
            edge,
            result,
        });
    }

    Ok(reports)
}

fn write_variant(image: &DynamicImage, edge: u32, res_dir: &Path, density: &str) -> Result<()> {
    let mipmap_dir = res_dir.join(format!("mipmap-{}", density));
    fs::create_dir_all(&mipmap_dir)?;

    let resized = image.resize_exact(edge, edge, FilterType::Lanczos3);
    resized.save_with_format(mipmap_dir.join("ic_launcher.png"), ImageFormat::Png)?;

    Ok(())
}
