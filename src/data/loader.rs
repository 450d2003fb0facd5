use std::path::Path;

use anyhow::{Context, Result, anyhow, bail};
use image::{DynamicImage, ImageFormat, RgbaImage};
use resvg::usvg;

/// Largest RGBA buffer an SVG may rasterise into (same cap as `image::Limits`).
const MAX_SVG_BYTES: u64 = 512 * 1024 * 1024;

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Decode an image file.  Dispatch by extension.
///
/// * `.svg` – rasterised at its intrinsic size with resvg
/// * anything else – sniffed and decoded by the `image` crate
pub fn load_image(path: &Path) -> Result<DynamicImage> {
    let is_svg = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("svg"));

    if is_svg {
        load_svg(path)
    } else {
        load_raster(path)
    }
}

/// Re-encode `image` to `path`, format taken from the extension.
pub fn save_image(image: &DynamicImage, path: &Path) -> Result<()> {
    let format = ImageFormat::from_path(path)
        .with_context(|| format!("no encoder for {}", path.display()))?;

    // JPEG has no alpha channel
    let encodable = match format {
        ImageFormat::Jpeg => DynamicImage::ImageRgb8(image.to_rgb8()),
        _ => image.clone(),
    };

    encodable
        .save_with_format(path, format)
        .with_context(|| format!("writing {}", path.display()))
}

// ---------------------------------------------------------------------------
// Raster loader
// ---------------------------------------------------------------------------

fn load_raster(path: &Path) -> Result<DynamicImage> {
    let reader = image::ImageReader::open(path)
        .with_context(|| format!("opening {}", path.display()))?
        .with_guessed_format()
        .context("sniffing image format")?;

    reader
        .decode()
        .with_context(|| format!("decoding {}", path.display()))
}

// ---------------------------------------------------------------------------
// SVG loader
// ---------------------------------------------------------------------------

fn load_svg(path: &Path) -> Result<DynamicImage> {
    let data = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let tree = usvg::Tree::from_data(&data, &usvg::Options::default())
        .with_context(|| format!("parsing SVG {}", path.display()))?;

    let size = tree.size().to_int_size();
    let (width, height) = (size.width(), size.height());

    let bytes = u64::from(width) * u64::from(height) * 4;
    if bytes > MAX_SVG_BYTES {
        bail!("SVG canvas {width}x{height} needs {bytes} bytes, limit is {MAX_SVG_BYTES}");
    }

    let mut pixmap = tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| anyhow!("SVG has empty dimensions ({width}x{height})"))?;
    resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());

    // tiny-skia stores premultiplied alpha
    let mut rgba = Vec::with_capacity(pixmap.data().len());
    for px in pixmap.pixels() {
        let c = px.demultiply();
        rgba.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
    }

    let buffer = RgbaImage::from_raw(width, height, rgba)
        .context("SVG pixel buffer has unexpected length")?;
    Ok(DynamicImage::ImageRgba8(buffer))
}
