//! I/O helpers for scalar fields and JSON.
//!
//! - `load_grayscale_field`: read a PNG/JPEG into a field with values in `[0, 1]`.
//! - `save_grayscale_field`: write a field to a grayscale PNG.
//! - `write_json_file`: pretty-print a serializable value to disk.
use super::{GridView, ScalarField};
use image::{GrayImage, Luma};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Load an image from disk, convert to 8-bit grayscale and rescale to `[0, 1]`.
pub fn load_grayscale_field(path: &Path) -> Result<ScalarField, String> {
    let img = image::open(path)
        .map_err(|e| format!("Failed to open {}: {e}", path.display()))?
        .into_luma8();
    let width = img.width() as usize;
    let height = img.height() as usize;
    let data = img.into_raw().into_iter().map(|v| v as f64 / 255.0).collect();
    ScalarField::from_vec(width, height, data).map_err(|e| e.to_string())
}

/// Save a field to a grayscale PNG, clamping values to `[0, 1]` first.
pub fn save_grayscale_field(field: &ScalarField, path: &Path) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let mut out = GrayImage::new(field.w as u32, field.h as u32);
    for (y, row) in field.rows().enumerate() {
        for (x, &px) in row.iter().enumerate() {
            let v = (px.clamp(0.0, 1.0) * 255.0).round();
            out.put_pixel(x as u32, y as u32, Luma([v as u8]));
        }
    }
    out.save(path)
        .map_err(|e| format!("Failed to save {}: {e}", path.display()))
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| format!("Failed to serialize JSON for {}: {e}", path.display()))?;
    fs::write(path, json).map_err(|e| format!("Failed to write JSON {}: {e}", path.display()))
}

fn ensure_parent_dir(path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create {}: {e}", parent.display()))?;
        }
    }
    Ok(())
}
