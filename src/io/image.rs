//! Tile loading, sheet slicing output and grid composition to PNG

use crate::io::configuration::{
    BACKGROUND_COLOR, MAX_CANVAS_DIMENSION, OUTPUT_PREFIX, OUTPUT_TIMESTAMP_FORMAT,
};
use crate::io::error::{AlgorithmError, Result, invalid_parameter};
use crate::spatial::grid::{GridSnapshot, Position};
use crate::spatial::tiles::{Tile, TileSet};
use image::{DynamicImage, Rgb, RgbImage, imageops::FilterType};
use ndarray::{Array3, ArrayView3};
use std::path::{Path, PathBuf};

/// Convert a decoded image to an RGB raster laid out as (row, column, channel)
///
/// # Errors
///
/// Returns an error if the pixel buffer does not match the image dimensions
pub fn raster_from_image(image: &DynamicImage) -> Result<Array3<u8>> {
    let rgb = image.to_rgb8();
    let (width, height) = rgb.dimensions();

    Array3::from_shape_vec((height as usize, width as usize, 3), rgb.into_raw()).map_err(|e| {
        AlgorithmError::InvalidTileSet {
            tile: None,
            reason: format!("pixel buffer does not match {width}x{height}: {e}"),
        }
    })
}

/// Read an image file as an RGB raster
///
/// # Errors
///
/// Returns an image load error if the file cannot be opened or decoded
pub fn load_raster(path: &Path, resize: Option<u32>) -> Result<Array3<u8>> {
    let image = image::open(path).map_err(|e| AlgorithmError::ImageLoad {
        path: path.to_path_buf(),
        source: e,
    })?;

    let image = match resize {
        Some(size) if image.width() != size || image.height() != size => {
            image.resize_exact(size, size, FilterType::Triangle)
        }
        _ => image,
    };

    raster_from_image(&image)
}

/// Load every `*.png` in a directory as a tile set, sorted by file name
///
/// Tiles are converted to RGB and, when `resize` is given, scaled to that
/// side length. Each tile is named after its file stem.
///
/// # Errors
///
/// Returns an error if:
/// - The directory cannot be read
/// - The directory holds no PNG files
/// - Any image fails to decode
/// - The resulting tiles do not form a valid tile set
pub fn load_tile_directory(dir: &Path, resize: Option<u32>, min_tiles: usize) -> Result<TileSet> {
    let entries = std::fs::read_dir(dir).map_err(|e| AlgorithmError::FileSystem {
        path: dir.to_path_buf(),
        operation: "read directory",
        source: e,
    })?;

    let mut paths = Vec::new();
    for entry in entries {
        let path = entry
            .map_err(|e| AlgorithmError::FileSystem {
                path: dir.to_path_buf(),
                operation: "read directory entry",
                source: e,
            })?
            .path();

        let is_png = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("png"));
        if is_png && path.is_file() {
            paths.push(path);
        }
    }
    paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    if paths.is_empty() {
        return Err(AlgorithmError::InvalidTileSet {
            tile: None,
            reason: format!("no PNG files found in {}", dir.display()),
        });
    }

    let mut tiles = Vec::with_capacity(paths.len());
    for path in &paths {
        let name = path
            .file_stem()
            .map_or_else(String::new, |stem| stem.to_string_lossy().into_owned());
        tiles.push(Tile::new(name, load_raster(path, resize)?));
    }

    let tile_set = TileSet::new(tiles, min_tiles)?;
    tracing::info!(
        dir = %dir.display(),
        tiles = tile_set.len(),
        size = tile_set.tile_size(),
        "loaded tiles"
    );
    Ok(tile_set)
}

/// Convert a raster to an RGB image, replicating single-channel data
pub fn raster_to_image(raster: &ArrayView3<'_, u8>) -> RgbImage {
    let (rows, cols, channels) = raster.dim();
    RgbImage::from_fn(cols as u32, rows as u32, |x, y| {
        let pixel = |c: usize| {
            let channel = if channels >= 3 { c } else { 0 };
            raster
                .get((y as usize, x as usize, channel))
                .copied()
                .unwrap_or(0)
        };
        Rgb([pixel(0), pixel(1), pixel(2)])
    })
}

fn create_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| AlgorithmError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }
    Ok(())
}

fn save_image(image: &RgbImage, path: &Path) -> Result<()> {
    create_parent_dir(path)?;
    image.save(path).map_err(|e| AlgorithmError::ImageExport {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Save every tile as `<name>.png` in `dir`, returning the written paths
///
/// # Errors
///
/// Returns an error if the directory cannot be created or a file cannot be written
pub fn save_tile_set(tiles: &TileSet, dir: &Path) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir).map_err(|e| AlgorithmError::FileSystem {
        path: dir.to_path_buf(),
        operation: "create directory",
        source: e,
    })?;

    let mut written = Vec::with_capacity(tiles.len());
    for tile in tiles.iter() {
        let path = dir.join(format!("{}.png", tile.name()));
        save_image(&raster_to_image(&tile.raster().view()), &path)?;
        written.push(path);
    }
    Ok(written)
}

/// Draw decided cells with their tile and fill the rest with the background colour
///
/// # Errors
///
/// Returns an error if:
/// - Either side of the image would exceed the maximum canvas dimension
/// - The snapshot references a tile missing from `tiles`
pub fn compose_grid_image(snapshot: &GridSnapshot, tiles: &TileSet) -> Result<RgbImage> {
    let size = tiles.tile_size();
    let width = snapshot.width().saturating_mul(size);
    let height = snapshot.height().saturating_mul(size);
    if width > MAX_CANVAS_DIMENSION || height > MAX_CANVAS_DIMENSION {
        return Err(invalid_parameter(
            "canvas",
            &format!("{width}x{height}"),
            &format!("image sides must not exceed {MAX_CANVAS_DIMENSION} pixels"),
        ));
    }
    let mut canvas = RgbImage::from_pixel(width as u32, height as u32, Rgb(BACKGROUND_COLOR));

    for (position, cell) in snapshot.iter() {
        let Some(index) = cell else { continue };
        let tile = tiles.get(index).ok_or(AlgorithmError::InvalidTileIndex {
            index,
            tile_count: tiles.len(),
        })?;
        draw_tile(&mut canvas, tile, position, size);
    }

    Ok(canvas)
}

fn draw_tile(canvas: &mut RgbImage, tile: &Tile, position: Position, size: usize) {
    let tile_image = raster_to_image(&tile.raster().view());
    let origin_x = (position.x * size) as u32;
    let origin_y = (position.y * size) as u32;

    for (x, y, pixel) in tile_image.enumerate_pixels() {
        if let Some(target) = canvas.get_pixel_mut_checked(origin_x + x, origin_y + y) {
            *target = *pixel;
        }
    }
}

/// Compose the grid and save it as a PNG
///
/// # Errors
///
/// Returns an error if:
/// - No cell of the snapshot is decided
/// - The snapshot references an unknown tile
/// - The parent directory cannot be created or the image cannot be saved
pub fn export_grid_as_png(snapshot: &GridSnapshot, tiles: &TileSet, path: &Path) -> Result<()> {
    if snapshot.decided_count() == 0 {
        return Err(AlgorithmError::InvalidParameter {
            parameter: "snapshot",
            value: format!("{}x{}", snapshot.width(), snapshot.height()),
            reason: "no cell has been decided".to_string(),
        });
    }

    let image = compose_grid_image(snapshot, tiles)?;
    save_image(&image, path)?;

    tracing::info!(path = %path.display(), "saved grid image");
    Ok(())
}

/// Output path `dir/wfc_YYMMDD_HHMM.<extension>` stamped with local time
pub fn timestamped_output_path(dir: &Path, extension: &str) -> PathBuf {
    let stamp = chrono::Local::now().format(OUTPUT_TIMESTAMP_FORMAT);
    dir.join(format!("{OUTPUT_PREFIX}{stamp}.{extension}"))
}
