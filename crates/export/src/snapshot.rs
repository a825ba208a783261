//! PNG snapshots of published textures (feature `png`).

use std::path::{Path, PathBuf};

use wavefield_core::{OceanError, Texture};

use crate::pixel::{texture_to_rgba, Encoding};

/// Writes `texture` as a PNG image under `encoding`.
///
/// Returns `ConfigInvalid` if the side overflows `u32`, or `Io` on encode or
/// write failure.
pub fn write_png(texture: &Texture, encoding: Encoding, path: &Path) -> Result<(), OceanError> {
    let rgba = texture_to_rgba(texture, encoding);
    let side = u32::try_from(texture.dimension())
        .map_err(|_| OceanError::config("dimension", "too large for an image"))?;
    let img = image::RgbaImage::from_raw(side, side, rgba)
        .ok_or_else(|| OceanError::Io("RGBA buffer size mismatch".into()))?;
    img.save(path)
        .map_err(|e| OceanError::Io(format!("{}: {e}", path.display())))
}

/// Writes one PNG per `(texture, encoding)` into `dir`, named by
/// [`Encoding::file_name`], and returns the paths written.
pub fn write_maps(
    dir: &Path,
    maps: &[(&Texture, Encoding)],
) -> Result<Vec<PathBuf>, OceanError> {
    std::fs::create_dir_all(dir).map_err(|e| OceanError::Io(format!("{}: {e}", dir.display())))?;
    maps.iter()
        .map(|&(texture, encoding)| {
            let path = dir.join(encoding.file_name());
            write_png(texture, encoding, &path)?;
            Ok(path)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use wavefield_core::Grid;

    #[test]
    fn write_png_round_trip() {
        let tex: Texture = Grid::from_fn(16, |row, _| [0.0, 0.0, row as f32, 1.0]).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("height.png");

        write_png(&tex, Encoding::Height, &path).unwrap();

        let img = image::open(&path).unwrap().to_rgba8();
        assert_eq!(img.width(), 16);
        assert_eq!(img.height(), 16);
        assert_eq!(img.get_pixel(0, 0).0, [0, 0, 0, 255]);
        assert_eq!(img.get_pixel(0, 15).0, [255, 255, 255, 255]);
    }

    #[test]
    fn write_png_to_missing_directory_is_io_error() {
        let tex: Texture = Grid::filled(16, [0.0, 0.0, 1.0, 0.0]).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("normal.png");
        assert!(matches!(
            write_png(&tex, Encoding::Normal, &path),
            Err(OceanError::Io(_))
        ));
    }

    #[test]
    fn write_maps_creates_directory_and_names_files() {
        let height: Texture = Grid::filled(16, [0.0, 0.0, 0.0, 1.0]).unwrap();
        let normal: Texture = Grid::filled(16, [0.0, 0.0, 1.0, 0.0]).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("frames");

        let written = write_maps(
            &out,
            &[
                (&height, Encoding::Height),
                (&normal, Encoding::Normal),
                (&height, Encoding::Displacement),
            ],
        )
        .unwrap();

        assert_eq!(written.len(), 3);
        for name in ["height.png", "normal.png", "displacement.png"] {
            assert!(out.join(name).is_file(), "{name} missing");
        }
    }
}
