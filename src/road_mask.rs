//! Terrain lookup over the road mask bitmap.
//!
//! The mask is decoded once at startup into a grid of [`Terrain`] values and
//! never changes afterwards.

use crate::error::SimError;
use crate::types::Point;
use log::info;
use macroquad::texture::Image;
use std::fs;
use std::path::Path;

const BLOCKED_RGBA: [u8; 4] = [0, 0, 0, 255];
const REFUEL_RGBA: [u8; 4] = [0, 255, 0, 255];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Terrain {
    Drivable,
    Blocked,
    RefuelZone,
}

impl Terrain {
    /// Exact black is a wall, exact green a refuel pad, anything else is road.
    pub fn from_rgba(pixel: [u8; 4]) -> Self {
        match pixel {
            BLOCKED_RGBA => Terrain::Blocked,
            REFUEL_RGBA => Terrain::RefuelZone,
            _ => Terrain::Drivable,
        }
    }

    pub fn is_blocked(self) -> bool {
        self == Terrain::Blocked
    }
}

#[derive(Debug, Clone)]
pub struct RoadMask {
    width: usize,
    height: usize,
    cells: Vec<Terrain>,
}

impl RoadMask {
    /// Builds a mask from tightly packed RGBA8 rows.
    pub fn from_rgba(width: usize, height: usize, bytes: &[u8]) -> Result<Self, SimError> {
        if width == 0 || height == 0 {
            return Err(SimError::MaskDimensions { width, height });
        }
        let expected = width * height * 4;
        if bytes.len() != expected {
            return Err(SimError::MaskBufferSize {
                expected,
                actual: bytes.len(),
            });
        }

        let cells: Vec<Terrain> = bytes
            .chunks_exact(4)
            .map(|px| Terrain::from_rgba([px[0], px[1], px[2], px[3]]))
            .collect();

        let mask = RoadMask {
            width,
            height,
            cells,
        };
        crate::debug_terrain!(
            "Mask classified: {} blocked, {} refuel pixels",
            mask.count(Terrain::Blocked),
            mask.count(Terrain::RefuelZone)
        );
        Ok(mask)
    }

    pub fn from_image(image: &Image) -> Result<Self, SimError> {
        RoadMask::from_rgba(image.width as usize, image.height as usize, &image.bytes)
    }

    /// Reads and decodes a mask file in one go.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SimError> {
        let image = load_mask_image(path)?;
        RoadMask::from_image(&image)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Map extents as a world-space size.
    pub fn size(&self) -> Point {
        Point::new(self.width as f64, self.height as f64)
    }

    /// Classifies the terrain under `point`. Anything off the map, NaN
    /// included, is a wall.
    pub fn classify(&self, point: Point) -> Terrain {
        let in_x = point.x >= 0.0 && point.x < self.width as f64;
        let in_y = point.y >= 0.0 && point.y < self.height as f64;
        if !(in_x && in_y) {
            return Terrain::Blocked;
        }
        let (px, py) = (point.x as usize, point.y as usize);
        self.cells[py * self.width + px]
    }

    fn count(&self, terrain: Terrain) -> usize {
        self.cells.iter().filter(|&&t| t == terrain).count()
    }
}

/// Decodes an encoded image (PNG) held in memory. `origin` only names the
/// source in error messages.
pub fn decode_mask_image(bytes: &[u8], origin: &str) -> Result<Image, SimError> {
    let image = Image::from_file_with_format(bytes, None).map_err(|e| SimError::MaskDecode {
        origin: origin.to_string(),
        message: e.to_string(),
    })?;
    info!(
        "Road mask '{}' decoded: {}x{} pixels",
        origin, image.width, image.height
    );
    Ok(image)
}

pub fn load_mask_image(path: impl AsRef<Path>) -> Result<Image, SimError> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|source| SimError::MaskRead {
        path: path.to_path_buf(),
        source,
    })?;
    decode_mask_image(&bytes, &path.display().to_string())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) const ROAD: [u8; 4] = [128, 128, 128, 255];
    pub(crate) const WALL: [u8; 4] = BLOCKED_RGBA;
    pub(crate) const PAD: [u8; 4] = REFUEL_RGBA;

    /// Builds a mask pixel by pixel from a painter closure.
    pub(crate) fn paint_mask(
        width: usize,
        height: usize,
        paint: impl Fn(usize, usize) -> [u8; 4],
    ) -> RoadMask {
        let mut bytes = Vec::with_capacity(width * height * 4);
        for y in 0..height {
            for x in 0..width {
                bytes.extend_from_slice(&paint(x, y));
            }
        }
        RoadMask::from_rgba(width, height, &bytes).unwrap()
    }

    #[test]
    fn test_color_classes() {
        assert_eq!(Terrain::from_rgba(WALL), Terrain::Blocked);
        assert_eq!(Terrain::from_rgba(PAD), Terrain::RefuelZone);
        assert_eq!(Terrain::from_rgba(ROAD), Terrain::Drivable);
        // Near-black and near-green are still road
        assert_eq!(Terrain::from_rgba([1, 0, 0, 255]), Terrain::Drivable);
        assert_eq!(Terrain::from_rgba([0, 254, 0, 255]), Terrain::Drivable);
        assert_eq!(Terrain::from_rgba([0, 0, 0, 128]), Terrain::Drivable);
    }

    #[test]
    fn test_classify_samples_truncated_pixel() {
        let mask = paint_mask(4, 3, |x, y| match (x, y) {
            (1, 1) => WALL,
            (2, 1) => PAD,
            _ => ROAD,
        });
        assert_eq!(mask.classify(Point::new(1.9, 1.2)), Terrain::Blocked);
        assert_eq!(mask.classify(Point::new(2.0, 1.99)), Terrain::RefuelZone);
        assert_eq!(mask.classify(Point::new(0.5, 0.5)), Terrain::Drivable);
        assert_eq!(mask.classify(Point::new(3.99, 2.99)), Terrain::Drivable);
    }

    #[test]
    fn test_out_of_bounds_is_blocked() {
        let mask = paint_mask(4, 3, |_, _| ROAD);
        assert_eq!(mask.classify(Point::new(-0.1, 1.0)), Terrain::Blocked);
        assert_eq!(mask.classify(Point::new(1.0, -0.1)), Terrain::Blocked);
        assert_eq!(mask.classify(Point::new(4.0, 1.0)), Terrain::Blocked);
        assert_eq!(mask.classify(Point::new(1.0, 3.0)), Terrain::Blocked);
        assert_eq!(mask.classify(Point::new(f64::NAN, 1.0)), Terrain::Blocked);
    }

    #[test]
    fn test_size() {
        let mask = paint_mask(7, 5, |_, _| ROAD);
        assert_eq!(mask.width(), 7);
        assert_eq!(mask.height(), 5);
        assert_eq!(mask.size(), Point::new(7.0, 5.0));
    }

    #[test]
    fn test_rejects_bad_buffers() {
        assert!(matches!(
            RoadMask::from_rgba(0, 4, &[]),
            Err(SimError::MaskDimensions { width: 0, height: 4 })
        ));
        assert!(matches!(
            RoadMask::from_rgba(2, 2, &[0; 15]),
            Err(SimError::MaskBufferSize {
                expected: 16,
                actual: 15
            })
        ));
    }

    #[test]
    fn test_from_image() {
        let mut bytes = vec![0u8; 3 * 2 * 4];
        bytes[4..8].copy_from_slice(&PAD);
        bytes[8..12].copy_from_slice(&ROAD);
        let image = Image {
            bytes,
            width: 3,
            height: 2,
        };
        let mask = RoadMask::from_image(&image).unwrap();
        assert_eq!(mask.classify(Point::new(0.0, 0.0)), Terrain::Drivable); // transparent black
        assert_eq!(mask.classify(Point::new(1.0, 0.0)), Terrain::RefuelZone);
        assert_eq!(mask.classify(Point::new(2.0, 0.0)), Terrain::Drivable);
    }

    #[test]
    fn test_load_missing_file() {
        let err = RoadMask::load("/definitely/not/here/mask.png").unwrap_err();
        assert!(matches!(err, SimError::MaskRead { .. }));
    }

    #[test]
    fn test_bundled_track() {
        let bytes = include_bytes!("../assets/track_mask.png");
        let image = decode_mask_image(bytes, "track_mask.png").unwrap();
        let mask = RoadMask::from_image(&image).unwrap();
        assert_eq!(mask.size(), Point::new(3000.0, 2258.0));
        let start = Point::new(crate::config::START_X, crate::config::START_Y);
        assert_eq!(mask.classify(start), Terrain::Drivable);
        assert_eq!(mask.classify(Point::new(1500.0, 2070.0)), Terrain::RefuelZone);
        assert_eq!(mask.classify(Point::new(100.0, 100.0)), Terrain::Blocked);
    }

    #[test]
    fn test_decode_garbage() {
        let err = decode_mask_image(b"not an image", "garbage").unwrap_err();
        assert!(matches!(err, SimError::MaskDecode { .. }));
    }
}
