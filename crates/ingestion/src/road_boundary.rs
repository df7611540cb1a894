//! Road boundary camera images and segmentation masks

use std::path::Path;

use contracts::{Result, SensorError};
use image::{DynamicImage, RgbImage};

/// Load a road camera image as 8-bit RGB
pub fn load_road_boundary_image(path: &Path) -> Result<RgbImage> {
    Ok(open_image(path)?.into_rgb8())
}

/// Load a road boundary mask as 8-bit RGB
///
/// Channels are kept as stored: classified masks encode the class in the
/// colour, and a faint value in any one channel still marks the boundary.
pub fn load_road_boundary_mask(path: &Path) -> Result<RgbImage> {
    Ok(open_image(path)?.into_rgb8())
}

fn open_image(path: &Path) -> Result<DynamicImage> {
    if !path.is_file() {
        return Err(SensorError::not_found(path));
    }
    image::open(path).map_err(|e| SensorError::decode(path, e))
}

/// A camera image with its matching mask
#[derive(Debug, Clone)]
pub struct RoadBoundarySample {
    pub image: RgbImage,
    pub mask: RgbImage,
}

impl RoadBoundarySample {
    /// Load an image/mask pair; both must have the same dimensions
    pub fn load(image_path: &Path, mask_path: &Path) -> Result<Self> {
        let image = load_road_boundary_image(image_path)?;
        let mask = load_road_boundary_mask(mask_path)?;
        if image.dimensions() != mask.dimensions() {
            return Err(SensorError::shape(format!(
                "image is {:?} but mask is {:?}",
                image.dimensions(),
                mask.dimensions()
            )));
        }
        Ok(Self { image, mask })
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }
}
