use rqrr::PreparedImage;

use crate::error::DecodeError;
use crate::model::camera::settings::Rect;
use crate::model::frame::Frame;

/// Decodes the first readable QR code inside `crop` (preview pixels) of the frame's luminance plane.
pub fn decode(frame: &Frame, crop: Rect) -> Result<String, DecodeError> {
	if crop.is_empty() {
		return Err(DecodeError::EmptyCrop(crop));
	}
	if !crop.fits_within(&frame.resolution) {
		return Err(DecodeError::CropOutOfBounds {
			crop,
			frame: frame.resolution,
		});
	}

	let stride = frame.resolution.width;
	let luminance = frame.luminance();
	let mut img = PreparedImage::prepare_from_greyscale(crop.width, crop.height, |x, y| {
		luminance[(crop.top + y) * stride + crop.left + x]
	});

	let mut last_err = None;
	for grid in img.detect_grids() {
		match grid.decode() {
			Ok((_, content)) => return Ok(content),
			Err(e) => last_err = Some(e),
		}
	}

	return Err(match last_err {
		Some(e) => DecodeError::Unreadable(e.to_string()),
		None => DecodeError::NotFound,
	});
}
