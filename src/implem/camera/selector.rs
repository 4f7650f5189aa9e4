use crate::error::{Error, Result};
use crate::model::camera::settings::{PixelBudget, PreviewRatios, Resolution, SelectionResult};

/// Picks the preview size whose aspect ratio is closest to the screen's.
///
/// Candidates are visited largest first and must fall within [`PixelBudget::PREVIEW`].
/// A candidate that matches the screen exactly (once laid out landscape) wins outright
/// with unit ratios. When nothing is eligible, `fallback` (the camera's current preview
/// size) is used as is.
pub fn select(candidates: &[Resolution], screen: Resolution, fallback: Option<Resolution>) -> Result<SelectionResult> {
	let mut sorted = candidates.to_vec();
	// sort_by is stable, equal pixel counts keep the reported order
	sorted.sort_by(|l, r| r.pixels().cmp(&l.pixels()));

	let screen_aspect = screen.aspect_ratio();
	let mut best: Option<Resolution> = None;
	let mut diff = f32::INFINITY;

	for candidate in sorted {
		if !PixelBudget::PREVIEW.contains(&candidate) {
			continue;
		}

		let oriented = candidate.oriented();
		if oriented == screen {
			return Ok(SelectionResult {
				resolution: candidate,
				ratios: PreviewRatios::UNIT,
			});
		}

		let new_diff = (oriented.aspect_ratio() - screen_aspect).abs();
		if new_diff < diff {
			best = Some(candidate);
			diff = new_diff;
		}
	}

	let resolution = best.or(fallback).ok_or(Error::NoUsableResolution)?;

	return Ok(SelectionResult {
		resolution,
		ratios: PreviewRatios::between(&resolution, &screen),
	});
}

impl PreviewRatios {
	pub const UNIT: PreviewRatios = PreviewRatios {
		width: 1.0,
		height: 1.0,
	};

	/// Scale from screen pixels to `preview` pixels, using the preview's native layout.
	pub fn between(preview: &Resolution, screen: &Resolution) -> Self {
		PreviewRatios {
			width: preview.width as f32 / screen.width as f32,
			height: preview.height as f32 / screen.height as f32,
		}
	}
}
