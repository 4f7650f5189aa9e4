use crate::model::camera::settings::{PreviewRatios, Rect};

/// Scales an on-screen rectangle into preview pixels, truncating toward zero.
///
/// The result is not clamped to the preview frame; the decoder rejects crops that
/// fall outside it.
pub fn map_to_preview(on_screen: Rect, ratios: PreviewRatios) -> Rect {
	Rect {
		left: scale(on_screen.left, ratios.width),
		top: scale(on_screen.top, ratios.height),
		width: scale(on_screen.width, ratios.width),
		height: scale(on_screen.height, ratios.height),
	}
}

fn scale(value: usize, ratio: f32) -> usize {
	(value as f32 * ratio) as usize
}
