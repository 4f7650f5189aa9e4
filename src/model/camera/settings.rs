#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
	pub width: usize,
	pub height: usize,
}

/// Inclusive range of acceptable `width * height` for a preview size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelBudget {
	pub min: usize,
	pub max: usize,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PreviewRatios {
	pub width: f32,
	pub height: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectionResult {
	pub resolution: Resolution,
	pub ratios: PreviewRatios,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
	pub left: usize,
	pub top: usize,
	pub width: usize,
	pub height: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameFormat {
	/// YCrCb 4:2:0, full luma plane followed by interleaved chroma
	Nv21,
	Grey,
}
