use std::str::FromStr;

use crate::error::ParseError;
use crate::model::camera::settings::{FrameFormat, Resolution};

impl FrameFormat {
	/// Bytes occupied by one frame of this format.
	pub fn frame_len(&self, res: &Resolution) -> usize {
		match self {
			FrameFormat::Nv21 => res.pixels() + res.pixels() / 2,
			FrameFormat::Grey => res.pixels(),
		}
	}
}

impl Default for FrameFormat {
	fn default() -> Self {
		FrameFormat::Nv21
	}
}

impl FromStr for FrameFormat {
	type Err = ParseError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Ok(match s.to_lowercase().as_str() {
			"nv21" | "yuv" => FrameFormat::Nv21,
			"grey" | "gray" | "y8" => FrameFormat::Grey,
			_ => return Err(ParseError::UnknownFormat(s.to_string())),
		})
	}
}
