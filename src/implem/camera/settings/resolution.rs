use std::fmt;
use std::str::FromStr;

use crate::error::ParseError;
use crate::model::camera::settings::Resolution;

impl Resolution {
	pub fn new(width: usize, height: usize) -> Self {
		Resolution { width, height }
	}

	pub fn pixels(&self) -> usize {
		self.width * self.height
	}

	pub fn is_portrait(&self) -> bool {
		self.width < self.height
	}

	/// The same size laid out landscape, which is how preview buffers are delivered.
	pub fn oriented(&self) -> Resolution {
		if self.is_portrait() {
			Resolution::new(self.height, self.width)
		} else {
			*self
		}
	}

	pub fn aspect_ratio(&self) -> f32 {
		self.width as f32 / self.height as f32
	}
}

impl Default for Resolution {
	fn default() -> Self {
		Resolution {
			width: 1280,
			height: 720,
		}
	}
}

impl FromStr for Resolution {
	type Err = ParseError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let (width, height) = s.trim().split_once('x')
			.ok_or_else(|| ParseError::MissingDelimiter { input: s.to_string(), delimiter: 'x' })?;

		let (width, height) = (width.parse()?, height.parse()?);
		if width == 0 || height == 0 {
			return Err(ParseError::ZeroDimension(s.to_string()));
		}

		Ok(Resolution { width, height })
	}
}

impl fmt::Display for Resolution {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}x{}", self.width, self.height)
	}
}
