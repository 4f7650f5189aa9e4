use std::fmt;

use crate::model::camera::settings::{PixelBudget, Resolution};

impl PixelBudget {
	pub const PREVIEW: PixelBudget = PixelBudget {
		min: 470 * 320,
		max: 1280 * 720,
	};

	pub fn contains(&self, res: &Resolution) -> bool {
		(self.min..=self.max).contains(&res.pixels())
	}
}

impl fmt::Display for PixelBudget {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}..={} pixels", self.min, self.max)
	}
}
