use std::fmt;
use std::str::FromStr;

use crate::error::ParseError;
use crate::model::camera::settings::{Rect, Resolution};

impl Rect {
	pub fn new(left: usize, top: usize, width: usize, height: usize) -> Self {
		Rect { left, top, width, height }
	}

	/// The rectangle covering a whole screen or frame.
	pub fn covering(res: &Resolution) -> Self {
		Rect::new(0, 0, res.width, res.height)
	}

	/// `None` when the edge lies beyond `usize::MAX`.
	pub fn right(&self) -> Option<usize> {
		self.left.checked_add(self.width)
	}

	pub fn bottom(&self) -> Option<usize> {
		self.top.checked_add(self.height)
	}

	pub fn is_empty(&self) -> bool {
		self.width == 0 || self.height == 0
	}

	pub fn fits_within(&self, res: &Resolution) -> bool {
		match (self.right(), self.bottom()) {
			(Some(right), Some(bottom)) => right <= res.width && bottom <= res.height,
			_ => false,
		}
	}
}

impl FromStr for Rect {
	type Err = ParseError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let fields = s.split(',')
			.map(|x| x.trim().parse::<usize>())
			.collect::<Result<Vec<_>, _>>()?;

		match fields[..] {
			[left, top, width, height] => Ok(Rect { left, top, width, height }),
			_ => Err(ParseError::WrongFieldCount { input: s.to_string(), expected: 4 }),
		}
	}
}

impl fmt::Display for Rect {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{},{},{},{}", self.left, self.top, self.width, self.height)
	}
}
