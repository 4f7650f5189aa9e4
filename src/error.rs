use std::io;
use std::num::ParseIntError;
use std::time::Duration;

use thiserror::Error;

use crate::model::camera::settings::{PixelBudget, Rect, Resolution};

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
	#[error("no supported preview size within {} and no default preview size", PixelBudget::PREVIEW)]
	NoUsableResolution,
	#[error("camera has been released")]
	CameraReleased,
	#[error("a scan is already in progress")]
	ScanInProgress,
	#[error("autofocus failed")]
	AutoFocusFailed,
	#[error("no preview frame within {0:?}")]
	FrameTimeout(Duration),
	#[error("I/O error: {0}")]
	Io(#[from] io::Error),
	#[error("HTTP error: {0}")]
	Http(#[from] hyper::Error),
}

/// Errors for values given on the command line or in a touch query.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParseError {
	#[error("expected '{delimiter}' in {input:?}")]
	MissingDelimiter { input: String, delimiter: char },
	#[error("invalid number: {0}")]
	InvalidNumber(#[from] ParseIntError),
	#[error("zero-sized resolution {0:?}")]
	ZeroDimension(String),
	#[error("expected {expected} comma separated values in {input:?}")]
	WrongFieldCount { input: String, expected: usize },
	#[error("unknown frame format {0:?} (available options: \"nv21\", \"grey\")")]
	UnknownFormat(String),
}

/// A scan attempt that did not produce text. Routine while scanning.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DecodeError {
	#[error("crop rectangle {0} is empty")]
	EmptyCrop(Rect),
	#[error("crop rectangle {crop} does not fit within a {frame} frame")]
	CropOutOfBounds { crop: Rect, frame: Resolution },
	#[error("no QR code found")]
	NotFound,
	#[error("{0}")]
	Unreadable(String),
}
