use std::io::ErrorKind;

use tokio::io::AsyncReadExt;
use tokio::io::Result as IoResult;

use crate::model::camera::settings::{FrameFormat, Resolution};

pub struct FrameStream<R> {
	reader: R,
	resolution: Resolution,
	format: FrameFormat,
	truncated: usize,
}

impl<R: AsyncReadExt + Unpin> FrameStream<R> {
	pub fn new(reader: R, resolution: Resolution, format: FrameFormat) -> Self {
		FrameStream {
			reader,
			resolution,
			format,
			truncated: 0,
		}
	}

	/// Reads the next whole frame. The end of the stream is an `UnexpectedEof` error,
	/// whether or not it cut a frame short (see [`FrameStream::truncated`]).
	pub async fn next(&mut self) -> IoResult<Frame> {
		let mut raw_bytes = vec![0; self.format.frame_len(&self.resolution)];
		let mut filled = 0;
		while filled < raw_bytes.len() {
			let read = self.reader.read(&mut raw_bytes[filled..]).await?;
			if read == 0 {
				self.truncated = filled;
				return Err(ErrorKind::UnexpectedEof.into());
			}
			filled += read;
		}

		return Ok(Frame::new(self.resolution, self.format, raw_bytes));
	}

	/// Bytes of the partial frame the stream ended on, 0 after a clean end.
	pub fn truncated(&self) -> usize {
		self.truncated
	}
}

#[derive(Clone)]
pub struct Frame {
	pub resolution: Resolution,
	pub format: FrameFormat,
	pub raw_bytes: Vec<u8>,
}

impl Frame {
	pub fn new(resolution: Resolution, format: FrameFormat, raw_bytes: Vec<u8>) -> Self {
		Frame {
			resolution,
			format,
			raw_bytes,
		}
	}

	/// The Y plane; both supported formats start with it.
	pub fn luminance(&self) -> &[u8] {
		let len = self.resolution.pixels().min(self.raw_bytes.len());
		&self.raw_bytes[..len]
	}
}
