use std::io::ErrorKind;
use std::path::PathBuf;

use tokio::fs::File;
use tokio::io::{stdin, AsyncRead};

use crate::implem::camera::RawCamera;
use crate::model::camera::settings::{FrameFormat, Resolution};
use crate::model::frame::FrameStream;

#[derive(Clone, Debug, PartialEq)]
pub enum FrameSource {
	Stdin,
	File { path: PathBuf, repeat: bool },
}

impl FrameSource {
	pub fn new(path: &str, repeat: bool) -> Self {
		if path == "-" {
			FrameSource::Stdin
		} else {
			FrameSource::File { path: PathBuf::from(path), repeat }
		}
	}

	async fn open(&self) -> std::io::Result<Box<dyn AsyncRead + Unpin + Send>> {
		Ok(match self {
			FrameSource::Stdin => Box::new(stdin()),
			FrameSource::File { path, .. } => Box::new(File::open(path).await?),
		})
	}

	fn repeats(&self) -> bool {
		matches!(self, FrameSource::File { repeat: true, .. })
	}
}

/// Feeds preview frames into the camera until the source runs dry, then releases it.
pub async fn read_frames(source: FrameSource, camera: RawCamera, resolution: Resolution, format: FrameFormat) {
	info!("Capturing {} {:?} frames from {:?}", resolution, format, source);

	loop {
		let reader = match source.open().await {
			Ok(reader) => reader,
			Err(e) => {
				error!("Unable to open frame source {:?}: {}", source, e);
				break;
			}
		};

		let mut stream = FrameStream::new(reader, resolution, format);
		let mut frames = 0usize;
		let end = loop {
			match stream.next().await {
				Ok(frame) => {
					camera.on_preview_frame(frame).await;
					frames += 1;
				}
				Err(e) => break e,
			}
		};

		if end.kind() != ErrorKind::UnexpectedEof {
			warn!("Frame source failed after {} frames: {}", frames, end);
			break;
		}
		if stream.truncated() > 0 {
			warn!(
				"Frame source ended inside a frame, dropped {} of {} bytes",
				stream.truncated(), format.frame_len(&resolution)
			);
		}
		// An empty file would otherwise be reopened forever
		if !source.repeats() || frames == 0 {
			break;
		}
		debug!("Rewinding frame source after {} frames", frames);
	}

	info!("Frame source closed, releasing camera");
	camera.release().await;
}
