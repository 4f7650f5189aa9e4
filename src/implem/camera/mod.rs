use std::time::Duration;

use tokio::sync::oneshot;
use tokio::time::Instant;

use crate::error::{Error, Result};
use crate::model::camera::settings::Resolution;
use crate::model::frame::Frame;
use crate::utils::{am, Am};

pub mod mapper;
pub mod selector;
pub mod session;
pub mod settings;

/// Frames must have arrived this recently for autofocus to report success.
const FOCUS_WINDOW: Duration = Duration::from_secs(1);

/// What a camera backend reports about, and accepts for, its preview stream.
pub trait CameraSession {
	fn supported_preview_sizes(&self) -> Vec<Resolution>;

	/// The current (or default) preview size, if the backend reports one.
	fn preview_size(&self) -> Option<Resolution>;

	fn set_preview_size(&mut self, res: Resolution);
}

#[derive(Default)]
struct PreviewState {
	one_shot: Option<oneshot::Sender<Frame>>,
	last_frame: Option<Instant>,
	released: bool,
}

/// A camera fed with raw preview frames by a reader task.
#[derive(Clone)]
pub struct RawCamera {
	supported: Vec<Resolution>,
	preview: Option<Resolution>,
	state: Am<PreviewState>,
}

impl RawCamera {
	pub fn new(supported: Vec<Resolution>, default_preview: Option<Resolution>) -> Self {
		RawCamera {
			supported,
			preview: default_preview,
			state: am(PreviewState::default()),
		}
	}

	/// Succeeds while frames keep flowing.
	pub async fn auto_focus(&self) -> bool {
		let state = self.state.lock().await;
		if state.released {
			return false;
		}

		return state.last_frame
			.map(|at| at.elapsed() <= FOCUS_WINDOW)
			.unwrap_or(false);
	}

	/// Arms delivery of exactly one upcoming preview frame.
	pub async fn set_one_shot_preview_callback(&self) -> Result<oneshot::Receiver<Frame>> {
		let mut state = self.state.lock().await;
		if state.released {
			return Err(Error::CameraReleased);
		}
		if state.one_shot.as_ref().map_or(false, |tx| !tx.is_closed()) {
			return Err(Error::ScanInProgress);
		}

		let (tx, rx) = oneshot::channel();
		state.one_shot = Some(tx);
		return Ok(rx);
	}

	pub async fn on_preview_frame(&self, frame: Frame) {
		if Some(frame.resolution) != self.preview {
			warn!("Dropping {} frame, preview is configured for {:?}", frame.resolution, self.preview);
			return;
		}

		let one_shot = {
			let mut state = self.state.lock().await;
			state.last_frame = Some(Instant::now());
			state.one_shot.take()
		};

		if let Some(tx) = one_shot {
			// the toucher may have timed out and gone away
			let _ = tx.send(frame);
		}
	}

	/// Stops the preview; pending and future one-shot requests fail.
	pub async fn release(&self) {
		let mut state = self.state.lock().await;
		state.released = true;
		state.one_shot = None;
	}
}

impl CameraSession for RawCamera {
	fn supported_preview_sizes(&self) -> Vec<Resolution> {
		self.supported.clone()
	}

	fn preview_size(&self) -> Option<Resolution> {
		self.preview
	}

	fn set_preview_size(&mut self, res: Resolution) {
		self.preview = Some(res);
	}
}
