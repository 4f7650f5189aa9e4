use crate::model::camera::settings::{PreviewRatios, Resolution};

/// State tied to one opened camera session. Reopening the camera means building a new one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionContext {
	pub preview: Resolution,
	pub screen: Resolution,
	pub ratios: PreviewRatios,
}
