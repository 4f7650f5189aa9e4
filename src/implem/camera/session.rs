use crate::error::Result;
use crate::implem::camera::selector::select;
use crate::implem::camera::CameraSession;
use crate::model::camera::session::SessionContext;
use crate::model::camera::settings::Resolution;

impl SessionContext {
	/// Chooses the preview size for a freshly opened camera and configures it.
	pub fn open<C: CameraSession>(camera: &mut C, screen: Resolution) -> Result<Self> {
		let supported = camera.supported_preview_sizes();
		let selection = select(&supported, screen, camera.preview_size())?;
		camera.set_preview_size(selection.resolution);

		info!(
			"Preview {} selected from {} supported sizes for a {} screen (ratios {}:{})",
			selection.resolution, supported.len(), screen, selection.ratios.width, selection.ratios.height
		);

		return Ok(SessionContext {
			preview: selection.resolution,
			screen,
			ratios: selection.ratios,
		});
	}
}
