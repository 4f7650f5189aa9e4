use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};
use std::time::Duration;

use hyper::Server;
use hyper::server::Builder;
use hyper::server::conn::AddrIncoming;

use crate::error::Result;
use crate::model::camera::settings::{FrameFormat, Rect, Resolution};
use crate::service::read_frames::FrameSource;

#[derive(FromArgs)]
/// scan QR codes from a raw camera preview stream on touch
pub struct CliArgs {
	#[argh(option, short = 's', default = "Default::default()")]
	/// the screen size in units of pixel in the form of WxH (default: 1280x720)
	pub screen: Resolution,
	#[argh(option, short = 'p')]
	/// a preview size supported by the camera in the form of WxH, may be repeated
	pub supported: Vec<Resolution>,
	#[argh(option, short = 'd')]
	/// the camera's current preview size, used when no supported size fits (form WxH)
	pub default_preview: Option<Resolution>,
	#[argh(option, short = 't')]
	/// the scan target on screen as left,top,width,height (default: the whole screen)
	pub target: Option<Rect>,
	#[argh(option, short = 'f', default = "String::from(\"-\")")]
	/// the raw preview frame source, "-" for stdin (default: -)
	pub frames: String,
	#[argh(option, short = 'F', default = "Default::default()")]
	/// the preview frame layout (available options: "nv21", "grey") (default: "nv21")
	pub format: FrameFormat,
	#[argh(switch, short = 'r')]
	/// start the frame source file over when it ends
	pub repeat: bool,
	#[argh(option, short = 'h', default = "SocketAddrV4::new(Ipv4Addr::UNSPECIFIED, 8080)")]
	/// the host (ipv4) to bind to for touches (default: 0.0.0.0:8080)
	pub host: SocketAddrV4,
	#[argh(option, default = "5")]
	/// seconds to wait for a frame after autofocus (default: 5)
	pub frame_timeout: u64,
	#[argh(switch, short = 'v')]
	/// log debug output
	pub verbose: bool,
}

impl CliArgs {
	pub fn frame_source(&self) -> FrameSource {
		FrameSource::new(&self.frames, self.repeat)
	}

	pub fn target(&self) -> Rect {
		self.target.unwrap_or_else(|| Rect::covering(&self.screen))
	}

	pub fn frame_timeout(&self) -> Duration {
		Duration::from_secs(self.frame_timeout)
	}

	pub fn start_listening_for_touches(&self) -> Result<Builder<AddrIncoming>> {
		Ok(Server::try_bind(&SocketAddr::V4(self.host))?)
	}
}
