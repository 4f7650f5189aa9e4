#[macro_use]
extern crate argh;
extern crate env_logger;
extern crate hyper;
#[macro_use]
extern crate log;
extern crate tokio;

use std::process;
use std::sync::Arc;

use log::LevelFilter;

use crate::cli::CliArgs;
use crate::error::Result;
use crate::implem::camera::RawCamera;
use crate::model::camera::session::SessionContext;
use crate::service::read_frames::read_frames;
use crate::service::scan::{listen_for_touches, ScanCtx};

mod cli;
mod error;
mod implem;
mod model;
mod service;
mod utils;

#[tokio::main]
async fn main() {
	let args = argh::from_env::<CliArgs>();

	env_logger::builder()
		.filter_level(if args.verbose { LevelFilter::Debug } else { LevelFilter::Info })
		.parse_default_env()
		.init();

	if let Err(e) = run(args).await {
		error!("{}", e);
		process::exit(1);
	}
}

async fn run(args: CliArgs) -> Result<()> {
	let mut camera = RawCamera::new(args.supported.clone(), args.default_preview);
	let session = SessionContext::open(&mut camera, args.screen)?;

	tokio::spawn(read_frames(args.frame_source(), camera.clone(), session.preview, args.format));

	let server = args.start_listening_for_touches()?;
	info!("Listening for touches on {}", args.host);

	let ctx = ScanCtx {
		camera,
		session: Arc::new(session),
		target: args.target(),
		frame_timeout: args.frame_timeout(),
	};
	listen_for_touches(server, ctx).await
}
