use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use hyper::{Body, Method, Request, Response, StatusCode};
use hyper::header::{CONTENT_TYPE, HeaderValue};
use hyper::server::Builder;
use hyper::server::conn::{AddrIncoming, AddrStream};
use hyper::service::{make_service_fn, service_fn};
use tokio::task;
use tokio::time::timeout;

use crate::error::{DecodeError, Error, Result};
use crate::implem::camera::mapper::map_to_preview;
use crate::implem::camera::RawCamera;
use crate::implem::decoder::decode;
use crate::model::camera::session::SessionContext;
use crate::model::camera::settings::Rect;

#[derive(Clone)]
pub struct ScanCtx {
	pub camera: RawCamera,
	pub session: Arc<SessionContext>,
	/// Scan target in screen pixels, used when a touch names none
	pub target: Rect,
	pub frame_timeout: Duration,
}

/// What the toucher gets told.
#[derive(Debug, PartialEq)]
pub enum Notification {
	Decoded(String),
	ReadError(DecodeError),
	Unavailable(String),
	Busy,
}

impl Notification {
	pub fn status(&self) -> StatusCode {
		match self {
			Notification::Decoded(_) => StatusCode::OK,
			Notification::ReadError(_) => StatusCode::UNPROCESSABLE_ENTITY,
			Notification::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
			Notification::Busy => StatusCode::CONFLICT,
		}
	}

	pub fn message(&self) -> String {
		match self {
			Notification::Decoded(text) => text.clone(),
			Notification::ReadError(e) => format!("read error: {}", e),
			Notification::Unavailable(reason) => reason.clone(),
			Notification::Busy => Error::ScanInProgress.to_string(),
		}
	}
}

impl From<Error> for Notification {
	fn from(e: Error) -> Self {
		match e {
			Error::ScanInProgress => Notification::Busy,
			e => Notification::Unavailable(e.to_string()),
		}
	}
}

/// One touch: focus, grab the next frame, decode the target area of it.
pub async fn scan(ctx: &ScanCtx, target: Rect) -> Notification {
	match try_scan(ctx, target).await {
		Ok(Ok(text)) => {
			info!("Decoded {:?}", text);
			Notification::Decoded(text)
		}
		Ok(Err(e)) => {
			debug!("read error: {}", e);
			Notification::ReadError(e)
		}
		Err(e) => {
			warn!("Scan abandoned: {}", e);
			Notification::from(e)
		}
	}
}

async fn try_scan(ctx: &ScanCtx, target: Rect) -> Result<Result<String, DecodeError>> {
	if !ctx.camera.auto_focus().await {
		return Err(Error::AutoFocusFailed);
	}

	let rx = ctx.camera.set_one_shot_preview_callback().await?;
	let frame = match timeout(ctx.frame_timeout, rx).await {
		Ok(Ok(frame)) => frame,
		Ok(Err(_)) => return Err(Error::CameraReleased),
		Err(_) => return Err(Error::FrameTimeout(ctx.frame_timeout)),
	};

	let crop = map_to_preview(target, ctx.session.ratios);
	debug!(
		"{}:{}:{} -> {} in {} {:?} frame",
		ctx.session.ratios.width, ctx.session.ratios.height, target, crop, frame.resolution, frame.format
	);

	let decoded = task::spawn_blocking(move || decode(&frame, crop))
		.await
		.map_err(|e| Error::Io(e.into()))?;
	return Ok(decoded);
}

pub async fn listen_for_touches(server: Builder<AddrIncoming>, ctx: ScanCtx) -> Result<()> {
	let make_service = make_service_fn(move |conn: &AddrStream| {
		let ctx = ctx.clone();
		let addr = conn.remote_addr();

		async move {
			Ok::<_, Infallible>(service_fn(move |req| {
				handle(ctx.clone(), addr, req)
			}))
		}
	});

	server
		.serve(make_service)
		.await?;
	return Ok(());
}

async fn handle(ctx: ScanCtx, addr: SocketAddr, req: Request<Body>) -> Result<Response<Body>, Infallible> {
	match (req.method(), req.uri().path()) {
		(&Method::GET, "/") => Ok(text(StatusCode::OK, session_summary(&ctx.session))),
		(&Method::POST, "/scan") => {
			let target = match target_from_query(req.uri().query()) {
				Ok(target) => target.unwrap_or(ctx.target),
				Err(e) => return Ok(text(StatusCode::BAD_REQUEST, e)),
			};

			info!("Touch from {} on {}", addr, target);
			let notification = scan(&ctx, target).await;
			Ok(text(notification.status(), notification.message()))
		}
		_ => Ok(text(StatusCode::BAD_REQUEST, String::new())),
	}
}

fn target_from_query(query: Option<&str>) -> Result<Option<Rect>, String> {
	let value = query
		.into_iter()
		.flat_map(|q| q.split('&'))
		.find_map(|pair| pair.strip_prefix("target="));

	match value {
		Some(v) => v.replace("%2C", ",").replace("%2c", ",")
			.parse()
			.map(Some)
			.map_err(|e| format!("bad target: {}", e)),
		None => Ok(None),
	}
}

fn session_summary(session: &SessionContext) -> String {
	format!(
		"preview {}, screen {}, ratios {}:{}\n",
		session.preview, session.screen, session.ratios.width, session.ratios.height
	)
}

fn text(status: StatusCode, body: String) -> Response<Body> {
	let mut response = Response::new(Body::from(body));
	*response.status_mut() = status;
	response.headers_mut().insert(CONTENT_TYPE, HeaderValue::from_static("text/plain; charset=utf-8"));
	response
}

#[cfg(test)]
mod tests {
	use crate::implem::camera::CameraSession;
	use crate::implem::decoder::tests::{frame_with_qr, qr_extent};
	use crate::model::camera::settings::{PreviewRatios, Resolution};

	use super::*;

	const CONTENT: &str = "touch-qr-scanner";

	fn ctx(preview: Resolution, screen: Resolution) -> ScanCtx {
		let mut camera = RawCamera::new(vec![preview], None);
		camera.set_preview_size(preview);
		ScanCtx {
			camera,
			session: Arc::new(SessionContext {
				preview,
				screen,
				ratios: PreviewRatios::between(&preview, &screen),
			}),
			target: Rect::covering(&screen),
			frame_timeout: Duration::from_secs(5),
		}
	}

	/// Keeps delivering the same frame, like a camera pointed at a still code.
	fn keep_streaming(camera: RawCamera, frame: crate::model::frame::Frame) -> task::JoinHandle<()> {
		tokio::spawn(async move {
			loop {
				camera.on_preview_frame(frame.clone()).await;
				tokio::time::sleep(Duration::from_millis(10)).await;
			}
		})
	}

	#[tokio::test]
	async fn decodes_the_target_area_of_the_next_frame() {
		// screen is twice the preview, so the code at (100, 60) in preview pixels sits at (200, 120) on screen
		let preview = Resolution::new(640, 480);
		let ctx = ctx(preview, Resolution::new(1280, 960));
		let side = qr_extent(CONTENT, 3);
		let feeder = keep_streaming(ctx.camera.clone(), frame_with_qr(preview, CONTENT, 100, 60, 3));
		tokio::time::sleep(Duration::from_millis(50)).await;

		let notification = scan(&ctx, Rect::new(200, 120, side * 2, side * 2)).await;
		assert_eq!(notification, Notification::Decoded(CONTENT.to_string()));
		assert_eq!(notification.status(), StatusCode::OK);

		let notification = scan(&ctx, Rect::new(0, 0, 150, 100)).await;
		assert_eq!(notification, Notification::ReadError(DecodeError::NotFound));
		assert_eq!(notification.message(), "read error: no QR code found");

		feeder.abort();
	}

	#[tokio::test]
	async fn unmapped_overflow_is_a_read_error() {
		let preview = Resolution::new(640, 480);
		let ctx = ctx(preview, preview);
		let feeder = keep_streaming(ctx.camera.clone(), frame_with_qr(preview, CONTENT, 0, 0, 2));
		tokio::time::sleep(Duration::from_millis(50)).await;

		let notification = scan(&ctx, Rect::new(600, 400, 100, 100)).await;
		assert!(matches!(notification, Notification::ReadError(DecodeError::CropOutOfBounds { .. })));
		assert_eq!(notification.status(), StatusCode::UNPROCESSABLE_ENTITY);

		// saturates to usize::MAX through the mapper, its right edge overflows
		let notification = scan(&ctx, Rect::new(usize::MAX, 0, 1, 1)).await;
		assert!(matches!(notification, Notification::ReadError(DecodeError::CropOutOfBounds { .. })));

		feeder.abort();
	}

	#[tokio::test]
	async fn no_frames_means_no_focus() {
		let ctx = ctx(Resolution::new(640, 480), Resolution::new(640, 480));

		let notification = scan(&ctx, ctx.target).await;
		assert_eq!(notification, Notification::Unavailable(Error::AutoFocusFailed.to_string()));
		assert_eq!(notification.status(), StatusCode::SERVICE_UNAVAILABLE);
	}

	#[tokio::test(start_paused = true)]
	async fn focus_without_a_following_frame_times_out() {
		let preview = Resolution::new(640, 480);
		let ctx = ctx(preview, preview);
		ctx.camera.on_preview_frame(frame_with_qr(preview, CONTENT, 0, 0, 2)).await;

		let notification = scan(&ctx, ctx.target).await;
		assert_eq!(notification, Notification::Unavailable(Error::FrameTimeout(ctx.frame_timeout).to_string()));
		assert_eq!(notification.status(), StatusCode::SERVICE_UNAVAILABLE);
	}

	#[tokio::test]
	async fn second_touch_while_waiting_is_busy() {
		let preview = Resolution::new(640, 480);
		let ctx = ctx(preview, preview);
		let frame = frame_with_qr(preview, CONTENT, 20, 20, 3);
		ctx.camera.on_preview_frame(frame.clone()).await;

		let first = {
			let ctx = ctx.clone();
			tokio::spawn(async move { scan(&ctx, ctx.target).await })
		};
		tokio::time::sleep(Duration::from_millis(20)).await;

		let second = scan(&ctx, ctx.target).await;
		assert_eq!(second, Notification::Busy);
		assert_eq!(second.status(), StatusCode::CONFLICT);

		ctx.camera.on_preview_frame(frame).await;
		assert_eq!(first.await.unwrap(), Notification::Decoded(CONTENT.to_string()));
	}

	fn request(method: Method, uri: &str) -> Request<Body> {
		Request::builder().method(method).uri(uri).body(Body::empty()).unwrap()
	}

	async fn respond(ctx: &ScanCtx, req: Request<Body>) -> (StatusCode, String) {
		let addr = "127.0.0.1:40000".parse().unwrap();
		let response = handle(ctx.clone(), addr, req).await.unwrap();
		let status = response.status();
		let body = hyper::body::to_bytes(response.into_body()).await.unwrap();
		(status, String::from_utf8(body.to_vec()).unwrap())
	}

	#[tokio::test]
	async fn root_summarises_the_session() {
		let ctx = ctx(Resolution::new(640, 480), Resolution::new(1280, 960));

		let (status, body) = respond(&ctx, request(Method::GET, "/")).await;
		assert_eq!(status, StatusCode::OK);
		assert_eq!(body, "preview 640x480, screen 1280x960, ratios 0.5:0.5\n");
	}

	#[tokio::test]
	async fn malformed_target_is_a_bad_request() {
		let ctx = ctx(Resolution::new(640, 480), Resolution::new(640, 480));

		let (status, body) = respond(&ctx, request(Method::POST, "/scan?target=1,2")).await;
		assert_eq!(status, StatusCode::BAD_REQUEST);
		assert!(body.starts_with("bad target: "), "{}", body);
	}

	#[tokio::test]
	async fn unknown_routes_are_bad_requests() {
		let ctx = ctx(Resolution::new(640, 480), Resolution::new(640, 480));

		for req in [request(Method::GET, "/scan"), request(Method::PUT, "/scan"), request(Method::GET, "/nope")] {
			let (status, body) = respond(&ctx, req).await;
			assert_eq!(status, StatusCode::BAD_REQUEST);
			assert!(body.is_empty());
		}
	}

	#[tokio::test]
	async fn touch_without_target_scans_the_configured_one() {
		let preview = Resolution::new(640, 480);
		let ctx = ctx(preview, Resolution::new(1280, 960));
		let feeder = keep_streaming(ctx.camera.clone(), frame_with_qr(preview, CONTENT, 300, 200, 3));
		tokio::time::sleep(Duration::from_millis(50)).await;

		let (status, body) = respond(&ctx, request(Method::POST, "/scan")).await;
		assert_eq!((status, body.as_str()), (StatusCode::OK, CONTENT));

		// the override only covers the top left corner of the screen
		let (status, body) = respond(&ctx, request(Method::POST, "/scan?target=0,0,400,300")).await;
		assert_eq!((status, body.as_str()), (StatusCode::UNPROCESSABLE_ENTITY, "read error: no QR code found"));

		let (status, body) = respond(&ctx, request(Method::POST, "/scan?target=18446744073709551615,0,4,4")).await;
		assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
		assert!(body.starts_with("read error: crop rectangle"), "{}", body);

		feeder.abort();
	}

	#[test]
	fn parses_targets_from_the_query() {
		assert_eq!(target_from_query(None), Ok(None));
		assert_eq!(target_from_query(Some("verbose=1")), Ok(None));
		assert_eq!(target_from_query(Some("a=b&target=1,2,3,4")), Ok(Some(Rect::new(1, 2, 3, 4))));
		assert_eq!(target_from_query(Some("target=1%2C2%2C3%2C4")), Ok(Some(Rect::new(1, 2, 3, 4))));
		assert!(target_from_query(Some("target=1,2")).is_err());
	}

	#[test]
	fn busy_maps_to_conflict() {
		let notification = Notification::from(Error::ScanInProgress);
		assert_eq!(notification, Notification::Busy);
		assert_eq!(notification.status(), StatusCode::CONFLICT);
		assert_eq!(notification.message(), "a scan is already in progress");
	}
}
