use std::sync::Arc;

use tokio::sync::Mutex;

pub type Am<T> = Arc<Mutex<T>>;

pub fn am<T>(t: T) -> Am<T> {
	Arc::new(Mutex::new(t))
}
