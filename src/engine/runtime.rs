//! Task spawning for both targets.
//!
//! Native: the tokio runtime entered in `main`. Web: the browser event loop.

use std::future::Future;

use poll_promise::Promise;

#[cfg(not(target_arch = "wasm32"))]
pub fn spawn<F>(future: F)
where
    F: Future<Output = ()> + Send + 'static,
{
    tokio::spawn(future);
}

#[cfg(target_arch = "wasm32")]
pub fn spawn<F>(future: F)
where
    F: Future<Output = ()> + 'static,
{
    wasm_bindgen_futures::spawn_local(future);
}

/// One-shot request whose result the UI polls each frame
#[cfg(not(target_arch = "wasm32"))]
pub fn spawn_promise<T, F>(future: F) -> Promise<T>
where
    T: Send + 'static,
    F: Future<Output = T> + Send + 'static,
{
    Promise::spawn_async(future)
}

#[cfg(target_arch = "wasm32")]
pub fn spawn_promise<T, F>(future: F) -> Promise<T>
where
    T: Send + 'static,
    F: Future<Output = T> + 'static,
{
    Promise::spawn_local(future)
}
