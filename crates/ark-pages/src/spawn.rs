//! Local task spawning.
//!
//! Fetches are `!Send` futures that must run on the UI thread. In the browser
//! they go to `wasm_bindgen_futures::spawn_local` and run from the microtask
//! queue. Natively they go to a thread-local `futures` `LocalPool`, which the
//! host (or a test) drives with [`run_until_stalled`].

use std::future::Future;

/// Spawn a future on the current thread's executor
#[cfg(target_arch = "wasm32")]
pub fn spawn_task<F>(future: F)
where
	F: Future<Output = ()> + 'static,
{
	wasm_bindgen_futures::spawn_local(future);
}

/// Spawn a future on the current thread's executor
#[cfg(not(target_arch = "wasm32"))]
pub fn spawn_task<F>(future: F)
where
	F: Future<Output = ()> + 'static,
{
	native::spawn(future);
}

/// Run `f` after the current synchronous work has finished
pub fn defer<F>(f: F)
where
	F: FnOnce() + 'static,
{
	spawn_task(async move { f() });
}

/// Run spawned tasks until none of them can make progress.
///
/// Returns without doing anything when called from inside a running task.
#[cfg(not(target_arch = "wasm32"))]
pub fn run_until_stalled() {
	native::run_until_stalled();
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
	use std::cell::RefCell;
	use std::future::Future;

	use futures::executor::{LocalPool, LocalSpawner};
	use futures::task::LocalSpawnExt;

	use crate::error_log;

	struct LocalExecutor {
		pool: RefCell<LocalPool>,
		spawner: LocalSpawner,
	}

	thread_local! {
		static EXECUTOR: LocalExecutor = {
			let pool = LocalPool::new();
			let spawner = pool.spawner();
			LocalExecutor {
				pool: RefCell::new(pool),
				spawner,
			}
		};
	}

	pub(super) fn spawn<F>(future: F)
	where
		F: Future<Output = ()> + 'static,
	{
		EXECUTOR.with(|executor| {
			if let Err(e) = executor.spawner.spawn_local(future) {
				error_log!("failed to spawn task: {}", e);
			}
		});
	}

	pub(super) fn run_until_stalled() {
		EXECUTOR.with(|executor| {
			if let Ok(mut pool) = executor.pool.try_borrow_mut() {
				pool.run_until_stalled();
			}
		});
	}
}
