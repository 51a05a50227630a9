//! Seam to the host's hook dispatch service.
//!
//! The host application owns the actual hook tables; this crate only talks to
//! them through [`HookDispatch`]. Implementations are expected to snapshot the
//! handler list when a hook fires, so handlers that adjust their own
//! registration mid-firing take effect from the next firing onward.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Ordering position of a handler on a hook. Lower runs first.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct HookPriority(pub i64);

impl HookPriority {
	/// Runs before every host subscriber.
	pub const EARLIEST: Self = Self(i64::MIN);
	/// Position used by subscribers that do not care about order.
	pub const DEFAULT: Self = Self(0);
}

/// Process-unique handler identity, used for deregistration.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct HandlerId(u64);

impl HandlerId {
	fn next() -> Self {
		static NEXT: AtomicU64 = AtomicU64::new(0);
		Self(NEXT.fetch_add(1, Ordering::Relaxed))
	}
}

type HookFn<V> = dyn Fn(&mut dyn HookDispatch<Value = V>, V, &[V]) -> V + Send + Sync;

/// Cloneable callback registered on a named hook.
///
/// The first positional argument is threaded through the handler chain
/// (filter semantics); trailing arguments are read-only. Handlers receive the
/// dispatch service itself so they can adjust their own registration while a
/// firing is in flight.
pub struct HookHandler<V> {
	id: HandlerId,
	callback: Arc<HookFn<V>>,
}

impl<V> Clone for HookHandler<V> {
	fn clone(&self) -> Self {
		Self {
			id: self.id,
			callback: self.callback.clone(),
		}
	}
}

impl<V> std::fmt::Debug for HookHandler<V> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("HookHandler").field("id", &self.id).finish_non_exhaustive()
	}
}

impl<V: 'static> HookHandler<V> {
	pub fn new(
		callback: impl Fn(&mut dyn HookDispatch<Value = V>, V, &[V]) -> V + Send + Sync + 'static,
	) -> Self {
		Self {
			id: HandlerId::next(),
			callback: Arc::new(callback),
		}
	}

	/// Identity under which this handler registers and deregisters.
	pub fn id(&self) -> HandlerId {
		self.id
	}

	/// Invokes the handler, returning the (possibly transformed) first argument.
	pub fn call(&self, dispatch: &mut dyn HookDispatch<Value = V>, value: V, rest: &[V]) -> V {
		(self.callback)(dispatch, value, rest)
	}
}

/// Host-side hook dispatch service.
///
/// Every operation is a direct, complete call; none can fail. The probe/reset
/// protocol in [`Tracker`](crate::Tracker) assumes the host serializes
/// firings of a given hook (the usual single-request render model); a host
/// that fires the same hook concurrently must add its own serialization.
pub trait HookDispatch {
	/// First positional argument threaded through a filter chain.
	type Value;

	/// Adds `handler` to `tag` at `priority`.
	fn register(&mut self, tag: &str, handler: HookHandler<Self::Value>, priority: HookPriority);

	/// Removes the handler registered under `id` at `priority`. No-op if absent.
	fn deregister(&mut self, tag: &str, id: HandlerId, priority: HookPriority);

	/// True if at least one handler is currently registered on `tag`.
	fn has_subscribers(&self, tag: &str) -> bool;

	/// Emits a deprecation notice on the host's warning channel.
	fn report(&mut self, context: &'static str, since: Option<&str>, message: &str);
}
