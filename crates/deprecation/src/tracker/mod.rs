//! Per-hook deprecation tracker.
//!
//! A [`Tracker`] keeps one handler registered on its hook and cycles it
//! through two positions:
//!
//! - **Probe**, armed at [`HookPriority::EARLIEST`]: on the next firing it
//!   steps aside, asks the host whether any other subscriber is attached and
//!   reports if so, then parks itself at [`HookPriority::DEFAULT`].
//! - **Reset**, parked at [`HookPriority::DEFAULT`]: on the next firing it
//!   moves back to the probe position.
//!
//! The cycle is endless, so every second firing re-evaluates whether live
//! subscribers remain. The brief self-deregistration during the probe step is
//! what keeps the subscriber check from counting the tracker itself.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::dispatch::{HookDispatch, HookHandler, HookPriority};
use crate::kind::HookKind;

/// Listener position in the probe/reset cycle.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum ListenerState {
	/// Armed at [`HookPriority::EARLIEST`]; the next firing runs the
	/// subscriber check.
	Probe,
	/// Parked at [`HookPriority::DEFAULT`]; the next firing re-arms the probe.
	Reset,
}

struct TrackerState<V> {
	tag: Box<str>,
	kind: HookKind,
	alternative: Option<Box<str>>,
	since: Option<Box<str>>,
	listener: ListenerState,
	handler: Option<HookHandler<V>>,
}

impl<V> TrackerState<V> {
	fn message(&self) -> String {
		let mut message = format!("The {} tag '{}' is deprecated.", self.kind.label(), self.tag);
		if let Some(alternative) = &self.alternative {
			message.push_str(&format!(" Use '{alternative}' instead."));
		}
		message
	}
}

/// Handle to one deprecated hook.
///
/// Handles are cheap to clone and share state; the handle returned by a later
/// [`declare`](crate::DeprecationRegistry::declare) mutates the same tracker.
/// Builder calls overwrite, last call wins.
pub struct Tracker<V> {
	state: Arc<Mutex<TrackerState<V>>>,
}

impl<V> Clone for Tracker<V> {
	fn clone(&self) -> Self {
		Self {
			state: self.state.clone(),
		}
	}
}

impl<V: 'static> Tracker<V> {
	/// Creates the tracker and arms its probe on `tag`.
	pub(crate) fn new(tag: &str, kind: HookKind, dispatch: &mut dyn HookDispatch<Value = V>) -> Self {
		let state = Arc::new(Mutex::new(TrackerState {
			tag: Box::from(tag),
			kind,
			alternative: None,
			since: None,
			listener: ListenerState::Probe,
			handler: None,
		}));

		// The handler only holds a weak reference; once every Tracker handle
		// is gone, firings pass the value through untouched.
		let weak = Arc::downgrade(&state);
		let handler = HookHandler::new(move |dispatch, value, _rest| match weak.upgrade() {
			Some(state) => on_fire(&state, dispatch, value),
			None => value,
		});
		state.lock().handler = Some(handler.clone());

		dispatch.register(tag, handler, HookPriority::EARLIEST);
		tracing::trace!(tag, "deprecation.probe_armed");

		Self { state }
	}
}

impl<V> Tracker<V> {
	/// Records the hook to suggest instead. Chainable; last call wins.
	pub fn instead(self, alternative: impl Into<Box<str>>) -> Self {
		self.state.lock().alternative = Some(alternative.into());
		self
	}

	/// Records the version the deprecation started. Chainable; last call wins.
	pub fn since(self, version: impl Into<Box<str>>) -> Self {
		self.state.lock().since = Some(version.into());
		self
	}

	/// The deprecated hook's tag.
	pub fn tag(&self) -> String {
		self.state.lock().tag.to_string()
	}

	/// Kind the hook was declared with.
	pub fn kind(&self) -> HookKind {
		self.state.lock().kind
	}

	/// The notice text emitted when usage is detected.
	pub fn message(&self) -> String {
		self.state.lock().message()
	}

	/// True if both handles point at the same tracker.
	pub fn ptr_eq(&self, other: &Self) -> bool {
		Arc::ptr_eq(&self.state, &other.state)
	}
}

fn on_fire<V: 'static>(
	state: &Arc<Mutex<TrackerState<V>>>,
	dispatch: &mut dyn HookDispatch<Value = V>,
	value: V,
) -> V {
	let mut tracker = state.lock();
	let Some(handler) = tracker.handler.clone() else {
		return value;
	};

	match tracker.listener {
		ListenerState::Probe => {
			// Step aside first so the subscriber check does not count us.
			dispatch.deregister(&tracker.tag, handler.id(), HookPriority::EARLIEST);
			if dispatch.has_subscribers(&tracker.tag) {
				let message = tracker.message();
				tracing::debug!(tag = %tracker.tag, kind = %tracker.kind, "deprecation.report");
				dispatch.report(tracker.kind.context(), tracker.since.as_deref(), &message);
			}
			dispatch.register(&tracker.tag, handler, HookPriority::DEFAULT);
			tracker.listener = ListenerState::Reset;
			tracing::trace!(tag = %tracker.tag, "deprecation.reset_parked");
		}
		ListenerState::Reset => {
			dispatch.deregister(&tracker.tag, handler.id(), HookPriority::DEFAULT);
			dispatch.register(&tracker.tag, handler, HookPriority::EARLIEST);
			tracker.listener = ListenerState::Probe;
			tracing::trace!(tag = %tracker.tag, "deprecation.probe_armed");
		}
	}

	value
}
