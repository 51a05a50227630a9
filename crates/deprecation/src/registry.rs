//! Get-or-create index of deprecation trackers.

use rustc_hash::FxHashMap;

use crate::dispatch::HookDispatch;
use crate::kind::HookKind;
use crate::tracker::Tracker;

/// Index of deprecated hooks, keyed by tag.
///
/// Owned by whichever component initializes deprecation tracking and passed
/// by reference to code that declares deprecations; there is no process-wide
/// instance. Entries are never removed.
pub struct DeprecationRegistry<V> {
	trackers: FxHashMap<Box<str>, Tracker<V>>,
}

impl<V: 'static> DeprecationRegistry<V> {
	pub fn new() -> Self {
		Self {
			trackers: FxHashMap::default(),
		}
	}

	/// Marks `tag` as deprecated, returning its tracker.
	///
	/// Idempotent get-or-create: the first call for a tag constructs the
	/// tracker, which arms its probe on the dispatch service. Later calls
	/// return a handle to the existing tracker and ignore `kind`.
	pub fn declare(
		&mut self,
		dispatch: &mut dyn HookDispatch<Value = V>,
		tag: &str,
		kind: HookKind,
	) -> Tracker<V> {
		if tag.trim().is_empty() {
			tracing::warn!(tag, "declaring deprecation for an empty hook tag");
		}
		if let Some(tracker) = self.trackers.get(tag) {
			if tracker.kind() != kind {
				tracing::warn!(
					tag,
					declared = %tracker.kind(),
					requested = %kind,
					"hook already deprecated under a different kind"
				);
			}
			return tracker.clone();
		}

		let tracker = Tracker::new(tag, kind, dispatch);
		self.trackers.insert(Box::from(tag), tracker.clone());
		tracing::debug!(tag, kind = %kind, "hook marked deprecated");
		tracker
	}

	/// Tracker for `tag`, if it was declared deprecated.
	pub fn get(&self, tag: &str) -> Option<Tracker<V>> {
		self.trackers.get(tag).cloned()
	}

	pub fn len(&self) -> usize {
		self.trackers.len()
	}

	pub fn is_empty(&self) -> bool {
		self.trackers.is_empty()
	}

	/// Iterates over all declared trackers, in no particular order.
	pub fn iter(&self) -> impl Iterator<Item = &Tracker<V>> {
		self.trackers.values()
	}
}

impl<V: 'static> Default for DeprecationRegistry<V> {
	fn default() -> Self {
		Self::new()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::test_dispatch::TestDispatch;

	#[test]
	fn declare_is_idempotent() {
		let mut dispatch = TestDispatch::<i32>::new();
		let mut registry = DeprecationRegistry::new();

		let first = registry.declare(&mut dispatch, "old_thing", HookKind::Filter);
		let second = registry.declare(&mut dispatch, "old_thing", HookKind::Filter);

		assert!(first.ptr_eq(&second));
		assert_eq!(registry.len(), 1);
		// Only the first declare armed a probe.
		assert_eq!(dispatch.handler_count("old_thing"), 1);
	}

	#[test]
	fn get_returns_declared_tracker() {
		let mut dispatch = TestDispatch::<i32>::new();
		let mut registry = DeprecationRegistry::new();
		assert!(registry.is_empty());
		assert!(registry.get("old_thing").is_none());

		let declared = registry.declare(&mut dispatch, "old_thing", HookKind::Action);

		let found = registry.get("old_thing").unwrap();
		assert!(found.ptr_eq(&declared));
		assert_eq!(registry.iter().count(), 1);
	}

	#[test]
	fn redeclare_with_other_kind_keeps_original() {
		let mut dispatch = TestDispatch::<i32>::new();
		let mut registry = DeprecationRegistry::new();

		let first = registry.declare(&mut dispatch, "old_thing", HookKind::Filter);
		let again = registry.declare(&mut dispatch, "old_thing", HookKind::Action);

		assert!(first.ptr_eq(&again));
		assert_eq!(again.kind(), HookKind::Filter);
	}
}
