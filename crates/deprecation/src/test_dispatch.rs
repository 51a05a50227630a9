//! In-memory hook dispatch double used by the unit tests.
//!
//! Fires over a snapshot of the handler list taken when the firing starts,
//! like the host systems this crate targets: registrations made during a
//! firing take effect from the next firing.

use rustc_hash::FxHashMap;

use crate::dispatch::{HandlerId, HookDispatch, HookHandler, HookPriority};

pub(crate) struct Report {
	pub context: &'static str,
	pub since: Option<String>,
	pub message: String,
}

pub(crate) struct TestDispatch<V> {
	hooks: FxHashMap<String, Vec<(HookPriority, HookHandler<V>)>>,
	pub reports: Vec<Report>,
}

impl<V: 'static> TestDispatch<V> {
	pub fn new() -> Self {
		Self {
			hooks: FxHashMap::default(),
			reports: Vec::new(),
		}
	}

	/// Registers a plain subscriber at default priority, as plugin code would.
	pub fn subscribe(&mut self, tag: &str, f: impl Fn(V) -> V + Send + Sync + 'static) -> HandlerId {
		let handler = HookHandler::new(move |_dispatch, value, _rest| f(value));
		let id = handler.id();
		self.register(tag, handler, HookPriority::DEFAULT);
		id
	}

	/// Fires `tag`, chaining `value` through the current handlers in priority
	/// order (registration order within a priority).
	pub fn fire(&mut self, tag: &str, value: V) -> V {
		let mut snapshot = self.hooks.get(tag).cloned().unwrap_or_default();
		snapshot.sort_by_key(|(priority, _)| *priority);

		let mut value = value;
		for (_, handler) in &snapshot {
			value = handler.call(self, value, &[]);
		}
		value
	}

	pub fn handler_count(&self, tag: &str) -> usize {
		self.hooks.get(tag).map_or(0, Vec::len)
	}
}

impl<V: 'static> HookDispatch for TestDispatch<V> {
	type Value = V;

	fn register(&mut self, tag: &str, handler: HookHandler<V>, priority: HookPriority) {
		self.hooks.entry(tag.to_string()).or_default().push((priority, handler));
	}

	fn deregister(&mut self, tag: &str, id: HandlerId, priority: HookPriority) {
		if let Some(handlers) = self.hooks.get_mut(tag) {
			handlers.retain(|(p, handler)| !(handler.id() == id && *p == priority));
		}
	}

	fn has_subscribers(&self, tag: &str) -> bool {
		self.hooks.get(tag).is_some_and(|handlers| !handlers.is_empty())
	}

	fn report(&mut self, context: &'static str, since: Option<&str>, message: &str) {
		self.reports.push(Report {
			context,
			since: since.map(str::to_owned),
			message: message.to_owned(),
		});
	}
}
