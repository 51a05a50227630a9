//! Deprecation probes for named filter/action hooks.
//!
//! A host application exposes named extension points ("hooks") that plugin
//! code subscribes to. When a hook is scheduled for removal, declare it on a
//! [`DeprecationRegistry`]: the returned [`Tracker`] arms a probe on the hook
//! and, whenever the hook fires while outside subscribers are still attached,
//! reports a deprecation notice naming the suggested replacement and the
//! version the deprecation started. Hooks nobody subscribes to stay silent.
//!
//! The host's hook tables are reached through the [`HookDispatch`] trait;
//! this crate ships no event bus of its own. Tracker callbacks always return
//! the first positional argument unchanged, so wrapping a filter hook never
//! alters what downstream subscribers see.
//!
//! Declaring a deprecation reads like the registration call it replaces:
//!
//! ```text
//! registry.declare(&mut dispatch, "old_thing", HookKind::Filter)
//!     .instead("new_thing")
//!     .since("2.0");
//! ```

mod dispatch;
mod kind;
mod registry;
mod tracker;

#[cfg(test)]
mod test_dispatch;

pub use dispatch::{HandlerId, HookDispatch, HookHandler, HookPriority};
pub use kind::HookKind;
pub use registry::DeprecationRegistry;
pub use tracker::Tracker;
