/// Flavor of a deprecated hook.
///
/// The two kinds behave identically; they differ only in the word used in the
/// notice text and in the registration function named as the report context.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum HookKind {
	/// Value-transforming hook; subscribers chain the first argument.
	Filter,
	/// Notification hook; subscriber return values are not chained.
	Action,
}

impl HookKind {
	/// Word substituted into the notice text.
	pub fn label(self) -> &'static str {
		match self {
			Self::Filter => "filter",
			Self::Action => "action",
		}
	}

	/// Registration function named as the context of a report.
	pub fn context(self) -> &'static str {
		match self {
			Self::Filter => "add_filter",
			Self::Action => "add_action",
		}
	}
}

impl std::fmt::Display for HookKind {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.label())
	}
}
