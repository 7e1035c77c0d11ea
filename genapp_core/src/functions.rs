//! Helper functions bound into every template environment.
//!
//! The set is closed: templates are first-party, so new helpers are added
//! here rather than registered by callers.

use std::collections::BTreeMap;

use minijinja::Environment;
use minijinja::Error;
use minijinja::Value;
use serde::Deserialize;

use crate::PluginFlag;
use crate::PluginObject;

/// Names of every helper registered by [`register`].
pub const NAMES: [&str; 6] = [
	"escape",
	"go_vars",
	"go_vars_underscored",
	"has_prefix",
	"object_has_secure",
	"object_tree",
];

/// Actions used by [`object_tree`] when an object declares none.
pub const DEFAULT_ACTIONS: [&str; 5] = ["add", "change", "remove", "rename", "list"];

/// Flags grouped by action name, then by flag name.
pub type ActionTree = BTreeMap<String, BTreeMap<String, PluginFlag>>;

/// Register the helper functions on `env`.
///
/// The string helpers are also available as filters, so `{{ name | go_vars }}`
/// and `{{ go_vars(name) }}` are equivalent.
pub fn register(env: &mut Environment<'_>) {
	env.add_function("escape", |s: String| escape(&s));
	env.add_function("go_vars", |s: String| go_vars(&s));
	env.add_function("go_vars_underscored", |s: String| go_vars_underscored(&s));
	env.add_function("has_prefix", |s: String, prefix: String| {
		has_prefix(&s, &prefix)
	});
	env.add_function("object_has_secure", |object: Value| -> Result<bool, Error> {
		Ok(object_has_secure(&plugin_object(object)?))
	});
	env.add_function("object_tree", |object: Value| -> Result<Value, Error> {
		Ok(Value::from_serialize(object_tree(&plugin_object(object)?)))
	});

	env.add_filter("escape", |s: String| escape(&s));
	env.add_filter("go_vars", |s: String| go_vars(&s));
	env.add_filter("go_vars_underscored", |s: String| go_vars_underscored(&s));
}

/// An object the descriptor does not declare behaves like an empty one.
fn plugin_object(value: Value) -> Result<PluginObject, Error> {
	if value.is_undefined() || value.is_none() {
		return Ok(PluginObject::default());
	}

	PluginObject::deserialize(value)
}

/// Escape text for embedding as a double-quoted string literal. Quotes are
/// backslash-escaped and each newline closes the literal and continues it on
/// the next line with `+`.
pub fn escape(s: &str) -> String {
	s.replace('"', "\\\"").replace('\n', "\\n\" +\n   \"")
}

/// Title-case every word and drop hyphens: `my-app` becomes `MyApp`.
///
/// A word starts after ASCII characters other than letters, digits and `_`,
/// and after any whitespace, so `my_app` only becomes `My_app`.
pub fn go_vars(s: &str) -> String {
	let mut result = String::with_capacity(s.len());
	let mut previous_is_separator = true;

	for c in s.chars() {
		if previous_is_separator {
			result.extend(c.to_uppercase());
		} else {
			result.push(c);
		}
		previous_is_separator = is_word_separator(c);
	}

	result.replace('-', "")
}

/// ASCII punctuation and symbols end a word. Outside ASCII only whitespace
/// does; other non-letter characters are part of the word.
fn is_word_separator(c: char) -> bool {
	if c.is_ascii() {
		return !(c.is_ascii_alphanumeric() || c == '_');
	}

	if c.is_alphanumeric() {
		return false;
	}

	c.is_whitespace()
}

/// Replace hyphens with underscores: `my-app` becomes `my_app`.
pub fn go_vars_underscored(s: &str) -> String {
	s.replace('-', "_")
}

pub fn has_prefix(s: &str, prefix: &str) -> bool {
	s.starts_with(prefix)
}

/// Returns true if any flag of the object is marked secure.
pub fn object_has_secure(object: &PluginObject) -> bool {
	object.flags.values().any(|flag| flag.options.secure)
}

/// Group an object's flags by the actions they apply to.
///
/// The action list is the object's own list, or [`DEFAULT_ACTIONS`] when it
/// has none. A flag without an action restriction lands in every action;
/// a restricted flag only lands in the actions it names. Actions that end up
/// with no flags are left out.
pub fn object_tree(object: &PluginObject) -> ActionTree {
	let actions: Vec<&str> = if object.actions.is_empty() {
		DEFAULT_ACTIONS.to_vec()
	} else {
		object.actions.iter().map(String::as_str).collect()
	};

	let mut tree = ActionTree::new();
	for action in actions {
		let flags: BTreeMap<String, PluginFlag> = object
			.flags
			.iter()
			.filter(|(_, flag)| flag.actions.is_empty() || flag.actions.iter().any(|a| a == action))
			.map(|(name, flag)| (name.clone(), flag.clone()))
			.collect();

		if !flags.is_empty() {
			tree.insert(action.to_string(), flags);
		}
	}

	tree
}
