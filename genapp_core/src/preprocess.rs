use std::sync::LazyLock;

use regex::NoExpand;
use regex::Regex;

/// Expands to the camel-cased plugin name, e.g. `MyApp`.
pub const PLUGIN_TOKEN: &str = "__MYPLUGIN__";
/// Expands to the plugin name verbatim, e.g. `my-app`.
pub const PLUGIN_NAME_TOKEN: &str = "__MYPLUGINNAME__";
/// Expands to the plugin name with hyphens turned into underscores, e.g.
/// `my_app`.
pub const PLUGIN_UNDERSCORED_TOKEN: &str = "__MYPLUGIN_UNDERSCORED__";

const PLUGIN_EXPANSION: &str = "{{ go_vars(yaml.name) }}";
const PLUGIN_NAME_EXPANSION: &str = "{{ yaml.name }}";
const PLUGIN_UNDERSCORED_EXPANSION: &str = "{{ go_vars_underscored(yaml.name) }}";

/// Everything on a line up to and including the `// __MYPLUGIN:` marker (and
/// one optional space after it). `.` never crosses a newline.
static MARKER_COMMENT: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r".*// __MYPLUGIN: ?").unwrap_or_else(|e| panic!("invalid marker pattern: {e}"))
});

const GENERATED_BANNER: &str = "// This file is autogenerated by \"genapp\". Do not modify it.
// It has been generated from your '{{ yaml.name }}.yaml' file.
// To update those structures, update the '{{ yaml.name }}.yaml' and run 'genapp generate'
";

const CREATED_BANNER: &str = "// This file has been created by \"genapp\" as initial code. genapp will never update it, EXCEPT if you remove it.

// So, update it for your need.
";

/// File name prefix given to targets whose source is regenerated on every
/// run.
pub const GENERATED_PREFIX: &str = "generated-";

/// Rewrite raw template text into text ready for compilation.
///
/// The rewrites run in a fixed order:
///
/// 1. `__MYPLUGIN__` becomes a call to `go_vars` on the plugin name.
/// 2. `__MYPLUGINNAME__` becomes the plugin name.
/// 3. `__MYPLUGIN_UNDERSCORED__` becomes a call to `go_vars_underscored`.
/// 4. Marker comments are stripped: the line up to and including `//
///    __MYPLUGIN:` is removed, leaving whatever follows the marker. This lets
///    a template keep directives behind a comment so the raw file is still
///    valid source.
/// 5. Backslash line continuations (`\` followed by a newline) are collapsed.
pub fn preprocess(raw: &str) -> String {
	let text = raw
		.replace(PLUGIN_TOKEN, PLUGIN_EXPANSION)
		.replace(PLUGIN_NAME_TOKEN, PLUGIN_NAME_EXPANSION)
		.replace(PLUGIN_UNDERSCORED_TOKEN, PLUGIN_UNDERSCORED_EXPANSION);
	let text = MARKER_COMMENT.replace_all(&text, NoExpand(""));
	text.replace("\\\n", "")
}

/// Prepend the banner matching the regeneration policy.
///
/// An empty `comment` means the target has no comment syntax and the body is
/// returned unchanged. Otherwise every `//` in the banner is replaced with
/// `comment`.
pub fn with_banner(body: &str, comment: &str, reset: bool) -> String {
	if comment.is_empty() {
		return body.to_string();
	}

	let banner = if reset {
		GENERATED_BANNER
	} else {
		CREATED_BANNER
	};

	let mut result = banner_comment(banner, comment);
	result.push_str(body);
	result
}

fn banner_comment(banner: &str, comment: &str) -> String {
	banner.replace("//", comment)
}
