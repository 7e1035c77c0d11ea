use std::path::Path;
use std::path::PathBuf;

use minijinja::AutoEscape;
use minijinja::Environment;
use minijinja::UndefinedBehavior;
use minijinja::Value;
use minijinja::value::ValueKind;
use serde::Serialize;

use crate::GenError;
use crate::GenResult;
use crate::Model;
use crate::Models;
use crate::Source;
use crate::YamlData;
use crate::functions;

/// What a batch does when one source fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
	/// Stop at the first failing source and return its error. Files written
	/// earlier in the batch are kept.
	#[default]
	Abort,
	/// Record the failure in the report and carry on with the remaining
	/// sources.
	Continue,
}

/// Options for applying a model.
#[derive(Debug, Clone)]
pub struct GenerateOptions {
	/// Directory that relative target paths resolve against.
	pub output_root: PathBuf,
	/// Compile and render every template but write nothing.
	pub dry_run: bool,
	pub failure_policy: FailurePolicy,
}

impl Default for GenerateOptions {
	fn default() -> Self {
		Self {
			output_root: PathBuf::from("."),
			dry_run: false,
			failure_policy: FailurePolicy::default(),
		}
	}
}

/// What happened to one target file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceStatus {
	/// Machine-owned file written again.
	Regenerated,
	/// Scaffolding file written for the first time. Later runs leave it alone.
	Created,
	/// Scaffolding file already present, left untouched.
	Preserved,
}

#[derive(Debug, Clone, Serialize)]
pub struct SourceOutcome {
	/// Target path relative to the output root.
	pub file: PathBuf,
	pub status: SourceStatus,
}

#[derive(Debug)]
pub struct SourceFailure {
	pub file: PathBuf,
	pub error: GenError,
}

/// Result of applying a model.
#[derive(Debug, Default)]
pub struct GenerateReport {
	pub model: String,
	pub dry_run: bool,
	/// Outcomes in target path order.
	pub outcomes: Vec<SourceOutcome>,
	/// Only filled with [`FailurePolicy::Continue`].
	pub failures: Vec<SourceFailure>,
}

impl GenerateReport {
	/// Returns true if every source was applied.
	pub fn is_ok(&self) -> bool {
		self.failures.is_empty()
	}

	pub fn count(&self, status: SourceStatus) -> usize {
		self.outcomes
			.iter()
			.filter(|outcome| outcome.status == status)
			.count()
	}
}

impl Models {
	/// Apply every source of the model `name` using `data` as the rendering
	/// context.
	///
	/// An unregistered name fails before anything is written. Each source
	/// only depends on whether its own target already exists.
	pub fn generate(
		&self,
		name: &str,
		data: &YamlData,
		options: &GenerateOptions,
	) -> GenResult<GenerateReport> {
		let model = self.model(name)?;
		let mut report = model.apply(data, options)?;
		report.model = name.to_string();
		Ok(report)
	}
}

impl Model {
	/// Apply every source of this model. See [`Models::generate`].
	pub fn apply(&self, data: &YamlData, options: &GenerateOptions) -> GenResult<GenerateReport> {
		let mut report = GenerateReport {
			dry_run: options.dry_run,
			..GenerateReport::default()
		};

		for (file, source) in self.sources() {
			match source.apply(file, data, options) {
				Ok(status) => {
					report.outcomes.push(SourceOutcome {
						file: file.clone(),
						status,
					});
				}
				Err(error) if options.failure_policy == FailurePolicy::Continue => {
					tracing::warn!(file = %file.display(), %error, "source failed");
					report.failures.push(SourceFailure {
						file: file.clone(),
						error,
					});
				}
				Err(error) => return Err(error),
			}
		}

		Ok(report)
	}
}

impl Source {
	/// Apply this source to `file` (relative to the output root).
	///
	/// An existing target is left alone unless the source is reset. Otherwise
	/// the template is rendered, the parent directory is created if needed,
	/// the file is written and its rights are set.
	pub fn apply(
		&self,
		file: &Path,
		data: &YamlData,
		options: &GenerateOptions,
	) -> GenResult<SourceStatus> {
		let path = options.output_root.join(file);

		if path.exists() && !self.reset() {
			tracing::debug!(file = %file.display(), "target exists, not updating");
			return Ok(SourceStatus::Preserved);
		}

		let shown = file.display().to_string();
		let rendered = render_source(self.template(), &shown, data)?;
		let status = if self.reset() {
			SourceStatus::Regenerated
		} else {
			SourceStatus::Created
		};

		if options.dry_run {
			tracing::debug!(file = %shown, ?status, "dry run, not writing");
			return Ok(status);
		}

		write_target(&path, &rendered, self.rights())?;

		if self.reset() {
			tracing::info!(file = %shown, "regenerated");
		} else {
			tracing::info!(file = %shown, "created, won't be updated while it exists");
		}

		Ok(status)
	}
}

/// Build the environment every source is rendered with: trailing newlines
/// kept, no auto-escaping, undefined values are errors, booleans printed as
/// `true`/`false`, and the helper functions bound.
pub fn environment<'source>() -> Environment<'source> {
	let mut env = Environment::new();
	env.set_keep_trailing_newline(true);
	env.set_undefined_behavior(UndefinedBehavior::Strict);
	env.set_auto_escape_callback(|_| AutoEscape::None);
	env.set_formatter(|out, state, value| {
		if value.kind() == ValueKind::Bool {
			let literal = Value::from(if value.is_true() { "true" } else { "false" });
			return minijinja::escape_formatter(out, state, &literal);
		}

		minijinja::escape_formatter(out, state, value)
	});
	functions::register(&mut env);
	env
}

/// Compile `template` and render it against `data`. `name` identifies the
/// template in error messages.
pub fn render_source(template: &str, name: &str, data: &YamlData) -> GenResult<String> {
	let mut env = environment();
	env.add_template(name, template)
		.map_err(|e| {
			GenError::TemplateCompile {
				file: name.to_string(),
				reason: e.to_string(),
			}
		})?;

	let compiled = env.get_template(name).map_err(|e| {
		GenError::TemplateCompile {
			file: name.to_string(),
			reason: e.to_string(),
		}
	})?;

	compiled.render(data).map_err(|e| {
		GenError::TemplateRender {
			file: name.to_string(),
			reason: e.to_string(),
		}
	})
}

fn write_target(path: &Path, content: &str, rights: u32) -> GenResult<()> {
	if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
		std::fs::create_dir_all(parent).map_err(|e| {
			GenError::CreateDir {
				path: parent.display().to_string(),
				reason: e.to_string(),
			}
		})?;
	}

	std::fs::write(path, content).map_err(|e| {
		GenError::WriteFile {
			path: path.display().to_string(),
			reason: e.to_string(),
		}
	})?;

	set_rights(path, rights).map_err(|e| {
		GenError::SetPermissions {
			path: path.display().to_string(),
			rights,
			reason: e.to_string(),
		}
	})
}

#[cfg(unix)]
fn set_rights(path: &Path, rights: u32) -> std::io::Result<()> {
	use std::os::unix::fs::PermissionsExt;

	std::fs::set_permissions(path, std::fs::Permissions::from_mode(rights))
}

#[cfg(not(unix))]
fn set_rights(path: &Path, rights: u32) -> std::io::Result<()> {
	let mut permissions = std::fs::metadata(path)?.permissions();
	permissions.set_readonly(rights & 0o222 == 0);
	std::fs::set_permissions(path, permissions)
}
