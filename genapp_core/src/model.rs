use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::path::Path;
use std::path::PathBuf;

use crate::GENERATED_PREFIX;
use crate::GenError;
use crate::GenResult;
use crate::preprocess;
use crate::with_banner;

/// One generatable file: its preprocessed template and how it is written.
///
/// When `reset` is true the file is machine-owned and rewritten on every run.
/// Otherwise it is scaffolding: written once, then left alone for as long as
/// it exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Source {
	reset: bool,
	template: String,
	rights: u32,
}

impl Source {
	/// Build a source from raw template text. The text is preprocessed and,
	/// when `comment` is not empty, prefixed with the banner matching `reset`.
	pub fn new(raw: &str, comment: &str, rights: u32, reset: bool) -> Self {
		Self {
			reset,
			template: with_banner(&preprocess(raw), comment, reset),
			rights,
		}
	}

	pub fn reset(&self) -> bool {
		self.reset
	}

	/// The template body, ready for compilation.
	pub fn template(&self) -> &str {
		&self.template
	}

	pub fn rights(&self) -> u32 {
		self.rights
	}
}

/// A collection of sources read from one template directory, keyed by target
/// path.
#[derive(Debug, Clone, Default)]
pub struct Model {
	sources: BTreeMap<PathBuf, Source>,
	model_path: PathBuf,
}

impl Model {
	pub fn new(model_path: impl Into<PathBuf>) -> Self {
		Self {
			sources: BTreeMap::new(),
			model_path: model_path.into(),
		}
	}

	/// Directory the raw template files are read from.
	pub fn model_path(&self) -> &Path {
		&self.model_path
	}

	pub fn sources(&self) -> &BTreeMap<PathBuf, Source> {
		&self.sources
	}

	pub fn get(&self, file: impl AsRef<Path>) -> Option<&Source> {
		self.sources.get(file.as_ref())
	}

	pub fn len(&self) -> usize {
		self.sources.len()
	}

	pub fn is_empty(&self) -> bool {
		self.sources.is_empty()
	}

	/// Register `template_file` (relative to [`Model::model_path`]) as the
	/// template for `file`.
	///
	/// The template is read once, here. A missing or unreadable file is an
	/// error; it is never skipped. When `comment` is not empty and `reset` is
	/// true the target file name gains the `generated-` prefix. Registering
	/// the same target twice replaces the earlier source.
	pub fn source(
		&mut self,
		file: impl AsRef<Path>,
		rights: u32,
		comment: &str,
		template_file: impl AsRef<Path>,
		reset: bool,
	) -> GenResult<&mut Self> {
		let template_path = self.model_path.join(template_file);
		if !template_path.is_file() {
			return Err(GenError::TemplateMissing {
				path: template_path.display().to_string(),
			});
		}

		let raw = std::fs::read_to_string(&template_path).map_err(|e| {
			GenError::TemplateRead {
				path: template_path.display().to_string(),
				reason: e.to_string(),
			}
		})?;

		Ok(self.source_from_str(file, rights, comment, &raw, reset))
	}

	/// Register raw template text directly, without reading it from the model
	/// directory. Same naming and banner rules as [`Model::source`].
	pub fn source_from_str(
		&mut self,
		file: impl AsRef<Path>,
		rights: u32,
		comment: &str,
		raw: &str,
		reset: bool,
	) -> &mut Self {
		let target = target_path(file.as_ref(), comment, reset);
		tracing::debug!(target = %target.display(), reset, "registered source");
		self.sources
			.insert(target, Source::new(raw, comment, rights, reset));
		self
	}
}

/// Regenerated files with a comment syntax are visibly marked by prefixing
/// their file name.
fn target_path(file: &Path, comment: &str, reset: bool) -> PathBuf {
	if comment.is_empty() || !reset {
		return file.to_path_buf();
	}

	let Some(name) = file.file_name() else {
		return file.to_path_buf();
	};

	let mut prefixed = std::ffi::OsString::from(GENERATED_PREFIX);
	prefixed.push(name);
	file.with_file_name(prefixed)
}

/// Registry of models, keyed by name.
#[derive(Debug, Clone, Default)]
pub struct Models {
	models: BTreeMap<String, Model>,
}

impl Models {
	pub fn new() -> Self {
		Self::default()
	}

	/// Create an empty model named `name` whose templates live in
	/// `template_path/name`, replacing any model already registered under
	/// that name.
	pub fn create(&mut self, name: impl Into<String>, template_path: impl AsRef<Path>) -> &mut Model {
		let name = name.into();
		let model = Model::new(template_path.as_ref().join(&name));
		self.insert(name, model)
	}

	/// Register a prebuilt model, replacing any model with the same name.
	pub fn insert(&mut self, name: impl Into<String>, model: Model) -> &mut Model {
		match self.models.entry(name.into()) {
			Entry::Occupied(mut entry) => {
				entry.insert(model);
				entry.into_mut()
			}
			Entry::Vacant(entry) => entry.insert(model),
		}
	}

	pub fn get(&self, name: &str) -> Option<&Model> {
		self.models.get(name)
	}

	/// Look up a model, failing with [`GenError::UnknownModel`] when it was
	/// never registered.
	pub fn model(&self, name: &str) -> GenResult<&Model> {
		self.get(name)
			.ok_or_else(|| GenError::UnknownModel(name.to_string()))
	}

	/// Registered model names in sorted order.
	pub fn names(&self) -> impl Iterator<Item = &str> {
		self.models.keys().map(String::as_str)
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, &Model)> {
		self.models.iter().map(|(name, model)| (name.as_str(), model))
	}

	pub fn len(&self) -> usize {
		self.models.len()
	}

	pub fn is_empty(&self) -> bool {
		self.models.is_empty()
	}
}
