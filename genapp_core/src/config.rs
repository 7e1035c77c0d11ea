use std::collections::BTreeMap;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;

use crate::GenError;
use crate::GenResult;
use crate::Models;

/// Supported config file locations in discovery order (highest precedence
/// first).
pub const CONFIG_FILE_CANDIDATES: [&str; 3] =
	["genapp.toml", ".genapp.toml", ".config/genapp.toml"];

/// Rights given to a generated file when its source entry sets none.
pub const DEFAULT_RIGHTS: u32 = 0o644;

/// Configuration loaded from a `genapp.toml` file.
///
/// ```toml
/// descriptor = "my-app.yaml"
/// templates = "templates"
/// model = "rest_api"
///
/// [[models.rest_api.sources]]
/// file = "main.go"
/// comment = "//"
///
/// [[models.rest_api.sources]]
/// file = "my-app.go"
/// template = "plugin.go"
/// comment = "//"
/// reset = true
///
/// [[models.rest_api.sources]]
/// file = "bin/build.sh"
/// template = "build.sh"
/// comment = "#"
/// rights = 0o755
/// ```
#[derive(Debug, Deserialize)]
pub struct GenConfig {
	/// Plugin descriptor file, relative to the project root.
	pub descriptor: PathBuf,
	/// Root of the template tree. Each model reads its templates from
	/// `templates/<model name>/`. Defaults to `templates`.
	#[serde(default = "default_templates")]
	pub templates: PathBuf,
	/// Directory generated files are written to. Defaults to the project
	/// root.
	#[serde(default)]
	pub output: Option<PathBuf>,
	/// Model applied when none is named on the command line.
	#[serde(default)]
	pub model: Option<String>,
	#[serde(default)]
	pub models: BTreeMap<String, ModelConfig>,
}

/// The sources of one model.
#[derive(Debug, Default, Deserialize)]
pub struct ModelConfig {
	#[serde(default)]
	pub sources: Vec<SourceConfig>,
}

/// One `[[models.<name>.sources]]` entry.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct SourceConfig {
	/// Target path, relative to the output directory.
	pub file: PathBuf,
	/// Template file, relative to the model directory. Defaults to `file`.
	#[serde(default)]
	pub template: Option<PathBuf>,
	/// Comment prefix used for the banner. Empty means no banner.
	#[serde(default)]
	pub comment: String,
	#[serde(default = "default_rights")]
	pub rights: u32,
	/// Regenerate the file on every run instead of creating it once.
	#[serde(default)]
	pub reset: bool,
}

impl SourceConfig {
	pub fn template_file(&self) -> &Path {
		self.template.as_deref().unwrap_or(&self.file)
	}
}

fn default_templates() -> PathBuf {
	PathBuf::from("templates")
}

fn default_rights() -> u32 {
	DEFAULT_RIGHTS
}

impl GenConfig {
	/// Resolve the config path from known discovery candidates.
	#[must_use]
	pub fn resolve_path(root: &Path) -> Option<PathBuf> {
		CONFIG_FILE_CANDIDATES
			.iter()
			.map(|candidate| root.join(candidate))
			.find(|path| path.is_file())
	}

	/// Load the config from the first discovered config file at `root`.
	/// Returns `None` if there is none.
	pub fn load(root: &Path) -> GenResult<Option<GenConfig>> {
		let Some(config_path) = Self::resolve_path(root) else {
			return Ok(None);
		};

		let content = std::fs::read_to_string(&config_path)?;
		Self::from_toml(&content).map(Some)
	}

	pub fn from_toml(content: &str) -> GenResult<GenConfig> {
		toml::from_str(content).map_err(|e| GenError::ConfigParse(e.to_string()))
	}

	/// Build the model registry described by this config. Template files are
	/// read now, relative to `root`.
	pub fn register(&self, root: &Path) -> GenResult<Models> {
		let template_root = root.join(&self.templates);
		let mut models = Models::new();

		for (name, model_config) in &self.models {
			let model = models.create(name.clone(), &template_root);
			for source in &model_config.sources {
				model.source(
					&source.file,
					source.rights,
					&source.comment,
					source.template_file(),
					source.reset,
				)?;
			}
		}

		Ok(models)
	}

	pub fn descriptor_path(&self, root: &Path) -> PathBuf {
		root.join(&self.descriptor)
	}

	pub fn output_root(&self, root: &Path) -> PathBuf {
		self.output
			.as_ref()
			.map_or_else(|| root.to_path_buf(), |output| root.join(output))
	}

	/// Pick the model to apply: `requested` if given, then the configured
	/// default, then the only model when exactly one is declared.
	pub fn select_model<'a>(&'a self, requested: Option<&'a str>) -> Option<&'a str> {
		if let Some(name) = requested.or(self.model.as_deref()) {
			return Some(name);
		}

		let mut names = self.models.keys();
		match (names.next(), names.next()) {
			(Some(only), None) => Some(only.as_str()),
			_ => None,
		}
	}
}
