//! Plugin descriptor model.
//!
//! Only the fields that templates and the helper functions read are modelled.
//! Unknown keys are ignored so descriptors written for newer plugin runtimes
//! still load.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use serde::Serialize;

use crate::GenError;
use crate::GenResult;

/// A parsed plugin descriptor.
///
/// ```yaml
/// plugin: "my-app"
/// version: "0.1"
/// description: "my-app plugin."
/// actions:
///   common:
///     flags:
///       my-app-debug:
///         help: "To activate my-app debug information"
/// objects:
///   repo:
///     default-actions: ["add", "change"]
///     flags:
///       token:
///         secure: true
///       title:
///         only-for-actions: ["add"]
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct PluginDescriptor {
	/// Plugin name. Read from `plugin` (or `name`), exposed to templates as
	/// `yaml.name`.
	#[serde(rename(deserialize = "plugin"), alias = "name")]
	pub name: String,
	#[serde(default)]
	pub version: String,
	#[serde(default)]
	pub description: String,
	#[serde(default)]
	pub created_flag_file: String,
	/// Runtime settings are passed through to templates untouched.
	#[serde(default)]
	pub runtime: Option<serde_yaml_ng::Value>,
	#[serde(default)]
	pub actions: BTreeMap<String, PluginTask>,
	#[serde(default)]
	pub objects: BTreeMap<String, PluginObject>,
}

/// A task section (`common`, `create`, `update`, `maintain`, ...).
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct PluginTask {
	#[serde(default)]
	pub help: String,
	#[serde(default)]
	pub flags: BTreeMap<String, PluginFlag>,
}

/// An object the plugin manages, with the flags each action accepts.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct PluginObject {
	#[serde(default)]
	pub help: String,
	/// Actions supported by the object. Empty means the default action set.
	#[serde(default, rename = "default-actions", alias = "actions")]
	pub actions: Vec<String>,
	#[serde(default)]
	pub identified_by_flag: String,
	#[serde(default)]
	pub flags: BTreeMap<String, PluginFlag>,
}

/// A single flag definition.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct PluginFlag {
	#[serde(flatten)]
	pub options: FlagOptions,
	/// Restricts the flag to the listed actions. Empty means the flag applies
	/// to every action.
	#[serde(default, rename = "only-for-actions", alias = "actions")]
	pub actions: Vec<String>,
}

/// Text options accept any YAML scalar: `default: 5` reads as `"5"`.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct FlagOptions {
	#[serde(default, deserialize_with = "scalar_string")]
	pub help: String,
	#[serde(default)]
	pub required: bool,
	#[serde(default, deserialize_with = "scalar_string")]
	pub default: String,
	#[serde(default)]
	pub hidden: bool,
	#[serde(default)]
	pub secure: bool,
	#[serde(default, deserialize_with = "scalar_string")]
	pub envar: String,
}

fn scalar_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
	D: serde::Deserializer<'de>,
{
	match serde_yaml_ng::Value::deserialize(deserializer)? {
		serde_yaml_ng::Value::Null => Ok(String::new()),
		serde_yaml_ng::Value::Bool(value) => Ok(value.to_string()),
		serde_yaml_ng::Value::Number(value) => Ok(value.to_string()),
		serde_yaml_ng::Value::String(value) => Ok(value),
		other => {
			Err(serde::de::Error::custom(format!(
				"expected a scalar value, found {other:?}"
			)))
		}
	}
}

impl PluginDescriptor {
	/// Parse a descriptor from YAML text. `path_display` is only used in error
	/// messages.
	pub fn from_yaml(content: &str, path_display: &str) -> GenResult<Self> {
		serde_yaml_ng::from_str(content).map_err(|e| {
			GenError::DescriptorParse {
				path: path_display.to_string(),
				reason: e.to_string(),
			}
		})
	}
}

/// The rendering context handed to every template: the parsed descriptor and
/// the raw text it was parsed from.
///
/// Templates read them as `yaml` and `yaml_data`, so a created-once file can
/// embed the original descriptor verbatim.
#[derive(Debug, Clone, Serialize)]
pub struct YamlData {
	pub yaml: PluginDescriptor,
	pub yaml_data: String,
}

impl YamlData {
	pub fn new(yaml: PluginDescriptor, raw: impl Into<String>) -> Self {
		Self {
			yaml,
			yaml_data: raw.into(),
		}
	}

	/// Parse `raw` and keep it alongside the parsed descriptor.
	pub fn from_yaml(raw: &str) -> GenResult<Self> {
		let yaml = PluginDescriptor::from_yaml(raw, "<inline>")?;
		Ok(Self::new(yaml, raw))
	}

	/// Read and parse the descriptor file at `path`.
	pub fn load(path: &Path) -> GenResult<Self> {
		let raw = std::fs::read_to_string(path).map_err(|e| {
			GenError::DescriptorParse {
				path: path.display().to_string(),
				reason: e.to_string(),
			}
		})?;
		let yaml = PluginDescriptor::from_yaml(&raw, &path.display().to_string())?;
		Ok(Self::new(yaml, raw))
	}

	pub fn name(&self) -> &str {
		&self.yaml.name
	}
}
