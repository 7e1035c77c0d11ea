use std::path::Path;

use crate::AnyEmptyResult;
use crate::FlagOptions;
use crate::PluginFlag;
use crate::PluginObject;
use crate::YamlData;

pub const MY_APP_YAML: &str = r#"plugin: "my-app"
version: "0.1"
description: "my-app plugin."
actions:
  common:
    help: "common flags"
    flags:
      my-app-debug:
        help: "To activate my-app debug information"
objects:
  repo:
    help: "a repository"
    flags:
      title:
        help: "repository title"
        only-for-actions: ["add"]
      token:
        help: "access token"
        secure: true
  user:
    default-actions: ["add", "remove"]
    flags:
      login:
        help: "user login"
"#;

pub fn my_app_data() -> YamlData {
	YamlData::from_yaml(MY_APP_YAML).unwrap_or_else(|e| panic!("invalid fixture: {e}"))
}

pub fn flag(actions: &[&str]) -> PluginFlag {
	PluginFlag {
		options: FlagOptions::default(),
		actions: actions.iter().map(ToString::to_string).collect(),
	}
}

pub fn secure_flag() -> PluginFlag {
	PluginFlag {
		options: FlagOptions {
			secure: true,
			..FlagOptions::default()
		},
		actions: Vec::new(),
	}
}

pub fn object(actions: &[&str], flags: Vec<(&str, PluginFlag)>) -> PluginObject {
	PluginObject {
		actions: actions.iter().map(ToString::to_string).collect(),
		flags: flags
			.into_iter()
			.map(|(name, flag)| (name.to_string(), flag))
			.collect(),
		..PluginObject::default()
	}
}

/// Write `files` (relative path, content) under `root`, creating parent
/// directories.
pub fn write_files(root: &Path, files: &[(&str, &str)]) -> AnyEmptyResult {
	for (path, content) in files {
		let path = root.join(path);
		if let Some(parent) = path.parent() {
			std::fs::create_dir_all(parent)?;
		}
		std::fs::write(path, content)?;
	}

	Ok(())
}

#[cfg(unix)]
pub fn mode(path: &Path) -> u32 {
	use std::os::unix::fs::PermissionsExt;

	std::fs::metadata(path)
		.map(|metadata| metadata.permissions().mode() & 0o777)
		.unwrap_or_else(|e| panic!("no metadata for {}: {e}", path.display()))
}
