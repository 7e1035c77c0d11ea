use genapp_core::AnyEmptyResult;
use genapp_core::GenConfig;
use genapp_core::YamlData;
use predicates::prelude::PredicateBooleanExt;
use similar_asserts::assert_eq;

mod common;

use common::genapp_cmd;

#[test]
fn can_init() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let assert = genapp_cmd()
		.arg("init")
		.arg("my-app")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success();
	assert
		.stdout(predicates::str::contains("Created"))
		.stdout(predicates::str::contains("my-app.yaml"))
		.stdout(predicates::str::contains("genapp.toml"));

	let data = YamlData::load(&tmp.path().join("my-app.yaml"))?;
	assert_eq!(data.name(), "my-app");
	assert!(data.yaml.actions.contains_key("create"));

	let config = GenConfig::load(tmp.path())?.ok_or("missing genapp.toml")?;
	assert_eq!(config.descriptor.to_str(), Some("my-app.yaml"));
	assert_eq!(config.model.as_deref(), Some("main"));

	Ok(())
}

#[test]
fn init_does_not_overwrite() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let descriptor_path = tmp.path().join("my-app.yaml");
	std::fs::write(&descriptor_path, "existing descriptor")?;

	let config_path = tmp.path().join("genapp.toml");
	std::fs::write(&config_path, "existing config")?;

	genapp_cmd()
		.arg("init")
		.arg("my-app")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains("already exists"))
		.stdout(predicates::str::contains("Next steps").not());

	assert_eq!(
		std::fs::read_to_string(&descriptor_path)?,
		"existing descriptor"
	);
	assert_eq!(std::fs::read_to_string(&config_path)?, "existing config");

	Ok(())
}

#[test]
fn init_shows_next_steps() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;

	genapp_cmd()
		.arg("init")
		.arg("my-app")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains("Next steps"))
		.stdout(predicates::str::contains("genapp generate"));

	Ok(())
}

#[test]
fn init_requires_a_plugin_name() {
	genapp_cmd().arg("init").assert().failure();
}
