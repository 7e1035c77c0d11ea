use genapp_core::AnyEmptyResult;

mod common;

use common::genapp_cmd;
use common::write_project;

#[test]
fn models_lists_registered_sources() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	write_project(tmp.path())?;

	genapp_cmd()
		.arg("models")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains("rest_api (default)"))
		.stdout(predicates::str::contains("templates/rest_api"))
		.stdout(predicates::str::contains("generated-my_app.go"))
		.stdout(predicates::str::contains("created once"))
		.stdout(predicates::str::contains("0644"));

	Ok(())
}

#[test]
fn models_json_output() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	write_project(tmp.path())?;

	let output = genapp_cmd()
		.arg("models")
		.arg("--format")
		.arg("json")
		.arg("--path")
		.arg(tmp.path())
		.output()?;
	assert!(output.status.success());

	let models: serde_json::Value = serde_json::from_slice(&output.stdout)?;
	assert_eq!(models[0]["name"], "rest_api");
	assert_eq!(models[0]["sources"][1]["file"], "generated-my_app.go");
	assert_eq!(models[0]["sources"][1]["reset"], true);
	assert_eq!(models[0]["sources"][2]["rights"], "0644");

	Ok(())
}

#[test]
fn models_without_declarations() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("genapp.toml"), "descriptor = \"my-app.yaml\"\n")?;

	genapp_cmd()
		.arg("models")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains("No models declared."));

	Ok(())
}
