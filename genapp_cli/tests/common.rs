#![allow(dead_code)]

use std::path::Path;

use assert_cmd::Command;
use insta_cmd::get_cargo_bin;

pub fn genapp_cmd() -> Command {
	let mut cmd = Command::new(get_cargo_bin("genapp"));
	cmd.env("NO_COLOR", "1");
	cmd.env_remove("RUST_LOG");
	cmd
}

pub const CONFIG: &str = r#"descriptor = "my-app.yaml"
model = "rest_api"

[[models.rest_api.sources]]
file = "main.go"
comment = "//"

[[models.rest_api.sources]]
file = "my_app.go"
template = "plugin.go"
comment = "//"
reset = true

[[models.rest_api.sources]]
file = "README.md"
"#;

pub const DESCRIPTOR: &str = r#"plugin: "my-app"
version: "0.1"
objects:
  repo:
    flags:
      title:
        only-for-actions: ["add"]
      token:
        secure: true
"#;

/// A project with a config, a descriptor and one `rest_api` model of three
/// sources.
pub fn write_project(root: &Path) -> std::io::Result<()> {
	let templates = root.join("templates/rest_api");
	std::fs::create_dir_all(&templates)?;
	std::fs::write(root.join("genapp.toml"), CONFIG)?;
	std::fs::write(root.join("my-app.yaml"), DESCRIPTOR)?;
	std::fs::write(
		templates.join("main.go"),
		"package main\n\nfunc main() {\n\t// __MYPLUGIN: {{ go_vars(yaml.name) }}Start()\n}\n",
	)?;
	std::fs::write(
		templates.join("plugin.go"),
		"package main\n\ntype __MYPLUGIN__Plugin struct {\n{% for action in \
		 object_tree(yaml.objects.repo) %}\t// {{ action }}\n{% endfor %}}\n",
	)?;
	std::fs::write(templates.join("README.md"), "# __MYPLUGINNAME__\n")?;

	Ok(())
}
