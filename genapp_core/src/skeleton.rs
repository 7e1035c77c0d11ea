//! Starter files for a new plugin.

use std::path::PathBuf;

use crate::Model;
use crate::PluginDescriptor;
use crate::YamlData;

/// Starter plugin descriptor. Rendered like any other source; the
/// `{{ "{{ ... }}" }}` expressions emit placeholders the plugin runtime
/// expands later.
pub const DESCRIPTOR_TEMPLATE: &str = r#"---
plugin: "__MYPLUGINNAME__"
version: "0.1"
description: "__MYPLUGINNAME__ plugin."
runtime:
  docker_image: "__MYPLUGINNAME__"
  service_type: "REST API"
  service:
    #socket: "__MYPLUGINNAME__.sock"
    parameters: [ "service", "start" ]
created_flag_file: "{{ "{{ .InstanceName }}" }}/forjj-{{ "{{ .Name }}" }}.yaml"
actions:
  common:
    flags:
      forjj-infra:
        help: "Name of the Infra repository to use"
      __MYPLUGINNAME__-debug:
        help: "To activate __MYPLUGINNAME__ debug information"
      forjj-source-mount: # Used by the plugin to store plugin data in yaml. See __MYPLUGIN_UNDERSCORED___plugin.go
        help: "Where the source dir is located for __MYPLUGINNAME__ plugin."
  create:
    help: "Create a __MYPLUGINNAME__ instance source code."
    flags:
      # Options related to source code
      forjj-instance-name: # Used by the plugin to store plugin data in yaml for the current instance. See __MYPLUGIN_UNDERSCORED___plugin.go
        help: "Name of the __MYPLUGINNAME__ instance given by forjj."
        group: "source"
  update:
    help: "Update a __MYPLUGINNAME__ instance source code"
    flags:
      forjj-instance-name: # Used by the plugin to store plugin data in yaml for the current instance. See __MYPLUGIN_UNDERSCORED___plugin.go
        help: "Name of the __MYPLUGINNAME__ instance given by forjj."
        group: "source"
  maintain:
    help: "Instantiate __MYPLUGINNAME__ thanks to source code."
"#;

/// Sample `genapp.toml` written next to a new descriptor.
pub const CONFIG_TEMPLATE: &str = r#"# genapp configuration
descriptor = "__MYPLUGINNAME__.yaml"
templates = "templates"
model = "main"

# Each source renders `templates/<model>/<template>` into `file`.
# `reset = true` regenerates the file on every run (and prefixes its name
# with `generated-`); otherwise it is created once and never touched again.
#
# [[models.main.sources]]
# file = "main.go"
# comment = "//"
#
# [[models.main.sources]]
# file = "__MYPLUGIN_UNDERSCORED__.go"
# template = "plugin.go"
# comment = "//"
# reset = true
"#;

/// Path of the descriptor created for `plugin_name`.
pub fn descriptor_file(plugin_name: &str) -> PathBuf {
	PathBuf::from(format!("{plugin_name}.yaml"))
}

/// A model creating the starter descriptor and config for a new plugin. Both
/// are created once and never overwritten.
pub fn init_model(plugin_name: &str) -> Model {
	let mut model = Model::default();
	model
		.source_from_str(descriptor_file(plugin_name), 0o644, "", DESCRIPTOR_TEMPLATE, false)
		.source_from_str("genapp.toml", 0o644, "", CONFIG_TEMPLATE, false);
	model
}

/// Rendering context for a plugin that has no descriptor yet.
pub fn init_context(plugin_name: &str) -> YamlData {
	let yaml = PluginDescriptor {
		name: plugin_name.to_string(),
		..PluginDescriptor::default()
	};
	YamlData::new(yaml, String::new())
}
