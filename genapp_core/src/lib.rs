//! `genapp_core` is the engine behind [genapp](https://docs.rs/genapp_cli): it renders the source files of a plugin from a declarative plugin descriptor, regenerating machine-owned files on every run while leaving user-owned scaffolding alone once it exists.
//!
//! ## Processing Pipeline
//!
//! ```text
//! Raw template file
//!   → Preprocessor (expands __MYPLUGIN__ placeholders, strips marker comments, joins `\` continuations)
//!   → Banner (prepends a "generated" or "created" header in the target's comment syntax)
//!   → Source (preprocessed template + rights + reset policy, registered in a Model)
//!   → Generation (per source: skip if user-owned and present, else compile, render, write, chmod)
//! ```
//!
//! ## Modules
//!
//! - [`config`]: `genapp.toml` loading and declarative model registration.
//! - [`functions`]: the helper functions bound into every template (`go_vars`, `object_tree`, ...).
//! - [`skeleton`]: starter descriptor and config for a new plugin.
//!
//! ## Key Types
//!
//! - [`Models`]: registry of named [`Model`]s, owned by the caller.
//! - [`Model`]: the [`Source`]s generated from one template directory.
//! - [`YamlData`]: rendering context: the parsed [`PluginDescriptor`] and its raw text.
//! - [`GenerateReport`]: what happened to each target file.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use genapp_core::GenerateOptions;
//! use genapp_core::Models;
//! use genapp_core::YamlData;
//! use std::path::Path;
//!
//! let mut models = Models::new();
//! models
//! 	.create("rest_api", "templates")
//! 	.source("main.go", 0o644, "//", "main.go", false)
//! 	.unwrap()
//! 	.source("plugin.go", 0o644, "//", "plugin.go", true)
//! 	.unwrap();
//!
//! let data = YamlData::load(Path::new("my-app.yaml")).unwrap();
//! let report = models
//! 	.generate("rest_api", &data, &GenerateOptions::default())
//! 	.unwrap();
//! println!("{} source(s) applied", report.outcomes.len());
//! ```

pub use config::*;
pub use descriptor::*;
pub use engine::*;
pub use error::*;
pub use model::*;
pub use preprocess::*;

pub mod config;
mod descriptor;
mod engine;
#[allow(unused_assignments)]
mod error;
pub mod functions;
mod model;
mod preprocess;
pub mod skeleton;

#[cfg(test)]
mod __fixtures;
