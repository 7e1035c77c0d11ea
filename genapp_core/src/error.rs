use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Diagnostic, Error)]
#[non_exhaustive]
pub enum GenError {
	#[error(transparent)]
	#[diagnostic(code(genapp::io_error))]
	Io(#[from] std::io::Error),

	#[error("template source file `{path}` is not accessible")]
	#[diagnostic(
		code(genapp::template_missing),
		help("template files are read from `<templates>/<model>/`; check the model's template path")
	)]
	TemplateMissing { path: String },

	#[error("`{path}` is not a readable document: {reason}")]
	#[diagnostic(code(genapp::template_read))]
	TemplateRead { path: String, reason: String },

	#[error("template error in `{file}`: {reason}")]
	#[diagnostic(
		code(genapp::template_compile),
		help("placeholders are expanded before compilation; check the raw template around `__MYPLUGIN` markers")
	)]
	TemplateCompile { file: String, reason: String },

	#[error("failed to render `{file}`: {reason}")]
	#[diagnostic(code(genapp::template_render))]
	TemplateRender { file: String, reason: String },

	#[error("unable to create `{path}` tree: {reason}")]
	#[diagnostic(code(genapp::create_dir))]
	CreateDir { path: String, reason: String },

	#[error("`{path}` is not writeable: {reason}")]
	#[diagnostic(code(genapp::write_file))]
	WriteFile { path: String, reason: String },

	#[error("unable to set rights {rights:o} on `{path}`: {reason}")]
	#[diagnostic(code(genapp::set_permissions))]
	SetPermissions {
		path: String,
		rights: u32,
		reason: String,
	},

	#[error("invalid model `{0}` to apply")]
	#[diagnostic(
		code(genapp::unknown_model),
		help("run `genapp models` to list the registered models")
	)]
	UnknownModel(String),

	#[error("failed to parse plugin descriptor `{path}`: {reason}")]
	#[diagnostic(code(genapp::descriptor_parse))]
	DescriptorParse { path: String, reason: String },

	#[error("failed to parse config file: {0}")]
	#[diagnostic(
		code(genapp::config_parse),
		help("check that genapp.toml is valid TOML with a [models] table")
	)]
	ConfigParse(String),

	#[error("no genapp.toml found in `{0}`")]
	#[diagnostic(
		code(genapp::config_not_found),
		help("run `genapp init <plugin-name>` to create one")
	)]
	ConfigNotFound(String),
}

/// Broad classification of a [`GenError`], following the phase in which it
/// was raised.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
	/// A template file could not be found or read while registering a model.
	Registration,
	/// The preprocessed template is not valid template syntax.
	Compile,
	/// Rendering or writing the generated file failed.
	Filesystem,
	/// The requested model was never registered.
	Lookup,
	/// The descriptor or configuration could not be loaded.
	Input,
}

impl GenError {
	pub fn kind(&self) -> ErrorKind {
		match self {
			Self::TemplateMissing { .. } | Self::TemplateRead { .. } => ErrorKind::Registration,
			Self::TemplateCompile { .. } => ErrorKind::Compile,
			Self::Io(_)
			| Self::TemplateRender { .. }
			| Self::CreateDir { .. }
			| Self::WriteFile { .. }
			| Self::SetPermissions { .. } => ErrorKind::Filesystem,
			Self::UnknownModel(_) => ErrorKind::Lookup,
			Self::DescriptorParse { .. } | Self::ConfigParse(_) | Self::ConfigNotFound(_) => {
				ErrorKind::Input
			}
		}
	}
}

pub type GenResult<T> = Result<T, GenError>;
pub type AnyError = Box<dyn std::error::Error>;
pub type AnyEmptyResult = Result<(), AnyError>;
pub type AnyResult<T> = Result<T, AnyError>;
