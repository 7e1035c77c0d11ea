use std::path::PathBuf;

use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;

#[derive(Parser)]
#[command(
	author,
	version,
	about = "Generate plugin sources from a plugin descriptor and source templates.",
	long_about = "genapp renders the source files of a plugin from a declarative descriptor.\n\nFiles \
	              registered with `reset = true` are machine-owned: they are regenerated on every \
	              run and their names get a `generated-` prefix. Other files are scaffolding: they \
	              are created once and never touched again while they exist.\n\nQuick start:\n  \
	              genapp init my-plugin   Create a descriptor and genapp.toml\n  genapp generate    \
	              Render the selected model\n  genapp models           List registered models"
)]
pub struct GenappCli {
	#[command(subcommand)]
	pub command: Option<Commands>,

	/// Path to the project root directory.
	#[arg(long, short, global = true)]
	pub path: Option<PathBuf>,

	/// Enable verbose output.
	#[arg(long, short, global = true, default_value_t = false)]
	pub verbose: bool,

	/// Disable colored output.
	#[arg(long, global = true, default_value_t = false)]
	pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
	/// Create a starter plugin descriptor and `genapp.toml`.
	///
	/// Writes `<PLUGIN_NAME>.yaml` and `genapp.toml` in the project root.
	/// Existing files are left untouched.
	Init {
		/// Name of the plugin, e.g. `my-plugin`.
		plugin_name: String,
	},
	/// Render every source of a model.
	///
	/// Machine-owned files are regenerated. Scaffolding files are only
	/// created when missing. Exits with a non-zero status code if any source
	/// fails.
	Generate {
		/// Model to apply. Defaults to `model` from genapp.toml, or the only
		/// declared model.
		#[arg(long, short)]
		model: Option<String>,

		/// Plugin descriptor to render from. Defaults to `descriptor` from
		/// genapp.toml.
		#[arg(long, short)]
		descriptor: Option<PathBuf>,

		/// Render every template but write nothing. Prints what would happen
		/// to each file.
		#[arg(long, default_value_t = false)]
		dry_run: bool,

		/// Keep applying the remaining sources after one fails, then report
		/// every failure.
		#[arg(long, default_value_t = false)]
		keep_going: bool,

		/// Output format for the generation report.
		#[arg(long, value_enum, default_value_t = OutputFormat::Text)]
		format: OutputFormat,
	},
	/// List the models declared in genapp.toml and their sources.
	Models {
		/// Output format for the model list.
		#[arg(long, value_enum, default_value_t = OutputFormat::Text)]
		format: OutputFormat,
	},
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
	/// Human-readable text output with colors and formatting.
	Text,
	/// JSON output for programmatic consumption.
	Json,
}
