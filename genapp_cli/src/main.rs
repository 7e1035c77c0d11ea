use std::path::PathBuf;
use std::process;

use clap::Parser;
use genapp_cli::Commands;
use genapp_cli::GenappCli;
use genapp_cli::OutputFormat;
use genapp_core::FailurePolicy;
use genapp_core::GenConfig;
use genapp_core::GenError;
use genapp_core::GenerateOptions;
use genapp_core::GenerateReport;
use genapp_core::SourceStatus;
use genapp_core::YamlData;
use genapp_core::skeleton;
use owo_colors::OwoColorize;
use tracing_subscriber::EnvFilter;

static USE_COLOR: std::sync::atomic::AtomicBool = std::sync::atomic::AtomicBool::new(true);

fn color_enabled() -> bool {
	USE_COLOR.load(std::sync::atomic::Ordering::Relaxed)
}

/// Apply ANSI color codes only when color is enabled.
macro_rules! colored {
	($text:expr,red) => {
		if color_enabled() {
			format!("{}", $text.red())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,green) => {
		if color_enabled() {
			format!("{}", $text.green())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,yellow) => {
		if color_enabled() {
			format!("{}", $text.yellow())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,bold) => {
		if color_enabled() {
			format!("{}", $text.bold())
		} else {
			format!("{}", $text)
		}
	};
}

fn main() {
	let args = GenappCli::parse();

	// Respect NO_COLOR env var and --no-color flag.
	let use_color = !args.no_color && std::env::var_os("NO_COLOR").is_none();
	if !use_color {
		USE_COLOR.store(false, std::sync::atomic::Ordering::Relaxed);
	}

	init_tracing(args.verbose, use_color);

	// Install miette's fancy handler for rich error diagnostics.
	miette::set_hook(Box::new(move |_| {
		Box::new(
			miette::MietteHandlerOpts::new()
				.color(use_color)
				.unicode(use_color)
				.build(),
		)
	}))
	.ok();

	let result = match &args.command {
		Some(Commands::Init { plugin_name }) => run_init(&args, plugin_name),
		Some(Commands::Generate {
			model,
			descriptor,
			dry_run,
			keep_going,
			format,
		}) => {
			run_generate(
				&args,
				model.as_deref(),
				descriptor.clone(),
				*dry_run,
				*keep_going,
				*format,
			)
		}
		Some(Commands::Models { format }) => run_models(&args, *format),
		None => {
			eprintln!("No subcommand specified. Run `genapp --help` for usage.");
			process::exit(1);
		}
	};

	if let Err(e) = result {
		// Try to render through miette for rich diagnostics with help text
		// and error codes.
		match e.downcast::<GenError>() {
			Ok(gen_err) => {
				let report: miette::Report = (*gen_err).into();
				eprintln!("{report:?}");
			}
			Err(e) => {
				eprintln!("{} {e}", colored!("error:", red));
			}
		}
		process::exit(2);
	}
}

/// Log to stderr. `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool, use_color: bool) {
	let default_level = if verbose { "debug" } else { "warn" };
	let filter =
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_ansi(use_color)
		.with_target(false)
		.init();
}

fn resolve_root(args: &GenappCli) -> PathBuf {
	args.path
		.clone()
		.unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
}

fn load_config(args: &GenappCli) -> Result<(PathBuf, GenConfig), Box<dyn std::error::Error>> {
	let root = resolve_root(args);
	let Some(config) = GenConfig::load(&root)? else {
		return Err(GenError::ConfigNotFound(root.display().to_string()).into());
	};

	Ok((root, config))
}

fn run_init(args: &GenappCli, plugin_name: &str) -> Result<(), Box<dyn std::error::Error>> {
	let root = resolve_root(args);
	let model = skeleton::init_model(plugin_name);
	let options = GenerateOptions {
		output_root: root.clone(),
		..GenerateOptions::default()
	};
	let report = model.apply(&skeleton::init_context(plugin_name), &options)?;

	for outcome in &report.outcomes {
		let path = root.join(&outcome.file);
		match outcome.status {
			SourceStatus::Preserved => println!("File already exists: {}", path.display()),
			_ => println!("Created {}", path.display()),
		}
	}

	let descriptor = skeleton::descriptor_file(plugin_name);
	let created_descriptor = report
		.outcomes
		.iter()
		.any(|outcome| outcome.file == descriptor && outcome.status == SourceStatus::Created);

	if created_descriptor {
		println!();
		println!("Next steps:");
		println!(
			"  1. Describe your plugin actions and objects in {}",
			descriptor.display()
		);
		println!("  2. Add templates under templates/main/ and declare them in genapp.toml");
		println!("  3. Run `genapp generate` to render them");
	}

	Ok(())
}

fn run_generate(
	args: &GenappCli,
	model: Option<&str>,
	descriptor: Option<PathBuf>,
	dry_run: bool,
	keep_going: bool,
	format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
	let (root, config) = load_config(args)?;
	let models = config.register(&root)?;

	let Some(name) = config.select_model(model) else {
		return Err("no model selected: pass `--model` or set `model` in genapp.toml".into());
	};

	let descriptor_path =
		descriptor.map_or_else(|| config.descriptor_path(&root), |path| root.join(path));
	let data = YamlData::load(&descriptor_path)?;

	let options = GenerateOptions {
		output_root: config.output_root(&root),
		dry_run,
		failure_policy: if keep_going {
			FailurePolicy::Continue
		} else {
			FailurePolicy::Abort
		},
	};

	let report = models.generate(name, &data, &options)?;

	match format {
		OutputFormat::Json => print_report_json(&report),
		OutputFormat::Text => print_report_text(&report, args.verbose),
	}

	if report.is_ok() {
		Ok(())
	} else {
		Err(format!("{} source(s) failed", report.failures.len()).into())
	}
}

fn print_report_text(report: &GenerateReport, verbose: bool) {
	for outcome in &report.outcomes {
		let file = outcome.file.display();
		match (report.dry_run, outcome.status) {
			(false, SourceStatus::Regenerated) => println!("{file}"),
			(false, SourceStatus::Created) => {
				println!(
					"'{file}' created. Won't be updated anymore at next run until the file \
					 disappears."
				);
			}
			(true, SourceStatus::Regenerated) => println!("Would regenerate: {file}"),
			(true, SourceStatus::Created) => println!("Would create: {file}"),
			(_, SourceStatus::Preserved) => {
				if verbose || report.dry_run {
					println!("{} '{file}' exists, not updated.", colored!("skip:", yellow));
				}
			}
		}
	}

	for failure in &report.failures {
		eprintln!(
			"{} {}: {}",
			colored!("error:", red),
			failure.file.display(),
			failure.error
		);
	}

	if verbose {
		println!();
		println!(
			"{} {} regenerated, {} created, {} preserved, {} failed",
			colored!(format!("Model `{}`:", report.model), bold),
			report.count(SourceStatus::Regenerated),
			report.count(SourceStatus::Created),
			report.count(SourceStatus::Preserved),
			report.failures.len()
		);
	}
}

fn print_report_json(report: &GenerateReport) {
	let failures: Vec<serde_json::Value> = report
		.failures
		.iter()
		.map(|failure| {
			serde_json::json!({
				"file": failure.file,
				"error": failure.error.to_string(),
			})
		})
		.collect();
	let output = serde_json::json!({
		"ok": report.is_ok(),
		"model": report.model,
		"dry_run": report.dry_run,
		"outcomes": report.outcomes,
		"failures": failures,
	});
	println!("{output}");
}

#[derive(serde::Serialize)]
struct ModelSummary<'a> {
	name: &'a str,
	template_path: String,
	sources: Vec<SourceSummary>,
}

#[derive(serde::Serialize)]
struct SourceSummary {
	file: String,
	reset: bool,
	rights: String,
}

fn run_models(args: &GenappCli, format: OutputFormat) -> Result<(), Box<dyn std::error::Error>> {
	let (root, config) = load_config(args)?;
	let models = config.register(&root)?;

	let summaries: Vec<ModelSummary<'_>> = models
		.iter()
		.map(|(name, model)| {
			ModelSummary {
				name,
				template_path: model
					.model_path()
					.strip_prefix(&root)
					.unwrap_or(model.model_path())
					.display()
					.to_string(),
				sources: model
					.sources()
					.iter()
					.map(|(file, source)| {
						SourceSummary {
							file: file.display().to_string(),
							reset: source.reset(),
							rights: format!("{:04o}", source.rights()),
						}
					})
					.collect(),
			}
		})
		.collect();

	if let OutputFormat::Json = format {
		println!("{}", serde_json::to_string(&summaries)?);
		return Ok(());
	}

	if summaries.is_empty() {
		println!("No models declared.");
		return Ok(());
	}

	let default_model = config.select_model(None);
	for summary in &summaries {
		let marker = if Some(summary.name) == default_model {
			" (default)"
		} else {
			""
		};
		println!(
			"{}{marker}  {}",
			colored!(summary.name, bold),
			summary.template_path
		);
		for source in &summary.sources {
			let policy = if source.reset {
				colored!("regenerated", green)
			} else {
				colored!("created once", yellow)
			};
			println!("  {:<40} {}  {policy}", source.file, source.rights);
		}
	}

	Ok(())
}
