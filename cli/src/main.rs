use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use plugin_manifest::{
    Manifest, TranslationMap, merge_translations, parse, parse_system, parse_translation,
};
use plugin_manifest_core::{Plugin, Schema, SchemaMap};
use serde::Serialize;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

mod config;

use config::BundleConfig;

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    Json,
    Yaml,
}

#[derive(Debug, Parser)]
#[command(name = "plugin-manifest", version)]
#[command(about = "Compile, check and bundle plugin manifests")]
struct Cli {
    /// Log compiler diagnostics (dropped choices, skipped translations) to stderr.
    #[arg(long, short, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Compile one manifest and print the plugin with its property schemas.
    Compile(CompileArgs),
    /// Compile manifests and report which ones are valid.
    Check(CheckArgs),
    /// Compile every manifest listed in a bundle config into one document.
    Bundle(BundleArgs),
}

#[derive(Debug, Args)]
struct CompileArgs {
    /// Manifest file (YAML or JSON).
    input: PathBuf,
    /// Compile as the bundled system plugin.
    #[arg(long)]
    system: bool,
    /// Translation overlay to merge, as LANG=FILE. Repeatable.
    #[arg(long = "translation", value_name = "LANG=FILE", value_parser = parse_lang_file)]
    translations: Vec<(String, PathBuf)>,
    /// Output format.
    #[arg(long, default_value = "json")]
    format: OutputFormat,
    /// Write to this file instead of stdout.
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Args)]
struct CheckArgs {
    /// Manifest files to check.
    #[arg(required = true)]
    inputs: Vec<PathBuf>,
    /// Compile as the bundled system plugin.
    #[arg(long)]
    system: bool,
}

#[derive(Debug, Args)]
struct BundleArgs {
    /// Bundle config YAML listing the manifests.
    #[arg(long)]
    config: PathBuf,
    /// Write to this file instead of stdout.
    #[arg(long)]
    output: Option<PathBuf>,
    /// Output format.
    #[arg(long, default_value = "json")]
    format: OutputFormat,
}

/// Every plugin of a bundle plus all their schemas, sorted descending by id.
#[derive(Debug, Serialize)]
struct Bundle {
    version: String,
    plugins: Vec<Plugin>,
    schemas: Vec<Schema>,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Command::Compile(args) => run_compile(args),
        Command::Check(args) => run_check(args),
        Command::Bundle(args) => run_bundle(args),
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run_compile(args: CompileArgs) -> Result<(), String> {
    let translations: BTreeMap<String, PathBuf> = args.translations.into_iter().collect();
    let manifest = load_manifest(&args.input, args.system, &translations)?;
    let raw = render(&manifest, args.format)?;
    write_output(&raw, args.output.as_deref())
}

fn run_check(args: CheckArgs) -> Result<(), String> {
    let mut failed = 0usize;
    for input in &args.inputs {
        match load_manifest(input, args.system, &BTreeMap::new()) {
            Ok(manifest) => println!(
                "ok: {} ({}, {} extension(s), {} schema(s))",
                input.display(),
                manifest.plugin().id(),
                manifest.plugin().extensions().len(),
                manifest.property_schemas().count()
            ),
            Err(err) => {
                eprintln!("{err}");
                failed += 1;
            }
        }
    }

    if failed > 0 {
        return Err(format!(
            "{failed} of {} manifest(s) failed",
            args.inputs.len()
        ));
    }
    println!("Checked {} manifest(s).", args.inputs.len());
    Ok(())
}

fn run_bundle(args: BundleArgs) -> Result<(), String> {
    let config = BundleConfig::load(&args.config).map_err(|e| e.to_string())?;

    let mut seen = HashSet::new();
    let mut plugins = Vec::with_capacity(config.plugins.len());
    let mut schemas = SchemaMap::new();
    for entry in &config.plugins {
        let translations: BTreeMap<_, _> = entry
            .translations
            .iter()
            .map(|(lang, path)| (lang.clone(), config.resolve(path)))
            .collect();
        let path = config.resolve(&entry.manifest);
        let (plugin, plugin_schemas) =
            load_manifest(&path, entry.system, &translations)?.into_parts();

        if !seen.insert(plugin.id().to_string()) {
            return Err(format!("duplicated plugin: {}", plugin.id()));
        }
        debug!(plugin = %plugin.id(), schemas = plugin_schemas.len(), "adding plugin to bundle");
        for schema in plugin_schemas {
            schemas.insert(schema);
        }
        plugins.push(plugin);
    }

    let bundle = Bundle {
        version: config.version,
        plugins,
        schemas: schemas.into_list(),
    };
    info!(
        plugins = bundle.plugins.len(),
        schemas = bundle.schemas.len(),
        "bundled plugins"
    );

    let raw = render(&bundle, args.format)?;
    write_output(&raw, args.output.as_deref())?;
    if let Some(output) = &args.output {
        println!(
            "Bundled {} plugin(s) into '{}'.",
            bundle.plugins.len(),
            output.display()
        );
    }
    Ok(())
}

/// Reads and compiles a manifest, then merges its translation files.
fn load_manifest(
    path: &Path,
    system: bool,
    translations: &BTreeMap<String, PathBuf>,
) -> Result<Manifest, String> {
    let source =
        fs::read(path).map_err(|err| format!("Failed to read '{}': {err}", path.display()))?;
    let compiled = if system {
        parse_system(&source)
    } else {
        parse(&source)
    };
    let mut manifest = compiled.map_err(|err| format!("{}: {err}", path.display()))?;

    if !translations.is_empty() {
        let mut patches = TranslationMap::new();
        for (lang, file) in translations {
            let raw = fs::read(file)
                .map_err(|err| format!("Failed to read '{}': {err}", file.display()))?;
            let patch =
                parse_translation(&raw).map_err(|err| format!("{}: {err}", file.display()))?;
            patches.insert(lang.clone(), patch);
        }
        merge_translations(&mut manifest, &patches);
    }
    Ok(manifest)
}

fn render<T: Serialize>(value: &T, format: OutputFormat) -> Result<String, String> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(value)
            .map_err(|err| format!("Failed to serialize JSON: {err}")),
        OutputFormat::Yaml => serde_yaml::to_string(value)
            .map_err(|err| format!("Failed to serialize YAML: {err}")),
    }
}

fn write_output(raw: &str, output: Option<&Path>) -> Result<(), String> {
    let Some(path) = output else {
        println!("{raw}");
        return Ok(());
    };
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|err| {
                format!(
                    "Failed to create output directory '{}': {err}",
                    parent.display()
                )
            })?;
        }
    }
    fs::write(path, raw).map_err(|err| format!("Failed to write '{}': {err}", path.display()))
}

fn parse_lang_file(s: &str) -> Result<(String, PathBuf), String> {
    match s.split_once('=') {
        Some((lang, file)) if !lang.is_empty() && !file.is_empty() => {
            Ok((lang.to_string(), PathBuf::from(file)))
        }
        _ => Err(format!("expected LANG=FILE, got '{s}'")),
    }
}
