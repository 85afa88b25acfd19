//! msch-build CLI
//!
//! Usage:
//!   msch-build build [OPTIONS] <FILE>
//!   msch-build init [OPTIONS] --name <NAME> <FILE>
//!
//! `build` compiles a schematic source document and writes the encoded
//! schematic next to it. `init` writes a starter document.

use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use msch_build::{
    build_with_config, starter_document, BuildConfig, BuildError, Catalog, GlyphTable,
};

#[derive(Parser)]
#[command(name = "msch-build")]
#[command(about = "Compile JSON schematic source documents")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Log debug output
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Build a schematic from a source document
    Build {
        /// Source document
        input: PathBuf,

        /// Output file (defaults to the input name with the codec's extension)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// JSON schema to validate against instead of the bundled one
        #[arg(long)]
        schema: Option<PathBuf>,

        /// Icon glyph table (`icons.properties` format)
        #[arg(long)]
        glyphs: Option<PathBuf>,

        /// Catalog file extending the bundled catalog (TOML format)
        #[arg(long)]
        catalog: Option<PathBuf>,
    },

    /// Write a starter source document
    Init {
        /// File to create
        output: PathBuf,

        /// Schematic name
        #[arg(long)]
        name: String,

        #[arg(long)]
        description: Option<String>,

        /// Comma separated author list
        #[arg(long)]
        authors: Option<String>,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    match cli.command {
        Command::Build {
            input,
            output,
            schema,
            glyphs,
            catalog,
        } => run_build(&input, output, schema, glyphs, catalog),
        Command::Init {
            output,
            name,
            description,
            authors,
        } => run_init(&output, &name, description.as_deref(), authors.as_deref()),
    }
}

fn init_logging(verbose: bool, quiet: bool) {
    let level = if verbose {
        "debug"
    } else if quiet {
        "warn"
    } else {
        "info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run_build(
    input: &Path,
    output: Option<PathBuf>,
    schema: Option<PathBuf>,
    glyphs: Option<PathBuf>,
    catalog: Option<PathBuf>,
) {
    let source = match fs::read_to_string(input) {
        Ok(content) => content,
        Err(e) => fail(&format!("Error reading file '{}': {}", input.display(), e)),
    };

    let base_dir = input
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let mut config = BuildConfig::new().with_base_dir(base_dir);

    if let Some(path) = &schema {
        let loaded = fs::read_to_string(path)
            .map_err(|e| e.to_string())
            .and_then(|s| serde_json::from_str(&s).map_err(|e| e.to_string()));
        match loaded {
            Ok(value) => config = config.with_schema(value),
            Err(e) => fail(&format!("Error loading schema '{}': {}", path.display(), e)),
        }
    }

    if let Some(path) = &glyphs {
        match GlyphTable::from_file(path) {
            Ok(table) => config = config.with_glyphs(table),
            Err(e) => fail(&format!("Error loading glyphs: {}", e)),
        }
    }

    if let Some(path) = &catalog {
        match Catalog::default_with_file(path) {
            Ok(loaded) => config = config.with_catalog(loaded),
            Err(e) => fail(&format!("Error loading catalog '{}': {}", path.display(), e)),
        }
    }

    let schematic = match build_with_config(&source, &config) {
        Ok(schematic) => schematic,
        Err(e) => report_build_error(&e, &source, input),
    };
    print!("{}", schematic);

    let output = output.unwrap_or_else(|| default_output(input, config.codec.extension()));
    let bytes = match config.codec.encode(&schematic) {
        Ok(bytes) => bytes,
        Err(e) => fail(&format!("Error encoding schematic: {}", e)),
    };
    if let Err(e) = fs::write(&output, bytes) {
        fail(&format!("Error writing '{}': {}", output.display(), e));
    }
    tracing::info!("Wrote {}", output.display());
}

fn run_init(output: &Path, name: &str, description: Option<&str>, authors: Option<&str>) {
    let document = starter_document(name, description, authors);
    let text = match serde_json::to_string_pretty(&document) {
        Ok(text) => text,
        Err(e) => fail(&format!("Error serializing starter document: {}", e)),
    };
    if let Err(e) = fs::write(output, text + "\n") {
        fail(&format!("Error writing '{}': {}", output.display(), e));
    }
    println!("Created {}", output.display());
}

/// `schematic.json` becomes `schematic.<extension>`
fn default_output(input: &Path, extension: &str) -> PathBuf {
    let file_name = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let stem = file_name.strip_suffix(".json").unwrap_or(&file_name);
    input.with_file_name(format!("{stem}.{extension}"))
}

fn report_build_error(error: &BuildError, source: &str, input: &Path) -> ! {
    match error {
        BuildError::Json(e) => {
            eprint!("{}", e.format(source, &input.display().to_string()));
            eprintln!("Error: {}", error);
        }
        e if e.is_user_facing() => eprintln!("Error: {}", e),
        e => eprintln!("Error: {:?}", e),
    }
    eprintln!("Build failed.");
    process::exit(1);
}

fn fail(message: &str) -> ! {
    eprintln!("{}", message);
    process::exit(1);
}
