use clap::{Parser, Subcommand};
use std::env;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use pbts::config::{self, ConfigOverrides, PartialOutputConfig};
use pbts::error::PbtsError;
use pbts::output::display_path;

#[derive(Parser)]
#[command(name = "pbts", version)]
#[command(about = "Generate TypeScript declarations from the collections of a PocketBase instance", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch the collections and write the schema dump and the declarations
    Generate {
        /// Config file to use instead of searching for one
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// PocketBase base URL, e.g. `http://127.0.0.1:8090`
        #[arg(long)]
        url: Option<String>,

        /// Superuser email
        #[arg(long)]
        email: Option<String>,

        /// Superuser password
        #[arg(long, env = "PBTS_PASSWORD", hide_env_values = true)]
        password: Option<String>,

        /// Where to write the JSON dump of the collections
        #[arg(long)]
        schema_out: Option<PathBuf>,

        /// Where to write the TypeScript declarations
        #[arg(long)]
        types_out: Option<PathBuf>,
    },

    /// Regenerate declarations from an existing schema dump, without network access
    Types {
        /// Input JSON dump, as written by `generate`
        #[arg(short, long)]
        input: PathBuf,

        /// Output `.ts` file (if omitted, prints to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match execute(cli.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}

async fn execute(command: Commands) -> Result<(), PbtsError> {
    let cwd = env::current_dir()?;

    match command {
        Commands::Generate { config, url, email, password, schema_out, types_out } => {
            let overrides = ConfigOverrides {
                url,
                email,
                password,
                schema: schema_out.map(|path| PartialOutputConfig { output_path: Some(path) }),
                types:  types_out.map(|path| PartialOutputConfig { output_path: Some(path) }),
            };
            let config = config::load(overrides, config.as_deref(), &cwd)?;

            let report = pbts::run(&config).await?;
            println!("generated schema at {}", display_path(&report.schema_path, &cwd).display());
            println!("added types for schema to {}", display_path(&report.types_path, &cwd).display());
            Ok(())
        }

        Commands::Types { input, output } => {
            let input = cwd.join(input);
            let output = output.map(|path| cwd.join(path));
            let types = pbts::regenerate(&input, output.as_deref())?;
            match output {
                Some(path) => println!("added types for schema to {}", display_path(&path, &cwd).display()),
                None => print!("{}", types),
            }
            Ok(())
        }
    }
}

/// PBTS_LOG takes a plain level ("debug") or a full set of filter directives
/// ("pbts=debug,reqwest=warn").
fn init_tracing() {
    let filter = match env::var("PBTS_LOG") {
        Ok(level) if is_plain_level(&level) => format!("pbts={level},pbts_compiler={level}"),
        Ok(directives) => directives,
        Err(_) => "pbts=info,pbts_compiler=info".to_string(),
    };

    let result = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_env_filter(EnvFilter::new(filter))
        .try_init();
    if result.is_err() {
        eprintln!("Warning: tracing subscriber already initialized");
    }
}

fn is_plain_level(s: &str) -> bool {
    matches!(
        s.to_ascii_lowercase().as_str(),
        "trace" | "debug" | "info" | "warn" | "error"
    )
}
