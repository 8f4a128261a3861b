use clap::{Parser as ClapParser, Subcommand};
use rugo::cli::{self, BuildOptions, CliError, DumpOptions, Stage};
use rugo::DEFAULT_PACKAGE;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(ClapParser)]
#[command(name = "rugo")]
#[command(about = "rugo - Transpile Ruby parser S-expressions into Go source")]
#[command(version)]
struct Cli {
    /// Log pipeline stages to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile an S-expression file to Go
    Build {
        /// Input file (reads piped stdin, then ./expr.s, if not provided)
        input: Option<PathBuf>,

        /// Write Go source here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Package name of the generated file
        #[arg(short, long, default_value = DEFAULT_PACKAGE)]
        package: String,
    },

    /// Print the token sequence as JSON
    Tokens {
        input: Option<PathBuf>,

        /// Pretty-print the output
        #[arg(long)]
        pretty: bool,
    },

    /// Print the parsed node tree as JSON
    Tree {
        input: Option<PathBuf>,

        /// Pretty-print the output
        #[arg(long)]
        pretty: bool,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Build {
            input,
            output,
            package,
        } => run_build(input, output, package),
        Commands::Tokens { input, pretty } => run_dump(input, Stage::Tokens, pretty),
        Commands::Tree { input, pretty } => run_dump(input, Stage::Tree, pretty),
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Explicit path, then piped stdin, then the default input file.
fn load_source(input: Option<PathBuf>) -> Result<String, CliError> {
    match input {
        Some(path) => cli::read_source(&path),
        None if !atty::is(atty::Stream::Stdin) => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Ok(buffer)
        }
        None => cli::read_source(Path::new(cli::DEFAULT_INPUT)),
    }
}

fn run_build(
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    package: String,
) -> Result<(), CliError> {
    let options = BuildOptions {
        source: load_source(input)?,
        package,
    };

    let go = cli::execute_build(&options)?;
    match output {
        Some(path) => cli::write_output(&path, &go)?,
        None => print!("{}", go),
    }
    Ok(())
}

fn run_dump(input: Option<PathBuf>, stage: Stage, pretty: bool) -> Result<(), CliError> {
    let options = DumpOptions {
        source: load_source(input)?,
        stage,
        pretty,
    };

    println!("{}", cli::execute_dump(&options)?);
    Ok(())
}
