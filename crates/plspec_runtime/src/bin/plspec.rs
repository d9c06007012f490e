//! plspec CLI entry point.

use plspec_runtime::{
    GeneratorConfig, OutputFormat, SpecSource, generate, save_to_file, write_to,
};
use std::env;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::Level;

/// CLI configuration parsed from arguments.
#[derive(Default)]
struct CliConfig {
    files: Vec<PathBuf>,
    config: Option<PathBuf>,
    format: Option<OutputFormat>,
    output: Option<PathBuf>,
    strict: bool,
    verbosity: u8,
    show_help: bool,
    show_version: bool,
}

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();

    match run(args) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("\x1b[31mError: {e}\x1b[0m");
            ExitCode::FAILURE
        }
    }
}

fn parse_args(args: Vec<String>) -> Result<CliConfig, Box<dyn std::error::Error>> {
    let mut config = CliConfig::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => config.show_help = true,
            "-V" | "--version" => config.show_version = true,
            "--strict" => config.strict = true,
            "-v" => config.verbosity += 1,
            "-vv" => config.verbosity += 2,
            "-c" | "--config" => {
                config.config = Some(PathBuf::from(option_value(&args, &mut i)?));
            }
            "-f" | "--format" => {
                config.format = Some(option_value(&args, &mut i)?.parse()?);
            }
            "-o" | "--output" => {
                config.output = Some(PathBuf::from(option_value(&args, &mut i)?));
            }
            arg if arg.starts_with('-') => {
                return Err(format!("unknown option: {arg}").into());
            }
            path => config.files.push(PathBuf::from(path)),
        }
        i += 1;
    }

    Ok(config)
}

fn option_value<'a>(args: &'a [String], i: &mut usize) -> Result<&'a str, String> {
    let option = &args[*i];
    *i += 1;
    args.get(*i)
        .map(String::as_str)
        .ok_or_else(|| format!("{option} requires a value"))
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn run(args: Vec<String>) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = parse_args(args)?;

    if cli.show_help {
        print_help();
        return Ok(ExitCode::SUCCESS);
    }

    if cli.show_version {
        println!("plspec {}", env!("CARGO_PKG_VERSION"));
        return Ok(ExitCode::SUCCESS);
    }

    if cli.files.is_empty() {
        return Err("no specification files given (see --help)".into());
    }

    init_logging(cli.verbosity);

    let mut config = match &cli.config {
        Some(path) => GeneratorConfig::load(path)?,
        None => GeneratorConfig::default(),
    };
    if let Some(format) = cli.format {
        config = config.with_format(format);
    }

    let sources = cli
        .files
        .iter()
        .map(SpecSource::read)
        .collect::<Result<Vec<_>, _>>()?;
    let output = generate(&config, &sources);

    for diagnostic in &output.diagnostics {
        let package = diagnostic.package.as_deref().unwrap_or("?");
        match (diagnostic.line, diagnostic.column) {
            (Some(line), Some(column)) => {
                eprintln!("\x1b[33m{package}:{line}:{column}:\x1b[0m {}", diagnostic.message);
            }
            _ => eprintln!("\x1b[33m{package}:\x1b[0m {}", diagnostic.message),
        }
        if let Some(fragment) = &diagnostic.fragment {
            eprintln!("    {fragment}");
        }
    }

    match &cli.output {
        Some(path) => save_to_file(&output, config.format, path)?,
        None => write_to(&output, config.format, io::stdout().lock())?,
    }

    if cli.strict && !output.is_clean() {
        eprintln!(
            "\x1b[31m{} declaration(s) failed\x1b[0m",
            output.diagnostics.len()
        );
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

fn print_help() {
    println!(
        "\x1b[1mplspec\x1b[0m - Stored-routine package specification parser and call-model generator

\x1b[1mUSAGE:\x1b[0m
    plspec [OPTIONS] FILES...

\x1b[1mARGUMENTS:\x1b[0m
    FILES...    Package specification files to process

\x1b[1mOPTIONS:\x1b[0m
    -h, --help             Print help information
    -V, --version          Print version information
    -c, --config FILE      Read configuration from a TOML file
    -f, --format FORMAT    Output format: json (default) or msgpack
    -o, --output FILE      Write output to FILE instead of stdout
        --strict           Exit with failure if any declaration was rejected
    -v, -vv                Log debug / trace output to stderr

\x1b[1mEXAMPLES:\x1b[0m
    plspec billing.pks                    Print the call model as JSON
    plspec -c plspec.toml specs/*.pks     Use an allow-list and type overrides
    plspec -f msgpack -o model.bin a.pks  Write MessagePack to a file
    plspec --strict -v a.pks b.pks        Fail on any rejected declaration"
    );
}
