use std::fs::File;
use std::io::{self, BufRead, BufReader, Read, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser as ClapParser;
use clap::Subcommand;
use env_logger::Builder;
use log::{debug, info};

use letscript::ast_printer::AstPrinter;
use letscript::parser::parse_with;
use letscript::scanner::{ScanMode, Scanner};
use letscript::{EnvRef, Environment, Interpreter, ScriptError, Value};

#[derive(ClapParser, Debug)]
#[command(version, about = "letscript interpreter", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    commands: Commands,

    /// Enable logging to app.log
    #[arg(long, global = true)]
    log: bool,

    /// Skip unrecognised characters with a warning instead of failing
    #[arg(long, global = true)]
    lenient: bool,

    /// Pre-declare a mutable numeric global, e.g. `--define x=100`
    #[arg(long = "define", short = 'D', value_name = "NAME=NUMBER", global = true, value_parser = parse_define)]
    defines: Vec<(String, f64)>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Tokenizes input from a file, printing each token
    Tokenize { filename: PathBuf },

    /// Parses input from a file and prints its AST
    Parse {
        filename: PathBuf,

        /// Print the AST as JSON instead of prefix form
        #[arg(long)]
        json: bool,
    },

    /// Runs input from a file as a program and prints the final value
    Run {
        filename: PathBuf,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Reads statements from stdin line by line, keeping variables between lines
    Repl,
}

fn parse_define(raw: &str) -> std::result::Result<(String, f64), String> {
    let (name, number) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=NUMBER, got '{}'", raw))?;

    let number: f64 = number
        .trim()
        .parse()
        .map_err(|e| format!("invalid number in '{}': {}", raw, e))?;

    Ok((name.trim().to_string(), number))
}

/// Reads the contents of a file into a String
fn read_file(filename: PathBuf) -> Result<String> {
    info!("Reading file: {:?}", filename);
    let file = File::open(&filename).context(format!("Failed to open file {:?}", filename))?;
    let mut reader = BufReader::new(file);
    let mut buf = String::new();

    let bytes = reader
        .read_to_string(&mut buf)
        .context(format!("Failed to read file {:?}", filename))?;

    info!("Read {} bytes from {:?}", bytes, filename);

    Ok(buf)
}

fn init_logger() -> Result<()> {
    // Create or open the log file
    let log_file = File::create("app.log").context("Failed to create app.log")?;

    Builder::new()
        .format(|buf, record| {
            // Strip 'letscript::' from module path
            let module = record
                .module_path()
                .unwrap_or("<unnamed>")
                .strip_prefix("letscript::")
                .unwrap_or(record.module_path().unwrap_or("<unnamed>"));
            writeln!(
                buf,
                "[{}:{}] - {}",
                module,
                record.line().unwrap_or(0),
                record.args()
            )
        })
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .filter(None, log::LevelFilter::Debug) // Default to Debug, override with RUST_LOG
        .parse_default_env()
        .init();

    info!("Logger initialized, writing to app.log");
    Ok(())
}

/// Exit code for a failed program: 65 for syntax errors, 70 for runtime errors.
fn exit_code(e: &ScriptError) -> i32 {
    if e.is_syntax() {
        65
    } else {
        70
    }
}

fn print_value(value: &Value, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        println!("{}", value);
    }

    Ok(())
}

fn globals(defines: &[(String, f64)]) -> EnvRef {
    Environment::with_globals(
        defines
            .iter()
            .map(|(name, n)| (name.clone(), Value::Number(*n))),
    )
}

fn repl(env: EnvRef, mode: ScanMode) -> Result<()> {
    let mut interpreter = Interpreter::with_environment(env);
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        write!(stdout, "> ")?;
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        if line.trim().is_empty() {
            continue;
        }

        match interpreter.run_with(&line, mode) {
            Ok(value) => println!("{}", value),
            Err(e) => {
                debug!("REPL error in {} stage: {}", e.stage(), e);
                eprintln!("{}", e);
            }
        }
    }

    info!("REPL finished");
    Ok(())
}

fn main() -> Result<()> {
    let args: Cli = Cli::parse();

    // Initialize logger only if --log flag is provided
    if args.log {
        init_logger()?;
    } else {
        // Initialize a minimal logger to avoid "no logger" errors
        env_logger::Builder::new()
            .filter_level(log::LevelFilter::Off)
            .init();
    }

    info!("CLI arguments: {:?}", args);

    let mode = if args.lenient {
        ScanMode::Lenient
    } else {
        ScanMode::Strict
    };

    if let Some((name, _)) = args.defines.iter().find(|(name, _)| {
        matches!(name.as_str(), "true" | "false" | "null") || name.is_empty()
    }) {
        bail!("cannot redefine '{}' with --define", name);
    }

    match args.commands {
        Commands::Tokenize { filename } => {
            info!("Running Tokenize subcommand");
            let src = read_file(filename)?;
            let mut tokenized = true;

            for token in Scanner::with_mode(&src, mode) {
                match token {
                    Ok(token) => {
                        debug!("Scanned token: {}", token);

                        println!("{}", token);
                    }

                    Err(e) => {
                        tokenized = false;

                        debug!("Tokenization debug: {}", e);

                        eprintln!("{}", e);
                    }
                }
            }

            if !tokenized {
                debug!("Tokenization failed, exiting with code 65");

                std::process::exit(65);
            }

            info!("Tokenization completed successfully");
        }

        Commands::Parse { filename, json } => {
            info!("Running Parse subcommand");
            let src = read_file(filename)?;

            match parse_with(&src, mode) {
                Ok(program) => {
                    if json {
                        println!("{}", serde_json::to_string_pretty(&program)?);
                    } else {
                        println!("{}", AstPrinter::print(&program));
                    }
                }

                Err(e) => {
                    debug!("Parse debug: {}", e);
                    eprintln!("{}", e);
                    std::process::exit(exit_code(&e));
                }
            }

            info!("Parse subcommand completed");
        }

        Commands::Run { filename, json } => {
            info!("Running Run subcommand");
            let src = read_file(filename)?;
            info!("Provided input:\n {}", src);

            let mut interpreter = Interpreter::with_environment(globals(&args.defines));

            match interpreter.run_with(&src, mode) {
                Ok(value) => {
                    info!("Program executed successfully");
                    print_value(&value, json)?;
                }

                Err(e) => {
                    debug!("{} stage failed: {}", e.stage(), e);
                    eprintln!("{}", e);
                    std::process::exit(exit_code(&e));
                }
            }
        }

        Commands::Repl => {
            info!("Running Repl subcommand");
            repl(globals(&args.defines), mode)?;
        }
    }

    Ok(())
}
