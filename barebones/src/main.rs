use std::fs;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use thiserror::Error;

use barebones::parser::{grammar, lexer};
use barebones::{CompileError, Compiler, Interpreter, RuntimeError, Store, TraceEvent, prepare_source};

#[derive(Parser)]
#[command(name = "barebones")]
#[command(about = "Compiler and interpreter for the Bare Bones while-language", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Компилирует и выполняет программу
    Run {
        /// Исходник (.bb)
        input: String,

        /// Печатать значения после каждой строки
        #[arg(short, long)]
        verbose: bool,

        /// Незакрытый блок и лишний end считать ошибкой
        #[arg(long)]
        strict: bool,

        /// Показать ast
        #[arg(long)]
        show_ast: bool,
    },

    /// Распарсить и показать токены и ast без выполнения
    Parse {
        /// Исходник (.bb)
        input: String,
    },

    /// Список правил грамматики
    Grammar,
}

#[derive(Error, Debug)]
enum CliError {
    #[error("IO error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
    #[error("Failed to compile - {source}")]
    Compile {
        #[from]
        source: CompileError,
    },
    #[error("Runtime error - {source}")]
    Runtime {
        #[from]
        source: RuntimeError,
    },
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match execute(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}

/// Логи включаются только через RUST_LOG, например RUST_LOG=barebones=trace
fn init_tracing() {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::registry()
            .with(fmt::layer().with_target(true).with_level(true).with_writer(std::io::stderr))
            .with(EnvFilter::from_default_env())
            .init();
    }
}

fn execute(command: Commands) -> Result<(), CliError> {
    match command {
        Commands::Run { input, verbose, strict, show_ast } => {
            let source = prepare_source(&fs::read_to_string(&input)?);
            let compiler = Compiler::new(&source).strict(strict);
            let mut root = compiler.compile()?;

            if show_ast {
                println!("=== AST ===");
                println!("{:#?}", root);
            }

            let statements = compiler.statements();
            let mut print_step = |event: &TraceEvent<'_>| {
                if verbose && event.line > 0 {
                    print_trace(statements, event);
                }
            };
            let mut interpreter = Interpreter::with_observer(&mut print_step);

            if let Err(e) = interpreter.execute(&mut root) {
                println!("\nStopped with values:");
                print_store(interpreter.store());
                return Err(e.into());
            }

            println!("\nCode finished. Have a great day!");
            print_store(interpreter.store());
        }
        Commands::Parse { input } => {
            println!("Parsing {}...", input);

            let source = prepare_source(&fs::read_to_string(&input)?);

            println!("=== SOURCE ===");
            println!("{}", source);
            println!("=== TOKENS ===");

            let compiler = Compiler::new(&source);
            for (i, statement) in compiler.statements().iter().enumerate() {
                if statement.is_empty() {
                    continue;
                }
                let kinds: Vec<String> =
                    lexer::tokenize(statement).iter().map(|t| t.kind.to_string()).collect();
                println!("{:4}: {:<24} {}", i + 1, statement, kinds.join(" "));
            }

            println!("=== AST ===");
            println!("{:#?}", compiler.compile()?);
        }
        Commands::Grammar => {
            println!("Accepted grammars:");
            for rule in grammar::RULES {
                let pattern: Vec<String> = rule.pattern.iter().map(|k| k.to_string()).collect();
                println!("  {:36} -> {:?}", pattern.join(" "), rule.production);
            }
        }
    }

    Ok(())
}

fn print_trace(statements: &[&str], event: &TraceEvent<'_>) {
    let statement = statements.get(event.line - 1).copied().unwrap_or_default();
    if event.looping {
        println!("\nLine {} - {};  Control statement passed, so looping inside...\n", event.line, statement);
    } else {
        println!("\nLine {} - {};\n", event.line, statement);
    }
    print_store(event.store);
}

fn print_store(store: &Store) {
    for (name, value) in store.iter() {
        println!("{}: {}", name, value);
    }
}
