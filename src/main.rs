mod builtins;
mod config;
mod env;
mod error;
mod eval;
mod lexer;
mod parser;
mod printer;
mod value;

use clap::Parser;
use env::Environment;
use rustyline::error::ReadlineError;
use rustyline::{Config, Editor};
use std::path::PathBuf;
use std::rc::Rc;

/// A tree-walking Scheme interpreter
#[derive(Parser, Debug)]
#[command(name = "scheme-core")]
#[command(version = config::VERSION)]
#[command(about = "A Scheme interpreter covering the MIT/61A teaching core")]
struct CliArgs {
    /// Script file to execute (optional -- if not provided, starts the REPL)
    #[arg(value_name = "FILE")]
    script: Option<PathBuf>,
}

fn main() {
    let args = CliArgs::parse();
    let env = Environment::new();
    builtins::register_builtins(&env);

    if let Some(script_path) = args.script {
        if let Err(e) = run_script(&script_path, &env) {
            eprintln!("{e}");
            std::process::exit(1);
        }
        return;
    }

    if let Err(e) = run_repl(&env) {
        eprintln!("{e}");
        std::process::exit(1);
    }
}

/// Reads, parses and evaluates every top-level expression in a script file.
/// The first error aborts the run.
fn run_script(path: &PathBuf, env: &Rc<Environment>) -> Result<(), String> {
    let source = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read script file {}: {e}", path.display()))?;
    let tokens = lexer::lex(&source).map_err(|e| e.repl_message())?;
    let exprs = parser::parse(&tokens).map_err(|e| e.repl_message())?;
    for expr in &exprs {
        eval::eval(expr, env).map_err(|e| e.repl_message())?;
    }
    Ok(())
}

/// The interactive loop: `input('>')`, evaluate every top-level expression
/// read from the line, print its `repr`, and keep going -- any non-EOF
/// failure prints `<Kind>: <message>` and the loop continues. End of input
/// (Ctrl-D) prints the farewell and ends the process with status 0.
fn run_repl(env: &Rc<Environment>) -> Result<(), String> {
    println!("{}", config::WELCOME_MESSAGE);
    println!("{}", config::WELCOME_SUBTITLE);

    let history_file = ".scheme_history";
    let rl_config = Config::builder().auto_add_history(true).build();
    let mut rl: Editor<(), rustyline::history::DefaultHistory> =
        Editor::with_config(rl_config).map_err(|e| format!("failed to initialize line editor: {e}"))?;
    let _ = rl.load_history(history_file);

    loop {
        match rl.readline(">") {
            Ok(line) => {
                if line.trim().is_empty() {
                    continue;
                }
                match lexer::lex(&line).and_then(|tokens| parser::parse(&tokens)) {
                    Ok(exprs) => {
                        for expr in &exprs {
                            match eval::eval(expr, env) {
                                Ok(value) => println!("{}", printer::repr_string(&value)),
                                Err(e) => println!("{}", e.repl_message()),
                            }
                        }
                    }
                    Err(e) => println!("{}", e.repl_message()),
                }
            }
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => {
                println!("\nEnd of input stream reached.\nMoriturus te saluto.");
                break;
            }
            Err(e) => {
                println!("{}", error::EvalError::io(e.to_string()).repl_message());
                break;
            }
        }
    }

    let _ = rl.save_history(history_file);
    std::process::exit(0);
}
