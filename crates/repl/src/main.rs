//! sable - Scheme interpreter CLI
//!
//! With no arguments, runs the read-eval-print loop against a fresh
//! frame over the interaction environment. With file arguments, loads
//! each in order and exits nonzero on the first uncaught error.
//!
//! `RUST_LOG` controls diagnostic verbosity (GC passes, script loads).

use std::io::{self, Write};
use std::path::PathBuf;
use std::process;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use sable_runtime::types::environment::mk_environment;
use sable_runtime::types::eof::is_eof_object;
use sable_runtime::{
    eval_source, globals, interaction_environment, interpret, load, printable, read, root_scope,
};

#[derive(Parser)]
#[command(name = "sable")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Sable Scheme interpreter", long_about = None)]
struct Cli {
    /// Script files to load and evaluate in order
    files: Vec<PathBuf>,

    /// Evaluate one expression string and print the result
    #[arg(short = 'e', long = "expr", value_name = "EXPR")]
    expr: Option<String>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    sable_runtime::init();
    let args: Vec<String> = std::env::args().collect();
    globals().set_command_line(&args);

    if let Some(expr) = cli.expr {
        match eval_source(&expr, interaction_environment()) {
            Ok(val) => println!("{}", printable(val)),
            Err(e) => {
                eprintln!("{e}");
                process::exit(1);
            }
        }
        return;
    }

    if cli.files.is_empty() {
        repl();
        return;
    }

    for file in &cli.files {
        let Some(path) = file.to_str() else {
            eprintln!("sable: bad path {}", file.display());
            process::exit(1);
        };
        if let Err(e) = load(path, interaction_environment()) {
            eprintln!("{e}");
            process::exit(1);
        }
    }
}

fn repl() {
    let g = globals();
    let env = mk_environment(g.nil()).expect("fresh interaction frame");
    let port = g.stdin_port();
    let _roots = root_scope(vec![env]);

    println!("\u{262f}");

    loop {
        print!("\u{03bb} :: ");
        let _ = io::stdout().flush();

        let exp = match read(port) {
            Ok(exp) => exp,
            Err(e) => {
                eprintln!("\n{e}");
                continue;
            }
        };

        if is_eof_object(exp) {
            break;
        }

        match interpret(exp, env) {
            Ok(val) => println!("  \u{2971} {}", printable(val)),
            Err(e) => eprintln!("\n{e}"),
        }
    }

    println!("\n\u{203b}");
}
