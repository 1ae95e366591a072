use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use log::LevelFilter;
use remappy_compiler::compile_file;

#[derive(Parser, Debug)]
#[command(author, version, about = "Check a remappy configuration and print its compiled tables", long_about = None)]
struct Args {
    /// Configuration JSON file
    config: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();

    env_logger::Builder::new()
        .filter_level(if args.verbose { LevelFilter::Debug } else { LevelFilter::Warn })
        .parse_default_env()
        .init();

    match check(&args) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

/// Print the tables and diagnostics; `Ok(false)` if anything was reported
fn check(args: &Args) -> anyhow::Result<bool> {
    let report = compile_file(&args.config)
        .with_context(|| format!("Failed to compile {}", args.config.display()))?;

    for (layer, table) in report.tables.iter() {
        println!("Layer {} ({} bindings)", layer, table.len());

        let mut codes: Vec<_> = table.keys().copied().collect();
        codes.sort();
        for code in codes {
            let action = &table[&code];
            let ops: Vec<String> = action.ops.iter().map(ToString::to_string).collect();
            println!("  {:>4} {:<18} {:>9} {:?}", code.0, code, action.source.kind, action.source.payload);
            if args.verbose {
                println!("       {}", ops.join(", "));
            }
        }
    }

    if report.is_clean() {
        return Ok(true);
    }

    eprintln!();
    eprintln!("{} problem(s) found:", report.diagnostics.len());
    for diagnostic in &report.diagnostics {
        eprintln!("  {}", diagnostic);
    }
    Ok(false)
}
