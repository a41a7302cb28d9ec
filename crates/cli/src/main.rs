use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand, ValueEnum};

use minipas_core::frontend::Analysis;
use minipas_core::DEFAULT_MAX_ERRORS;

/// Output format for CLI responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// Mini-Pascal front end.
#[derive(Parser)]
#[command(name = "minipas", version, about = "Mini-Pascal front end")]
struct Cli {
    /// Output format (text or json)
    #[arg(long, global = true, default_value = "text", value_enum)]
    output: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan, parse, and analyze a program, reporting every diagnostic
    Check {
        /// Path to the source file (or token-code file with --codes)
        file: PathBuf,
        /// Treat the input as a persisted token-code stream
        #[arg(long)]
        codes: bool,
        /// Cap on reported semantic errors
        #[arg(long, default_value_t = DEFAULT_MAX_ERRORS)]
        max_errors: usize,
    },

    /// Scan a source file and emit its token-code stream
    Tokens {
        /// Path to the source file
        file: PathBuf,
        /// Write the stream to a file instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Check {
            file,
            codes,
            max_errors,
        } => {
            cmd_check(&file, codes, max_errors, cli.output, cli.quiet);
        }
        Commands::Tokens { file, out } => {
            cmd_tokens(&file, out.as_deref(), cli.quiet);
        }
    }
}

fn cmd_check(file: &Path, from_codes: bool, max_errors: usize, output: OutputFormat, quiet: bool) {
    let text = match std::fs::read_to_string(file) {
        Ok(s) => s,
        Err(e) => {
            let msg = format!("error reading file '{}': {}", file.display(), e);
            report_error(&msg, output, quiet);
            process::exit(1);
        }
    };

    let tokens = if from_codes {
        match minipas_core::read_codes(&text) {
            Ok(t) => t,
            Err(e) => {
                let msg = format!("error decoding '{}': {}", file.display(), e);
                report_error(&msg, output, quiet);
                process::exit(1);
            }
        }
    } else {
        match minipas_core::scan(&text) {
            Ok(t) => t,
            Err(e) => {
                let msg = format!("error scanning '{}': {}", file.display(), e);
                report_error(&msg, output, quiet);
                process::exit(1);
            }
        }
    };

    let analysis = minipas_core::check_tokens_with_limit(&tokens, max_errors);
    print_analysis(&analysis, output, quiet);
    if !analysis.is_clean() {
        process::exit(1);
    }
}

fn print_analysis(analysis: &Analysis, output: OutputFormat, quiet: bool) {
    match output {
        OutputFormat::Json => {
            let pretty = serde_json::to_string_pretty(&analysis.to_json_value())
                .unwrap_or_else(|e| format!("serialization error: {}", e));
            println!("{}", pretty);
        }
        OutputFormat::Text => {
            for e in &analysis.syntax_errors {
                println!("syntax error: {}", e);
            }
            for e in &analysis.semantic_errors {
                println!("semantic error: {}", e);
            }
            if quiet {
                return;
            }
            if analysis.is_clean() {
                println!(
                    "ok: {} declaration(s), {} statement(s)",
                    analysis.program.declarations.len(),
                    analysis.program.statements.len()
                );
            } else {
                println!(
                    "{} syntax error(s), {} semantic error(s)",
                    analysis.syntax_errors.len(),
                    analysis.semantic_errors.len()
                );
            }
        }
    }
}

fn cmd_tokens(file: &Path, out: Option<&Path>, quiet: bool) {
    let text = match std::fs::read_to_string(file) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error reading file '{}': {}", file.display(), e);
            process::exit(1);
        }
    };

    let tokens = match minipas_core::scan(&text) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("error scanning '{}': {}", file.display(), e);
            process::exit(1);
        }
    };

    let stream = minipas_core::write_codes(&tokens);
    match out {
        Some(path) => {
            if let Err(e) = std::fs::write(path, &stream) {
                eprintln!("error writing '{}': {}", path.display(), e);
                process::exit(1);
            }
            if !quiet {
                println!(
                    "wrote {} token line(s) to {}",
                    stream.lines().count(),
                    path.display()
                );
            }
        }
        None => {
            print!("{}", stream);
        }
    }
}

fn report_error(msg: &str, output: OutputFormat, quiet: bool) {
    if quiet {
        return;
    }
    match output {
        OutputFormat::Text => eprintln!("{}", msg),
        OutputFormat::Json => {
            eprintln!("{{\"error\": \"{}\"}}", msg.replace('"', "\\\""));
        }
    }
}
