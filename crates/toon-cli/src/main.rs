use clap::{Args, Parser, Subcommand};
use std::path::Path;
use toon_scanner::driver::{self, HostTokenKind, Token};
use toon_scanner::{ConfigError, ScannerConfig};

#[derive(Parser)]
#[command(name = "toon")]
#[command(about = "Inspect the indentation structure of TOON files")]
#[command(version)]
struct Cli {
    /// Print scanner decisions to stderr
    #[arg(long, global = true)]
    trace: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the INDENT/DEDENT token stream of a file
    Tokens {
        /// Input .toon file
        path: String,

        #[command(flatten)]
        scanner: ScannerArgs,
    },

    /// Check that every INDENT is closed by a DEDENT
    Check {
        /// Input .toon file
        path: String,

        #[command(flatten)]
        scanner: ScannerArgs,
    },
}

#[derive(Args)]
struct ScannerArgs {
    /// Character that starts a list item
    #[arg(long, default_value_t = '-')]
    list_marker: char,

    /// Track widths only, without list-item context
    #[arg(long)]
    no_context: bool,
}

impl ScannerArgs {
    fn try_config(&self) -> Result<ScannerConfig, ConfigError> {
        Ok(ScannerConfig::new()
            .with_list_marker(self.list_marker)?
            .with_context_tracking(!self.no_context))
    }

    fn config(&self) -> ScannerConfig {
        match self.try_config() {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        }
    }
}

fn main() {
    let cli = Cli::parse();

    if cli.trace {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::TRACE)
            .with_writer(std::io::stderr)
            .init();
    }

    match cli.command {
        Command::Tokens { path, scanner } => cmd_tokens(&path, scanner.config()),
        Command::Check { path, scanner } => cmd_check(&path, scanner.config()),
    }
}

fn read_source(path: &str) -> String {
    let p = Path::new(path);
    if !p.exists() {
        eprintln!("Error: file not found: {path}");
        std::process::exit(1);
    }
    match std::fs::read_to_string(p) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Error reading {path}: {e}");
            std::process::exit(1);
        }
    }
}

fn describe(token: &Token) -> String {
    let kind = match &token.kind {
        HostTokenKind::Indent => "INDENT".to_string(),
        HostTokenKind::Dedent => "DEDENT".to_string(),
        HostTokenKind::Newline => "NEWLINE".to_string(),
        HostTokenKind::Content(text) => format!("CONTENT {text:?}"),
    };
    format!("{:>5}..{:<5} {kind}", token.span.start, token.span.end)
}

fn cmd_tokens(path: &str, config: ScannerConfig) {
    let source = read_source(path);
    for token in driver::tokenize_with(&source, config) {
        println!("{}", describe(&token));
    }
}

fn cmd_check(path: &str, config: ScannerConfig) {
    let source = read_source(path);
    let summary = driver::structure(&driver::tokenize_with(&source, config));

    for &offset in &summary.misaligned {
        let (line, column) = driver::line_column(&source, offset);
        eprintln!("{path}:{line}:{column}: indentation does not match any outer level");
    }
    if !summary.is_balanced() {
        eprintln!(
            "Unbalanced: {path} ({} indents, {} dedents)",
            summary.indents, summary.dedents
        );
    }
    if !summary.is_well_formed() {
        std::process::exit(1);
    }

    eprintln!("OK: {path} (max depth {})", summary.max_depth);
}
