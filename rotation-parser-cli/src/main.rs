use anyhow::{Context, Result};
use clap::Parser;
use log::debug;
use rotation_parser::parser::convert;
use std::io::{self, BufRead, Write};

const HELP: &str = r#"A prompt that shows the precedence-adjusted syntax tree for simple expressions.

For example

    eXpr-> 1 + 2
    "+"
    |- "2"
    '- "1"

Commands
    help   Print this message (? works too)
    exit   Leave the prompt
"#;

/// Prints the precedence-adjusted syntax tree for simple arithmetic expressions
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Arguments {
    /// Expression to parse; omit it to start the interactive prompt
    expression: Option<String>,

    #[clap(flatten)]
    verbose: clap_verbosity_flag::Verbosity,
}

fn main() -> Result<()> {
    let args = Arguments::parse();
    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();

    match args.expression {
        Some(expression) => parse_and_print(&expression),
        None => run_prompt(),
    }
}

/// Feeds one expression through the scan-and-build pipeline and prints the
/// resulting tree diagram.
fn parse_and_print(expression: &str) -> Result<()> {
    debug!("parsing expression: {}", expression);
    let tree = convert("eXpr", expression).context("Failed to parse expression")?;
    println!("{}", tree);
    Ok(())
}

fn run_prompt() -> Result<()> {
    println!("{}", HELP);
    let stdin = io::stdin();
    loop {
        print!("\neXpr-> ");
        io::stdout().flush().context("Failed to flush prompt")?;

        let mut line = String::new();
        let read = stdin
            .lock()
            .read_line(&mut line)
            .context("Failed to read input")?;
        if read == 0 {
            // end of stdin
            return Ok(());
        }

        match line.trim() {
            "help" | "?" => println!("{}", HELP),
            "exit" => {
                println!(">>> graceful exit");
                return Ok(());
            }
            "" => {}
            expression => {
                if let Err(error) = parse_and_print(expression) {
                    println!("Error: {:#}", error);
                }
            }
        }
    }
}
