use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;

use opal::scanner;

#[derive(Parser, Debug)]
#[command(name = "opal", about = "The opal language front end")]
struct Cli {
    /// Opal source file to scan (omit for REPL)
    file: Option<PathBuf>,

    /// Dump tokens and exit
    #[arg(long)]
    dump_tokens: bool,

    /// Token output format
    #[arg(long, default_value = "plain", value_parser = ["plain", "json"])]
    format: String,
}

fn read_source(cli: &Cli) -> Result<String> {
    match &cli.file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("read source file '{}'", path.display())),
        None => bail!("source file required for this operation"),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.dump_tokens {
        let source = read_source(&cli)?;
        let tokens = scanner::scan(&source).map_err(|e| anyhow::anyhow!("{e}"))?;
        match cli.format.as_str() {
            "json" => {
                let rendered =
                    serde_json::to_string_pretty(&tokens).context("serialize tokens to JSON")?;
                println!("{rendered}");
            }
            _ => {
                for token in &tokens {
                    println!("{token}");
                }
            }
        }
        return Ok(());
    }

    match cli.file {
        Some(_) => {
            let source = read_source(&cli)?;
            scanner::scan(&source).map_err(|e| anyhow::anyhow!("{e}"))?;
            Ok(())
        }
        None => {
            opal::repl::run_repl();
            Ok(())
        }
    }
}
