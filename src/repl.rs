use std::io::{self, BufRead, Write};

use crate::scanner;

/// Run the interactive REPL: scan each line and print the tokens it yields.
pub fn run_repl() {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("> ");
        stdout.flush().expect("flush stdout");

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => break, // Ctrl-D / EOF
            Ok(_) => {}
            Err(e) => {
                eprintln!("read error: {e}");
                break;
            }
        }

        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        match scanner::scan(trimmed) {
            Ok(tokens) => {
                for token in &tokens {
                    println!("{token}");
                }
            }
            Err(e) => eprintln!("{e}"),
        }
    }
}
