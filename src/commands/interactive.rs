use crate::cli::{Cli, Cmd};
use crate::commands::dispatch;
use crate::core::storage::AppCtx;
use clap::Parser;
use console::style;
use dialoguer::Input;
use std::future::Future;
use std::pin::Pin;

/// Run the CLI in interactive REPL mode.
pub async fn run(ctx: &AppCtx) -> Result<(), String> {
    println!("Entering interactive mode. Type 'exit' or 'quit' to leave.");
    loop {
        let input: String = Input::new()
            .with_prompt(format!("{}", style("pr >").blue().bold()))
            .allow_empty(true)
            .interact_text()
            .map_err(|e| format!("Input error: {}", e))?;

        let input = input.trim();
        if input.eq_ignore_ascii_case("exit") || input.eq_ignore_ascii_case("quit") {
            break;
        }
        if input.is_empty() {
            continue;
        }

        let args = match shell_words::split(input) {
            Ok(args) => args,
            Err(e) => {
                eprintln!("• Error parsing command: {}", e);
                continue;
            }
        };

        let full_args = std::iter::once("prompt-recall".to_string()).chain(args);

        match Cli::try_parse_from(full_args) {
            Ok(Cli {
                command: Cmd::Interactive,
                ..
            }) => {
                println!("{}", style("Already in interactive mode").yellow());
            }
            Ok(cli) => {
                // Boxed: `dispatch` can lead back here.
                let fut: Pin<Box<dyn Future<Output = Result<(), String>> + '_>> =
                    Box::pin(dispatch(cli.command, ctx));
                if let Err(e) = fut.await {
                    eprintln!("• {}", e);
                }
            }
            Err(e) => {
                e.print().unwrap_or(());
            }
        }
    }
    Ok(())
}
