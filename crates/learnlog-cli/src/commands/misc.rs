use clap::CommandFactory;
use clap_complete::generate;

use crate::cli::{Cli, CompletionsArgs};

pub fn handle_completions(args: &CompletionsArgs) -> anyhow::Result<()> {
    let mut cmd = Cli::command();
    generate(args.shell, &mut cmd, "learnlog", &mut std::io::stdout());
    Ok(())
}

/// Shown when `learnlog` runs without a subcommand.
pub fn print_quickstart() {
    println!("Learnlog - a learning journal that keeps working offline");
    println!();
    println!("Get started:");
    println!("  learnlog init                       Write a config (backend URL, snapshot path)");
    println!("  learnlog add \"Title\" --content ...  Record what you learned");
    println!("  learnlog list                       Browse entries, newest first");
    println!("  learnlog status                     Check whether the backend is reachable");
    println!();
    println!("Run `learnlog --help` for every command.");
}
