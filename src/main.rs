mod cli;
mod commands;
mod facts;
mod output;

use clap::Parser;
use cli::Cli;
use commands::handle_facts_command;
use output::print_error;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = handle_facts_command(&cli.command) {
        print_error(&e.to_string());
        std::process::exit(1);
    }
}
