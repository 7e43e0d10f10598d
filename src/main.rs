use std::process::ExitCode;

use clap::Parser;

mod assemble;
mod cli;
mod config;
mod content;
mod deploy;
mod duration;
mod error;
mod frontmatter;
mod health;
mod logging;
mod output;
mod runtime;
mod streaming;

fn main() -> ExitCode {
    runtime::run(cli::Cli::parse())
}
