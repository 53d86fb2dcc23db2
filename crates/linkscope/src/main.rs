mod app;
mod cli;
mod commands;
mod config;
mod data;
mod layout;
mod render;
mod state;
mod theme;

use clap::Parser;

fn main() -> anyhow::Result<()> {
    cli::Cli::parse().run()
}
