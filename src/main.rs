use clap::Parser;
use color_eyre::eyre::Result;

use crate::{
  app::App,
  cli::Cli,
  config::Config,
  utils::{initialize_logging, initialize_panic_handler},
};

pub mod action;
pub mod app;
pub mod cli;
pub mod components;
pub mod config;
pub mod error;
pub mod mode;
pub mod shopping;
pub mod tui;
pub mod utils;

fn print_config(cli: &Cli) -> Result<()> {
  let mut config = Config::new()?;
  if cli.clear_on_add {
    config.screen.clear_input_on_add = true;
  }
  println!("{}", serde_json::to_string_pretty(&config.screen)?);
  Ok(())
}

async fn tokio_main() -> Result<()> {
  initialize_logging()?;
  initialize_panic_handler()?;

  let cli = Cli::parse();
  if cli.print_config {
    return print_config(&cli);
  }

  let mut app = App::new(&cli)?;
  app.run().await?;

  Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
  if let Err(e) = tokio_main().await {
    eprintln!("{} error: Something went wrong", env!("CARGO_PKG_NAME"));
    Err(e)
  } else {
    Ok(())
  }
}
