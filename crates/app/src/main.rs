use clap::Parser;

use crate::{
    error::Result,
    settings::{Args, Command},
};

mod commands;
mod convert;
mod error;
mod local_state;
mod settings;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let settings = settings::load(&args)?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "registry={level},engine={level}",
            level = settings.level
        ))
        .init();

    match args.command {
        Command::Table(table) => commands::table(&settings, table),
        Command::Fee(fee) => commands::fee(fee),
        Command::Columns(columns) => commands::columns(&settings, columns),
    }
}
