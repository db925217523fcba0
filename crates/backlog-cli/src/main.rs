mod cli;
mod context;
mod handlers;
mod output;

use clap::Parser;
use cli::{Cli, Commands};
use context::CliContext;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Ok(log_path) = std::env::var("BACKLOG_DEBUG_LOG") {
        let log_file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)?;

        tracing_subscriber::fmt()
            .with_writer(log_file)
            .with_max_level(tracing::Level::DEBUG)
            .with_target(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
            .with_ansi(false)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_max_level(tracing::Level::WARN)
            .init();
    }

    let cli = Cli::parse();
    let mut ctx = CliContext::new(&cli)?;

    match cli.command {
        Commands::List(args) => handlers::item::handle_list(&mut ctx, args).await?,
        Commands::Boards { .. } => handlers::board::handle_boards(&mut ctx).await?,
        Commands::Move { item, onto } => handlers::item::handle_move(&mut ctx, item, onto).await?,
        Commands::Convert { items, board } => {
            handlers::board::handle_convert(&mut ctx, items, board).await?
        }
        Commands::Weekly { items, title } => {
            handlers::board::handle_weekly(&mut ctx, items, title).await?
        }
        Commands::Add(args) => handlers::item::handle_add(&mut ctx, args).await?,
        Commands::Edit(args) => handlers::item::handle_edit(&mut ctx, args).await?,
        Commands::Remove { id } => handlers::item::handle_remove(&mut ctx, id).await?,
    }

    Ok(())
}
