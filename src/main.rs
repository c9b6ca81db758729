use anyhow::Result;
use clap::Parser;

use bookshelf::cli::handlers::{self, CommandContext};
use bookshelf::cli::{Cli, Commands};
use bookshelf::logging;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // The TUI owns the terminal, so it only logs to the file.
    let log_to_stderr = !matches!(cli.command, Commands::Tui { .. });
    logging::init(cli.verbose, cli.log_file.clone(), log_to_stderr);

    match cli.command {
        // Works without loading a config.
        Commands::Init => handlers::handle_init(),
        command => {
            let ctx = CommandContext::load(cli.config.as_deref(), cli.endpoint)?;
            run(ctx, command)
        }
    }
}

fn run(ctx: CommandContext, command: Commands) -> Result<()> {
    match command {
        Commands::Init => handlers::handle_init(),
        Commands::Serve { host, port } => handlers::handle_serve(ctx, host, port),
        Commands::Books { json } => handlers::handle_books(ctx, json),
        Commands::Create {
            title,
            author,
            content,
            json,
        } => handlers::handle_create(ctx, title, author, content, json),
        Commands::Watch {
            manual,
            interval_ms,
            policy,
        } => handlers::handle_watch(ctx, manual, interval_ms, policy.map(Into::into)),
        Commands::Schema { sdl } => handlers::handle_schema(ctx, sdl),
        Commands::Query { query, variables } => handlers::handle_query(ctx, query, variables),
        Commands::Mutate {
            mutation,
            variables,
        } => handlers::handle_mutate(ctx, mutation, variables),
        Commands::Tui { manual } => handlers::handle_tui(ctx, manual),
    }
}
