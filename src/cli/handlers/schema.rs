use crate::graphql::build_schema;
use crate::storage::BookRepository;
use anyhow::Result;

use super::CommandContext;
use super::utils::print_root_type;

pub fn handle_schema(ctx: CommandContext, sdl: bool) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;

    if sdl {
        // The SDL does not depend on stored data.
        let sdl = runtime.block_on(async {
            let repo = BookRepository::in_memory().await?;
            anyhow::Ok(build_schema(repo).sdl())
        })?;
        print!("{}", sdl);
        return Ok(());
    }

    let schema = runtime.block_on(async {
        let client = ctx.client()?;
        client
            .introspect()
            .await
            .map_err(|e| anyhow::anyhow!(e.user_message()))
    })?;

    print_root_type("query", &schema.schema.query_type);
    if let Some(mutation) = &schema.schema.mutation_type {
        println!();
        print_root_type("mutation", mutation);
    }
    Ok(())
}
