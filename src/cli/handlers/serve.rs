use crate::graphql::{build_schema, run_server};
use anyhow::Result;

use super::CommandContext;

pub fn handle_serve(
    mut ctx: CommandContext,
    host: Option<String>,
    port: Option<u16>,
) -> Result<()> {
    if let Some(host) = host {
        ctx.config.server.host = host;
    }
    if let Some(port) = port {
        ctx.config.server.port = port;
    }

    let settings = ctx.config.server.clone();
    println!(
        "Starting GraphQL server on http://{}{}",
        settings.bind_address(),
        settings.path
    );
    if settings.graphiql {
        println!(
            "GraphiQL: http://{}{} (GET)",
            settings.bind_address(),
            settings.path
        );
    }

    tokio::runtime::Runtime::new()?.block_on(async {
        let repo = ctx.open_repository().await?;
        println!("Shelf holds {} book(s)", repo.count().await?);
        run_server(build_schema(repo), &settings).await?;
        anyhow::Ok(())
    })
}
