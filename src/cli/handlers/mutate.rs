use crate::graphql::build_schema;
use anyhow::Result;

use super::CommandContext;
use super::utils::parse_variables;

pub fn handle_mutate(
    ctx: CommandContext,
    mutation: String,
    variables: Option<String>,
) -> Result<()> {
    let vars = parse_variables(variables)?;

    // Auto-wrap in mutation { }
    let query = format!("mutation {{ {} }}", mutation);

    let response = tokio::runtime::Runtime::new()?.block_on(async {
        let schema = build_schema(ctx.open_repository().await?);
        let request = async_graphql::Request::new(query).variables(vars);
        anyhow::Ok(schema.execute(request).await)
    })?;

    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}
