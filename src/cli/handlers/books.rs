use anyhow::Result;

use super::CommandContext;
use super::utils::print_book_list;

pub fn handle_books(ctx: CommandContext, json: bool) -> Result<()> {
    let books = tokio::runtime::Runtime::new()?.block_on(async {
        let client = ctx.client()?;
        client
            .all_books()
            .await
            .map_err(|e| anyhow::anyhow!(e.user_message()))
    })?;

    if json {
        println!("{}", serde_json::to_string_pretty(&books)?);
    } else {
        print_book_list(&books);
    }
    Ok(())
}
