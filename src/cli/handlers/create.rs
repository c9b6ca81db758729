use crate::form::{CreateBookForm, SubmitStatus};
use crate::model::BookField;
use anyhow::Result;
use colored::Colorize;

use super::CommandContext;
use super::utils::{print_book, resolve_content};

pub fn handle_create(
    ctx: CommandContext,
    title: String,
    author: String,
    content: String,
    json: bool,
) -> Result<()> {
    let content = resolve_content(content)?;
    let mut form = CreateBookForm::with_values(title, author, content);

    let outcome = tokio::runtime::Runtime::new()?.block_on(async {
        let client = ctx.client()?;
        anyhow::Ok(form.submit(&client).await)
    })?;

    let book = match outcome {
        // Rejected before sending: report every failing field.
        None => {
            for field in BookField::ALL {
                if let Some(message) = form.errors().get(field) {
                    eprintln!("{} {}", "error:".red().bold(), message);
                }
            }
            if let SubmitStatus::Failed(message) = form.status() {
                eprintln!("{} {}", "error:".red().bold(), message);
            }
            anyhow::bail!("Book not created");
        }
        Some(Err(e)) => anyhow::bail!(e.user_message()),
        Some(Ok(book)) => book,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&book)?);
    } else {
        if let Some(message) = form.status().message() {
            println!("{}", message.green());
        }
        print_book(&book);
    }
    Ok(())
}
