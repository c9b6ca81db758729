use crate::client::{BookNode, RootType};
use anyhow::{Context, Result};
use colored::Colorize;
use std::io::{self, Read};

/// Resolve content from the CLI arg, or stdin when it is `-`.
pub fn resolve_content(content: String) -> Result<String> {
    if content == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read content from stdin")?;
        return Ok(buf.trim_end_matches('\n').to_string());
    }
    Ok(content)
}

/// Parse `--variables` JSON for a local execution.
pub fn parse_variables(variables: Option<String>) -> Result<async_graphql::Variables> {
    match variables {
        Some(v) => serde_json::from_str(&v).context("Variables must be a JSON object"),
        None => Ok(async_graphql::Variables::default()),
    }
}

/// Print a single book with details
pub fn print_book(book: &BookNode) {
    println!("{} {}", format!("#{}", book.id).cyan().bold(), book.title.bold());
    println!("Author:  {}", book.author.yellow());
    println!();
    println!("{}", book.content);
}

/// Print a list of books (compact format)
pub fn print_book_list(books: &[BookNode]) {
    if books.is_empty() {
        println!("No books found.");
        return;
    }

    for book in books {
        println!(
            "{} {} {}",
            format!("#{}", book.id).cyan(),
            book.title,
            format!("by {}", book.author).dimmed()
        );
    }
}

pub fn print_root_type(kind: &str, root: &RootType) {
    println!("{} {}", kind.bold(), root.name.blue());
    for field in root.fields() {
        println!("  {}", field.signature().green());
        if let Some(description) = field.description.as_deref() {
            println!("    {}", description.dimmed());
        }
    }
}
