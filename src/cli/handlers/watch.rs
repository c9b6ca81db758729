use crate::client::{BookNode, FetchPolicy, QueryState};
use anyhow::Result;
use colored::Colorize;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};

use super::CommandContext;
use super::utils::print_book_list;

/// What was last printed, so unchanged polls stay quiet.
#[derive(Debug, Default, PartialEq)]
enum Printed {
    #[default]
    Nothing,
    Books(Vec<BookNode>),
    Error(String),
}

pub fn handle_watch(
    ctx: CommandContext,
    manual: bool,
    interval_ms: Option<u64>,
    policy: Option<FetchPolicy>,
) -> Result<()> {
    let interval = interval_ms
        .map(Duration::from_millis)
        .unwrap_or_else(|| ctx.config.client.poll_interval());
    if interval.is_zero() {
        anyhow::bail!("--interval-ms must be greater than zero");
    }
    let policy = policy.unwrap_or(if manual {
        FetchPolicy::CacheFirst
    } else {
        ctx.config.client.fetch_policy
    });

    tokio::runtime::Runtime::new()?.block_on(async {
        let client = ctx.client()?;
        let query = client.watch_all_books(policy);
        let mut updates = query.subscribe();

        query.fetch().await;
        let _poller = (!manual).then(|| query.start_polling(interval));

        if manual {
            eprintln!("{}", "Press Enter to refetch, Ctrl-C to quit".dimmed());
        } else {
            eprintln!(
                "{}",
                format!("Polling every {} ms, Ctrl-C to quit", interval.as_millis()).dimmed()
            );
        }

        let mut stdin = BufReader::new(tokio::io::stdin()).lines();
        let mut stdin_open = manual;
        let mut printed = Printed::default();
        print_if_changed(&updates.borrow_and_update().state, &mut printed);

        loop {
            tokio::select! {
                changed = updates.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    let state = updates.borrow_and_update().state.clone();
                    print_if_changed(&state, &mut printed);
                }
                line = stdin.next_line(), if stdin_open => {
                    match line {
                        Ok(Some(_)) => {
                            let query = query.clone();
                            tokio::spawn(async move { query.refetch().await });
                        }
                        _ => stdin_open = false,
                    }
                }
                _ = tokio::signal::ctrl_c() => break,
            }
        }
        anyhow::Ok(())
    })
}

fn print_if_changed(state: &QueryState<crate::client::AllBooksData>, printed: &mut Printed) {
    let next = match state {
        QueryState::Success { data, .. } => Printed::Books(data.all_books.clone()),
        QueryState::Error { message } => Printed::Error(message.clone()),
        QueryState::Idle | QueryState::Loading { .. } => return,
    };
    if next == *printed {
        return;
    }

    let stamp = chrono::Local::now().format("%H:%M:%S").to_string();
    match &next {
        Printed::Books(books) => {
            println!("{} {} book(s)", stamp.dimmed(), books.len());
            print_book_list(books);
        }
        Printed::Error(message) => {
            eprintln!("{} {} {}", stamp.dimmed(), "error:".red().bold(), message);
        }
        Printed::Nothing => {}
    }
    *printed = next;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::AllBooksData;
    use chrono::Utc;

    fn success(titles: &[&str]) -> QueryState<AllBooksData> {
        QueryState::Success {
            data: AllBooksData {
                all_books: titles
                    .iter()
                    .enumerate()
                    .map(|(i, t)| BookNode {
                        id: (i + 1).to_string(),
                        title: t.to_string(),
                        author: "A".to_string(),
                        content: "Long enough content".to_string(),
                    })
                    .collect(),
            },
            fetched_at: Utc::now(),
            from_cache: false,
        }
    }

    #[test]
    fn test_unchanged_set_is_printed_once() {
        let mut printed = Printed::default();
        print_if_changed(&success(&["Dune"]), &mut printed);
        assert!(matches!(&printed, Printed::Books(b) if b.len() == 1));

        let before = format!("{:?}", printed);
        print_if_changed(&success(&["Dune"]), &mut printed);
        assert_eq!(format!("{:?}", printed), before);

        print_if_changed(&success(&["Dune", "Emma"]), &mut printed);
        assert!(matches!(&printed, Printed::Books(b) if b.len() == 2));
    }

    #[test]
    fn test_loading_keeps_last_output() {
        let mut printed = Printed::default();
        print_if_changed(&success(&["Dune"]), &mut printed);
        print_if_changed(&QueryState::Loading { stale: None }, &mut printed);
        assert!(matches!(printed, Printed::Books(_)));
    }
}
