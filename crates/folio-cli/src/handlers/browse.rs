//! Interactive list screen driven by stdin lines.

use crate::context::AppContext;
use crate::handlers::Prompt;
use crate::output::{Style, render_rows};
use anyhow::Result;
use folio_runtime::{ListCommand, ListController, ListSnapshot, Route};
use folio_types::Resource;
use std::io::Write;

const HELP: &str = "/text search  n next  p previous  g N go to page  d N delete row  r refresh  q quit";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Action {
    Search(String),
    Next,
    Previous,
    Goto(u32),
    Delete(usize),
    Refresh,
    Help,
    Quit,
}

impl Action {
    fn parse(line: &str) -> std::result::Result<Action, String> {
        if let Some(text) = line.strip_prefix('/') {
            return Ok(Action::Search(text.trim().to_string()));
        }
        let mut words = line.split_whitespace();
        let command = words.next().unwrap_or_default();
        let number = words.next();

        match (command, number) {
            ("n", None) => Ok(Action::Next),
            ("p", None) => Ok(Action::Previous),
            ("r", None) => Ok(Action::Refresh),
            ("q", None) => Ok(Action::Quit),
            ("?" | "h" | "", None) => Ok(Action::Help),
            ("g", Some(n)) => n
                .parse()
                .map(Action::Goto)
                .map_err(|_| format!("Not a page number: {}", n)),
            ("d", Some(n)) => match n.parse::<usize>() {
                Ok(row) if row > 0 => Ok(Action::Delete(row)),
                _ => Err(format!("Not a row number: {}", n)),
            },
            _ => Err(format!("Unknown command: {}", line)),
        }
    }
}

fn render<R: Resource>(style: Style, snapshot: &ListSnapshot<R>) {
    println!("{}", style.heading(&format!("{} list", R::KIND)));
    if !snapshot.search.is_empty() {
        println!("Search: \"{}\"", snapshot.search);
    }
    if let Some(error) = &snapshot.error {
        println!("{}", style.error(&format!("Error: {}", error)));
    }
    print!(
        "{}",
        render_rows(style, snapshot.visible(), snapshot.page, snapshot.total_pages)
    );
}

/// Move to `target` and wait for its page; `None` when there is nothing to fetch.
async fn turn_page<R: Resource>(
    list: &ListController<R>,
    current: &ListSnapshot<R>,
    target: u32,
) -> Result<Option<ListSnapshot<R>>> {
    if target < 1 || target > current.total_pages {
        println!("No page {}.", target);
        return Ok(None);
    }
    if target == current.page {
        return Ok(None);
    }
    list.goto(target)?;
    Ok(Some(
        list.wait_for(|s| s.page == target && !s.loading).await?,
    ))
}

pub async fn handle<R: Resource>(ctx: &AppContext) -> Result<()> {
    ctx.enter(Route::List(R::KIND))?;
    let list = ListController::<R>::start(ctx.client()?, ctx.list_options());
    let mut prompt = Prompt::stdin();
    let style = Style::detect();

    let mut snapshot = list.settled().await?;
    render(style, &snapshot);

    loop {
        print!("> ");
        std::io::stdout().flush()?;
        let Some(line) = prompt.line().await? else {
            break;
        };
        let action = match Action::parse(&line) {
            Ok(action) => action,
            Err(message) => {
                println!("{}", message);
                continue;
            }
        };

        snapshot = match action {
            Action::Quit => break,
            Action::Help => {
                println!("{}", HELP);
                continue;
            }
            Action::Search(text) => {
                list.search(text.clone())?;
                list.wait_for(|s| s.search == text && s.debounced_search == text && !s.loading)
                    .await?
            }
            Action::Next => match turn_page(&list, &snapshot, snapshot.page.saturating_add(1)).await? {
                Some(next) => next,
                None => continue,
            },
            Action::Previous => match turn_page(&list, &snapshot, snapshot.page.saturating_sub(1)).await? {
                Some(next) => next,
                None => continue,
            },
            Action::Goto(page) => match turn_page(&list, &snapshot, page).await? {
                Some(next) => next,
                None => continue,
            },
            Action::Refresh => {
                let revision = snapshot.revision;
                list.refresh()?;
                list.wait_for(|s| s.revision > revision && !s.loading)
                    .await?
            }
            Action::Delete(row) => {
                let Some(item) = snapshot.visible().get(row - 1) else {
                    println!("No row {}.", row);
                    continue;
                };
                list.request_delete(item.id())?;
                let opened = list.wait_for(|s| s.confirm.is_some()).await?;
                let Some(dialog) = opened.confirm else {
                    continue;
                };
                println!("{}", dialog.title);
                println!("{}", dialog.message);
                let choice = prompt.confirm(&dialog).await?;
                list.send(ListCommand::Resolve(choice))?;
                list.wait_for(|s| s.confirm.is_none() && !s.deleting)
                    .await?
            }
        };
        render(style, &snapshot);
    }

    list.dispose();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_actions() {
        assert_eq!(Action::parse("/rust tips"), Ok(Action::Search("rust tips".into())));
        assert_eq!(Action::parse("/"), Ok(Action::Search(String::new())));
        assert_eq!(Action::parse("n"), Ok(Action::Next));
        assert_eq!(Action::parse("p"), Ok(Action::Previous));
        assert_eq!(Action::parse("g 3"), Ok(Action::Goto(3)));
        assert_eq!(Action::parse("d 2"), Ok(Action::Delete(2)));
        assert_eq!(Action::parse("r"), Ok(Action::Refresh));
        assert_eq!(Action::parse("q"), Ok(Action::Quit));
        assert_eq!(Action::parse(""), Ok(Action::Help));
    }

    #[test]
    fn test_parse_rejects_bad_numbers() {
        assert!(Action::parse("g x").is_err());
        assert!(Action::parse("d 0").is_err());
        assert!(Action::parse("d").is_err());
        assert!(Action::parse("delete").is_err());
    }
}
