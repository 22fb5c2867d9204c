//! One-shot `list`, `show` and `delete`.

use crate::args::{DeleteArgs, ListArgs};
use crate::context::AppContext;
use crate::handlers::Prompt;
use crate::output::{Describe, Style, print_json, render_detail, render_rows};
use anyhow::Result;
use folio_client::AdminApi;
use folio_runtime::{Choice, ConfirmDialog, Error, Resolution, Route};
use folio_types::{ListQuery, Paged};
use serde_json::json;

pub async fn list<R: Describe>(ctx: &AppContext, args: ListArgs) -> Result<()> {
    ctx.enter(Route::List(R::KIND))?;
    let api = ctx.client()?;

    let query = ListQuery::new(
        args.page,
        ctx.config.list.page_size,
        args.search.unwrap_or_default(),
    );
    let page: Paged<R> = api
        .list(&query)
        .await
        .map_err(|e| Error::api(e, R::KIND.fetch_list_failed()))?;

    if ctx.json() {
        return print_json(&page);
    }
    print!(
        "{}",
        render_rows(
            Style::detect(),
            &page.data,
            query.page,
            page.total_pages.max(1)
        )
    );
    Ok(())
}

pub async fn show<R: Describe>(ctx: &AppContext, id: &str) -> Result<()> {
    ctx.enter(Route::List(R::KIND))?;
    let api = ctx.client()?;

    let item: R = api
        .get(id)
        .await
        .map_err(|e| Error::api(e, R::KIND.fetch_one_failed()))?;

    if ctx.json() {
        return print_json(&item);
    }
    print!("{}", render_detail(Style::detect(), &item, &ctx.assets()));
    Ok(())
}

pub async fn delete<R: Describe>(ctx: &AppContext, args: DeleteArgs) -> Result<()> {
    ctx.enter(Route::List(R::KIND))?;
    let api = ctx.client()?;

    let item: R = api
        .get(&args.id)
        .await
        .map_err(|e| Error::api(e, R::KIND.fetch_one_failed()))?;
    let dialog = ConfirmDialog::for_delete(R::KIND, item.title());

    let choice = if args.yes {
        Choice::Confirm
    } else {
        eprintln!("{}", dialog.title);
        eprintln!("{}", dialog.message);
        Prompt::stdin().confirm(&dialog).await?
    };

    match dialog.resolve(choice) {
        Resolution::Close => {
            if ctx.json() {
                print_json(&json!({ "status": "cancelled", "id": args.id }))?;
            } else {
                println!("Cancelled.");
            }
        }
        Resolution::Proceed => {
            api.delete::<R>(&args.id)
                .await
                .map_err(|e| Error::api(e, R::KIND.delete_failed()))?;
            if ctx.json() {
                print_json(&json!({ "status": "deleted", "id": args.id }))?;
            } else {
                println!("Deleted {} \"{}\".", R::KIND, item.title());
            }
        }
    }
    Ok(())
}
