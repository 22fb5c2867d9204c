use crate::context::AppContext;
use crate::output::print_json;
use anyhow::Result;
use folio_runtime::{ContentGenerator, Route};
use serde_json::json;

pub async fn handle(ctx: &AppContext, context: String) -> Result<()> {
    ctx.enter(Route::Generate)?;
    let mut screen = ContentGenerator::new(ctx.client()?);
    screen.context = context;

    let next = screen.generate().await?;
    let content = screen.content().unwrap_or_default();

    if ctx.json() {
        return print_json(&json!({ "content": content, "next": next.path() }));
    }
    println!("{}", content);
    println!();
    println!("Next: {}", next);
    Ok(())
}
