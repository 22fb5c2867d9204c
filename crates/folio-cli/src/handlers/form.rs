//! `create` and `edit` over the form controller.

use crate::args::{BlogFields, PortfolioFields};
use crate::context::AppContext;
use crate::output::print_json;
use anyhow::{Context, Result};
use folio_client::AdminApi;
use folio_runtime::{FormController, FormMode, Route};
use folio_types::{BlogForm, PortfolioForm, Resource, ResourceForm, ResourceKind};
use serde_json::json;
use std::path::PathBuf;

fn read_text(inline: Option<String>, file: Option<PathBuf>) -> Result<Option<String>> {
    match (inline, file) {
        (Some(text), _) => Ok(Some(text)),
        (None, Some(path)) => std::fs::read_to_string(&path)
            .map(Some)
            .with_context(|| format!("Failed to read {}", path.display())),
        (None, None) => Ok(None),
    }
}

fn apply_blog<A: AdminApi>(screen: &mut FormController<BlogForm, A>, fields: BlogFields) -> Result<()> {
    let content = read_text(fields.content, fields.content_file)?;
    let form = screen.form_mut();
    if let Some(title) = fields.title {
        form.title = title;
    }
    if let Some(content) = content {
        form.content = content;
    }
    if let Some(published) = fields.publish.state() {
        form.is_published = published;
    }
    if let Some(path) = fields.image {
        screen.attach_file(path)?;
    }
    Ok(())
}

fn apply_portfolio<A: AdminApi>(
    screen: &mut FormController<PortfolioForm, A>,
    fields: PortfolioFields,
) -> Result<()> {
    let description = read_text(fields.description, fields.description_file)?;
    let form = screen.form_mut();
    if let Some(title) = fields.title {
        form.title = title;
    }
    if let Some(description) = description {
        form.description = description;
    }
    if let Some(live_url) = fields.live_url {
        form.live_url = live_url;
    }
    if let Some(github_url) = fields.github_url {
        form.github_url = github_url;
    }
    if let Some(technologies) = fields.technologies {
        form.technologies = technologies;
    }
    if let Some(category) = fields.category {
        form.category = category;
    }
    if let Some(published) = fields.publish.state() {
        form.is_published = published;
    }
    if let Some(path) = fields.image {
        screen.attach_file(path)?;
    }
    Ok(())
}

async fn submit<F: ResourceForm, A: AdminApi>(
    ctx: &AppContext,
    screen: &mut FormController<F, A>,
) -> Result<()> {
    let preview = screen.preview();
    let route = screen.submit().await?;
    report::<F>(ctx, screen.mode(), screen.form().title(), preview, &route)
}

fn report<F: ResourceForm>(
    ctx: &AppContext,
    mode: &FormMode,
    title: &str,
    preview: Option<String>,
    next: &Route,
) -> Result<()> {
    let kind = F::Resource::KIND;
    let (status, id) = match mode {
        FormMode::Create => ("created", None),
        FormMode::Edit { id } => ("updated", Some(id.as_str())),
    };

    if ctx.json() {
        return print_json(&json!({
            "status": status,
            "kind": kind.to_string(),
            "id": id,
            "title": title,
            "image": preview,
            "next": next.path(),
        }));
    }

    match id {
        Some(id) => println!("Updated {} {} \"{}\".", kind, id, title),
        None => println!("Created {} \"{}\".", kind, title),
    }
    if let Some(preview) = preview {
        println!("Image: {}", preview);
    }
    println!("Next: {}", next);
    Ok(())
}

pub async fn create_blog(ctx: &AppContext, fields: BlogFields) -> Result<()> {
    ctx.enter(Route::Create(ResourceKind::Blog))?;
    let mut screen: FormController<BlogForm, _> = FormController::create(ctx.client()?, ctx.assets());
    apply_blog(&mut screen, fields)?;
    submit(ctx, &mut screen).await
}

pub async fn edit_blog(ctx: &AppContext, id: &str, fields: BlogFields) -> Result<()> {
    ctx.enter(Route::Edit(ResourceKind::Blog, id.to_string()))?;
    let mut screen: FormController<BlogForm, _> =
        FormController::edit(ctx.client()?, ctx.assets(), id);
    screen.load().await?;
    apply_blog(&mut screen, fields)?;
    submit(ctx, &mut screen).await
}

pub async fn create_portfolio(ctx: &AppContext, fields: PortfolioFields) -> Result<()> {
    ctx.enter(Route::Create(ResourceKind::Portfolio))?;
    let mut screen: FormController<PortfolioForm, _> =
        FormController::create(ctx.client()?, ctx.assets());
    apply_portfolio(&mut screen, fields)?;
    submit(ctx, &mut screen).await
}

pub async fn edit_portfolio(ctx: &AppContext, id: &str, fields: PortfolioFields) -> Result<()> {
    ctx.enter(Route::Edit(ResourceKind::Portfolio, id.to_string()))?;
    let mut screen: FormController<PortfolioForm, _> =
        FormController::edit(ctx.client()?, ctx.assets(), id);
    screen.load().await?;
    apply_portfolio(&mut screen, fields)?;
    submit(ctx, &mut screen).await
}
