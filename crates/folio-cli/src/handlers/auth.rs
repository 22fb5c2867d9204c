use crate::context::AppContext;
use crate::output::print_json;
use anyhow::Result;
use folio_runtime::{Config, Route};
use serde_json::json;

pub fn login(ctx: &AppContext, token: &str) -> Result<()> {
    if token.trim().is_empty() {
        anyhow::bail!("Token must not be empty");
    }
    ctx.tokens.save(token)?;
    tracing::info!(path = %ctx.tokens.path().display(), "token stored");

    if ctx.json() {
        print_json(&json!({ "signedIn": true }))
    } else {
        println!("Signed in. Token saved to {}", ctx.tokens.path().display());
        Ok(())
    }
}

pub fn logout(ctx: &AppContext) -> Result<()> {
    let removed = ctx.tokens.clear()?;

    if ctx.json() {
        print_json(&json!({ "signedIn": false }))
    } else {
        if removed {
            println!("Signed out.");
        } else {
            println!("Already signed out.");
        }
        Ok(())
    }
}

pub fn status(ctx: &AppContext) -> Result<()> {
    let signed_in = ctx.session.is_signed_in();
    let config_path = Config::path_in(&ctx.data_dir);

    if ctx.json() {
        return print_json(&json!({
            "dataDir": ctx.data_dir,
            "configFile": config_path,
            "apiUrl": ctx.config.api.base_url,
            "uploadsPath": ctx.config.api.uploads_path,
            "signedIn": signed_in,
        }));
    }

    println!("Data dir:  {}", ctx.data_dir.display());
    println!(
        "Config:    {}{}",
        config_path.display(),
        if config_path.exists() { "" } else { " (defaults)" }
    );
    println!("API:       {}", ctx.config.api.base_url);
    println!("Signed in: {}", if signed_in { "yes" } else { "no" });
    Ok(())
}

/// Where `path` leads for the current session.
pub fn route(ctx: &AppContext, path: &str) -> Result<()> {
    let requested = Route::parse(path);
    let found = !matches!(requested, Route::NotFound(_));
    let requires_auth = requested.requires_auth();
    let resolved = requested.guard(&ctx.session);

    if ctx.json() {
        return print_json(&json!({
            "path": path,
            "route": resolved.path(),
            "found": found,
            "requiresAuth": requires_auth,
        }));
    }

    if !found {
        println!("{} -> not found", path);
    } else if matches!(resolved, Route::SignIn) && requires_auth {
        println!("{} -> {} (sign-in required)", path, resolved);
    } else {
        println!("{} -> {}", path, resolved);
    }
    Ok(())
}
