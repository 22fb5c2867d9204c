//! Plain and JSON rendering of records and list pages.

use anyhow::Result;
use folio_types::{AssetResolver, Blog, Portfolio, Resource};
use is_terminal::IsTerminal;
use owo_colors::OwoColorize;
use serde::Serialize;

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Colors only when stdout is a terminal.
#[derive(Debug, Clone, Copy)]
pub struct Style {
    color: bool,
}

impl Style {
    pub fn detect() -> Self {
        Self {
            color: std::io::stdout().is_terminal(),
        }
    }

    pub fn badge(&self, published: bool) -> String {
        let label = if published { "published" } else { "draft" };
        match (self.color, published) {
            (false, _) => format!("[{}]", label),
            (true, true) => format!("[{}]", label.green()),
            (true, false) => format!("[{}]", label.yellow()),
        }
    }

    pub fn heading(&self, text: &str) -> String {
        if self.color {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    }

    pub fn dim(&self, text: &str) -> String {
        if self.color {
            text.dimmed().to_string()
        } else {
            text.to_string()
        }
    }

    pub fn error(&self, text: &str) -> String {
        if self.color {
            text.red().to_string()
        } else {
            text.to_string()
        }
    }
}

/// One numbered row per item, then the pager line.
pub fn render_rows<R: Resource>(style: Style, items: &[R], page: u32, total_pages: u32) -> String {
    let mut out = String::new();
    if items.is_empty() {
        out.push_str(&format!("No {} found.\n", R::KIND.screen()));
    }
    for (i, item) in items.iter().enumerate() {
        out.push_str(&format!(
            "{:>3}. {} {}  {}  {}\n",
            i + 1,
            item.title(),
            style.badge(item.is_published()),
            style.dim(item.id()),
            style.dim(&item.created_at().format("%Y-%m-%d").to_string()),
        ));
    }
    out.push_str(&format!("Page {} of {}\n", page, total_pages));
    out
}

/// Field-by-field view used by `show`.
pub trait Describe: Resource {
    fn fields(&self, assets: &AssetResolver) -> Vec<(&'static str, String)>;

    /// Long text shown after the fields
    fn body(&self) -> &str;
}

impl Describe for Blog {
    fn fields(&self, assets: &AssetResolver) -> Vec<(&'static str, String)> {
        vec![
            ("id", self.id.clone()),
            ("title", self.title.clone()),
            ("slug", self.slug.clone()),
            ("published", self.is_published.to_string()),
            ("image", assets.image_url(self.image())),
            ("created", self.created_at.to_rfc3339()),
            ("updated", self.updated_at.to_rfc3339()),
        ]
    }

    fn body(&self) -> &str {
        &self.content
    }
}

impl Describe for Portfolio {
    fn fields(&self, assets: &AssetResolver) -> Vec<(&'static str, String)> {
        vec![
            ("id", self.id.clone()),
            ("title", self.title.clone()),
            ("slug", self.slug.clone()),
            ("category", self.category.clone()),
            ("technologies", self.technologies.join(", ")),
            ("live url", self.live_url.clone()),
            ("github url", self.github_url.clone()),
            ("published", self.is_published.to_string()),
            ("image", assets.image_url(self.image())),
            ("created", self.created_at.to_rfc3339()),
        ]
    }

    fn body(&self) -> &str {
        &self.description
    }
}

pub fn render_detail<R: Describe>(style: Style, item: &R, assets: &AssetResolver) -> String {
    let mut out = String::new();
    for (label, value) in item.fields(assets) {
        if value.is_empty() {
            continue;
        }
        // Pad before styling so escape codes do not eat the column width.
        let label = format!("{:<13}", format!("{}:", label));
        out.push_str(&format!("{} {}\n", style.heading(&label), value));
    }
    if !item.body().is_empty() {
        out.push('\n');
        out.push_str(item.body());
        out.push('\n');
    }
    out
}
