//! Sample records with deterministic ids and timestamps.

use chrono::{DateTime, Duration, TimeZone, Utc};
use folio_types::{Blog, Portfolio};

fn epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 1, 9, 0, 0)
        .single()
        .expect("valid fixture timestamp")
}

pub fn blog(id: &str, title: &str) -> Blog {
    Blog {
        id: id.to_string(),
        title: title.to_string(),
        slug: slugify(title),
        content: format!("# {}\n\nBody of {}.", title, id),
        image: None,
        is_published: false,
        created_at: epoch(),
        updated_at: epoch(),
    }
}

pub fn portfolio(id: &str, title: &str) -> Portfolio {
    Portfolio {
        id: id.to_string(),
        title: title.to_string(),
        slug: slugify(title),
        description: format!("About {}", title),
        image: None,
        live_url: String::new(),
        github_url: String::new(),
        technologies: vec![],
        category: String::new(),
        is_published: false,
        created_at: epoch(),
        updated_at: epoch(),
    }
}

/// `count` blogs titled "Post 1".."Post N", newest last.
pub fn blogs(count: usize) -> Vec<Blog> {
    (1..=count)
        .map(|i| {
            let mut b = blog(&format!("b{}", i), &format!("Post {}", i));
            b.created_at = epoch() + Duration::hours(i as i64);
            b.updated_at = b.created_at;
            b
        })
        .collect()
}

pub fn portfolios(count: usize) -> Vec<Portfolio> {
    (1..=count)
        .map(|i| portfolio(&format!("p{}", i), &format!("Project {}", i)))
        .collect()
}

pub fn slugify(title: &str) -> String {
    title
        .to_lowercase()
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Hello, World!"), "hello-world");
        assert_eq!(slugify("  Rust 2024 "), "rust-2024");
    }

    #[test]
    fn test_blogs_are_numbered() {
        let all = blogs(3);
        assert_eq!(all[2].id, "b3");
        assert_eq!(all[2].title, "Post 3");
    }
}
