//! Assertions over the CLI's JSON output.
//!
//! `list` prints the page payload (`{ data, total, page, limit, totalPages }`),
//! `show` prints the bare record.

use anyhow::{Context, Result};
use serde_json::Value;

fn items(json: &Value) -> Result<&Vec<Value>> {
    json["data"]
        .as_array()
        .context("Expected 'data' array in JSON")
}

/// Assert that a list payload holds `expected` items.
pub fn assert_item_count(json: &Value, expected: usize) -> Result<()> {
    let items = items(json)?;
    if items.len() != expected {
        anyhow::bail!("Expected {} items, got {}", expected, items.len());
    }
    Ok(())
}

/// Assert the exact ids of a list payload, in order.
pub fn assert_item_ids(json: &Value, expected: &[&str]) -> Result<()> {
    let ids: Vec<&str> = items(json)?
        .iter()
        .filter_map(|item| item["id"].as_str())
        .collect();
    if ids != expected {
        anyhow::bail!("Expected ids {:?}, got {:?}", expected, ids);
    }
    Ok(())
}

/// Assert page position and page count of a list payload.
pub fn assert_page(json: &Value, page: u64, total_pages: u64) -> Result<()> {
    let actual_page = json["page"].as_u64().context("Expected 'page' number")?;
    let actual_total = json["totalPages"]
        .as_u64()
        .context("Expected 'totalPages' number")?;
    if (actual_page, actual_total) != (page, total_pages) {
        anyhow::bail!(
            "Expected page {}/{}, got {}/{}",
            page,
            total_pages,
            actual_page,
            actual_total
        );
    }
    Ok(())
}

/// Assert that every item title contains `needle`, case-insensitively.
pub fn assert_titles_contain(json: &Value, needle: &str) -> Result<()> {
    let needle = needle.to_lowercase();
    for (i, item) in items(json)?.iter().enumerate() {
        let title = item["title"]
            .as_str()
            .with_context(|| format!("Item {} missing title", i))?;
        if !title.to_lowercase().contains(&needle) {
            anyhow::bail!("Item {} title {:?} does not contain {:?}", i, title, needle);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_assert_item_count() {
        let json = json!({ "data": [{"id": "b1"}, {"id": "b2"}], "page": 1, "totalPages": 1 });

        assert!(assert_item_count(&json, 2).is_ok());
        assert!(assert_item_count(&json, 3).is_err());
        assert!(assert_item_count(&json!({}), 0).is_err());
    }

    #[test]
    fn test_assert_item_ids_is_ordered() {
        let json = json!({ "data": [{"id": "b1"}, {"id": "b2"}] });

        assert!(assert_item_ids(&json, &["b1", "b2"]).is_ok());
        assert!(assert_item_ids(&json, &["b2", "b1"]).is_err());
    }

    #[test]
    fn test_assert_page_and_titles() {
        let json = json!({
            "data": [{"id": "b1", "title": "Rust Tips"}, {"id": "b2", "title": "rusty nails"}],
            "page": 2,
            "totalPages": 3
        });

        assert!(assert_page(&json, 2, 3).is_ok());
        assert!(assert_page(&json, 1, 3).is_err());
        assert!(assert_titles_contain(&json, "RUST").is_ok());
        assert!(assert_titles_contain(&json, "tips").is_err());
    }
}
