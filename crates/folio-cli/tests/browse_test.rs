//! Interactive `browse` driven through stdin.

use anyhow::Result;
use folio_testing::{StubServer, TestWorld, fixtures};
use folio_types::ResourceKind;

fn browsing(stub: &StubServer) -> Result<TestWorld> {
    let world = TestWorld::new().with_api(stub.base_url());
    world.login(stub.token())?;
    std::fs::write(
        world.data_dir().join("config.toml"),
        "[list]\npage_size = 5\nsearch_delay_ms = 20\n",
    )?;
    Ok(world)
}

#[test]
fn test_browse_pages_forward_and_back() -> Result<()> {
    let stub = StubServer::start()?;
    stub.seed(fixtures::blogs(7));
    let world = browsing(&stub)?;

    let result = world.run_with_input(&["blog", "browse"], "n\nn\np\nq\n")?;

    assert!(result.success(), "stderr: {}", result.stderr());
    let out = result.stdout();
    assert!(out.contains("blog list"));
    assert!(out.contains("Page 1 of 2"));
    assert!(out.contains("  2. Post 7 [draft]"));
    assert!(out.contains("No page 3."));

    let pages: Vec<_> = stub
        .requests()
        .iter()
        .filter_map(|r| r.query.get("page").cloned())
        .collect();
    assert_eq!(pages, vec!["1", "2", "1"]);
    Ok(())
}

#[test]
fn test_browse_search_resets_page() -> Result<()> {
    let stub = StubServer::start()?;
    stub.seed(fixtures::blogs(12));
    let world = browsing(&stub)?;

    let result = world.run_with_input(&["blog", "browse"], "g 2\n/Post 1\nq\n")?;

    assert!(result.success(), "stderr: {}", result.stderr());
    assert!(result.stdout().contains("Search: \"Post 1\""));
    assert!(result.stdout().contains("  4. Post 12 [draft]"));

    let last = stub.last_request().expect("request recorded");
    assert_eq!(last.query.get("page").map(String::as_str), Some("1"));
    assert_eq!(last.query.get("search").map(String::as_str), Some("Post 1"));
    Ok(())
}

#[test]
fn test_browse_delete_confirmed() -> Result<()> {
    let stub = StubServer::start()?;
    stub.seed(fixtures::portfolios(3));
    let world = browsing(&stub)?;

    let result = world.run_with_input(&["portfolio", "browse"], "d 2\ny\nq\n")?;

    assert!(result.success(), "stderr: {}", result.stderr());
    assert!(result.stdout().contains("Delete Portfolio Project"));
    let ids: Vec<_> = stub
        .records(ResourceKind::Portfolio)
        .iter()
        .filter_map(|r| r["id"].as_str().map(String::from))
        .collect();
    assert_eq!(ids, vec!["p1", "p3"]);
    Ok(())
}

#[test]
fn test_browse_delete_cancelled_and_bad_rows() -> Result<()> {
    let stub = StubServer::start()?;
    stub.seed(fixtures::blogs(2));
    let world = browsing(&stub)?;

    let result = world.run_with_input(&["blog", "browse"], "d 9\nd 1\nn\nwat\n")?;

    assert!(result.success(), "stderr: {}", result.stderr());
    assert!(result.stdout().contains("No row 9."));
    assert!(result.stdout().contains("Unknown command: wat"));
    assert_eq!(stub.records(ResourceKind::Blog).len(), 2);
    assert!(stub.requests().iter().all(|r| r.method != "DELETE"));
    Ok(())
}

#[test]
fn test_browse_shows_fetch_error_and_recovers() -> Result<()> {
    let stub = StubServer::start()?;
    stub.seed(fixtures::blogs(1));
    let world = browsing(&stub)?;
    stub.fail_next(500, None);

    let result = world.run_with_input(&["blog", "browse"], "r\nq\n")?;

    assert!(result.success(), "stderr: {}", result.stderr());
    let out = result.stdout();
    assert!(out.contains("Error: Failed to fetch blogs"));
    assert!(out.contains("  1. Post 1 [draft]"));
    Ok(())
}

#[test]
fn test_browse_requires_sign_in() -> Result<()> {
    let stub = StubServer::start()?;
    let world = TestWorld::new().with_api(stub.base_url());

    let result = world.run_with_input(&["blog", "browse"], "q\n")?;

    assert!(!result.success());
    assert!(result.stderr().contains("Not signed in"));
    Ok(())
}
