//! List screen behavior against the in-memory backend, on a paused clock.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use folio_runtime::{ListController, ListOptions};
use folio_testing::{FakeAdmin, Op, fixtures};
use folio_types::{Blog, ListQuery, Portfolio};
use tokio::time::sleep;

fn start(fake: &Arc<FakeAdmin>) -> ListController<Blog> {
    ListController::start(fake.clone(), ListOptions::default())
}

#[tokio::test(start_paused = true)]
async fn test_initial_fetch_uses_page_one_and_page_size() -> Result<()> {
    let fake = Arc::new(FakeAdmin::new().with_records(fixtures::blogs(25)));
    let list = start(&fake);

    let snapshot = list.settled().await?;

    assert_eq!(snapshot.items.len(), 10);
    assert_eq!(snapshot.total_pages, 3);
    assert_eq!(snapshot.error, None);
    assert_eq!(fake.list_queries(), vec![ListQuery::new(1, 10, "")]);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_typing_burst_issues_one_fetch_after_quiet_period() -> Result<()> {
    let fake = Arc::new(FakeAdmin::new().with_records(fixtures::blogs(15)));
    let list = start(&fake);
    list.settled().await?;

    for text in ["P", "Po", "Post", "Post 1"] {
        list.search(text)?;
        sleep(Duration::from_millis(200)).await;
    }
    assert_eq!(fake.count(Op::List), 1);
    assert_eq!(list.snapshot().search, "Post 1");
    assert_eq!(list.snapshot().debounced_search, "");

    let snapshot = list
        .wait_for(|s| s.debounced_search == "Post 1" && !s.loading)
        .await?;
    sleep(Duration::from_secs(2)).await;

    assert_eq!(fake.count(Op::List), 2);
    assert_eq!(fake.list_queries()[1], ListQuery::new(1, 10, "Post 1"));
    // Post 1, Post 10..=15
    assert_eq!(snapshot.items.len(), 7);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_search_resets_page_before_next_fetch() -> Result<()> {
    let fake = Arc::new(FakeAdmin::new().with_records(fixtures::blogs(25)));
    let list = start(&fake);
    list.settled().await?;

    list.goto(3)?;
    list.wait_for(|s| s.page == 3 && !s.loading).await?;

    list.search("Post 2")?;
    let snapshot = list.wait_for(|s| s.search == "Post 2").await?;
    assert_eq!(snapshot.page, 1);

    list.wait_for(|s| s.debounced_search == "Post 2" && !s.loading)
        .await?;
    let queries = fake.list_queries();
    assert!(queries.iter().all(|q| q.search.is_empty() || q.page == 1));
    assert_eq!(queries.last(), Some(&ListQuery::new(1, 10, "Post 2")));
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_retyping_settled_term_does_not_refetch() -> Result<()> {
    let fake = Arc::new(FakeAdmin::new().with_records(fixtures::blogs(5)));
    let list = start(&fake);
    list.settled().await?;

    list.search("x")?;
    sleep(Duration::from_millis(100)).await;
    list.search("")?;
    sleep(Duration::from_secs(1)).await;

    assert_eq!(fake.count(Op::List), 1);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_paging_is_bounded() -> Result<()> {
    let fake = Arc::new(FakeAdmin::new().with_records(fixtures::blogs(20)));
    let list = start(&fake);
    let snapshot = list.settled().await?;
    assert!(!snapshot.has_previous());

    list.previous()?;
    list.goto(0)?;
    list.goto(5)?;
    sleep(Duration::from_millis(10)).await;
    assert_eq!(fake.count(Op::List), 1);

    list.next()?;
    let snapshot = list.wait_for(|s| s.page == 2 && !s.loading).await?;
    assert!(!snapshot.has_next());
    assert_eq!(snapshot.items[0].id, "b11");

    list.next()?;
    sleep(Duration::from_millis(10)).await;
    assert_eq!(fake.count(Op::List), 2);
    assert_eq!(list.snapshot().page, 2);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_fetch_failure_uses_server_message_or_fallback() -> Result<()> {
    let fake = Arc::new(FakeAdmin::new().with_records(fixtures::portfolios(3)));
    fake.fail_next(Op::List, None);
    let list: ListController<Portfolio> =
        ListController::start(fake.clone(), ListOptions::default());

    let snapshot = list.settled().await?;
    assert_eq!(snapshot.error.as_deref(), Some("Failed to fetch portfolios"));
    assert!(snapshot.items.is_empty());

    fake.fail_next(Op::List, Some("Database offline"));
    list.refresh()?;
    let snapshot = list
        .wait_for(|s| s.error.as_deref() == Some("Database offline"))
        .await?;
    assert!(snapshot.items.is_empty());

    list.refresh()?;
    let snapshot = list.wait_for(|s| s.error.is_none() && !s.loading).await?;
    assert_eq!(snapshot.items.len(), 3);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_stale_response_never_overwrites_newer() -> Result<()> {
    let fake = Arc::new(FakeAdmin::new().with_records(fixtures::blogs(15)));
    fake.delay_list(1, "", Duration::from_secs(3));
    let list = start(&fake);

    list.search("Post 1")?;
    let fresh = list
        .wait_for(|s| s.debounced_search == "Post 1" && !s.loading)
        .await?;
    assert_eq!(fresh.items.len(), 7);

    sleep(Duration::from_secs(5)).await;
    let snapshot = list.snapshot();
    assert_eq!(snapshot.items.len(), 7);
    assert!(snapshot.items.iter().all(|b| b.title.starts_with("Post 1")));
    assert_eq!(fake.count(Op::List), 2);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_confirmed_delete_removes_locally_without_refetch() -> Result<()> {
    let fake = Arc::new(FakeAdmin::new().with_records(fixtures::blogs(4)));
    let list = start(&fake);
    list.settled().await?;

    list.request_delete("b2")?;
    let snapshot = list.wait_for(|s| s.confirm.is_some()).await?;
    let dialog = snapshot.confirm.expect("dialog open");
    assert_eq!(dialog.title, "Delete Blog Post");
    assert_eq!(
        dialog.message,
        "Are you sure you want to delete \"Post 2\"? This action cannot be undone."
    );
    assert_eq!(snapshot.pending_delete.map(|p| p.id).as_deref(), Some("b2"));

    list.confirm_delete()?;
    let snapshot = list
        .wait_for(|s| s.confirm.is_none() && !s.deleting)
        .await?;

    let ids: Vec<&str> = snapshot.items.iter().map(|b| b.id.as_str()).collect();
    assert_eq!(ids, vec!["b1", "b3", "b4"]);
    assert!(snapshot.pending_delete.is_none());
    assert_eq!(fake.count(Op::Delete), 1);
    assert_eq!(fake.count(Op::List), 1);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_failed_delete_keeps_items_and_surfaces_error() -> Result<()> {
    let fake = Arc::new(FakeAdmin::new().with_records(fixtures::portfolios(3)));
    fake.fail_next(Op::Delete, None);
    let list: ListController<Portfolio> =
        ListController::start(fake.clone(), ListOptions::default());
    list.settled().await?;

    list.request_delete("p1")?;
    list.wait_for(|s| s.confirm.is_some()).await?;
    list.confirm_delete()?;
    let snapshot = list.wait_for(|s| s.error.is_some()).await?;

    assert_eq!(snapshot.error.as_deref(), Some("Failed to delete portfolio item"));
    assert_eq!(snapshot.items.len(), 3);
    assert!(snapshot.confirm.is_none());
    assert!(snapshot.pending_delete.is_none());
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_cancel_sends_nothing() -> Result<()> {
    let fake = Arc::new(FakeAdmin::new().with_records(fixtures::blogs(2)));
    let list = start(&fake);
    let before = list.settled().await?;

    list.request_delete("b1")?;
    list.wait_for(|s| s.confirm.is_some()).await?;
    list.cancel_delete()?;
    let after = list.wait_for(|s| s.confirm.is_none()).await?;

    assert_eq!(fake.count(Op::Delete), 0);
    assert_eq!(after.items.len(), before.items.len());
    assert!(after.pending_delete.is_none());
    assert_eq!(after.error, None);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_unknown_id_opens_no_dialog() -> Result<()> {
    let fake = Arc::new(FakeAdmin::new().with_records(fixtures::blogs(2)));
    let list = start(&fake);
    list.settled().await?;

    list.request_delete("missing")?;
    list.confirm_delete()?;
    sleep(Duration::from_millis(10)).await;

    assert!(list.snapshot().confirm.is_none());
    assert_eq!(fake.count(Op::Delete), 0);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_dispose_cancels_pending_search() -> Result<()> {
    let fake = Arc::new(FakeAdmin::new().with_records(fixtures::blogs(3)));
    let list = start(&fake);
    list.settled().await?;
    let mut updates = list.subscribe();

    list.search("Post")?;
    sleep(Duration::from_millis(50)).await;
    list.dispose();
    sleep(Duration::from_secs(2)).await;

    assert_eq!(fake.count(Op::List), 1);
    updates.borrow_and_update();
    assert!(updates.changed().await.is_err());
    Ok(())
}
