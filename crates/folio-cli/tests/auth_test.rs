//! Token storage and the sign-in gate.

use anyhow::Result;
use folio_testing::{StubServer, TestWorld};
use predicates::prelude::*;

#[test]
fn test_login_status_logout() -> Result<()> {
    let stub = StubServer::start()?;
    let world = TestWorld::new().with_api(stub.base_url());

    let status = world.run_json(&["status"])?;
    assert!(status.success(), "stderr: {}", status.stderr());
    assert_eq!(status.json()?["signedIn"], false);

    let login = world.run(&["login", "--token", stub.token()])?;
    assert!(login.success(), "stderr: {}", login.stderr());
    assert!(login.stdout().starts_with("Signed in."));
    assert_eq!(std::fs::read_to_string(world.token_file())?.trim(), stub.token());

    let status = world.run_json(&["status"])?;
    let json = status.json()?;
    assert_eq!(json["signedIn"], true);
    assert_eq!(json["apiUrl"], stub.base_url());

    let logout = world.run(&["logout"])?;
    insta::assert_snapshot!(logout.stdout().trim(), @"Signed out.");
    assert!(!world.token_file().exists());

    let again = world.run(&["logout"])?;
    insta::assert_snapshot!(again.stdout().trim(), @"Already signed out.");
    Ok(())
}

#[test]
fn test_blank_token_is_rejected() -> Result<()> {
    let world = TestWorld::new();

    let result = world.run(&["login", "--token", "   "])?;

    assert!(!result.success());
    assert!(predicate::str::contains("Error: Token must not be empty").eval(result.stderr()));
    assert!(!world.token_file().exists());
    Ok(())
}

#[test]
fn test_admin_commands_require_sign_in() -> Result<()> {
    let stub = StubServer::start()?;
    let world = TestWorld::new().with_api(stub.base_url());

    for args in [
        &["blog", "list"][..],
        &["portfolio", "show", "p1"],
        &["blog", "create", "--title", "Draft"],
        &["blog", "generate", "--context", "rust"],
    ] {
        let result = world.run(args)?;
        assert!(!result.success(), "{:?} should fail", args);
        assert!(
            result.stderr().contains("Not signed in"),
            "{:?} stderr: {}",
            args,
            result.stderr()
        );
    }
    assert!(stub.requests().is_empty());
    Ok(())
}

#[test]
fn test_api_url_flag_wins_over_env() -> Result<()> {
    let world = TestWorld::new().with_api("http://from-env.test/api");

    let from_env = world.run_json(&["status"])?;
    assert_eq!(from_env.json()?["apiUrl"], "http://from-env.test/api");

    let from_flag = world.run_json(&["status", "--api-url", "http://from-flag.test/api"])?;
    assert_eq!(from_flag.json()?["apiUrl"], "http://from-flag.test/api");
    Ok(())
}

#[test]
fn test_config_file_sets_api_url() -> Result<()> {
    let world = TestWorld::new();
    std::fs::write(
        world.data_dir().join("config.toml"),
        "[api]\nbase_url = \"http://from-config.test/api\"\n",
    )?;

    let result = world.run(&["status"])?;

    assert!(result.success(), "stderr: {}", result.stderr());
    assert!(result.stdout().contains("API:       http://from-config.test/api"));
    assert!(!result.stdout().contains("(defaults)"));
    Ok(())
}

#[test]
fn test_route_resolves_through_sign_in_gate() -> Result<()> {
    let world = TestWorld::new();

    let signed_out = world.run(&["route", "/blogs/edit/42"])?;
    assert!(signed_out.success(), "stderr: {}", signed_out.stderr());
    insta::assert_snapshot!(signed_out.stdout().trim(), @"/blogs/edit/42 -> /signin (sign-in required)");

    world.login("any-token")?;
    let json = world.run_json(&["route", "/portfolios/create/"])?.json()?;
    assert_eq!(json["route"], "/portfolios/create");
    assert_eq!(json["found"], true);
    assert_eq!(json["requiresAuth"], true);

    let signin = world.run(&["route", "/signin"])?;
    insta::assert_snapshot!(signin.stdout().trim(), @"/signin -> /signin");

    let unknown = world.run(&["route", "/portfolios/generate"])?;
    insta::assert_snapshot!(unknown.stdout().trim(), @"/portfolios/generate -> not found");
    Ok(())
}
