use std::time::Duration;

use tetrio_api_client::Context;
use tetrio_api_client::history::HistoryClient;
use tetrio_api_client::rest::TetrioRestClientBuilder;

fn live_tests_enabled() -> bool {
    std::env::var("TETRIO_LIVE_TESTS").ok().as_deref() == Some("1")
}

#[tokio::test]
#[ignore]
async fn live_rest_smoke() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenv::dotenv();
    if !live_tests_enabled() {
        return Ok(());
    }

    let client = TetrioRestClientBuilder::from_env().build();
    let ctx = Context::with_timeout(Duration::from_secs(120));

    let user = client.get_user(&ctx, "osk").await?;
    assert_eq!(user.username, "osk");

    let snapshot = client.get_leaderboard(&ctx).await?;
    assert!(!snapshot.is_empty());
    assert_eq!(snapshot.users[0].league.standing, 1);

    let bands = snapshot.cutoffs()?;
    assert_eq!(bands.len(), 17);

    Ok(())
}

#[tokio::test]
#[ignore]
async fn live_history_smoke() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenv::dotenv();
    if !live_tests_enabled() {
        return Ok(());
    }

    let rest = TetrioRestClientBuilder::from_env().build();
    let ctx = Context::with_timeout(Duration::from_secs(60));
    let user = rest.get_user(&ctx, "osk").await?;

    let history = HistoryClient::from_rest(&rest);
    match history.all_records(&ctx, &user.id).await {
        Ok(records) => assert!(records.iter().all(|r| r.user_id == user.id)),
        Err(tetrio_api_client::TetrioError::HistoryNotFound(_)) => {}
        Err(err) => return Err(err.into()),
    }

    Ok(())
}
