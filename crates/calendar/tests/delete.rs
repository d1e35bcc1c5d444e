use temp_dir::TempDir;
use weekplan_calendar::Day;
use weekplan_shared::Error;

mod helpers;

#[tokio::test]
async fn test_delete() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    let standup = helpers::create_event(&state, "Standup", Day::Monday).await?;
    let retro = helpers::create_event(&state, "Retro", Day::Friday).await?;

    state.command.delete(&standup.id).await?;

    assert!(state.query.find(&standup.id).await?.is_none());
    assert_eq!(state.query.all().await?, vec![retro]);

    let err = state.command.delete(&standup.id).await.unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));

    Ok(())
}

#[tokio::test]
async fn test_concurrent_deletes_succeed_once() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    let event = helpers::create_event(&state, "Standup", Day::Monday).await?;

    let results = futures::future::join_all(
        (0..4).map(|_| state.command.delete(event.id.to_owned())),
    )
    .await;

    assert_eq!(results.iter().filter(|res| res.is_ok()).count(), 1);
    assert!(
        results
            .iter()
            .filter_map(|res| res.as_ref().err())
            .all(|err| matches!(err, Error::NotFound(_)))
    );

    Ok(())
}
