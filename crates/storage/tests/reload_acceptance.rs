use shared::settings::{roll_duration_choices, FAVORITES_KEY, ROLL_DURATION_KEY};
use storage::{PreferenceStore, Storage};

fn database_url(dir: &tempfile::TempDir) -> String {
    let path = dir.path().join("prefs.db");
    format!("sqlite://{}", path.to_string_lossy().replace('\\', "/"))
}

#[tokio::test]
async fn roll_duration_survives_reopen_for_every_slider_value() {
    let dir = tempfile::tempdir().expect("tempdir");
    let url = database_url(&dir);

    for duration in roll_duration_choices() {
        let store = PreferenceStore::new(Storage::new(&url).await.expect("open"));
        store.save(ROLL_DURATION_KEY, &duration).await;
        store.medium().pool().close().await;
        drop(store);

        let reopened = PreferenceStore::new(Storage::new(&url).await.expect("reopen"));
        let loaded: u32 = reopened.load(ROLL_DURATION_KEY, 0).await;
        assert_eq!(loaded, duration);
        reopened.medium().pool().close().await;
    }
}

#[tokio::test]
async fn malformed_favorites_row_loads_as_empty() {
    let dir = tempfile::tempdir().expect("tempdir");
    let url = database_url(&dir);

    let storage = Storage::new(&url).await.expect("open");
    storage
        .set_value(FAVORITES_KEY, "[\"unterminated")
        .await
        .expect("seed corrupt row");
    storage.pool().close().await;

    let store = PreferenceStore::new(Storage::new(&url).await.expect("reopen"));
    let favorites: Vec<String> = store.load(FAVORITES_KEY, Vec::new()).await;
    assert!(favorites.is_empty());
}

#[tokio::test]
async fn favorites_keep_order_across_reopen() {
    let dir = tempfile::tempdir().expect("tempdir");
    let url = database_url(&dir);

    let store = PreferenceStore::new(Storage::new(&url).await.expect("open"));
    store
        .save(FAVORITES_KEY, &["second thought", "first thought"])
        .await;
    store.medium().pool().close().await;

    let reopened = PreferenceStore::new(Storage::new(&url).await.expect("reopen"));
    let favorites: Vec<String> = reopened.load(FAVORITES_KEY, Vec::new()).await;
    assert_eq!(favorites, ["second thought", "first thought"]);
}
