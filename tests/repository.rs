mod common;

use common::FlakyStore;
use prompt_recall::{
    BackendError, JsonFileStore, MemoryStore, NewPrompt, PromptPatch, PromptStore, SortMode,
    StoreError,
};
use std::collections::HashSet;

fn store() -> PromptStore<MemoryStore> {
    PromptStore::new(MemoryStore::new())
}

#[tokio::test]
async fn create_assigns_id_and_defaults() -> Result<(), StoreError> {
    let store = store();
    let p = store
        .create(NewPrompt::new("Summarize {{topic}}").tags(["work"]))
        .await?;

    assert!(p.id.starts_with("prompt_"));
    assert_eq!(p.title, "Summarize {{topic}}");
    assert_eq!(p.tags, vec!["work".to_string()]);
    assert_eq!(p.use_count, 0);
    assert_eq!(p.last_used, None);
    assert!(!p.pinned);
    assert!(p.created_at > 0);

    let all = store.try_all().await?;
    assert_eq!(all, vec![p]);
    Ok(())
}

#[tokio::test]
async fn create_truncates_long_content_into_title() -> Result<(), StoreError> {
    let store = store();
    let content = "a".repeat(80);
    let p = store.create(NewPrompt::new(content.clone()).title("   ")).await?;
    assert_eq!(p.title, format!("{}...", "a".repeat(50)));
    assert_eq!(p.content, content);
    Ok(())
}

#[tokio::test]
async fn create_rejects_blank_content() {
    let store = store();
    let err = store.create(NewPrompt::new("  \n ")).await.unwrap_err();
    assert!(matches!(err, StoreError::Validation(_)));
    assert!(store.all().await.is_empty());
}

#[tokio::test]
async fn update_merges_only_patched_fields() -> Result<(), StoreError> {
    let store = store();
    let p = store
        .create(NewPrompt::new("body").title("Title").tags(["x"]))
        .await?;

    let updated = store
        .update(
            &p.id,
            &PromptPatch {
                pinned: Some(true),
                ..PromptPatch::default()
            },
        )
        .await?;
    assert!(updated.pinned);
    assert_eq!(updated.title, "Title");
    assert_eq!(updated.content, "body");
    assert_eq!(updated.tags, vec!["x".to_string()]);
    assert_eq!(updated.created_at, p.created_at);
    assert_eq!(store.get(&p.id).await?, updated);
    Ok(())
}

#[tokio::test]
async fn update_unknown_id_is_not_found() {
    let store = store();
    let err = store
        .update("missing", &PromptPatch::default())
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::NotFound(id) if id == "missing"));
}

#[tokio::test]
async fn update_rejects_blank_content() -> Result<(), StoreError> {
    let store = store();
    let p = store.create(NewPrompt::new("body")).await?;
    let patch = PromptPatch {
        content: Some(" ".to_string()),
        ..PromptPatch::default()
    };
    assert!(matches!(
        store.update(&p.id, &patch).await,
        Err(StoreError::Validation(_))
    ));
    assert_eq!(store.get(&p.id).await?.content, "body");
    Ok(())
}

#[tokio::test]
async fn deleting_missing_id_reports_false_and_changes_nothing() -> Result<(), StoreError> {
    let store = store();
    store.create(NewPrompt::new("one")).await?;
    store.create(NewPrompt::new("two")).await?;
    let before = store.try_all().await?;

    assert!(!store.delete("prompt_0_nothing").await?);
    assert_eq!(store.try_all().await?, before);
    Ok(())
}

#[tokio::test]
async fn delete_removes_only_that_prompt() -> Result<(), StoreError> {
    let store = store();
    let a = store.create(NewPrompt::new("one")).await?;
    let b = store.create(NewPrompt::new("two")).await?;

    assert!(store.delete(&a.id).await?);
    assert_eq!(store.try_all().await?, vec![b]);
    Ok(())
}

#[tokio::test]
async fn mark_used_bumps_count_and_timestamp() -> Result<(), StoreError> {
    let store = store();
    let p = store.create(NewPrompt::new("body")).await?;

    let once = store.mark_used(&p.id).await?;
    let twice = store.mark_used(&p.id).await?;
    assert_eq!(once.use_count, 1);
    assert_eq!(twice.use_count, 2);
    let last_used = twice.last_used.expect("last_used set");
    assert!(last_used >= p.created_at);
    assert!(last_used >= once.last_used.unwrap_or_default());
    assert_eq!(twice.content, p.content);

    assert!(matches!(
        store.mark_used("missing").await,
        Err(StoreError::NotFound(_))
    ));
    Ok(())
}

#[tokio::test]
async fn clear_all_empties_the_set() -> Result<(), StoreError> {
    let store = store();
    store.create(NewPrompt::new("one")).await?;
    store.clear_all().await?;
    assert!(store.try_all().await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn export_then_replace_import_keeps_data_with_fresh_ids() -> Result<(), StoreError> {
    let store = store();
    let a = store
        .create(NewPrompt::new("Hello {{name}}").title("Greet").tags(["t1", "t1"]))
        .await?;
    let b = store.create(NewPrompt::new("Second")).await?;
    store.mark_used(&b.id).await?;
    let originals = store.try_all().await?;

    let json = store.export().await?;
    assert!(json.starts_with("[\n  {"));

    let count = store.import(&json, false).await?;
    assert_eq!(count, 2);

    let imported = store.try_all().await?;
    assert_eq!(imported.len(), originals.len());
    for (old, new) in originals.iter().zip(&imported) {
        assert_ne!(old.id, new.id);
        assert_eq!(old.title, new.title);
        assert_eq!(old.content, new.content);
        assert_eq!(old.tags, new.tags);
        assert_eq!(old.created_at, new.created_at);
        assert_eq!(old.last_used, new.last_used);
        assert_eq!(old.use_count, new.use_count);
    }
    let ids: HashSet<_> = imported.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids.len(), 2);
    assert!(!ids.contains(a.id.as_str()));
    Ok(())
}

#[tokio::test]
async fn merge_import_appends_minimal_records() -> Result<(), StoreError> {
    let store = store();
    let existing = store.create(NewPrompt::new("kept")).await?;

    let payload = r#"[
        {"id": "foreign", "title": "From elsewhere", "content": "Imported body"},
        {"content": "No title here"}
    ]"#;
    let total = store.import(payload, true).await?;
    assert_eq!(total, 3);

    let all = store.try_all().await?;
    assert_eq!(all[0], existing);
    assert_eq!(all[1].title, "From elsewhere");
    assert_ne!(all[1].id, "foreign");
    assert!(all[1].tags.is_empty());
    assert_eq!(all[2].title, "No title here");
    assert_eq!(all[2].use_count, 0);
    Ok(())
}

#[tokio::test]
async fn import_rejects_non_arrays_and_unusable_items() -> Result<(), StoreError> {
    let store = store();
    store.create(NewPrompt::new("kept")).await?;

    for payload in [r#"{"prompts": []}"#, "not json", r#"[{"title": "no content"}]"#, "[1, 2]"] {
        let err = store.import(payload, false).await.unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)), "payload {payload}");
    }
    assert_eq!(store.try_all().await?.len(), 1);
    Ok(())
}

#[tokio::test]
async fn search_filters_in_stored_order() -> Result<(), StoreError> {
    let store = store();
    store
        .create(NewPrompt::new("Write a haiku").title("Poem").tags(["Creative"]))
        .await?;
    store.create(NewPrompt::new("Fix this bug").title("Debug")).await?;
    store
        .create(NewPrompt::new("Another poem please").title("Verse"))
        .await?;

    let hits = store.search("POEM").await;
    let titles: Vec<_> = hits.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, ["Poem", "Verse"]);

    assert_eq!(store.search("creative").await.len(), 1);
    assert_eq!(store.search("").await.len(), 3);
    Ok(())
}

#[tokio::test]
async fn view_uses_the_pipeline() -> Result<(), StoreError> {
    let store = store();
    let a = store.create(NewPrompt::new("first")).await?;
    store.create(NewPrompt::new("second")).await?;
    store.mark_used(&a.id).await?;

    let view = store.view("", SortMode::MostUsed).await;
    assert_eq!(view[0].id, a.id);
    Ok(())
}

#[tokio::test]
async fn read_failures_degrade_to_empty_for_display_only() -> Result<(), StoreError> {
    let store = PromptStore::new(FlakyStore::default());
    store.create(NewPrompt::new("body")).await?;

    store.records().fail_reads(true);
    assert!(store.all().await.is_empty());
    assert!(store.search("body").await.is_empty());
    assert!(matches!(store.try_all().await, Err(StoreError::Backend(_))));

    let err = store.create(NewPrompt::new("another")).await.unwrap_err();
    assert!(err.is_backend());
    Ok(())
}

#[tokio::test]
async fn write_failures_propagate_and_leave_data_alone() -> Result<(), StoreError> {
    let store = PromptStore::new(FlakyStore::default());
    let p = store.create(NewPrompt::new("body")).await?;

    store.records().fail_writes(true);
    assert!(store.delete(&p.id).await.unwrap_err().is_backend());
    assert!(store.mark_used(&p.id).await.unwrap_err().is_backend());
    assert!(store.clear_all().await.unwrap_err().is_backend());

    store.records().fail_writes(false);
    assert_eq!(store.try_all().await?, vec![p]);
    Ok(())
}

#[tokio::test]
async fn quota_is_enforced() -> Result<(), StoreError> {
    let store = PromptStore::new(MemoryStore::with_quota(400));
    store.create(NewPrompt::new("small")).await?;

    let err = store.create(NewPrompt::new("x".repeat(500))).await.unwrap_err();
    assert!(matches!(
        err,
        StoreError::Backend(BackendError::QuotaExceeded { quota: 400, .. })
    ));
    assert_eq!(store.try_all().await?.len(), 1);

    let info = store.storage_info().await?;
    assert_eq!(info.bytes_quota, 400);
    assert!(info.bytes_used > 0 && info.bytes_used <= 400);
    Ok(())
}

#[tokio::test]
async fn json_file_store_persists_across_instances() -> Result<(), StoreError> {
    let dir = tempfile::tempdir().map_err(BackendError::from)?;
    let path = dir.path().join("prompts.json");

    let first = PromptStore::new(JsonFileStore::new(&path, 10_000));
    let p = first.create(NewPrompt::new("Persist me").tags(["disk"])).await?;
    first.mark_used(&p.id).await?;

    let second = PromptStore::new(JsonFileStore::new(&path, 10_000));
    let loaded = second.get(&p.id).await?;
    assert_eq!(loaded.content, "Persist me");
    assert_eq!(loaded.use_count, 1);

    let raw = std::fs::read_to_string(&path).map_err(BackendError::from)?;
    assert!(raw.contains("\"useCount\":1"));
    Ok(())
}
