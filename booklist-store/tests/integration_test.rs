//! Integration tests for booklist-store

use booklist_store::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Note {
    id: String,
    text: String,
    topic: String,
}

impl Entity for Note {
    const COLLECTION: Collection = Collection::new("notes");
}

#[derive(Serialize)]
struct NewNote<'a> {
    text: &'a str,
    topic: &'a str,
}

/// The engine releases its directory lock in the background after the last
/// handle drops, so reopening may need a few attempts.
async fn reopen(url: &str) -> SharedStore {
    let mut last = None;
    for _ in 0..50 {
        match connect(url).await {
            Ok(store) => return store,
            Err(e) => last = Some(e),
        }
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
    }
    panic!("could not reopen {url}: {last:?}");
}

#[tokio::test]
async fn test_connect_file_store_persists() {
    let temp_dir = tempfile::tempdir().unwrap();
    let url = format!("file://{}", temp_dir.path().join("notes").display());

    let first = {
        let store = connect(&url).await.unwrap();
        assert_eq!(store.backend(), "surrealkv");
        Repository::<Note>::new(store)
            .insert(&NewNote {
                text: "hello",
                topic: "greetings",
            })
            .await
            .unwrap()
    };

    let notes = Repository::<Note>::new(reopen(&url).await);
    assert_eq!(notes.all().await.unwrap(), vec![first.clone()]);
    assert_eq!(
        notes.find(&Filter::eq("topic", "greetings")).await.unwrap(),
        vec![first]
    );
}

#[tokio::test]
async fn test_connect_rejects_path_that_is_a_file() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join("notes.json");
    std::fs::write(&path, "[]").unwrap();

    let err = connect(&format!("file://{}", path.display()))
        .await
        .err()
        .unwrap();
    assert!(matches!(err, StoreError::Database(_)));
    assert!(!err.is_config());
}

#[tokio::test]
async fn test_connect_rejects_unknown_scheme() {
    let err = connect("postgres://localhost/books").await.err().unwrap();
    assert!(err.is_config());
}

#[tokio::test]
async fn test_repeated_reads_are_stable() {
    let notes = Repository::<Note>::new(connect("memory://").await.unwrap());
    for text in ["a", "b"] {
        notes
            .insert(&NewNote {
                text,
                topic: "t",
            })
            .await
            .unwrap();
    }

    let first = notes.all().await.unwrap();
    let second = notes.all().await.unwrap();
    assert_eq!(first, second);
}
