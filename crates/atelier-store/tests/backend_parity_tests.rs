//! The access layer must behave identically over the real disk and the
//! in-memory tree. Every scenario here runs against both backends.

use std::collections::HashMap;
use std::sync::Arc;

use atelier_store::path;
use atelier_store::{DiskFs, FileContent, FileError, FileService, MemoryFs, StorageBackend};

const PNG_BYTES: &[u8] = &[0x89, 0x50, 0x4e, 0x47, 0x0d, 0x0a, 0x1a, 0x0a];

/// A root to run a scenario under: `""` for the in-memory tree, the
/// temp directory for the disk.
struct Scenario {
    service: FileService,
    prefix: String,
    // Keeps the temp directory alive for the disk case.
    _tempdir: Option<tempfile::TempDir>,
}

impl Scenario {
    fn memory() -> Self {
        Self {
            service: FileService::new(Arc::new(MemoryFs::new()) as Arc<dyn StorageBackend>),
            prefix: String::new(),
            _tempdir: None,
        }
    }

    fn disk() -> Self {
        let tempdir = tempfile::tempdir().unwrap();
        Self {
            service: FileService::new(Arc::new(DiskFs::new()) as Arc<dyn StorageBackend>),
            prefix: tempdir.path().to_string_lossy().into_owned(),
            _tempdir: Some(tempdir),
        }
    }

    fn both() -> Vec<Self> {
        vec![Self::memory(), Self::disk()]
    }

    fn at(&self, relative: &str) -> String {
        path::join(&self.prefix, relative)
    }
}

#[tokio::test]
async fn write_then_read_returns_text_unchanged() {
    for scenario in Scenario::both() {
        let file = scenario.at("folder/notes.md");
        scenario.service.write(&file, "Hello\nWorld!").await.unwrap();

        let contents = scenario.service.read(&file).await.unwrap();
        assert_eq!(contents, FileContent::Text("Hello\nWorld!".into()));
    }
}

#[tokio::test]
async fn write_then_read_returns_binary_unchanged() {
    for scenario in Scenario::both() {
        let file = scenario.at("folder/image.png");
        scenario.service.write(&file, PNG_BYTES.to_vec()).await.unwrap();

        let contents = scenario.service.read(&file).await.unwrap();
        assert_eq!(contents, FileContent::Binary(PNG_BYTES.to_vec()));
    }
}

#[tokio::test]
async fn write_creates_both_missing_intermediate_directories() {
    for scenario in Scenario::both() {
        let file = scenario.at("folder3/folder1/my-file2.txt");
        scenario
            .service
            .write(&file, "Hello\nOther World!")
            .await
            .unwrap();

        let contents = scenario.service.read(&file).await.unwrap();
        assert_eq!(contents, FileContent::Text("Hello\nOther World!".into()));
    }
}

#[tokio::test]
async fn rewriting_an_existing_file_succeeds_silently() {
    for scenario in Scenario::both() {
        let file = scenario.at("file.txt");
        scenario.service.write(&file, "first").await.unwrap();
        scenario.service.write(&file, "second").await.unwrap();

        let contents = scenario.service.read(&file).await.unwrap();
        assert_eq!(contents, FileContent::Text("second".into()));
    }
}

#[tokio::test]
async fn writing_under_a_file_ancestor_never_replaces_it() {
    for scenario in Scenario::both() {
        let blocker = scenario.at("blocker.txt");
        scenario.service.write(&blocker, "in the way").await.unwrap();

        let nested = scenario.at("blocker.txt/nested.txt");
        let err = scenario.service.write(&nested, "data").await.unwrap_err();
        assert!(matches!(err, FileError::DirectoryCreation { .. }));

        let contents = scenario.service.read(&blocker).await.unwrap();
        assert_eq!(contents, FileContent::Text("in the way".into()));
    }
}

#[tokio::test]
async fn read_directory_returns_direct_file_children_only() {
    for scenario in Scenario::both() {
        scenario
            .service
            .write(&scenario.at("folder1/my-file1.txt"), "Hello\nWorld!")
            .await
            .unwrap();
        scenario
            .service
            .write(&scenario.at("folder1/folder1-1/my-file1-1.txt"), "Hello\nWorld!")
            .await
            .unwrap();

        let map = scenario
            .service
            .read_directory(&scenario.at("folder1"))
            .await
            .unwrap();
        assert_eq!(map.len(), 1);
        assert_eq!(
            map[&scenario.at("folder1/my-file1.txt")],
            FileContent::Text("Hello\nWorld!".into())
        );
    }
}

#[tokio::test]
async fn read_directory_of_a_missing_directory_fails() {
    for scenario in Scenario::both() {
        let err = scenario
            .service
            .read_directory(&scenario.at("no-such-folder"))
            .await
            .unwrap_err();
        assert!(matches!(err, FileError::DirectoryNotFound(_)));
    }
}

#[tokio::test]
async fn exists_is_false_for_a_valid_missing_path() {
    for scenario in Scenario::both() {
        let exists = scenario.service.exists(&scenario.at("ghost.txt")).await.unwrap();
        assert!(!exists);
    }
}

#[tokio::test]
async fn invalid_syntax_is_rejected_before_any_backend_call() {
    for scenario in Scenario::both() {
        let overlong_segment = format!("{}.txt", "a".repeat(256));

        for path in [
            "fol:der/file.txt".to_string(),
            "star*name.txt".to_string(),
            overlong_segment,
        ] {
            assert!(matches!(
                scenario.service.read(&path).await.unwrap_err(),
                FileError::InvalidPath(_)
            ));
            assert!(matches!(
                scenario.service.write(&path, "data").await.unwrap_err(),
                FileError::InvalidPath(_)
            ));
            assert!(matches!(
                scenario.service.exists(&path).await.unwrap_err(),
                FileError::InvalidPath(_)
            ));
        }
    }
}

#[tokio::test]
async fn seeded_tree_matches_the_disk_it_stands_in_for() {
    // The same state reached by seeding on one side and writing on the
    // other reads back identically through the service.
    let seeded = MemoryFs::with_seed(HashMap::from([
        (
            "folder1/my-file1.txt".to_string(),
            atelier_store::Node::text("Hello\nWorld!"),
        ),
        (
            "folder1/folder1-1/my-file1-1.txt".to_string(),
            atelier_store::Node::text("Hello\nWorld!"),
        ),
    ]))
    .await;
    let service = FileService::new(Arc::new(seeded) as Arc<dyn StorageBackend>);

    let map = service.read_directory("folder1").await.unwrap();
    assert_eq!(map.len(), 1);
    assert_eq!(
        map["folder1/my-file1.txt"],
        FileContent::Text("Hello\nWorld!".into())
    );
}

#[cfg(unix)]
#[tokio::test]
async fn write_through_a_symlinked_parent_directory_succeeds() {
    let scenario = Scenario::disk();
    scenario
        .service
        .write(&scenario.at("real/anchor.txt"), "anchor")
        .await
        .unwrap();
    tokio::fs::symlink(
        std::path::Path::new(&scenario.at("real")),
        std::path::Path::new(&scenario.at("linked")),
    )
    .await
    .unwrap();

    // The ancestor probe treats the symlink as an existing directory, so
    // the write goes through without attempting to create anything.
    scenario
        .service
        .write(&scenario.at("linked/file.txt"), "through the link")
        .await
        .unwrap();

    let contents = scenario.service.read(&scenario.at("real/file.txt")).await.unwrap();
    assert_eq!(contents, FileContent::Text("through the link".into()));
}
