//! Both concrete providers against the same fixture corpus
//!
//! `tests/fixtures/models` holds `eng`, `fra` and `nested/deu` models plus a
//! misnamed file (`xx.bad.gz`) and a non-gzip one (`broken.yali.gz`).

use std::path::PathBuf;
use std::sync::Arc;
use yali_engine::{
    CorpusProvider, DirectoryProvider, EmbeddedProvider, Engine, Error, LoadOutcome, LoadReport,
};

#[derive(rust_embed::Embed)]
#[folder = "tests/fixtures/models/"]
struct FixtureModels;

fn fixture_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/models")
}

fn assert_fixture_report(report: &LoadReport) {
    assert_eq!(report.classes, vec!["deu", "eng", "fra"]);
    assert_eq!(report.outcomes.len(), 5);

    let skipped: Vec<_> = report
        .outcomes
        .iter()
        .filter(|o| matches!(o, LoadOutcome::Skipped { .. }))
        .map(|o| o.locator())
        .collect();
    assert_eq!(skipped.len(), 1);
    assert!(skipped[0].ends_with("xx.bad.gz"));

    let failed: Vec<_> = report
        .outcomes
        .iter()
        .filter_map(|o| match o {
            LoadOutcome::Failed { class, error, .. } => Some((class.as_str(), error)),
            _ => None,
        })
        .collect();
    assert_eq!(failed.len(), 1);
    assert!(matches!(failed[0], ("broken", Error::Decode(_))));
}

#[tokio::test]
async fn test_embedded_provider_lists_assets() {
    let provider = EmbeddedProvider::<FixtureModels>::new();
    let locators = provider.list_locators().await.unwrap();

    assert_eq!(
        locators,
        vec![
            "broken.yali.gz",
            "eng.yali.gz",
            "fra.yali.gz",
            "nested/deu.yali.gz",
            "xx.bad.gz",
        ]
    );
    assert!(matches!(
        provider.read_locator("missing.yali.gz").await,
        Err(Error::Io(_))
    ));
}

#[tokio::test]
async fn test_embedded_batch_skips_and_continues() {
    let engine = Engine::new(Arc::new(EmbeddedProvider::<FixtureModels>::new()));
    let report = engine.load_all().await.unwrap();

    assert_fixture_report(&report);
    assert_eq!(engine.classify("ein")[0].class, "deu");
}

#[tokio::test]
async fn test_directory_batch_skips_and_continues() {
    let engine = Engine::new(Arc::new(DirectoryProvider::new(fixture_dir())));
    let report = engine.load_all().await.unwrap();

    assert_fixture_report(&report);

    let ranking = engine.classify("abcabd");
    assert_eq!(ranking[0].class, "eng");
    assert_eq!(ranking.len(), 3);
}

#[tokio::test]
async fn test_providers_agree() {
    let embedded = Engine::new(Arc::new(EmbeddedProvider::<FixtureModels>::new()));
    let directory = Engine::new(Arc::new(DirectoryProvider::new(fixture_dir())));
    embedded.load_all().await.unwrap();
    directory.load_all().await.unwrap();

    for text in ["abcabd", "xyz xyz", "ein abc", ""] {
        assert_eq!(embedded.classify(text), directory.classify(text), "{:?}", text);
    }
}

#[tokio::test]
async fn test_directory_provider_with_tempdir() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::copy(
        fixture_dir().join("fra.yali.gz"),
        dir.path().join("fra.yali.gz"),
    )
    .unwrap();

    let engine = Engine::new(Arc::new(DirectoryProvider::new(dir.path())));
    let report = engine.load_all().await.unwrap();
    assert!(report.is_clean());
    assert_eq!(engine.loaded_classes(), vec!["fra"]);

    // explicit class id, independent of the file name
    let locator = dir.path().join("fra.yali.gz");
    engine.unload_one("fra");
    engine
        .load_one("french", &locator.to_string_lossy())
        .await
        .unwrap();
    assert_eq!(engine.loaded_classes(), vec!["french"]);
}
