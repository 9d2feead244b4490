//! Tests for catalog configuration and opening.

use std::io::Write;

use curator_core::MediumDraft;
use curator_database::{CatalogConfig, RandomOrdering, SqliteCatalog};
use curator_interface::{MediaFilter, MediaRepository, MediaSortField, Page, RandomSeed, SortOrder};

#[test]
fn test_config_defaults() {
    let config = CatalogConfig::default();
    assert_eq!(config.database_url(), ":memory:");
    assert_eq!(*config.random_ordering(), RandomOrdering::Synthetic);
    assert!(*config.run_migrations());
    assert_eq!(*config.synthetic_key_segments(), 8);
}

#[test]
fn test_config_builder_and_setters() {
    let config = CatalogConfig::builder()
        .database_url("catalog.db")
        .synthetic_key_segments(4usize)
        .build()
        .unwrap();
    assert_eq!(config.database_url(), "catalog.db");
    assert_eq!(*config.synthetic_key_segments(), 4);
    assert!(*config.run_migrations());

    let config = config.with_run_migrations(false);
    assert!(!*config.run_migrations());
}

#[test]
fn test_config_from_file_overrides_defaults() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(
        file,
        r#"
database_url = "media.db"
synthetic_key_segments = 3

[random_ordering]
strategy = "native"
function = "RAND"
"#
    )
    .unwrap();

    let config = CatalogConfig::from_file(file.path()).unwrap();
    assert_eq!(config.database_url(), "media.db");
    assert_eq!(*config.synthetic_key_segments(), 3);
    assert_eq!(
        *config.random_ordering(),
        RandomOrdering::Native {
            function: "RAND".to_string()
        }
    );
    assert!(*config.run_migrations());
}

#[test]
fn test_config_rejects_bad_values() {
    let bad_function = CatalogConfig::default().with_random_ordering(RandomOrdering::Native {
        function: "RAND(); DROP TABLE media".to_string(),
    });
    assert!(bad_function.validated().is_err());

    let no_segments = CatalogConfig::default().with_synthetic_key_segments(0usize);
    assert!(no_segments.validated().is_err());

    let no_url = CatalogConfig::default().with_database_url(String::new());
    assert!(no_url.validated().is_err());
}

#[test]
fn test_config_from_missing_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    assert!(CatalogConfig::from_file(dir.path().join("absent.toml")).is_err());
}

#[test]
fn test_file_catalog_persists_across_opens() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("catalog.db");
    let config = CatalogConfig::default().with_database_url(path.to_string_lossy().into_owned());

    let created = {
        let catalog = SqliteCatalog::open(&config).unwrap();
        catalog
            .create_medium(MediumDraft::default().with_mime("image/png"))
            .unwrap()
    };

    let reopened = SqliteCatalog::open(&config).unwrap();
    assert_eq!(reopened.get_medium(&created.id).unwrap(), Some(created));
}

#[test]
fn test_configured_segments_drive_random_order() {
    let config = CatalogConfig::default().with_synthetic_key_segments(2usize);
    let catalog = SqliteCatalog::open(&config).unwrap();
    for _ in 0..5 {
        catalog.create_medium(MediumDraft::default()).unwrap();
    }

    let sort = MediaSortField::Random(RandomSeed::from_token("AQID").unwrap());
    let media = catalog
        .search_media(&MediaFilter::default(), &sort, SortOrder::Asc, Page::all())
        .unwrap();
    assert_eq!(media.len(), 5);
}
