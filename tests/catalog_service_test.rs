//! Integration tests for CatalogService against on-disk catalogs.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use rstest::{fixture, rstest};
use tempfile::TempDir;

use deskview::application::services::CatalogService;
use deskview::application::ApplicationError;
use deskview::domain::{
    count_nodes, present_broadcasts, present_tags, BroadcastStatus, DomainError, HexColor,
};
use deskview::infrastructure::traits::RealFileSystem;
use deskview::util::testing;

fn resource(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/resources/catalogs")
        .join(name)
}

#[fixture]
fn service() -> CatalogService {
    testing::init_test_setup();
    CatalogService::new(Arc::new(RealFileSystem))
}

#[rstest]
fn given_helpdesk_catalog_when_loading_then_builds_forest(service: CatalogService) {
    // Act
    let catalog = service.load(&resource("helpdesk.toml")).unwrap();

    // Assert
    let roots: Vec<_> = catalog.categories.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(roots, vec!["billing", "shipping", "legacy"]);
    let billing: Vec<_> = catalog.categories[0]
        .children
        .iter()
        .map(|n| n.id.as_str())
        .collect();
    assert_eq!(billing, vec!["invoices", "refunds"]);
    assert_eq!(count_nodes(&catalog.categories), 6);
    assert_eq!(catalog.tags.len(), 3);
    assert_eq!(catalog.broadcasts.len(), 3);
}

#[rstest]
fn given_helpdesk_catalog_when_presenting_tags_then_colors_resolved(service: CatalogService) {
    let catalog = service.load(&resource("helpdesk.toml")).unwrap();

    let rows = present_tags(&catalog.tags, None).unwrap();

    let resolved: Vec<_> = rows
        .iter()
        .map(|r| (r.name.as_str(), r.foreground, r.deletable))
        .collect();
    assert_eq!(
        resolved,
        vec![
            ("VIP", HexColor::BLACK, false),
            ("Churn risk", HexColor::WHITE, true),
            ("Neutral", HexColor::BLACK, true),
        ]
    );
}

#[rstest]
#[case(Some("vip"), &["VIP"])]
#[case(Some("  RISK "), &["Churn risk"])]
#[case(Some(""), &["VIP", "Churn risk", "Neutral"])]
#[case(Some("nothing"), &[])]
fn given_filter_when_presenting_tags_then_case_insensitive_match(
    service: CatalogService,
    #[case] filter: Option<&str>,
    #[case] expected: &[&str],
) {
    let catalog = service.load(&resource("helpdesk.toml")).unwrap();

    let rows = present_tags(&catalog.tags, filter).unwrap();

    let names: Vec<_> = rows.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, expected);
}

#[rstest]
fn given_helpdesk_catalog_when_presenting_broadcasts_then_status_dates(service: CatalogService) {
    let catalog = service.load(&resource("helpdesk.toml")).unwrap();

    let rows = present_broadcasts(&catalog.broadcasts, None, "%Y-%m-%d");

    let table: Vec<_> = rows
        .iter()
        .map(|r| (r.name.as_str(), r.channels.as_str(), r.date.as_str()))
        .collect();
    assert_eq!(
        table,
        vec![
            ("Spring promo", "email, sms", "2026-03-15"),
            ("Outage notice", "email", "2026-02-10"),
            ("Newsletter", "", "2026-04-01"),
        ]
    );

    let sent = present_broadcasts(&catalog.broadcasts, Some(BroadcastStatus::Sent), "%Y-%m-%d");
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].id, "b-outage");
}

#[rstest]
fn given_cyclic_catalog_when_loading_then_domain_error(service: CatalogService) {
    let err = service.load(&resource("cyclic.toml")).unwrap_err();

    assert!(matches!(
        err,
        ApplicationError::Domain(DomainError::CyclicOrSharedNode { .. })
    ));
}

#[rstest]
fn given_tag_with_bad_color_when_presenting_then_parse_error(service: CatalogService) {
    let catalog = service.load(&resource("bad_color.toml")).unwrap();

    let err = present_tags(&catalog.tags, None).unwrap_err();

    assert!(err.is_parse_error());
}

#[rstest]
fn given_unknown_broadcast_status_when_loading_then_invalid_catalog(service: CatalogService) {
    // Arrange
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("catalog.toml");
    fs::write(
        &path,
        r#"
[[broadcasts]]
id = "b1"
name = "Weird"
audience = "All"
status = "archived"
created_at = "2026-01-01T00:00:00Z"
"#,
    )
    .unwrap();

    // Act
    let err = service.load(&path).unwrap_err();

    // Assert
    match err {
        ApplicationError::InvalidCatalog { path: p, .. } => assert_eq!(p, path),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[rstest]
fn given_directory_instead_of_file_when_loading_then_not_found(service: CatalogService) {
    let temp = TempDir::new().unwrap();

    let err = service.load(temp.path()).unwrap_err();

    assert!(matches!(err, ApplicationError::CatalogNotFound(_)));
}
