mod common;

use sqlx::PgPool;
use std::collections::BTreeMap;
use std::sync::Arc;
use link_hub::domain::entities::LinkType;
use link_hub::domain::repositories::{LinkFilter, LinkRepository};
use link_hub::error::AppError;
use link_hub::infrastructure::persistence::PgLinkRepository;

async fn audit_actions(pool: &PgPool, link_id: &str) -> Vec<(String, String)> {
    sqlx::query_as("SELECT action, actor FROM link_audits WHERE link_id = $1 ORDER BY id")
        .bind(link_id)
        .fetch_all(pool)
        .await
        .unwrap()
}

#[sqlx::test]
async fn test_create_and_find_link(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool.clone()));

    let mut link = common::sample_link("lnk_000001", "email", "camp_a", 0);
    link.link_type = LinkType::Vendas;
    link.xcode = Some("lnk_000001".into());
    link.custom_params = BTreeMap::from([("coupon".to_string(), "ABC".to_string())]);

    repo.create(link.clone()).await.unwrap();

    let found = repo.find_by_id("lnk_000001").await.unwrap().unwrap();
    assert_eq!(found.link_type, LinkType::Vendas);
    assert_eq!(found.full_url, link.full_url);
    assert_eq!(found.xcode.as_deref(), Some("lnk_000001"));
    assert_eq!(found.custom_params, link.custom_params);
    assert_eq!(found.created_by, "system_user");

    assert_eq!(
        audit_actions(&pool, "lnk_000001").await,
        vec![("create".to_string(), "system_user".to_string())]
    );
}

#[sqlx::test]
async fn test_find_missing_link(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));

    assert!(repo.find_by_id("lnk_404404").await.unwrap().is_none());
}

#[sqlx::test]
async fn test_create_duplicate_id_is_conflict(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool.clone()));

    repo.create(common::sample_link("lnk_abc123", "email", "camp_a", 0))
        .await
        .unwrap();
    let result = repo
        .create(common::sample_link("lnk_abc123", "instagram", "camp_b", 0))
        .await;

    assert!(matches!(result, Err(AppError::Conflict { .. })));
    // Only the first insert is audited
    assert_eq!(audit_actions(&pool, "lnk_abc123").await.len(), 1);
}

#[sqlx::test]
async fn test_list_filters_and_orders(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));

    repo.create(common::sample_link("lnk_000001", "email", "camp_a", 30))
        .await
        .unwrap();
    repo.create(common::sample_link("lnk_000002", "instagram", "camp_a", 20))
        .await
        .unwrap();
    repo.create(common::sample_link("lnk_000003", "email", "camp_b", 10))
        .await
        .unwrap();

    let all = repo.list(LinkFilter::default()).await.unwrap();
    let ids: Vec<_> = all.iter().map(|l| l.id.as_str()).collect();
    assert_eq!(ids, ["lnk_000003", "lnk_000002", "lnk_000001"]);

    let email = repo
        .list(LinkFilter {
            utm_source: Some("email".into()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(email.len(), 2);

    let camp_a_email = repo
        .list(LinkFilter {
            utm_source: Some("email".into()),
            utm_campaign: Some("camp_a".into()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(camp_a_email.len(), 1);
    assert_eq!(camp_a_email[0].id, "lnk_000001");

    let vendas = repo
        .list(LinkFilter {
            link_type: Some(LinkType::Vendas),
            ..Default::default()
        })
        .await
        .unwrap();
    assert!(vendas.is_empty());

    let limited = repo
        .list(LinkFilter {
            limit: Some(1),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(limited.len(), 1);
}

#[sqlx::test]
async fn test_delete_link_is_audited(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool.clone()));

    repo.create(common::sample_link("lnk_000001", "email", "camp_a", 0))
        .await
        .unwrap();

    assert!(repo.delete("lnk_000001", "ana").await.unwrap());
    assert!(!repo.delete("lnk_000001", "ana").await.unwrap());
    assert!(repo.find_by_id("lnk_000001").await.unwrap().is_none());

    assert_eq!(
        audit_actions(&pool, "lnk_000001").await,
        vec![
            ("create".to_string(), "system_user".to_string()),
            ("delete".to_string(), "ana".to_string()),
        ]
    );
}

#[sqlx::test]
async fn test_health_check(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));
    assert!(repo.health_check().await);
}
