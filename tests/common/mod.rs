#![allow(dead_code)]

use axum::{Router, routing::get};
use axum_test::TestServer;
use chrono::{Duration, Utc};
use serde_json::{Value, json};
use std::collections::BTreeMap;
use std::sync::Arc;
use link_hub::api::handlers::health_handler;
use link_hub::application::services::{IdAllocator, LinkService};
use link_hub::domain::entities::{Link, LinkStatus, LinkType};
use link_hub::domain::repositories::{CounterStore, LinkRepository};
use link_hub::infrastructure::counter::MemoryCounterStore;
use link_hub::infrastructure::persistence::MemoryLinkRepository;
use link_hub::state::AppState;

pub const DEFAULT_ACTOR: &str = "system_user";

/// In-memory stores behind the application state, kept for assertions.
pub struct TestContext {
    pub state: AppState,
    pub links: Arc<MemoryLinkRepository>,
    pub counter: Arc<MemoryCounterStore>,
}

pub fn create_test_context() -> TestContext {
    let links = Arc::new(MemoryLinkRepository::new());
    let counter = Arc::new(MemoryCounterStore::new());

    let allocator = IdAllocator::new(counter.clone() as Arc<dyn CounterStore>, "link_counter");
    let link_service = Arc::new(LinkService::new(
        links.clone() as Arc<dyn LinkRepository>,
        allocator,
    ));

    TestContext {
        state: AppState::new(link_service, DEFAULT_ACTOR),
        links,
        counter,
    }
}

/// State whose allocator has no counter store, so every id is random.
pub fn create_storeless_state() -> AppState {
    let links: Arc<dyn LinkRepository> = Arc::new(MemoryLinkRepository::new());
    let link_service = Arc::new(LinkService::new(links, IdAllocator::without_store()));
    AppState::new(link_service, DEFAULT_ACTOR)
}

pub fn test_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .nest("/api", link_hub::api::routes::routes())
        .with_state(state)
}

pub fn test_server(state: AppState) -> TestServer {
    TestServer::new(test_router(state)).unwrap()
}

pub fn captacao_request() -> Value {
    json!({
        "link_type": "captacao",
        "base_url": "https://x.com",
        "utm_source": "Instagram",
        "utm_medium": "Feed",
        "utm_campaign": "Camp A"
    })
}

pub fn vendas_request() -> Value {
    json!({
        "link_type": "vendas",
        "base_url": "https://metodovde.com.br",
        "path": "concursos/carreirasjuridicas",
        "utm_source": "WhatsApp",
        "utm_medium": "API Disparos",
        "utm_campaign": "VDE1F 90D Evento 0124",
        "utm_content": "Grupos Antigos",
        "utm_term": "aaa 12022026",
        "custom_params": { "coupon": "ABC" }
    })
}

/// A stored link as the repository would receive it.
pub fn sample_link(id: &str, source: &str, campaign: &str, age_secs: i64) -> Link {
    Link {
        id: id.to_string(),
        link_type: LinkType::Captacao,
        base_url: "https://x.com".to_string(),
        path: String::new(),
        full_url: format!(
            "https://x.com?utm_source={source}&utm_medium=feed&utm_campaign={campaign}&utm_id={id}"
        ),
        utm_source: source.to_string(),
        utm_medium: "feed".to_string(),
        utm_campaign: campaign.to_string(),
        utm_content: String::new(),
        utm_term: String::new(),
        src: None,
        sck: None,
        xcode: None,
        custom_params: BTreeMap::new(),
        notes: None,
        created_by: DEFAULT_ACTOR.to_string(),
        created_at: Utc::now() - Duration::seconds(age_secs),
        status: LinkStatus::Active,
    }
}
