//! End-to-end API tests.
//!
//! Each test serves the real router on an ephemeral port and drives it over
//! HTTP. The database pool points at a closed local port so the health
//! document exercises the unhealthy path deterministically without a
//! running Postgres.

use std::net::SocketAddr;

use colada::config::AppConfig;
use colada::db;
use colada::routes::create_router;
use colada::state::AppState;

/// Start the service with the given config and return its address.
async fn spawn_server(config: AppConfig) -> SocketAddr {
    let pool = db::connect(&config.database).expect("pool");
    let state = AppState::new(config, pool);
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve");
    });
    addr
}

/// Config pointing the pool at a closed port: connection attempts fail fast,
/// and the acquire timeout is shorter than the check deadline so the probe
/// fails rather than timing out.
fn unreachable_db_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.database.url = "postgres://127.0.0.1:9/colada".to_string();
    config.database.acquire_timeout_ms = 200;
    config.database.health_timeout_ms = 2000;
    config
}

#[tokio::test]
async fn hello_returns_the_greeting() {
    let addr = spawn_server(unreachable_db_config()).await;

    let body = reqwest::get(format!("http://{addr}/hello"))
        .await
        .expect("request")
        .text()
        .await
        .expect("body");

    assert_eq!(body, "Hello World!");
}

#[tokio::test]
async fn health_is_200_with_database_down() {
    let addr = spawn_server(unreachable_db_config()).await;

    let response = reqwest::get(format!("http://{addr}/health"))
        .await
        .expect("request");
    assert_eq!(response.status(), 200);
    assert_eq!(
        response
            .headers()
            .get("cache-control")
            .and_then(|v| v.to_str().ok()),
        Some("no-store")
    );

    let body: serde_json::Value = response.json().await.expect("json body");
    assert_eq!(body["status"], "ok");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    assert_eq!(body["gitCommit"], "N/A");
    assert!(body["uptime"].as_f64().expect("uptime number") >= 0.0);
    assert!(
        body["timestamp"]
            .as_str()
            .expect("timestamp string")
            .ends_with('Z'),
        "timestamp should be UTC: {}",
        body["timestamp"]
    );

    let database = &body["components"]["database"];
    assert_eq!(database["status"], "down");
    assert!(
        !database["error"].as_str().expect("error string").is_empty(),
        "a down component must carry an error"
    );
    let latency = database["responseTimeMs"].as_u64().expect("latency int");
    assert!(latency <= 2000, "latency bounded by the deadline: {latency}");
}

#[tokio::test]
async fn health_reports_timeout_when_the_probe_hangs() {
    // A listener that never accepts: the TCP connect lands in the backlog
    // and the Postgres handshake never gets a reply, so the ping hangs and
    // the check deadline fires first.
    let blackhole = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("blackhole listener");
    let db_addr = blackhole.local_addr().expect("blackhole addr");

    let mut config = AppConfig::default();
    config.database.url = format!("postgres://{db_addr}/colada");
    config.database.acquire_timeout_ms = 60_000;
    config.database.health_timeout_ms = 300;
    let addr = spawn_server(config).await;

    let body: serde_json::Value = reqwest::get(format!("http://{addr}/health"))
        .await
        .expect("request")
        .json()
        .await
        .expect("json body");

    let database = &body["components"]["database"];
    assert_eq!(database["status"], "down");
    assert_eq!(database["error"], "Database timeout");
    assert!(database["responseTimeMs"].as_u64().expect("latency int") >= 300);
}

#[tokio::test]
async fn default_brand_is_coca_cola() {
    let addr = spawn_server(unreachable_db_config()).await;

    let body: serde_json::Value = reqwest::get(format!("http://{addr}/cola"))
        .await
        .expect("request")
        .json()
        .await
        .expect("json body");

    assert_eq!(body["name"], "Coca-Cola");
    assert_eq!(body["owner"], "The Coca-Cola Company");
}

#[tokio::test]
async fn register_then_fetch_a_brand() {
    let addr = spawn_server(unreachable_db_config()).await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("http://{addr}/cola/register"))
        .json(&serde_json::json!({
            "owner": "PepsiCo",
            "name": "Pepsi",
            "tags": ["cola"]
        }))
        .send()
        .await
        .expect("register request");
    assert_eq!(response.status(), 200);
    assert_eq!(
        response.text().await.expect("body"),
        "Cola brand Pepsi registered successfully."
    );

    let body: serde_json::Value = client
        .get(format!("http://{addr}/cola"))
        .query(&[("brand", "Pepsi")])
        .send()
        .await
        .expect("fetch request")
        .json()
        .await
        .expect("json body");
    assert_eq!(body["owner"], "PepsiCo");
    assert_eq!(body["tags"], serde_json::json!(["cola"]));
}

#[tokio::test]
async fn unknown_brand_is_404() {
    let addr = spawn_server(unreachable_db_config()).await;

    let response = reqwest::get(format!("http://{addr}/cola?brand=Nope"))
        .await
        .expect("request");
    assert_eq!(response.status(), 404);

    let body: serde_json::Value = response.json().await.expect("json body");
    assert_eq!(body["statusCode"], 404);
    assert_eq!(body["message"], "Cola brand not found: Nope");
}

#[tokio::test]
async fn empty_brand_name_is_rejected() {
    let addr = spawn_server(unreachable_db_config()).await;

    let response = reqwest::Client::new()
        .post(format!("http://{addr}/cola/register"))
        .json(&serde_json::json!({ "owner": "Nobody", "name": "  " }))
        .send()
        .await
        .expect("register request");
    assert_eq!(response.status(), 400);

    let body: serde_json::Value = response.json().await.expect("json body");
    assert_eq!(body["statusCode"], 400);
}
