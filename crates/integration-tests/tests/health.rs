mod harness;

use harness::config::ConfigBuilder;
use harness::server::TestServer;

#[tokio::test]
async fn health_endpoint_returns_ok() {
    let server = TestServer::start(ConfigBuilder::new().build()).await.unwrap();

    let resp = server.client().get(server.url("/health")).send().await.unwrap();

    assert_eq!(resp.status(), 200);

    let body = resp.text().await.unwrap();
    assert_eq!(body, "ok");
}

#[tokio::test]
async fn health_endpoint_disabled() {
    let config = ConfigBuilder::new().without_health().build();

    let server = TestServer::start(config).await.unwrap();

    let resp = server.client().get(server.url("/health")).send().await.unwrap();

    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn health_endpoint_custom_path() {
    let config = ConfigBuilder::new().with_health_path("/livez").build();

    let server = TestServer::start(config).await.unwrap();

    let resp = server.client().get(server.url("/livez")).send().await.unwrap();
    assert_eq!(resp.status(), 200);

    let resp = server.client().get(server.url("/health")).send().await.unwrap();
    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn health_does_not_need_an_api_key() {
    let config = ConfigBuilder::new().without_api_key().build();

    let server = TestServer::start(config).await.unwrap();

    let resp = server.client().get(server.url("/health")).send().await.unwrap();
    assert_eq!(resp.status(), 200);
}
