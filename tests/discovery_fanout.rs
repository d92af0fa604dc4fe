//! Discovery fan-out over real HTTP: live instances contribute to the union,
//! dead ones are skipped.

use fusegate::{
    Fusegate, HttpInstanceClient, HttpInstanceClientConfig, Instance, ServiceId, StaticDirectory,
};
use std::sync::Arc;
use std::time::Duration;

fn instance_for(server: &mockito::ServerGuard) -> Instance {
    let (host, port) = server
        .host_with_port()
        .rsplit_once(':')
        .map(|(h, p)| (h.to_string(), p.parse::<u16>().unwrap()))
        .unwrap();
    Instance::new(host, port)
}

async fn keys_mock(server: &mut mockito::ServerGuard, body: &str) {
    server
        .mock("GET", "/tenacity/propertykeys")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body)
        .create_async()
        .await;
}

#[tokio::test]
async fn discovery_unions_live_instances_and_skips_dead_ones() {
    let mut first = mockito::Server::new_async().await;
    let mut second = mockito::Server::new_async().await;
    keys_mock(&mut first, r#"["inventory-api","payments"]"#).await;
    keys_mock(&mut second, r#"["inventory-api","auth"]"#).await;

    let service = ServiceId::new("checkout").unwrap();
    let dead = Instance::new("127.0.0.1", 1);

    let client = HttpInstanceClient::new(HttpInstanceClientConfig {
        timeout: Duration::from_secs(2),
        pool_max_idle_per_host: 4,
    })
    .unwrap();

    let gate = Fusegate::builder()
        .directory(Arc::new(StaticDirectory::new().with_service(
            service.clone(),
            vec![instance_for(&first), instance_for(&second), dead],
        )))
        .instance_client(Arc::new(client))
        .instance_timeout(Duration::from_secs(2))
        .build()
        .unwrap();

    let keys = gate.property_keys(&service).await.unwrap();
    assert_eq!(keys.len(), 3);
    assert!(keys.contains("inventory-api"));
    assert!(keys.contains("payments"));
    assert!(keys.contains("auth"));
}
