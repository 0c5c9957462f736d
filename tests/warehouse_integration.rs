//! Warehouse API client against a WireMock container.
//!
//! Needs Docker. Run with `cargo test -- --ignored`.

use std::path::Path;
use std::time::{Duration, Instant};

use testcontainers::core::{IntoContainerPort, Mount};
use testcontainers::runners::SyncRunner;
use testcontainers::{Container, GenericImage, ImageExt, TestcontainersError};

use pick_route::traits::PositionLookup;
use pick_route::warehouse::{WarehouseClient, WarehouseConfig};
use pick_route::{
    plan_order, LookupError, OptimizeError, OptimizeOptions, Order, PlanError, Point3D,
};

fn wiremock_container() -> Result<(Container<GenericImage>, String), TestcontainersError> {
    let mappings = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/wiremock/mappings");

    let image = GenericImage::new("wiremock/wiremock", "3.9.1")
        .with_exposed_port(8080.tcp())
        .with_mount(Mount::bind_mount(
            mappings.to_string_lossy().to_string(),
            "/home/wiremock/mappings",
        ))
        .with_startup_timeout(Duration::from_secs(60));

    let container = image.start()?;
    let port = container.get_host_port_ipv4(8080.tcp())?;
    let base_url = format!("http://127.0.0.1:{}", port);

    Ok((container, base_url))
}

fn client(base_url: &str, api_key: &str) -> WarehouseClient {
    WarehouseClient::new(WarehouseConfig {
        base_url: base_url.to_string(),
        api_key: api_key.to_string(),
        timeout_secs: 5,
        max_retries: 0,
        retry_backoff_ms: 0,
    })
    .expect("build warehouse client")
}

/// WireMock accepts connections before mappings are loaded, and an unmapped
/// product answers 404, which the client reads as "no positions".
fn wait_until_ready(client: &WarehouseClient) {
    let start = Instant::now();
    while start.elapsed() < Duration::from_secs(30) {
        if matches!(client.resolve_positions("product-2"), Ok(p) if !p.is_empty()) {
            return;
        }
        std::thread::sleep(Duration::from_millis(500));
    }
    panic!("WireMock did not become ready");
}

#[test]
#[ignore = "requires Docker"]
fn warehouse_lookup_and_plan() {
    let (container, base_url) = wiremock_container().expect("start WireMock container");
    let warehouse = client(&base_url, "test-key");
    wait_until_ready(&warehouse);

    let positions = warehouse
        .resolve_positions("product-1")
        .expect("product-1 positions");
    assert_eq!(positions.len(), 2);
    assert_eq!(positions[1].position_id, "A04-B07-L2");
    assert_eq!(positions[1].point, Point3D::new(12.0, 8.4, 1.0));

    let order = Order::new(
        vec![
            "product-2".to_string(),
            "product-1".to_string(),
            "product-2".to_string(),
        ],
        Point3D::default(),
    );
    let plan = plan_order(order, &warehouse, &OptimizeOptions::default()).expect("plan");
    let ids: Vec<&str> = plan
        .picking_order
        .iter()
        .map(|stop| stop.position_id.as_str())
        .collect();
    assert_eq!(ids, vec!["A01-B01-L0", "A01-B02-L0"]);
    assert!((plan.distance - 2.0).abs() < 1e-12);

    let sold_out = Order::new(
        vec!["product-1".to_string(), "sold-out".to_string()],
        Point3D::default(),
    );
    let err =
        plan_order(sold_out, &warehouse, &OptimizeOptions::default()).expect_err("sold out");
    match err {
        PlanError::Optimize(OptimizeError::NotInStock { product_id }) => {
            assert_eq!(product_id, "sold-out")
        }
        other => panic!("expected NotInStock, got {other:?}"),
    }

    let unauthorized = client(&base_url, "wrong-key");
    let err = unauthorized
        .resolve_positions("product-1")
        .expect_err("unauthorized");
    assert!(matches!(err, LookupError::Status { status: 401, .. }));

    drop(container);
}
