//! HTTP behaviour of `RestClient` against a local stub server.

mod common;

use std::time::Duration;

use rust_decimal_macros::dec;
use serde_json::{Value, json};

use ims::ImsError;
use ims::api::{ResourceApi, RestClient};
use ims::config::ApiConfig;
use ims::controller::ResourceController;
use ims::models::{Order, OrderPayload, Product, ProductPayload, Stock, Supplier, SupplierPayload};

use common::StubServer;

const PRODUCTS_JSON: &str = include_str!("fixtures/products.json");
const STOCK_JSON: &str = include_str!("fixtures/stock.json");
const ORDERS_JSON: &str = include_str!("fixtures/orders.json");
const ERROR_JSON: &str = include_str!("fixtures/error.json");

fn client(server: &StubServer) -> RestClient {
    let config = ApiConfig::new(&server.base_url)
        .expect("stub URL is valid")
        .with_timeout(Duration::from_secs(5));
    RestClient::new(config).expect("Failed to build client")
}

#[tokio::test]
async fn test_list_products() {
    let server = StubServer::start(&[("GET", "/api/products", 200, PRODUCTS_JSON)]).await;

    let products = ResourceApi::<Product>::list(&client(&server))
        .await
        .expect("list failed");

    assert_eq!(products.len(), 2);
    assert_eq!(products[0].price, dec!(2.5));
    let requests = server.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, "GET");
    assert_eq!(requests[0].path, "/api/products");
}

#[tokio::test]
async fn test_list_stock_and_orders() {
    let server = StubServer::start(&[
        ("GET", "/api/stock", 200, STOCK_JSON),
        ("GET", "/api/orders", 200, ORDERS_JSON),
    ])
    .await;
    let client = client(&server);

    let stock = ResourceApi::<Stock>::list(&client)
        .await
        .expect("stock list failed");
    let orders = ResourceApi::<Order>::list(&client)
        .await
        .expect("order list failed");

    assert_eq!(stock.len(), 2);
    assert_eq!(orders.len(), 3);
}

#[tokio::test]
async fn test_create_posts_camel_case_json() {
    let server = StubServer::start(&[("POST", "/api/products", 201, "{}")]).await;

    let payload = ProductPayload {
        name: "Bolt".to_string(),
        category: "Hardware".to_string(),
        price: dec!(2.5),
        description: "M4".to_string(),
    };
    ResourceApi::<Product>::create(&client(&server), &payload)
        .await
        .expect("create failed");

    let requests = server.requests();
    assert_eq!(requests[0].method, "POST");
    let body: Value = serde_json::from_str(&requests[0].body).expect("body is JSON");
    assert_eq!(
        body,
        json!({
            "name": "Bolt",
            "category": "Hardware",
            "price": 2.5,
            "description": "M4"
        })
    );
}

#[tokio::test]
async fn test_create_order_sends_product_id() {
    let server = StubServer::start(&[("POST", "/api/orders", 201, "")]).await;

    let payload = OrderPayload {
        product_id: 7,
        quantity: 3,
    };
    ResourceApi::<Order>::create(&client(&server), &payload)
        .await
        .expect("create failed");

    let body: Value = serde_json::from_str(&server.requests()[0].body).expect("body is JSON");
    assert_eq!(body, json!({ "productId": 7, "quantity": 3 }));
}

#[tokio::test]
async fn test_update_targets_member_url() {
    let server = StubServer::start(&[("PUT", "/api/suppliers/3", 200, "{}")]).await;

    let payload = SupplierPayload {
        name: "Acme Ltd".to_string(),
        contact_info: "sales@acme.test".to_string(),
    };
    ResourceApi::<Supplier>::update(&client(&server), &3, &payload)
        .await
        .expect("update failed");

    let requests = server.requests();
    assert_eq!(requests[0].method, "PUT");
    assert_eq!(requests[0].path, "/api/suppliers/3");
}

#[tokio::test]
async fn test_error_body_message_is_kept() {
    let server = StubServer::start(&[("DELETE", "/api/suppliers/1", 500, ERROR_JSON)]).await;

    let err = ResourceApi::<Supplier>::delete(&client(&server), &1)
        .await
        .expect_err("delete should fail");

    assert!(matches!(err, ImsError::Status { .. }));
    assert_eq!(err.server_message(), Some("in use"));
    assert_eq!(err.detail(), "in use");
}

#[tokio::test]
async fn test_error_without_json_body() {
    let server =
        StubServer::start(&[("GET", "/api/products", 503, "<html>unavailable</html>")]).await;

    let err = ResourceApi::<Product>::list(&client(&server))
        .await
        .expect_err("list should fail");

    assert_eq!(err.server_message(), None);
    assert_eq!(err.detail(), "Request failed with status code 503");
}

#[tokio::test]
async fn test_malformed_list_body() {
    let server = StubServer::start(&[("GET", "/api/products", 200, "{\"not\":\"a list\"}")]).await;

    let err = ResourceApi::<Product>::list(&client(&server))
        .await
        .expect_err("list should fail");

    assert!(matches!(err, ImsError::Json(_)));
}

#[tokio::test]
async fn test_unreachable_server() {
    // Bind and drop to get a port nobody listens on
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind failed");
        listener.local_addr().expect("no address").port()
    };
    let config = ApiConfig::new(&format!("http://127.0.0.1:{port}/api")).expect("valid URL");
    let client = RestClient::new(config).expect("Failed to build client");

    let err = ResourceApi::<Product>::list(&client)
        .await
        .expect_err("list should fail");

    assert!(matches!(err, ImsError::Http(_)));
}

#[tokio::test]
async fn test_controller_delete_failure_over_http() {
    let server = StubServer::start(&[
        ("GET", "/api/suppliers", 200, r#"[{"supplierId":1,"name":"Acme","contactInfo":"a@b.test"}]"#),
        ("DELETE", "/api/suppliers/1", 500, ERROR_JSON),
    ])
    .await;
    let mut suppliers: ResourceController<Supplier, _> = ResourceController::new(client(&server));

    suppliers.load_all().await;
    suppliers.remove(1).await;

    assert_eq!(suppliers.items().len(), 1);
    assert_eq!(suppliers.last_error(), Some("Delete failed: in use"));
    let methods: Vec<String> = server.requests().into_iter().map(|r| r.method).collect();
    assert_eq!(methods, vec!["GET", "DELETE"]);
}
