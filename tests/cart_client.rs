//! HTTP cart client against a mock storefront.

mod common;

use cartsync::cart::{CartApi, CartError, CartOperation, HttpCartClient, VariantId};
use cartsync::config::StoreConfig;
use common::mock_backend::{MockResponse, MockStore};

const CART_V1_X3: &str = r#"{
    "token": "abc123",
    "item_count": 3,
    "total_price": 1500,
    "currency": "GBP",
    "items": [
        {
            "id": 40011,
            "variant_id": 40011,
            "quantity": 3,
            "product_title": "Linen Shirt",
            "url": "/products/linen-shirt?variant=40011",
            "image": "https://cdn.example.com/linen.jpg",
            "final_line_price": 1500,
            "price": 500
        }
    ]
}"#;

fn client_for(store: &MockStore, root: &str) -> HttpCartClient {
    HttpCartClient::new(&StoreConfig {
        base_url: store.base_url(),
        root: root.to_string(),
    })
    .unwrap()
}

#[tokio::test]
async fn fetch_reads_snapshot_and_ignores_extra_fields() {
    let store = MockStore::start().await;
    store.enqueue_response(MockResponse::json(CART_V1_X3)).await;
    let client = client_for(&store, "/");

    let cart = client.fetch_cart().await.unwrap();

    assert_eq!(cart.item_count, 3);
    assert_eq!(cart.total_price, 1500);
    assert_eq!(cart.items.len(), 1);
    assert_eq!(cart.items[0].variant_id, VariantId::from("40011"));
    assert_eq!(cart.items[0].product_title, "Linen Shirt");
    assert_eq!(cart.quantity_of("40011"), 3);

    let requests = store.captured_requests().await;
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, "GET");
    assert_eq!(requests[0].path, "/cart.js");
    assert_eq!(requests[0].header("accept"), Some("application/json"));
}

#[tokio::test]
async fn update_posts_form_encoded_quantity() {
    let store = MockStore::start().await;
    store.enqueue_response(MockResponse::json(CART_V1_X3)).await;
    let client = client_for(&store, "/");

    let cart = client
        .set_variant_quantity(&VariantId::from("V1"), 3)
        .await
        .unwrap();
    assert_eq!(cart.item_count, 3);

    let requests = store.captured_requests().await;
    assert_eq!(requests[0].method, "POST");
    assert_eq!(requests[0].path, "/cart/update.js");
    assert_eq!(requests[0].body_text(), "updates%5BV1%5D=3");
    assert_eq!(
        requests[0].header("content-type"),
        Some("application/x-www-form-urlencoded")
    );
    assert_eq!(requests[0].header("x-requested-with"), Some("XMLHttpRequest"));
}

#[tokio::test]
async fn update_rejection_surfaces_server_message() {
    let store = MockStore::start().await;
    store
        .enqueue_response(MockResponse::error(
            422,
            "You can only add 2 of Linen Shirt to the cart.",
            "",
        ))
        .await;
    let client = client_for(&store, "/");

    let err = client
        .set_variant_quantity(&VariantId::from("V1"), 5)
        .await
        .unwrap_err();

    assert!(matches!(err, CartError::Rejected { status: 422, .. }));
    assert_eq!(
        err.user_message(),
        "You can only add 2 of Linen Shirt to the cart."
    );
}

#[tokio::test]
async fn update_rejection_falls_back_to_description() {
    let store = MockStore::start().await;
    store
        .enqueue_response(MockResponse::error(422, "", "Sold out"))
        .await;
    let client = client_for(&store, "/");

    let err = client
        .set_variant_quantity(&VariantId::from("V1"), 1)
        .await
        .unwrap_err();

    assert_eq!(err.user_message(), "Sold out");
}

#[tokio::test]
async fn update_without_readable_body_uses_generic_message() {
    let store = MockStore::start().await;
    store
        .enqueue_response(MockResponse::plain(500, "<html>Internal error</html>"))
        .await;
    let client = client_for(&store, "/");

    let err = client
        .set_variant_quantity(&VariantId::from("V1"), 1)
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(500));
    assert_eq!(err.operation(), Some(CartOperation::Update));
    assert_eq!(err.user_message(), "Could not update cart.");
}

#[tokio::test]
async fn fetch_error_body_is_not_surfaced() {
    let store = MockStore::start().await;
    store
        .enqueue_response(MockResponse::error(500, "Boom", "Database down"))
        .await;
    let client = client_for(&store, "/");

    let err = client.fetch_cart().await.unwrap_err();

    assert!(matches!(
        err,
        CartError::Status {
            operation: CartOperation::Fetch,
            status: 500
        }
    ));
    assert_eq!(err.user_message(), "Failed to fetch cart");
}

#[tokio::test]
async fn success_with_garbage_body_is_a_decode_error() {
    let store = MockStore::start().await;
    store
        .enqueue_response(MockResponse::json(r#"{"item_count": "lots"}"#))
        .await;
    let client = client_for(&store, "/");

    let err = client.fetch_cart().await.unwrap_err();

    assert!(matches!(err, CartError::Decode { .. }));
    assert_eq!(err.user_message(), "Failed to fetch cart");
}

#[tokio::test]
async fn clear_posts_to_clear_endpoint() {
    let store = MockStore::start().await;
    store
        .enqueue_response(MockResponse::json(
            r#"{"item_count": 0, "total_price": 0, "items": []}"#,
        ))
        .await;
    let client = client_for(&store, "/");

    let cart = client.clear_cart().await.unwrap();
    assert!(cart.is_empty());

    let requests = store.captured_requests().await;
    assert_eq!(requests[0].method, "POST");
    assert_eq!(requests[0].path, "/cart/clear.js");
    assert_eq!(requests[0].header("x-requested-with"), Some("XMLHttpRequest"));
}

#[tokio::test]
async fn clear_failure_uses_clear_message() {
    let store = MockStore::start().await;
    store
        .enqueue_response(MockResponse::error(500, "Nope", ""))
        .await;
    let client = client_for(&store, "/");

    let err = client.clear_cart().await.unwrap_err();
    assert_eq!(err.user_message(), "Could not clear cart");
}

#[tokio::test]
async fn locale_root_prefixes_every_endpoint() {
    let store = MockStore::start().await;
    let client = client_for(&store, "en-gb");

    client.fetch_cart().await.unwrap();
    client
        .set_variant_quantity(&VariantId::from("V1"), 0)
        .await
        .unwrap();
    client.clear_cart().await.unwrap();

    let paths: Vec<String> = store
        .captured_requests()
        .await
        .into_iter()
        .map(|r| r.path)
        .collect();
    assert_eq!(
        paths,
        vec!["/en-gb/cart.js", "/en-gb/cart/update.js", "/en-gb/cart/clear.js"]
    );
}

#[tokio::test]
async fn unreachable_store_is_a_transport_error() {
    let client = HttpCartClient::new(&StoreConfig {
        base_url: "http://127.0.0.1:1".to_string(),
        root: "/".to_string(),
    })
    .unwrap();

    let err = client.fetch_cart().await.unwrap_err();

    assert!(matches!(
        err,
        CartError::Transport {
            operation: CartOperation::Fetch,
            ..
        }
    ));
    assert_eq!(err.user_message(), "Failed to fetch cart");
}
