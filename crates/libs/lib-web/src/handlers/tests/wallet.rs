use super::*;
use lib_core::SqliteKvStore;
use sqlx::sqlite::SqlitePoolOptions;

const TWELVE_WORDS: &str =
    "abandon ability able about above absent absorb abstract absurd abuse access accident";
const RECIPIENT: &str = "9xQeWvG816bUx9EPjHmaT23yvVM2ZWbrrpZb9PusVFin";

#[tokio::test]
async fn test_snapshot_before_any_wallet() {
    // Arrange
    let app = test_app(test_state(&mock_upstream().await, None).await);

    // Act
    let (status, _, body) = call(&app, get_req("/api/wallet")).await;

    // Assert
    assert_eq!(status, StatusCode::OK);
    assert!(body["currentWallet"].is_null());
    assert_eq!(body["transactions"].as_array().unwrap().len(), 6);
    assert_eq!(body["isWalletLoading"], false);
    assert_eq!(body["hasHydrated"], true);
}

#[tokio::test]
async fn test_create_wallet() {
    // Arrange
    let app = test_app(test_state(&mock_upstream().await, None).await);

    // Act
    let (status, _, wallet) =
        call(&app, json_req("POST", "/api/wallet/create", json!({ "name": "Savings" }))).await;
    let (_, _, snapshot) = call(&app, get_req("/api/wallet")).await;

    // Assert
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(wallet["name"], "Savings");
    assert_eq!(wallet["network"], "mainnet");
    assert_eq!(wallet["seedPhrase"].as_array().unwrap().len(), 12);
    assert_eq!(wallet["tokens"].as_array().unwrap().len(), 4);
    assert_eq!(snapshot["currentWallet"]["id"], wallet["id"]);
}

#[tokio::test]
async fn test_create_wallet_default_name() {
    let app = test_app(test_state(&mock_upstream().await, None).await);

    let (status, _, wallet) = call(&app, json_req("POST", "/api/wallet/create", json!({}))).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(wallet["name"], "My Wallet");
}

#[tokio::test]
async fn test_import_wallet() {
    // Arrange
    let app = test_app(test_state(&mock_upstream().await, None).await);
    let thirteen = format!("{} zoo", TWELVE_WORDS);

    // Act
    let (rejected, _, error) = call(
        &app,
        json_req("POST", "/api/wallet/import", json!({ "name": "Restored", "seedPhrase": thirteen })),
    )
    .await;
    let (accepted, _, wallet) = call(
        &app,
        json_req(
            "POST",
            "/api/wallet/import",
            json!({ "name": "Restored", "seedPhrase": format!("  {}  ", TWELVE_WORDS) }),
        ),
    )
    .await;

    // Assert
    assert_eq!(rejected, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "InvalidInput");
    assert_eq!(accepted, StatusCode::CREATED);
    assert_eq!(wallet["name"], "Restored");
    assert_eq!(wallet["seedPhrase"][0], "abandon");
    assert_eq!(wallet["seedPhrase"].as_array().unwrap().len(), 12);
}

#[tokio::test]
async fn test_import_by_private_key() {
    // Arrange
    let app = test_app(test_state(&mock_upstream().await, None).await);
    let key = "k".repeat(64);

    // Act
    let (short, _, _) = call(
        &app,
        json_req("POST", "/api/wallet/import", json!({ "name": "Cold", "privateKey": "too-short" })),
    )
    .await;
    let (empty, _, empty_body) =
        call(&app, json_req("POST", "/api/wallet/import", json!({ "name": "Cold" }))).await;
    let (status, _, wallet) = call(
        &app,
        json_req("POST", "/api/wallet/import", json!({ "privateKey": key, "name": "Cold" })),
    )
    .await;

    // Assert
    assert_eq!(short, StatusCode::BAD_REQUEST);
    assert_eq!(empty, StatusCode::BAD_REQUEST);
    assert!(empty_body["error"].as_str().unwrap().contains("private key"));
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(wallet["name"], "Cold");
    assert!(wallet.get("seedPhrase").is_none());
}

#[tokio::test]
async fn test_select_and_network() {
    // Arrange
    let app = test_app(test_state(&mock_upstream().await, None).await);
    let (no_wallet, _, _) =
        call(&app, json_req("POST", "/api/wallet/network", json!({ "network": "devnet" }))).await;
    let (_, _, wallet) = call(&app, json_req("POST", "/api/wallet/create", json!({}))).await;

    // Act
    let (selected, _, _) =
        call(&app, json_req("POST", "/api/wallet/select", json!({ "id": wallet["id"] }))).await;
    let (unknown, _, _) =
        call(&app, json_req("POST", "/api/wallet/select", json!({ "id": "nope" }))).await;
    let (switched, _, switched_body) =
        call(&app, json_req("POST", "/api/wallet/network", json!({ "network": "devnet" }))).await;

    // Assert
    assert_eq!(no_wallet, StatusCode::NOT_FOUND);
    assert_eq!(selected, StatusCode::OK);
    assert_eq!(unknown, StatusCode::NOT_FOUND);
    assert_eq!(switched, StatusCode::OK);
    assert_eq!(switched_body["network"], "devnet");
}

#[tokio::test]
async fn test_send_token_records_transaction() {
    // Arrange
    let app = test_app(test_state(&mock_upstream().await, None).await);
    call(&app, json_req("POST", "/api/wallet/create", json!({}))).await;

    // Act
    let (status, _, tx) = call(
        &app,
        json_req(
            "POST",
            "/api/wallet/send",
            json!({ "token": "SOL", "amount": 0.5, "recipient": RECIPIENT }),
        ),
    )
    .await;
    let (_, _, sends) = call(&app, get_req("/api/transactions?type=send")).await;
    let (_, _, snapshot) = call(&app, get_req("/api/wallet")).await;

    // Assert
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(tx["type"], "send");
    assert_eq!(tx["status"], "success");
    assert_eq!(tx["address"], RECIPIENT);

    let sends = sends.as_array().unwrap();
    assert_eq!(sends[0]["id"], tx["id"]);
    assert!(sends.iter().all(|t| t["type"] == "send"));

    let sol = &snapshot["currentWallet"]["tokens"][0];
    assert!((sol["balance"].as_f64().unwrap() - 2.64159).abs() < 1e-9);
}

#[tokio::test]
async fn test_send_token_rejections() {
    // Arrange
    let app = test_app(test_state(&mock_upstream().await, None).await);
    let send = |body: Value| json_req("POST", "/api/wallet/send", body);

    // Act
    let (no_wallet, _, _) =
        call(&app, send(json!({ "token": "SOL", "amount": 1.0, "recipient": RECIPIENT }))).await;
    call(&app, json_req("POST", "/api/wallet/create", json!({}))).await;
    let (too_much, _, too_much_body) =
        call(&app, send(json!({ "token": "SOL", "amount": 10.0, "recipient": RECIPIENT }))).await;
    let (unknown, _, _) =
        call(&app, send(json!({ "token": "DOGE", "amount": 1.0, "recipient": RECIPIENT }))).await;
    let (negative, _, _) =
        call(&app, send(json!({ "token": "SOL", "amount": -1.0, "recipient": RECIPIENT }))).await;

    // Assert
    assert_eq!(no_wallet, StatusCode::NOT_FOUND);
    assert_eq!(too_much, StatusCode::BAD_REQUEST);
    assert_eq!(too_much_body["error"], "Insufficient balance. Max: 3.1416 SOL");
    assert_eq!(unknown, StatusCode::NOT_FOUND);
    assert_eq!(negative, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_send_token_rejects_short_recipient() {
    // Arrange
    let app = test_app(test_state(&mock_upstream().await, None).await);
    call(&app, json_req("POST", "/api/wallet/create", json!({}))).await;
    let (_, _, before) = call(&app, get_req("/api/transactions")).await;

    // Act
    let (status, _, body) = call(
        &app,
        json_req(
            "POST",
            "/api/wallet/send",
            json!({ "token": "SOL", "amount": 0.5, "recipient": "x" }),
        ),
    )
    .await;
    let (_, _, after) = call(&app, get_req("/api/transactions")).await;
    let (_, _, snapshot) = call(&app, get_req("/api/wallet")).await;

    // Assert
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "InvalidInput");
    assert_eq!(body["error"], "Please enter a valid recipient address.");
    assert_eq!(after, before);
    assert_eq!(snapshot["currentWallet"]["tokens"][0]["balance"], 3.14159);
}

#[tokio::test]
async fn test_import_rejects_blank_name() {
    // Arrange
    let app = test_app(test_state(&mock_upstream().await, None).await);

    // Act
    let (blank, _, blank_body) = call(
        &app,
        json_req("POST", "/api/wallet/import", json!({ "name": "   ", "seedPhrase": TWELVE_WORDS })),
    )
    .await;
    let (missing, _, _) =
        call(&app, json_req("POST", "/api/wallet/import", json!({ "seedPhrase": TWELVE_WORDS }))).await;
    let (_, _, snapshot) = call(&app, get_req("/api/wallet")).await;

    // Assert
    assert_eq!(blank, StatusCode::BAD_REQUEST);
    assert_eq!(blank_body["error"], "Please enter a name for your wallet.");
    assert_eq!(missing, StatusCode::BAD_REQUEST);
    assert!(snapshot["currentWallet"].is_null());
}

#[tokio::test]
async fn test_malformed_body_is_json_error() {
    // Arrange
    let app = test_app(test_state(&mock_upstream().await, None).await);
    let bad_json = Request::builder()
        .method("POST")
        .uri("/api/wallet/send")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    // Act
    let (status, headers, body) = call(&app, bad_json).await;

    // Assert
    assert!(status.is_client_error());
    assert_eq!(headers.get("content-type").unwrap(), "application/json");
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_refresh_prices() {
    // Arrange
    let app = test_app(test_state(&mock_upstream().await, Some(TEST_API_KEY)).await);
    let (before, _, _) = call(&app, json_req("POST", "/api/wallet/prices/refresh", json!({}))).await;
    call(&app, json_req("POST", "/api/wallet/create", json!({}))).await;

    // Act
    let (status, _, refresh) =
        call(&app, json_req("POST", "/api/wallet/prices/refresh", json!({}))).await;
    let (_, _, snapshot) = call(&app, get_req("/api/wallet")).await;

    // Assert
    assert_eq!(before, StatusCode::NOT_FOUND);
    assert_eq!(status, StatusCode::OK);
    assert_eq!(refresh["updated"], json!(["SOL"]));
    assert_eq!(refresh["missing"], json!(["USDC", "SRM", "RAY"]));
    assert_eq!(snapshot["currentWallet"]["tokens"][0]["priceUsd"], 123.45);
}

#[tokio::test]
async fn test_refresh_prices_without_key() {
    let app = test_app(test_state(&mock_upstream().await, None).await);
    call(&app, json_req("POST", "/api/wallet/create", json!({}))).await;

    let (status, _, body) =
        call(&app, json_req("POST", "/api/wallet/prices/refresh", json!({}))).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["code"], "Config");
}

#[tokio::test]
async fn test_reset_wallet() {
    // Arrange
    let app = test_app(test_state(&mock_upstream().await, None).await);
    call(&app, json_req("POST", "/api/wallet/create", json!({}))).await;

    // Act
    let request = Request::builder()
        .method("DELETE")
        .uri("/api/wallet")
        .body(Body::empty())
        .unwrap();
    let (status, _, body) = call(&app, request).await;
    let (_, _, snapshot) = call(&app, get_req("/api/wallet")).await;

    // Assert
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_null());
    assert!(snapshot["currentWallet"].is_null());
}

#[tokio::test]
async fn test_wallet_survives_restart() {
    // Arrange
    let upstream = mock_upstream().await;
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    let kv: Arc<dyn KeyValueStore> = Arc::new(SqliteKvStore::new(pool).await.unwrap());
    let app = test_app(test_state_with(test_config(&upstream, None), kv.clone()).await);

    let (_, _, wallet) =
        call(&app, json_req("POST", "/api/wallet/create", json!({ "name": "Persisted" }))).await;

    // Act
    let restarted = test_app(test_state_with(test_config(&upstream, None), kv).await);
    let (_, _, snapshot) = call(&restarted, get_req("/api/wallet")).await;

    // Assert
    let restored = &snapshot["currentWallet"];
    assert_eq!(restored["id"], wallet["id"]);
    assert_eq!(restored["name"], "Persisted");
    assert_eq!(restored["tokens"][0]["priceUsd"], 0.0);
    assert!(restored["tokens"][0].get("usdValue").is_none());
}
