//! The reqwest backend against a local axum server.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Form, Json, Router};
use serde_json::{json, Value};

use bridge_nullables::{ElementSpec, NullPage, NullWallet};
use bridge_types::{BridgeError, EncodedTransaction, PrepareRequest, TxSubmission};
use bridge_wallet_core::{Backend, Bridge, BridgeConfig, HttpBackend, Page};

#[derive(Clone, Default)]
struct Recorded {
    forms: Arc<Mutex<Vec<HashMap<String, String>>>>,
    json: Arc<Mutex<Vec<Value>>>,
}

async fn submit(
    State(recorded): State<Recorded>,
    Form(form): Form<HashMap<String, String>>,
) -> String {
    let tx_id = form.get("txId").cloned().unwrap_or_default();
    recorded.forms.lock().unwrap().push(form);
    format!("<p>submitted {tx_id}</p>")
}

async fn initialize(State(recorded): State<Recorded>, Json(body): Json<Value>) -> Json<Value> {
    recorded.json.lock().unwrap().push(body);
    Json(json!({ "encodedTx": "AQID" }))
}

async fn broken(State(recorded): State<Recorded>, Json(body): Json<Value>) -> StatusCode {
    recorded.json.lock().unwrap().push(body);
    StatusCode::INTERNAL_SERVER_ERROR
}

async fn not_json() -> &'static str {
    "<html>oops</html>"
}

async fn bad_payload() -> Json<Value> {
    Json(json!({ "encodedTx": "%%%%" }))
}

/// Serve the fake backend on an ephemeral port; returns its base URL.
async fn spawn_server() -> (String, Recorded) {
    let recorded = Recorded::default();
    let app = Router::new()
        .route("/tx-submit", post(submit))
        .route("/initialize", post(initialize))
        .route("/broken", post(broken))
        .route("/not-json", post(not_json))
        .route("/bad-payload", post(bad_payload))
        .with_state(recorded.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{addr}"), recorded)
}

fn backend(base: &str) -> HttpBackend {
    HttpBackend::new(base, "/tx-submit", Duration::from_secs(5), Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn submission_is_form_encoded() {
    let (base, recorded) = spawn_server().await;
    let submission = TxSubmission {
        tx_id: "tx1".into(),
        encoded_serialized_tx: EncodedTransaction::parse("AAE=").unwrap(),
    };

    let html = backend(&base).submit_transaction(&submission).await.unwrap();

    assert_eq!(html, "<p>submitted tx1</p>");
    let forms = recorded.forms.lock().unwrap();
    assert_eq!(forms.len(), 1);
    assert_eq!(forms[0]["txId"], "tx1");
    assert_eq!(forms[0]["encodedSerializedTx"], "AAE=");
}

#[tokio::test]
async fn preparation_posts_public_key_as_json() {
    let (base, recorded) = spawn_server().await;
    let request = PrepareRequest {
        public_key: "Key1".into(),
    };

    let prepared = backend(&base)
        .prepare_transaction("/initialize", &request)
        .await
        .unwrap();

    assert_eq!(prepared.encoded_tx.decode().as_bytes(), &[1, 2, 3]);
    assert_eq!(
        recorded.json.lock().unwrap().as_slice(),
        &[json!({ "public_key": "Key1" })]
    );
}

#[tokio::test]
async fn server_error_is_a_network_error() {
    let (base, _) = spawn_server().await;
    let request = PrepareRequest {
        public_key: "Key1".into(),
    };

    let err = backend(&base)
        .prepare_transaction("/broken", &request)
        .await
        .unwrap_err();

    assert!(matches!(err, BridgeError::Network(msg) if msg.contains("500")));
}

#[tokio::test]
async fn non_json_body_is_rejected() {
    let (base, _) = spawn_server().await;
    let request = PrepareRequest {
        public_key: "Key1".into(),
    };

    let err = backend(&base)
        .prepare_transaction("/not-json", &request)
        .await
        .unwrap_err();

    assert!(matches!(err, BridgeError::Network(msg) if msg.contains("invalid JSON")));
}

#[tokio::test]
async fn malformed_payload_is_an_encoding_error() {
    let (base, _) = spawn_server().await;
    let request = PrepareRequest {
        public_key: "Key1".into(),
    };

    let err = backend(&base)
        .prepare_transaction("/bad-payload", &request)
        .await
        .unwrap_err();

    assert!(matches!(err, BridgeError::Encoding(_)));
}

#[tokio::test]
async fn unreachable_backend_is_a_network_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = backend(&format!("http://{addr}"))
        .prepare_transaction(
            "/initialize",
            &PrepareRequest {
                public_key: "Key1".into(),
            },
        )
        .await
        .unwrap_err();

    assert!(matches!(err, BridgeError::Network(_)));
}

#[tokio::test]
async fn failed_preparation_never_reaches_wallet() {
    let (base, recorded) = spawn_server().await;
    let config = BridgeConfig {
        backend_url: base,
        ..BridgeConfig::default()
    };
    let page = NullPage::new();
    page.append(page.root(), ElementSpec::new("button").id("connect-button"));
    let wallet = NullWallet::new().connected_as("Key1");

    let bridge = Bridge::init(
        Some(wallet),
        HttpBackend::from_config(&config).unwrap(),
        page,
        config,
    )
    .unwrap();

    let result = bridge.sign_and_send("/broken").await;

    assert!(matches!(result, Err(BridgeError::Network(_))));
    assert_eq!(recorded.json.lock().unwrap().len(), 1);
    assert_eq!(bridge.wallet().sign_requests(), 0);
}

#[tokio::test]
async fn full_sign_and_submit_over_http() {
    let (base, recorded) = spawn_server().await;
    let config = BridgeConfig {
        backend_url: base,
        ..BridgeConfig::default()
    };
    let page = NullPage::new();
    let modal = page.append(page.root(), ElementSpec::new("div").id("tx-modal"));
    let content = page.append(modal, ElementSpec::new("div").class("modal-content"));
    let trigger = page.append(
        content,
        ElementSpec::new("button")
            .attr("encoded-tx", "AAE=")
            .attr("tx-id", "42"),
    );
    let wallet = NullWallet::new().connected_as("Key1").signing_to(vec![0, 1]);

    let bridge = Bridge::init(
        Some(wallet),
        HttpBackend::from_config(&config).unwrap(),
        page,
        config,
    )
    .unwrap();
    bridge.attach(modal);
    bridge.click(trigger).await;

    assert_eq!(recorded.forms.lock().unwrap()[0]["encodedSerializedTx"], "AAE=");
    assert_eq!(
        bridge.page().content(content).as_deref(),
        Some("<p>submitted 42</p>")
    );
}
