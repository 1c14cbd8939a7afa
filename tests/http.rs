//! End-to-end tests over the production transport, against a local mock
//! HTTP server.

use koios_client::{Error, KoiosClient, Network};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn tip_payload() -> serde_json::Value {
    serde_json::json!([{
        "hash": "abc123def456abc123def456abc123def456abc123def456abc123def456abcd",
        "epoch_no": 300,
        "abs_slot": 53384242,
        "epoch_slot": 75442,
        "block_no": 12345678,
        "block_time": 1506635091
    }])
}

#[tokio::test]
async fn authenticated_tip_round_trip() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/tip"))
        .and(header("authorization", "Bearer fake-api-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(tip_payload()))
        .expect(1)
        .mount(&server)
        .await;

    let client = KoiosClient::builder(Network::Mainnet)
        .api_key("fake-api-key")
        .base_url(server.uri())
        .build()
        .unwrap();

    let tip = client.tip().await.unwrap();
    assert_eq!(tip.len(), 1);
    assert_eq!(tip[0].epoch_no, 300);
}

#[tokio::test]
async fn post_body_reaches_the_server_as_sent() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/tx_status"))
        .and(header("content-type", "application/json"))
        .and(body_json(serde_json::json!({"_tx_hashes": ["f144a8264a"]})))
        .respond_with(ResponseTemplate::new(200).set_body_json(
            serde_json::json!([{"tx_hash": "f144a8264a", "num_confirmations": 5}]),
        ))
        .expect(1)
        .mount(&server)
        .await;

    let client = KoiosClient::builder(Network::Preprod)
        .base_url(server.uri())
        .build()
        .unwrap();

    let statuses = client.tx_status(&["f144a8264a"]).await.unwrap();
    assert_eq!(statuses[0].num_confirmations, Some(5));
}

#[tokio::test]
async fn epoch_filter_is_sent_as_a_query_parameter() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/totals"))
        .and(query_param("_epoch_no", "294"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([{
            "epoch_no": 294,
            "circulation": "32081169442642320",
            "treasury": "637024173474141",
            "reward": "506871250479840",
            "supply": "33228495612391330",
            "reserves": "11771504387608670"
        }])))
        .expect(1)
        .mount(&server)
        .await;

    let client = KoiosClient::builder(Network::Mainnet)
        .base_url(server.uri())
        .build()
        .unwrap();

    let totals = client.totals(Some(294)).await.unwrap();
    assert_eq!(totals[0].epoch_no, 294);
}

#[tokio::test]
async fn service_errors_keep_their_status_code() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/tip"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(serde_json::json!({"message": "invalid token"})),
        )
        .mount(&server)
        .await;

    let client = KoiosClient::builder(Network::Mainnet)
        .api_key("wrong")
        .base_url(server.uri())
        .build()
        .unwrap();

    let err = client.tip().await.unwrap_err();
    match err {
        Error::Api { status, message } => {
            assert_eq!(status, 401);
            assert!(message.contains("invalid token"));
        }
        other => panic!("expected Error::Api, got {other:?}"),
    }
}
