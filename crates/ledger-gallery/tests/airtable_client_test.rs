use ledger_gallery::{AirtableClient, AirtableConfig, Error, GalleryLoader, GalleryView};
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> AirtableClient {
    let cfg = AirtableConfig::new("test-key", "appBase")
        .and_then(|c| c.with_base_url(&format!("{}/v0/", server.uri())))
        .expect("config");
    AirtableClient::new(cfg).expect("client")
}

#[tokio::test]
async fn lists_records_with_bearer_auth_and_view() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v0/appBase/Storytellers"))
        .and(query_param("view", "Grid view"))
        .and(header("authorization", "Bearer test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "records": [
                { "id": "rec1", "fields": { "Name": "Aunty May", "Website themes": ["Country"] } },
                { "id": "rec2", "fields": { "Name": "Uncle Ray" } }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let records = client_for(&server)
        .list_records("Storytellers", "Grid view")
        .await
        .expect("records");
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].text("Name"), Some("Aunty May"));
}

#[tokio::test]
async fn missing_records_key_is_an_empty_list() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "offset": "itr1" })))
        .mount(&server)
        .await;

    let records = client_for(&server).list_records("T", "v").await.expect("records");
    assert!(records.is_empty());
}

#[tokio::test]
async fn null_records_is_an_empty_list() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "records": null })))
        .mount(&server)
        .await;

    let records = client_for(&server).list_records("T", "v").await.expect("records");
    assert!(records.is_empty());
}

#[tokio::test]
async fn server_errors_do_not_leak_the_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid key test-key"))
        .mount(&server)
        .await;

    let err = client_for(&server).list_records("T", "v").await.unwrap_err();
    assert!(matches!(err, Error::Server { status: 401 }));
    assert!(!err.to_string().contains("test-key"));
}

#[tokio::test]
async fn malformed_json_is_a_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{not json"))
        .mount(&server)
        .await;

    let err = client_for(&server).list_records("T", "v").await.unwrap_err();
    assert!(matches!(err, Error::Decode(_)));
}

#[tokio::test]
async fn loader_publishes_cards_then_an_error_for_a_failing_view() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(query_param("view", "Good"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "records": [
                { "id": "a", "fields": {} },
                { "id": "b", "fields": {} },
                { "id": "c", "fields": {} }
            ]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(query_param("view", "Broken"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let mut loader = GalleryLoader::new(client_for(&server));
    let mut rx = loader.subscribe();

    assert!(loader.request("Storytellers", "Good"));
    let state = rx.wait_for(|s| !s.loading).await.expect("state").clone();
    let view = GalleryView::from_state(&state, Some(2));
    let ids: Vec<&str> = view.cards().iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, ["a", "b"]);

    assert!(loader.request("Storytellers", "Broken"));
    let state = rx.wait_for(|s| !s.loading).await.expect("state").clone();
    let view = GalleryView::from_state(&state, Some(2));
    assert!(view.cards().is_empty());
    assert!(matches!(view, GalleryView::Error(_)));
}
