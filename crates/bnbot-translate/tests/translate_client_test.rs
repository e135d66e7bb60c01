use std::time::Duration;

use bnbot_core::{errors::Error, ports::Translator};
use bnbot_translate::GoogleTranslateClient;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> GoogleTranslateClient {
    GoogleTranslateClient::new(server.uri(), Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn translates_into_target_language() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/translate_a/single"))
        .and(query_param("tl", "bn"))
        .and(query_param("sl", "auto"))
        .and(query_param("q", "Hello world"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            [["হ্যালো বিশ্ব", "Hello world", null, null, 10]],
            null,
            "en"
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let res = client(&server).translate("Hello world", "bn").await.unwrap();

    assert_eq!(res.text, "হ্যালো বিশ্ব");
    assert_eq!(res.source_text, "Hello world");
    assert_eq!(res.detected_lang.as_deref(), Some("en"));
}

#[tokio::test]
async fn non_success_status_is_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/translate_a/single"))
        .respond_with(ResponseTemplate::new(429).set_body_string("Too Many Requests"))
        .mount(&server)
        .await;

    let err = client(&server).translate("hi", "bn").await.unwrap_err();

    match err {
        Error::External(msg) => assert!(msg.contains("429"), "{msg}"),
        other => panic!("unexpected: {other:?}"),
    }
}

#[tokio::test]
async fn malformed_body_is_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/translate_a/single"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>captcha</html>"))
        .mount(&server)
        .await;

    let err = client(&server).translate("hi", "bn").await.unwrap_err();
    assert!(matches!(err, Error::Http(_)));
}
