use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{
    app, app_with_state, default_state, CaptionEnvelope, Template, INVALID_LOGIN, NO_TEXTS,
    TEST_PASSWORD, TEST_USERNAME,
};
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn form_request(body: &str) -> Request<String> {
    Request::builder()
        .method("POST")
        .uri("/caption_image")
        .header(http::header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(body.to_string())
        .unwrap()
}

fn login() -> String {
    format!("template_id=181913649&username={TEST_USERNAME}&password={TEST_PASSWORD}")
}

// --- get_memes ---

#[tokio::test]
async fn get_memes_lists_templates() {
    let resp = app()
        .oneshot(Request::builder().uri("/get_memes").body(String::new()).unwrap())
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let json: serde_json::Value = body_json(resp).await;
    assert_eq!(json["success"], true);
    let memes: Vec<Template> = serde_json::from_value(json["data"]["memes"].clone()).unwrap();
    assert_eq!(memes.len(), 3);
    assert_eq!(memes[0].id, "181913649");
}

// --- caption_image ---

#[tokio::test]
async fn caption_with_top_text_succeeds() {
    let resp = app()
        .oneshot(form_request(&format!("{}&text0=Top%20Text", login())))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let envelope: CaptionEnvelope = body_json(resp).await;
    assert!(envelope.success);
    let data = envelope.data.unwrap();
    assert!(data.url.starts_with("https://i.imgflip.com/"));
    assert!(envelope.error_message.is_none());
}

#[tokio::test]
async fn caption_with_bad_password_is_rejected_with_200() {
    let resp = app()
        .oneshot(form_request(
            "template_id=181913649&username=test-user&password=nope&text0=x",
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let envelope: CaptionEnvelope = body_json(resp).await;
    assert!(!envelope.success);
    assert!(envelope.data.is_none());
    assert_eq!(envelope.error_message.as_deref(), Some(INVALID_LOGIN));
}

#[tokio::test]
async fn caption_without_text_is_rejected() {
    let resp = app()
        .oneshot(form_request(&format!("{}&boxes%5B0%5D%5Btext%5D=", login())))
        .await
        .unwrap();

    let envelope: CaptionEnvelope = body_json(resp).await;
    assert!(!envelope.success);
    assert_eq!(envelope.error_message.as_deref(), Some(NO_TEXTS));
}

#[tokio::test]
async fn caption_records_decoded_fields() {
    let state = default_state();
    let resp = app_with_state(state.clone())
        .oneshot(form_request(&format!(
            "{}&boxes%5B0%5D%5Btext%5D=&boxes%5B1%5D%5Btext%5D=Bottom&boxes%5B1%5D%5Bcolor%5D=%23ffa500",
            login()
        )))
        .await
        .unwrap();
    let envelope: CaptionEnvelope = body_json(resp).await;
    assert!(envelope.success);

    let received = state.received.read().await;
    assert_eq!(received.len(), 1);
    assert_eq!(received[0]["boxes[0][text]"], "");
    assert_eq!(received[0]["boxes[1][text]"], "Bottom");
    assert_eq!(received[0]["boxes[1][color]"], "#ffa500");
}

#[tokio::test]
async fn caption_rejects_json_body() {
    let resp = app()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/caption_image")
                .header(http::header::CONTENT_TYPE, "application/json")
                .body(r#"{"template_id":"181913649"}"#.to_string())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
}
