use std::{collections::HashMap, sync::Arc};

use axum::{extract::State, routing::get, routing::post, Form, Json, Router};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::info;

pub const TEST_USERNAME: &str = "test-user";
pub const TEST_PASSWORD: &str = "test-pass";

pub const INVALID_LOGIN: &str = "Invalid username/password combination";
pub const INVALID_TEMPLATE: &str = "Invalid template_id";
pub const NO_TEXTS: &str = "No texts specified";
pub const INVALID_COLOR: &str = "Invalid color, expected #rrggbb";

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Template {
    pub id: String,
    pub name: String,
    pub url: String,
    pub width: u32,
    pub height: u32,
    pub box_count: u32,
}

#[derive(Debug, Serialize)]
struct TemplatesEnvelope {
    success: bool,
    data: TemplatesData,
}

#[derive(Debug, Serialize)]
struct TemplatesData {
    memes: Vec<Template>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CaptionEnvelope {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<CaptionData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CaptionData {
    pub url: String,
    pub page_url: String,
}

/// Templates, known accounts, and every caption form the server received.
pub struct MockState {
    pub templates: Vec<Template>,
    pub accounts: HashMap<String, String>,
    pub received: RwLock<Vec<HashMap<String, String>>>,
}

pub type Db = Arc<MockState>;

pub fn default_templates() -> Vec<Template> {
    vec![
        Template {
            id: "181913649".to_string(),
            name: "Drake Hotline Bling".to_string(),
            url: "https://i.imgflip.com/30b1gx.jpg".to_string(),
            width: 1200,
            height: 1200,
            box_count: 2,
        },
        Template {
            id: "87743020".to_string(),
            name: "Two Buttons".to_string(),
            url: "https://i.imgflip.com/1g8my4.jpg".to_string(),
            width: 600,
            height: 908,
            box_count: 3,
        },
        Template {
            id: "112126428".to_string(),
            name: "Distracted Boyfriend".to_string(),
            url: "https://i.imgflip.com/1ur9b0.jpg".to_string(),
            width: 1200,
            height: 800,
            box_count: 3,
        },
    ]
}

pub fn default_state() -> Db {
    Arc::new(MockState {
        templates: default_templates(),
        accounts: HashMap::from([(TEST_USERNAME.to_string(), TEST_PASSWORD.to_string())]),
        received: RwLock::new(Vec::new()),
    })
}

pub fn app() -> Router {
    app_with_state(default_state())
}

pub fn app_with_state(db: Db) -> Router {
    Router::new()
        .route("/get_memes", get(get_memes))
        .route("/caption_image", post(caption_image))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    run_with_state(listener, default_state()).await
}

pub async fn run_with_state(listener: TcpListener, db: Db) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with_state(db)).await
}

async fn get_memes(State(db): State<Db>) -> Json<TemplatesEnvelope> {
    info!(count = db.templates.len(), "listing templates");
    Json(TemplatesEnvelope {
        success: true,
        data: TemplatesData {
            memes: db.templates.clone(),
        },
    })
}

/// Mirrors the real endpoint: failures are HTTP 200 with `success: false`.
async fn caption_image(
    State(db): State<Db>,
    Form(fields): Form<HashMap<String, String>>,
) -> Json<CaptionEnvelope> {
    let verdict = check_caption(&db, &fields);
    let mut received = db.received.write().await;
    received.push(fields);
    let n = received.len();
    drop(received);

    match verdict {
        Ok(()) => {
            info!(n, "caption rendered");
            Json(CaptionEnvelope {
                success: true,
                data: Some(CaptionData {
                    url: format!("https://i.imgflip.com/mock{n}.jpg"),
                    page_url: format!("https://imgflip.com/i/mock{n}"),
                }),
                error_message: None,
            })
        }
        Err(message) => {
            info!(n, error = message, "caption rejected");
            Json(CaptionEnvelope {
                success: false,
                data: None,
                error_message: Some(message.to_string()),
            })
        }
    }
}

fn check_caption(db: &MockState, fields: &HashMap<String, String>) -> Result<(), &'static str> {
    match db.accounts.get(field(fields, "username")) {
        Some(password) if password == field(fields, "password") && !password.is_empty() => {}
        _ => return Err(INVALID_LOGIN),
    }
    if !db.templates.iter().any(|t| t.id == field(fields, "template_id")) {
        return Err(INVALID_TEMPLATE);
    }

    let has_box_text = fields
        .iter()
        .any(|(k, v)| k.starts_with("boxes[") && k.ends_with("][text]") && !v.is_empty());
    if field(fields, "text0").is_empty() && field(fields, "text1").is_empty() && !has_box_text {
        return Err(NO_TEXTS);
    }

    let bad_color = fields.iter().any(|(k, v)| {
        (k.ends_with("][color]") || k.ends_with("][outline_color]")) && !is_hex_color(v)
    });
    if bad_color {
        return Err(INVALID_COLOR);
    }
    Ok(())
}

fn field<'a>(fields: &'a HashMap<String, String>, key: &str) -> &'a str {
    fields.get(key).map(String::as_str).unwrap_or("")
}

fn is_hex_color(value: &str) -> bool {
    value
        .strip_prefix('#')
        .is_some_and(|hex| hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn valid(extra: &[(&str, &str)]) -> HashMap<String, String> {
        let mut f = fields(&[
            ("template_id", "181913649"),
            ("username", TEST_USERNAME),
            ("password", TEST_PASSWORD),
        ]);
        f.extend(fields(extra));
        f
    }

    #[test]
    fn accepts_top_text() {
        let db = default_state();
        assert_eq!(check_caption(&db, &valid(&[("text0", "hi")])), Ok(()));
    }

    #[test]
    fn rejects_bad_login() {
        let db = default_state();
        let mut f = valid(&[("text0", "hi")]);
        f.insert("password".into(), "wrong".into());
        assert_eq!(check_caption(&db, &f), Err(INVALID_LOGIN));
        f.remove("username");
        assert_eq!(check_caption(&db, &f), Err(INVALID_LOGIN));
    }

    #[test]
    fn rejects_unknown_template() {
        let db = default_state();
        let mut f = valid(&[("text0", "hi")]);
        f.insert("template_id".into(), "1".into());
        assert_eq!(check_caption(&db, &f), Err(INVALID_TEMPLATE));
    }

    #[test]
    fn empty_boxes_alone_are_no_text() {
        let db = default_state();
        assert_eq!(check_caption(&db, &valid(&[("boxes[0][text]", "")])), Err(NO_TEXTS));
        assert_eq!(
            check_caption(&db, &valid(&[("boxes[0][text]", ""), ("boxes[1][text]", "b")])),
            Ok(())
        );
    }

    #[test]
    fn colors_must_be_hash_hex() {
        let db = default_state();
        let ok = valid(&[("boxes[0][text]", "a"), ("boxes[0][color]", "#ffa500")]);
        assert_eq!(check_caption(&db, &ok), Ok(()));
        let bad = valid(&[("boxes[0][text]", "a"), ("boxes[0][outline_color]", "16753920")]);
        assert_eq!(check_caption(&db, &bad), Err(INVALID_COLOR));
    }

    #[test]
    fn caption_envelope_omits_absent_parts() {
        let json = serde_json::to_value(CaptionEnvelope {
            success: false,
            data: None,
            error_message: Some(NO_TEXTS.to_string()),
        })
        .unwrap();
        assert_eq!(json, serde_json::json!({"success": false, "error_message": NO_TEXTS}));
    }
}
