//! Home page, Swagger UI, ReDoc, and the OpenAPI document.

use axum::extract::State;
use axum::response::Html;
use axum::routing::get;
use axum::{Json, Router};
use html_escape::encode_text;
use serde_json::Value;

use crate::state::AppState;

pub const OPENAPI_PATH: &str = "/openapi.json";
pub const DOCS_PATH: &str = "/docs";
pub const REDOC_PATH: &str = "/redoc";

const SWAGGER_UI_VERSION: &str = "5";
const REDOC_VERSION: &str = "2";

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home))
        .route(DOCS_PATH, get(swagger_ui))
        .route(REDOC_PATH, get(redoc))
        .route(OPENAPI_PATH, get(openapi))
}

async fn home(State(state): State<AppState>) -> Html<String> {
    let general = &state.config.general;
    let name = encode_text(&general.app_name);
    Html(format!(
        r#"<!doctype html>
<html>
<head><meta charset="utf-8"><title>{name}</title></head>
<body>
<h1>{name}</h1>
<p>Version {version}, running in <code>{mode}</code> mode.</p>
<ul>
<li><a href="{DOCS_PATH}">Interactive API docs (Swagger UI)</a></li>
<li><a href="{REDOC_PATH}">API reference (ReDoc)</a></li>
<li><a href="{OPENAPI_PATH}">OpenAPI document</a></li>
</ul>
</body>
</html>
"#,
        version = encode_text(&general.app_version),
        mode = general.mode,
    ))
}

async fn swagger_ui(State(state): State<AppState>) -> Html<String> {
    let name = encode_text(&state.config.general.app_name);
    Html(format!(
        r##"<!doctype html>
<html>
<head>
<meta charset="utf-8">
<title>{name} - Swagger UI</title>
<link rel="stylesheet" href="https://cdn.jsdelivr.net/npm/swagger-ui-dist@{SWAGGER_UI_VERSION}/swagger-ui.css">
</head>
<body>
<div id="swagger-ui"></div>
<script src="https://cdn.jsdelivr.net/npm/swagger-ui-dist@{SWAGGER_UI_VERSION}/swagger-ui-bundle.js"></script>
<script>
window.ui = SwaggerUIBundle({{ url: "{OPENAPI_PATH}", dom_id: "#swagger-ui" }});
</script>
</body>
</html>
"##
    ))
}

async fn redoc(State(state): State<AppState>) -> Html<String> {
    Html(redoc_page(&state.config.general.app_name))
}

fn redoc_page(app_name: &str) -> String {
    format!(
        r#"<!doctype html>
<html>
<head>
<meta charset="utf-8">
<title>{name} - ReDoc</title>
</head>
<body>
<redoc spec-url="{OPENAPI_PATH}"></redoc>
<script src="https://cdn.jsdelivr.net/npm/redoc@{REDOC_VERSION}/bundles/redoc.standalone.js"></script>
</body>
</html>
"#,
        name = encode_text(app_name),
    )
}

async fn openapi(State(state): State<AppState>) -> Json<Value> {
    Json(state.openapi.as_ref().clone())
}
