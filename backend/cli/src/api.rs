use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, Json},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::{json, Value};

use qudom_core::{diagnose, BuildOptions, Descriptor, Parser, TreeSpec};
use qudom_dom::HtmlRenderer;
use qudom_logging::{BuildEvent, EventLogger};

use crate::build_cmd::{render_spec, Rendered};

/// Shared application state for API handlers.
pub struct AppState {
    pub options: BuildOptions,
    pub renderer: HtmlRenderer,
    /// Tree rendered at `/`.
    pub page: TreeSpec,
}

type ApiError = (StatusCode, Json<Value>);

/// Build the Axum router with all routes.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/health", get(health))
        .route("/api/parse", get(parse))
        .route("/api/build", post(build))
        .with_state(state)
}

/// Page shown when no page file is configured.
pub fn demo_page() -> TreeSpec {
    TreeSpec::branch(
        "main#demo$max-width:40em$margin:0 auto$font-family:sans-serif",
        vec![
            TreeSpec::leaf("h1!qudom"),
            TreeSpec::leaf("p.lead!Element trees from one-line shorthand identifiers"),
            TreeSpec::branch(
                "ul.sigils",
                vec![
                    TreeSpec::leaf("li!# sets the id"),
                    TreeSpec::leaf("li!. adds a class"),
                    TreeSpec::leaf("li!@ sets an attribute as key:value or a bare flag"),
                    TreeSpec::leaf("li!$ adds a style as key:value"),
                    TreeSpec::leaf("li!! starts the inner content"),
                ],
            ),
            TreeSpec::branch(
                "form@action:/api/parse@method:get",
                vec![
                    TreeSpec::leaf("input@name:identifier@size:40@required"),
                    TreeSpec::leaf("button@type:submit!Parse"),
                ],
            ),
        ],
    )
}

/// Render the configured page as a full HTML document.
async fn index(State(state): State<Arc<AppState>>) -> Result<Html<String>, ApiError> {
    let rendered = render_spec(&state.page, &state.options, &state.renderer, "server")
        .map_err(|e| error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    Ok(Html(format!(
        "<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"><title>qudom</title></head>\n<body>\n{}\n</body>\n</html>\n",
        rendered.html.trim_end()
    )))
}

/// Health check endpoint.
async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "qudom",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

#[derive(Debug, Deserialize)]
pub struct ParseQuery {
    pub identifier: String,
    /// Overrides the configured strictness for this request.
    #[serde(default)]
    pub strict: Option<bool>,
}

/// Parse one identifier into its descriptor.
async fn parse(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ParseQuery>,
) -> Result<Json<Descriptor>, ApiError> {
    let parser = Parser::new().with_default_tag(state.options.default_tag.clone());

    let descriptor = if query.strict.unwrap_or(state.options.strict) {
        parser.parse_strict(&query.identifier).map_err(|e| {
            EventLogger::log_event("server", BuildEvent::Failed { error: e.to_string() });
            let problems: Vec<String> = diagnose(&query.identifier)
                .iter()
                .map(ToString::to_string)
                .collect();
            (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({
                    "error": e.to_string(),
                    "offset": e.offset(),
                    "problems": problems,
                })),
            )
        })?
    } else {
        parser.parse(&query.identifier)
    };

    EventLogger::log_event(
        "server",
        BuildEvent::IdentifierParsed {
            identifier: query.identifier.clone(),
            tag: descriptor.tag.clone(),
        },
    );
    Ok(Json(descriptor))
}

/// Build a posted tree spec and return its HTML.
async fn build(
    State(state): State<Arc<AppState>>,
    Json(spec): Json<TreeSpec>,
) -> Result<Json<Rendered>, ApiError> {
    render_spec(&spec, &state.options, &state.renderer, "server")
        .map(Json)
        .map_err(|e| error_response(StatusCode::UNPROCESSABLE_ENTITY, e.to_string()))
}

fn error_response(status: StatusCode, message: String) -> ApiError {
    tracing::error!(status = %status, error = %message, "Request failed");
    (status, Json(json!({ "error": message })))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(strict: bool) -> Arc<AppState> {
        Arc::new(AppState {
            options: BuildOptions {
                strict,
                ..Default::default()
            },
            renderer: HtmlRenderer::new().omit_empty_attributes(true),
            page: demo_page(),
        })
    }

    #[test]
    fn demo_page_passes_strict_checks() {
        let page = demo_page();
        let state = state(true);
        assert!(render_spec(&page, &state.options, &state.renderer, "test").is_ok());
    }

    #[tokio::test]
    async fn index_wraps_page_in_document() {
        let Html(body) = index(State(state(false))).await.unwrap();
        assert!(body.starts_with("<!DOCTYPE html>"));
        assert!(body.contains(
            r#"<main style="max-width:40em;margin:0 auto;font-family:sans-serif" id="demo">"#
        ));
        assert!(body.contains("<h1>qudom</h1>"));
    }

    #[tokio::test]
    async fn parse_returns_descriptor() {
        let query = ParseQuery {
            identifier: "p.note!hi".into(),
            strict: None,
        };
        let Json(descriptor) = parse(State(state(false)), Query(query)).await.unwrap();
        assert_eq!(descriptor.tag, "p");
        assert_eq!(descriptor.classes, vec!["note"]);
        assert_eq!(descriptor.content, "hi");
    }

    #[tokio::test]
    async fn strict_parse_is_unprocessable() {
        let query = ParseQuery {
            identifier: "p..x".into(),
            strict: Some(true),
        };
        let (status, Json(body)) = parse(State(state(false)), Query(query)).await.unwrap_err();
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["offset"], 2);
        assert!(!body["problems"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn build_returns_html_and_warnings() {
        let spec: TreeSpec =
            serde_json::from_value(json!({ "ul": ["li!a"], "ol": [] })).unwrap();
        let Json(rendered) = build(State(state(false)), Json(spec)).await.unwrap();
        assert_eq!(rendered.html, "<ul><li>a</li></ul>");
        assert_eq!(rendered.warnings.len(), 1);
    }

    #[tokio::test]
    async fn build_rejects_empty_mapping() {
        let spec: TreeSpec = serde_json::from_value(json!({})).unwrap();
        let (status, _) = build(State(state(false)), Json(spec)).await.unwrap_err();
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }
}
