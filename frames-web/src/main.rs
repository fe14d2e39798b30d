//! Servidor web Axum para compilar arquiteturas e inspecionar as chaves extraídas

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use frames_core::{
    config::DEFAULT_ARCH,
    inspect::{describe, feature_keys, FeatureKey, InspectEvent, Inspector, RuleInfo},
    macros::MACROS,
    FrameCompiler, FramesError, History, Sentence, TaggedCorpus, Warning,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Configuração lida do ambiente.
#[derive(Debug, Clone)]
struct ServerConfig {
    /// `FRAMES_ADDR`, padrão `0.0.0.0:3000`.
    addr: String,
    /// `FRAMES_ARCH`: arquitetura usada quando a requisição não traz uma.
    arch: String,
}

impl ServerConfig {
    fn from_env() -> Self {
        Self {
            addr: std::env::var("FRAMES_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string()),
            arch: std::env::var("FRAMES_ARCH").unwrap_or_else(|_| DEFAULT_ARCH.to_string()),
        }
    }
}

/// Estado compartilhado da aplicação
struct AppState {
    compiler: FrameCompiler,
    default_arch: String,
}

impl AppState {
    fn arch<'a>(&'a self, requested: &'a Option<String>) -> &'a str {
        requested.as_deref().unwrap_or(&self.default_arch)
    }
}

#[derive(Deserialize)]
struct CompileRequest {
    #[serde(default)]
    arch: Option<String>,
}

#[derive(Serialize)]
struct CompileResponse {
    rules: Vec<RuleInfo>,
    warnings: Vec<Warning>,
    left_context: usize,
    right_context: usize,
}

#[derive(Deserialize)]
struct ExtractRequest {
    #[serde(default)]
    arch: Option<String>,
    words: Vec<String>,
    /// Tags já hipotetizadas; `null` ou ausência deixa a posição sem tag.
    #[serde(default)]
    tags: Vec<Option<String>>,
    position: usize,
}

#[derive(Serialize)]
struct ExtractResponse {
    position: usize,
    features: Vec<FeatureKey>,
    warnings: Vec<Warning>,
}

/// Mensagem WebSocket recebida do cliente
#[derive(Deserialize)]
struct WsRequest {
    #[serde(default)]
    arch: Option<String>,
    words: Vec<String>,
    #[serde(default)]
    tags: Vec<Option<String>>,
}

fn bad_request(error: FramesError) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(serde_json::json!({ "error": error.to_string() })),
    )
        .into_response()
}

fn app(compiler: FrameCompiler, default_arch: String) -> Router {
    let state = Arc::new(AppState {
        compiler,
        default_arch,
    });

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/macros", get(macros_handler))
        .route("/compile", post(compile_handler))
        .route("/extract", post(extract_handler))
        .route("/ws", get(ws_handler))
        .layer(cors)
        .with_state(state)
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = ServerConfig::from_env();
    let addr: SocketAddr = match config.addr.parse() {
        Ok(addr) => addr,
        Err(e) => {
            tracing::error!("FRAMES_ADDR inválido '{}': {e}", config.addr);
            return;
        }
    };

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("não foi possível escutar em {addr}: {e}");
            return;
        }
    };
    info!("🚀 Servidor de arquiteturas iniciado em http://{addr} (padrão: {})", config.arch);
    if let Err(e) = axum::serve(listener, app(FrameCompiler::default(), config.arch)).await {
        tracing::error!("servidor encerrado com erro: {e}");
    }
}

/// Lista as macros disponíveis e suas expansões
async fn macros_handler() -> impl IntoResponse {
    let macros: Vec<serde_json::Value> = MACROS
        .iter()
        .map(|(name, expansion)| serde_json::json!({ "name": name, "expansion": expansion }))
        .collect();
    Json(macros)
}

/// Compila a arquitetura e descreve cada regra
async fn compile_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CompileRequest>,
) -> Response {
    match state.compiler.compile(state.arch(&req.arch)) {
        Ok(compiled) => Json(CompileResponse {
            rules: describe(&compiled),
            left_context: compiled.extractors.left_context(),
            right_context: compiled.extractors.right_context(),
            warnings: compiled.warnings,
        })
        .into_response(),
        Err(e) => bad_request(e),
    }
}

/// Chaves de todas as regras em uma posição
async fn extract_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ExtractRequest>,
) -> Response {
    let compiled = match state.compiler.compile(state.arch(&req.arch)) {
        Ok(compiled) => compiled,
        Err(e) => return bad_request(e),
    };
    if req.position >= req.words.len() {
        return bad_request(FramesError::CursorOutOfRange {
            sentence: 0,
            position: req.position,
        });
    }
    let sentence = match Sentence::with_partial_tags(req.words, req.tags) {
        Ok(sentence) => sentence,
        Err(e) => return bad_request(e),
    };
    let corpus = TaggedCorpus::from(vec![sentence]);
    Json(ExtractResponse {
        position: req.position,
        features: feature_keys(&compiled.extractors, &History::new(0, req.position), &corpus),
        warnings: compiled.warnings,
    })
    .into_response()
}

/// Upgrade HTTP → WebSocket
async fn ws_handler(ws: WebSocketUpgrade, State(state): State<Arc<AppState>>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_websocket(socket, state))
}

/// Recebe `{arch, words, tags}` e transmite os eventos de inspeção
async fn handle_websocket(mut socket: WebSocket, state: Arc<AppState>) {
    info!("WebSocket conectado");

    while let Some(Ok(msg)) = socket.recv().await {
        match msg {
            Message::Text(text) => {
                let req = match serde_json::from_str::<WsRequest>(&text) {
                    Ok(req) if !req.words.is_empty() => req,
                    _ => continue,
                };
                let arch = state.arch(&req.arch).to_string();
                let input = match Sentence::with_partial_tags(req.words, req.tags) {
                    Ok(input) => input,
                    Err(e) => {
                        let event = InspectEvent::Error {
                            message: e.to_string(),
                        };
                        if let Ok(json) = serde_json::to_string(&event) {
                            if socket.send(Message::Text(json)).await.is_err() {
                                return;
                            }
                        }
                        continue;
                    }
                };
                info!("Inspecionando via WebSocket [{arch}]: {} palavras", input.len());

                // A inspeção é síncrona: roda fora do runtime
                let (tx, rx) = std::sync::mpsc::channel::<InspectEvent>();
                let inspector = Inspector::new(state.compiler);
                let handle = tokio::task::spawn_blocking(move || {
                    inspector.inspect_streaming(&arch, input, tx);
                });
                handle.await.ok();

                let events: Vec<InspectEvent> = rx.try_iter().collect();
                for event in &events {
                    if let Ok(json) = serde_json::to_string(event) {
                        if socket.send(Message::Text(json)).await.is_err() {
                            return;
                        }
                    }
                }
            }
            Message::Close(_) => {
                info!("WebSocket desconectado");
                return;
            }
            Message::Ping(payload) => {
                let _ = socket.send(Message::Pong(payload)).await;
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request};
    use tower::ServiceExt;

    fn test_app() -> Router {
        app(FrameCompiler::default(), DEFAULT_ARCH.to_string())
    }

    async fn send(request: Request<Body>) -> (StatusCode, serde_json::Value) {
        let response = test_app().oneshot(request).await.unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    fn post(uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_macros_endpoint() {
        let request = Request::builder().uri("/macros").body(Body::empty()).unwrap();
        let (status, json) = send(request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json.as_array().unwrap().len(), MACROS.len());
        assert_eq!(json[2]["name"], "left3words");
    }

    #[tokio::test]
    async fn test_compile_default_arch() {
        let (status, json) = send(post("/compile", serde_json::json!({}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["rules"].as_array().unwrap().len(), 5);
        assert_eq!(json["left_context"], 2);
        assert_eq!(json["right_context"], 0);
    }

    #[tokio::test]
    async fn test_compile_reports_warnings() {
        let (status, json) =
            send(post("/compile", serde_json::json!({ "arch": "twoTags(-1,1),bogus" }))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["rules"][0]["name"], "TwoTags(t-1,t1)");
        assert_eq!(json["warnings"][0]["token"], "bogus");
    }

    #[tokio::test]
    async fn test_compile_error_is_bad_request() {
        let (status, json) =
            send(post("/compile", serde_json::json!({ "arch": "order(2,-1)" }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json["error"].as_str().unwrap().contains("-1"));
    }

    #[tokio::test]
    async fn test_extract_keys() {
        let body = serde_json::json!({
            "arch": "words(-1,1),twoTags(-1,1)",
            "words": ["I", "saw", "it"],
            "tags": ["PRP", null, "PRP"],
            "position": 1
        });
        let (status, json) = send(post("/extract", body)).await;
        assert_eq!(status, StatusCode::OK);
        let keys: Vec<&str> = json["features"]
            .as_array()
            .unwrap()
            .iter()
            .map(|f| f["key"].as_str().unwrap())
            .collect();
        assert_eq!(keys, vec!["I", "saw", "it", "PRP!PRP"]);
    }

    #[tokio::test]
    async fn test_extract_missing_tag_is_reported_per_rule() {
        let body = serde_json::json!({
            "arch": "words(0,0),tags(1,1)",
            "words": ["I", "saw", "it"],
            "position": 1
        });
        let (status, json) = send(post("/extract", body)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["features"][0]["key"], "saw");
        assert!(json["features"][1]["key"].is_null());
        assert!(json["features"][1]["error"].is_string());
    }

    #[tokio::test]
    async fn test_extract_rejects_surplus_tags() {
        let body = serde_json::json!({
            "arch": "words(0,0)",
            "words": ["a", "b"],
            "tags": ["X", "Y", "Z"],
            "position": 0
        });
        let (status, json) = send(post("/extract", body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json["error"].as_str().unwrap().contains("3 tags"));
    }

    #[tokio::test]
    async fn test_extract_position_out_of_range() {
        let body = serde_json::json!({ "words": ["a"], "position": 3 });
        let (status, json) = send(post("/extract", body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json["error"].is_string());
    }
}
