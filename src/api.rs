//! HTTP webhook server for the telephony platform.
//!
//! Caller-facing routes always answer 200 with a voice document: malformed
//! form bodies or query strings are treated as missing values.

use axum::{
    extract::{
        rejection::{FormRejection, QueryRejection},
        DefaultBodyLimit, Query, State,
    },
    http::{header, HeaderValue},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Form, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, info_span, Instrument};
use vaani_core::config::{ServerConfig, TelephonyConfig};
use vaani_telephony::{VoiceResponse, VoiceWebhook};

use crate::ivr::{self, INCOMING_CALL_PATH, PROCESS_SPEECH_PATH, SELECT_LANGUAGE_PATH};
use crate::responder::Responder;

/// Shared state for webhook handlers. Read-only after startup.
#[derive(Clone)]
pub struct AppState {
    responder: Responder,
    telephony: Arc<TelephonyConfig>,
    content_type: HeaderValue,
    uptime: Instant,
}

impl AppState {
    pub fn new(
        responder: Responder,
        telephony: TelephonyConfig,
        server: &ServerConfig,
    ) -> anyhow::Result<Self> {
        let content_type = HeaderValue::from_str(&server.markup_content_type).map_err(|e| {
            anyhow::anyhow!(
                "invalid server.markup_content_type '{}': {e}",
                server.markup_content_type
            )
        })?;
        Ok(Self {
            responder,
            telephony: Arc::new(telephony),
            content_type,
            uptime: Instant::now(),
        })
    }
}

/// `?lang=` on the speech callback.
#[derive(Debug, Default, Deserialize)]
struct SpeechQuery {
    lang: Option<String>,
}

/// Render a voice document with the configured content type.
fn markup(state: &AppState, doc: VoiceResponse) -> Response {
    (
        [(header::CONTENT_TYPE, state.content_type.clone())],
        doc.to_xml(),
    )
        .into_response()
}

/// Unwrap a form body, treating any rejection as an empty payload.
fn webhook_or_default(form: Result<Form<VoiceWebhook>, FormRejection>) -> VoiceWebhook {
    match form {
        Ok(Form(hook)) => hook,
        Err(e) => {
            debug!("unparseable webhook body, treating as empty: {e}");
            VoiceWebhook::default()
        }
    }
}

/// `POST /incoming_call`: Language menu.
async fn incoming_call(
    State(state): State<AppState>,
    form: Result<Form<VoiceWebhook>, FormRejection>,
) -> Response {
    let hook = webhook_or_default(form);
    info!(call_sid = hook.call_sid(), "incoming call");
    markup(&state, ivr::incoming_call(&state.telephony))
}

/// `POST /select_language`: Keypad choice from the menu.
async fn select_language(
    State(state): State<AppState>,
    form: Result<Form<VoiceWebhook>, FormRejection>,
) -> Response {
    let hook = webhook_or_default(form);
    debug!(call_sid = hook.call_sid(), digits = hook.digits(), "select_language");
    markup(&state, ivr::select_language(&state.telephony, hook.digits()))
}

/// `POST /process_speech?lang=<code>`: One recognized utterance.
async fn process_speech(
    State(state): State<AppState>,
    query: Result<Query<SpeechQuery>, QueryRejection>,
    form: Result<Form<VoiceWebhook>, FormRejection>,
) -> Response {
    let query = query.map(|Query(q)| q).unwrap_or_default();
    let hook = webhook_or_default(form);
    debug!(
        call_sid = hook.call_sid(),
        lang = query.lang.as_deref().unwrap_or("-"),
        confidence = hook.confidence(),
        "process_speech"
    );
    let span = info_span!("turn", call_sid = hook.call_sid());
    let doc = ivr::speech_turn(
        &state.telephony,
        &state.responder,
        hook.transcript(),
        query.lang.as_deref(),
    )
    .instrument(span)
    .await;
    markup(&state, doc)
}

/// `GET /health`: Liveness with uptime and provider identity.
async fn health(State(state): State<AppState>) -> Json<Value> {
    let provider = state.responder.provider();
    Json(json!({
        "status": "ok",
        "uptime_secs": state.uptime.elapsed().as_secs(),
        "provider": provider.name(),
        "model": provider.model(),
    }))
}

/// Build the axum router with shared state.
pub fn build_router(state: AppState, max_body_bytes: usize) -> Router {
    Router::new()
        .route(INCOMING_CALL_PATH, post(incoming_call))
        .route(SELECT_LANGUAGE_PATH, post(select_language))
        .route(PROCESS_SPEECH_PATH, post(process_speech))
        .route("/health", get(health))
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .with_state(state)
}

/// Bind and serve until Ctrl-C.
pub async fn serve(server: &ServerConfig, state: AppState) -> anyhow::Result<()> {
    let app = build_router(state, server.max_body_bytes);
    let addr = server.bind_addr();

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| anyhow::anyhow!("failed to bind {addr}: {e}"))?;

    info!("webhook server listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("webhook server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
