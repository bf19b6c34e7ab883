//! Text assist endpoints
//!
//! Thin JSON wrappers over the configured [`TextAssist`] backend. These never
//! fail on content: every request with a well-formed body gets an answer.
//!
//! [`TextAssist`]: civitas_common::assist::TextAssist

use axum::{extract::State, routing::post, Json, Router};
use civitas_common::assist::{
    PromptContext, ProofreadOptions, RewriteOptions, SummaryOptions, TranslateOptions,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::AppState;

/// POST /api/ai/summarize body
#[derive(Debug, Deserialize)]
pub struct SummarizeRequest {
    #[serde(default)]
    pub text: String,
    #[serde(flatten)]
    pub options: SummaryOptions,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SummarizeResponse {
    pub success: bool,
    pub summary: String,
    /// Character counts
    pub original_length: usize,
    pub summary_length: usize,
}

/// POST /api/ai/proofread body
#[derive(Debug, Deserialize)]
pub struct ProofreadRequest {
    #[serde(default)]
    pub text: String,
    #[serde(flatten)]
    pub options: ProofreadOptions,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ProofreadResponse {
    pub success: bool,
    pub proofread_text: String,
    pub changes_made: bool,
}

/// POST /api/ai/rewrite body
#[derive(Debug, Deserialize)]
pub struct RewriteRequest {
    #[serde(default)]
    pub text: String,
    #[serde(flatten)]
    pub options: RewriteOptions,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RewriteResponse {
    pub success: bool,
    pub rewritten_text: String,
    pub original_text: String,
}

/// POST /api/ai/translate body
#[derive(Debug, Deserialize)]
pub struct TranslateRequest {
    #[serde(default)]
    pub text: String,
    #[serde(flatten)]
    pub options: TranslateOptions,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TranslateResponse {
    pub success: bool,
    pub translated_text: String,
    pub original_text: String,
    pub target_language: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GeneratePromptResponse {
    pub success: bool,
    pub prompt: String,
    pub context: String,
    pub task_type: String,
    pub role: String,
}

/// POST /api/ai/summarize
pub async fn summarize(
    State(state): State<AppState>,
    Json(request): Json<SummarizeRequest>,
) -> Json<SummarizeResponse> {
    let summary = state.assist.summarize(&request.text, &request.options).await;
    debug!(
        max_length = request.options.max_length,
        style = request.options.style.as_str(),
        backend = state.assist.name(),
        "Summarized text"
    );

    Json(SummarizeResponse {
        success: true,
        original_length: request.text.chars().count(),
        summary_length: summary.chars().count(),
        summary,
    })
}

/// POST /api/ai/proofread
pub async fn proofread(
    State(state): State<AppState>,
    Json(request): Json<ProofreadRequest>,
) -> Json<ProofreadResponse> {
    let proofread_text = state.assist.proofread(&request.text, &request.options).await;
    debug!(
        style = request.options.style.as_str(),
        language = %request.options.language,
        "Proofread text"
    );

    Json(ProofreadResponse {
        success: true,
        changes_made: proofread_text != request.text,
        proofread_text,
    })
}

/// POST /api/ai/rewrite
pub async fn rewrite(
    State(state): State<AppState>,
    Json(request): Json<RewriteRequest>,
) -> Json<RewriteResponse> {
    let rewritten_text = state.assist.rewrite(&request.text, &request.options).await;
    debug!(tone = request.options.tone.as_str(), "Rewrote text");

    Json(RewriteResponse {
        success: true,
        rewritten_text,
        original_text: request.text,
    })
}

/// POST /api/ai/translate
pub async fn translate(
    State(state): State<AppState>,
    Json(request): Json<TranslateRequest>,
) -> Json<TranslateResponse> {
    let translated_text = state.assist.translate(&request.text, &request.options).await;

    Json(TranslateResponse {
        success: true,
        translated_text,
        original_text: request.text,
        target_language: request.options.target_language,
    })
}

/// POST /api/ai/generate-prompt
pub async fn generate_prompt(
    State(state): State<AppState>,
    Json(request): Json<PromptContext>,
) -> Json<GeneratePromptResponse> {
    let prompt = state.assist.generate_prompt(&request).await;
    debug!(task_type = %request.task_type, role = %request.role, "Generated strategy prompt");

    Json(GeneratePromptResponse {
        success: true,
        prompt,
        context: request.context,
        task_type: request.task_type,
        role: request.role,
    })
}

/// Build assist routes
pub fn assist_routes() -> Router<AppState> {
    Router::new()
        .route("/api/ai/summarize", post(summarize))
        .route("/api/ai/proofread", post(proofread))
        .route("/api/ai/rewrite", post(rewrite))
        .route("/api/ai/translate", post(translate))
        .route("/api/ai/generate-prompt", post(generate_prompt))
}
