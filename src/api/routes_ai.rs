use actix_multipart::Multipart;
use actix_web::{post, web, HttpResponse, Result as WebResult};
use futures_util::TryStreamExt;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

use crate::api::models::AssistantRequest;
use crate::api::shape;
use crate::config::AppConfig;
use crate::llm::{
    models::{ContentPart, GenerationRequest, RetryPolicy},
    retry::{self, InvokeError},
    ModelProvider,
};

const MAX_IMAGE_BYTES: usize = 10 * 1024 * 1024;

fn retry_policy(config: &AppConfig) -> RetryPolicy {
    RetryPolicy::new(
        config.llm.retry.max_attempts,
        Duration::from_millis(config.llm.retry.base_delay_ms),
    )
}

#[post("/api/assistant")]
pub async fn assistant(
    config: web::Data<AppConfig>,
    llm: web::Data<Arc<dyn ModelProvider>>,
    req: web::Json<AssistantRequest>,
) -> WebResult<HttpResponse> {
    let prompt = match req.into_inner().prompt {
        Some(p) if !p.trim().is_empty() => p,
        _ => {
            return Ok(HttpResponse::BadRequest().json(json!({
                "success": false,
                "error": "Missing prompt",
            })))
        }
    };

    let request = GenerationRequest::new(
        config.llm.model.clone(),
        vec![
            ContentPart::Text(config.prompts.assistant.clone()),
            ContentPart::Text(prompt),
        ],
    );

    match retry::invoke(llm.get_ref().as_ref(), &request, retry_policy(&config)).await {
        Ok(result) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "text": result.text.unwrap_or_default(),
        }))),
        Err(InvokeError::ModelUnavailable { .. }) => {
            Ok(HttpResponse::ServiceUnavailable().json(json!({
                "success": false,
                "error": "model unavailable",
                "text": shape::fallback_assistant_text(),
            })))
        }
    }
}

#[post("/api/analyze-image")]
pub async fn analyze_image(
    config: web::Data<AppConfig>,
    llm: web::Data<Arc<dyn ModelProvider>>,
    mut payload: Multipart,
) -> WebResult<HttpResponse> {
    let mut image: Option<(String, Vec<u8>)> = None;

    while let Some(mut field) = payload.try_next().await? {
        if field.name() != Some("image") {
            continue;
        }

        let media_type = field
            .content_type()
            .map(|mime| mime.to_string())
            .unwrap_or_else(|| "image/jpeg".to_string());

        let mut data = Vec::new();
        while let Some(chunk) = field.try_next().await? {
            if data.len() + chunk.len() > MAX_IMAGE_BYTES {
                return Ok(HttpResponse::PayloadTooLarge().json(json!({
                    "error": "Image exceeds the 10MB limit",
                })));
            }
            data.extend_from_slice(&chunk);
        }

        image = Some((media_type, data));
        break;
    }

    let Some((media_type, data)) = image.filter(|upload| !upload.1.is_empty()) else {
        return Ok(HttpResponse::BadRequest().json(json!({
            "error": "No image uploaded",
        })));
    };

    let request = GenerationRequest::new(
        config.llm.model.clone(),
        vec![
            ContentPart::InlineMedia { media_type, data },
            ContentPart::Text(config.prompts.analysis.clone()),
        ],
    );

    match retry::invoke(llm.get_ref().as_ref(), &request, retry_policy(&config)).await {
        Ok(result) => {
            let text = result.text.unwrap_or_default();
            Ok(HttpResponse::Ok().json(json!({
                "success": true,
                "result": shape::shape_analysis_output(&text),
            })))
        }
        Err(InvokeError::ModelUnavailable { .. }) => {
            Ok(HttpResponse::ServiceUnavailable().json(json!({
                "success": false,
                "error": "model unavailable",
                "result": shape::fallback_analysis(),
            })))
        }
    }
}
