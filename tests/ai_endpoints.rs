#[cfg(test)]
mod tests {
    use actix_web::{test, web, App};
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    use dermalens::api::{routes_ai, shape};
    use dermalens::config::{
        AppConfig, DatabaseConfig, LlmConfig, PromptsConfig, RetryConfig, ServerConfig,
    };
    use dermalens::llm::models::{GenerationRequest, GenerationResult};
    use dermalens::llm::{LlmError, ModelProvider};

    /// Either always fails or always replies with a fixed text.
    struct TestProvider {
        reply: Option<&'static str>,
        calls: AtomicU32,
    }

    impl TestProvider {
        fn replying(reply: &'static str) -> Arc<Self> {
            Arc::new(Self {
                reply: Some(reply),
                calls: AtomicU32::new(0),
            })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self {
                reply: None,
                calls: AtomicU32::new(0),
            })
        }

        fn calls(&self) -> u32 {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ModelProvider for TestProvider {
        fn name(&self) -> &str {
            "test"
        }

        async fn generate(
            &self,
            _request: &GenerationRequest,
        ) -> Result<GenerationResult, LlmError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.reply {
                Some(text) => Ok(GenerationResult {
                    text: Some(text.to_string()),
                }),
                None => Err(LlmError::Api("test failure".to_string())),
            }
        }
    }

    fn test_config() -> AppConfig {
        AppConfig {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
            },
            database: DatabaseConfig {
                path: ":memory:".to_string(),
            },
            llm: LlmConfig {
                provider: "gemini".to_string(),
                model: "test-model".to_string(),
                gemini: None,
                // Keep test retries fast; the delay schedule itself is
                // covered by the retry_invoker tests.
                retry: RetryConfig {
                    max_attempts: 3,
                    base_delay_ms: 1,
                },
            },
            prompts: PromptsConfig {
                assistant: "assistant instruction".to_string(),
                analysis: "analysis instruction".to_string(),
            },
        }
    }

    // The concrete service type is unnameable, so app construction lives in
    // a macro instead of a helper fn.
    macro_rules! spawn_app {
        ($provider:expr) => {{
            let provider_dyn: Arc<dyn ModelProvider> = $provider;
            test::init_service(
                App::new()
                    .app_data(web::Data::new(test_config()))
                    .app_data(web::Data::new(provider_dyn))
                    .service(routes_ai::assistant)
                    .service(routes_ai::analyze_image),
            )
            .await
        }};
    }

    fn multipart_image(boundary: &str, bytes: &[u8]) -> Vec<u8> {
        let mut body = Vec::new();
        body.extend_from_slice(format!("--{}\r\n", boundary).as_bytes());
        body.extend_from_slice(
            b"Content-Disposition: form-data; name=\"image\"; filename=\"photo.jpg\"\r\n",
        );
        body.extend_from_slice(b"Content-Type: image/jpeg\r\n\r\n");
        body.extend_from_slice(bytes);
        body.extend_from_slice(format!("\r\n--{}--\r\n", boundary).as_bytes());
        body
    }

    #[actix_web::test]
    async fn assistant_without_prompt_is_rejected_before_any_model_call() {
        let provider = TestProvider::replying("unused");
        let app = spawn_app!(provider.clone());

        let req = test::TestRequest::post()
            .uri("/api/assistant")
            .set_json(json!({}))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), 400);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({"success": false, "error": "Missing prompt"}));
        assert_eq!(provider.calls(), 0);
    }

    #[actix_web::test]
    async fn assistant_returns_model_text_verbatim() {
        let provider = TestProvider::replying("Use a gentle cleanser twice a day.");
        let app = spawn_app!(provider.clone());

        let req = test::TestRequest::post()
            .uri("/api/assistant")
            .set_json(json!({"prompt": "How do I treat oily skin?"}))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), 200);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(
            body,
            json!({"success": true, "text": "Use a gentle cleanser twice a day."})
        );
        assert_eq!(provider.calls(), 1);
    }

    #[actix_web::test]
    async fn assistant_falls_back_when_the_model_stays_down() {
        let provider = TestProvider::failing();
        let app = spawn_app!(provider.clone());

        let req = test::TestRequest::post()
            .uri("/api/assistant")
            .set_json(json!({"prompt": "hello"}))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), 503);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "model unavailable");
        assert_eq!(body["text"], shape::fallback_assistant_text());
        assert_eq!(provider.calls(), 3);
    }

    #[actix_web::test]
    async fn analyze_image_without_file_is_rejected() {
        let provider = TestProvider::replying("unused");
        let app = spawn_app!(provider.clone());

        let boundary = "boundary42";
        let req = test::TestRequest::post()
            .uri("/api/analyze-image")
            .insert_header((
                "content-type",
                format!("multipart/form-data; boundary={}", boundary),
            ))
            .set_payload(format!("--{}--\r\n", boundary))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), 400);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({"error": "No image uploaded"}));
        assert_eq!(provider.calls(), 0);
    }

    #[actix_web::test]
    async fn analyze_image_passes_parsed_json_through() {
        let provider = TestProvider::replying(r#"{"diagnosis":"acne","confidence":80}"#);
        let app = spawn_app!(provider.clone());

        let boundary = "boundary42";
        let req = test::TestRequest::post()
            .uri("/api/analyze-image")
            .insert_header((
                "content-type",
                format!("multipart/form-data; boundary={}", boundary),
            ))
            .set_payload(multipart_image(boundary, b"\xff\xd8fakejpeg"))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), 200);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(
            body,
            json!({"success": true, "result": {"diagnosis": "acne", "confidence": 80}})
        );
    }

    #[actix_web::test]
    async fn analyze_image_wraps_non_json_replies() {
        let provider = TestProvider::replying("hello");
        let app = spawn_app!(provider.clone());

        let boundary = "boundary42";
        let req = test::TestRequest::post()
            .uri("/api/analyze-image")
            .insert_header((
                "content-type",
                format!("multipart/form-data; boundary={}", boundary),
            ))
            .set_payload(multipart_image(boundary, b"\xff\xd8fakejpeg"))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), 200);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({"success": true, "result": {"rawText": "hello"}}));
    }

    #[actix_web::test]
    async fn analyze_image_serves_the_fixed_fallback_on_exhaustion() {
        let provider = TestProvider::failing();
        let app = spawn_app!(provider.clone());

        let boundary = "boundary42";
        let mut bodies = Vec::new();
        for _ in 0..2 {
            let req = test::TestRequest::post()
                .uri("/api/analyze-image")
                .insert_header((
                    "content-type",
                    format!("multipart/form-data; boundary={}", boundary),
                ))
                .set_payload(multipart_image(boundary, b"\xff\xd8fakejpeg"))
                .to_request();
            let resp = test::call_service(&app, req).await;

            assert_eq!(resp.status(), 503);
            let body: serde_json::Value = test::read_body_json(resp).await;
            assert_eq!(body["success"], false);
            assert_eq!(body["error"], "model unavailable");
            assert_eq!(body["result"]["diagnosis"], "other");
            assert_eq!(body["result"]["refer_to_dermatologist"], false);
            bodies.push(body);
        }

        // The fallback is a constant, identical across failing calls.
        assert_eq!(bodies[0], bodies[1]);
    }
}
