// API 集成测试
// 在内存中组装完整路由表，不依赖真实后端

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::{test, web, App};
    use serde_json::Value;

    use crate::api::models::SERVICE_NAME;
    use crate::api::routes::ApiRouteConfig;
    use crate::config::{ExecutorConfig, VaultConfig};
    use crate::executor::ShellExecutor;
    use crate::vault::VaultClient;

    /// 指向不可达端口的后端客户端，用于验证失败归一化
    fn offline_vault() -> web::Data<VaultClient> {
        let config = VaultConfig {
            base_url: "https://127.0.0.1:9".to_string(),
            api_key: "test-key".to_string(),
            timeout_seconds: 1,
            trust_local_cert: true,
        };
        web::Data::new(VaultClient::new(&config).expect("构建测试客户端"))
    }

    fn test_executor() -> web::Data<ShellExecutor> {
        web::Data::new(ShellExecutor::new(ExecutorConfig {
            shell: "sh".to_string(),
            shell_args: vec!["-c".to_string()],
            timeout_seconds: 5,
        }))
    }

    macro_rules! test_app {
        () => {
            test::init_service(
                App::new()
                    .app_data(offline_vault())
                    .app_data(test_executor())
                    .configure(ApiRouteConfig::configure),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn test_exec_without_command_returns_400() {
        let app = test_app!();

        let req = test::TestRequest::post()
            .uri("/exec")
            .set_json(serde_json::json!({}))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "No command");
    }

    #[actix_web::test]
    async fn test_exec_empty_command_returns_400() {
        let app = test_app!();

        let req = test::TestRequest::post()
            .uri("/exec")
            .set_json(serde_json::json!({ "command": "   " }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_exec_malformed_json_returns_400() {
        let app = test_app!();

        let req = test::TestRequest::post()
            .uri("/exec")
            .insert_header(("content-type", "application/json"))
            .set_payload("{ not json")
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert!(body.get("error").is_some());
    }

    #[cfg(unix)]
    #[actix_web::test]
    async fn test_exec_runs_command() {
        let app = test_app!();

        let req = test::TestRequest::post()
            .uri("/exec")
            .set_json(serde_json::json!({ "command": "echo ok" }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["output"], "ok\n");
        assert_eq!(body["error"], "");
    }

    #[cfg(unix)]
    #[actix_web::test]
    async fn test_powershell_alias_runs_command() {
        let app = test_app!();

        let req = test::TestRequest::post()
            .uri("/powershell")
            .set_json(serde_json::json!({ "command": "exit 3" }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        // 进程失败不是传输失败
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], false);
    }

    #[actix_web::test]
    async fn test_health_reports_backend_offline() {
        let app = test_app!();

        let req = test::TestRequest::get().uri("/health").to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["status"], "online");
        assert_eq!(body["service"], SERVICE_NAME);
        assert_eq!(body["obsidian"], "offline");
    }

    #[actix_web::test]
    async fn test_root_serves_health() {
        let app = test_app!();

        let req = test::TestRequest::get().uri("/").to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn test_unknown_path_returns_404_json() {
        let app = test_app!();

        for req in [
            test::TestRequest::get().uri("/unknown/path").to_request(),
            test::TestRequest::post().uri("/unknown/path").to_request(),
            test::TestRequest::delete().uri("/exec").to_request(),
        ] {
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::NOT_FOUND);
            let body: Value = test::read_body_json(resp).await;
            assert_eq!(body["error"], "Not found");
        }
    }

    #[actix_web::test]
    async fn test_options_preflight_returns_200() {
        let app = test_app!();

        let req = test::TestRequest::with_uri("/qualquer/caminho")
            .method(actix_web::http::Method::OPTIONS)
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn test_vault_backend_failure_is_transport_success() {
        let app = test_app!();

        let req = test::TestRequest::get().uri("/obsidian/vault").to_request();
        let resp = test::call_service(&app, req).await;

        // 后端连不上也不能变成分发器的 5xx
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], false);
        assert!(body.get("error").is_some());
        assert!(body.get("status").is_none());
    }

    #[actix_web::test]
    async fn test_search_forwards_to_backend() {
        let app = test_app!();

        let req = test::TestRequest::post()
            .uri("/obsidian/search")
            .set_json(serde_json::json!({ "query": "projeto" }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], false);
    }

    #[actix_web::test]
    async fn test_note_write_accepts_raw_text() {
        let app = test_app!();

        let req = test::TestRequest::put()
            .uri("/obsidian/vault/pasta/nota.md")
            .set_payload("# Conteúdo")
            .to_request();
        let resp = test::call_service(&app, req).await;

        // 后端离线，转发失败但响应仍是包装后的 JSON
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], false);
    }
}
