// 路由配置
// 有限路由表：健康探测、命令执行、笔记库转发，其余一律 404

use actix_web::http::Method;
use actix_web::{web, HttpRequest, HttpResponse};

use super::handlers::{exec, health, vault};

/// API 路由配置
pub struct ApiRouteConfig;

impl ApiRouteConfig {
    /// 注册所有路由
    ///
    /// 字面路径在笔记通配路由之前注册，`{note:.*}` 允许笔记路径
    /// 包含子目录分隔符
    pub fn configure(cfg: &mut web::ServiceConfig) {
        cfg.route("/", web::get().to(health::health_check))
            .route("/health", web::get().to(health::health_check))
            .route("/exec", web::post().to(exec::execute_command))
            .route("/powershell", web::post().to(exec::execute_command))
            .route("/obsidian/vault", web::get().to(vault::list_vault))
            .route("/obsidian/vault/", web::get().to(vault::list_vault))
            .route("/obsidian/search", web::post().to(vault::search_vault))
            .route("/obsidian/vault/{note:.*}", web::get().to(vault::read_note))
            .route("/obsidian/vault/{note:.*}", web::post().to(vault::write_note))
            .route("/obsidian/vault/{note:.*}", web::put().to(vault::write_note))
            .default_service(web::route().to(fallback));
    }
}

/// 未命中路由表的请求
///
/// OPTIONS 预检放行为空 200（CORS 头由中间件补齐），
/// 其余方法和路径一律 404，响应体始终是 JSON
async fn fallback(req: HttpRequest) -> HttpResponse {
    if req.method() == Method::OPTIONS {
        return HttpResponse::Ok().finish();
    }

    HttpResponse::NotFound().json(serde_json::json!({ "error": "Not found" }))
}
