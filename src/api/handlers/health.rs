// 健康检查处理器

use actix_web::{web, HttpResponse};

use crate::api::models::{HealthResponse, SERVICE_NAME};
use crate::vault::VaultClient;

/// 健康探测
///
/// 分发器自身在线即为 online，同时对笔记库后端做一次轻量 GET
/// 并上报其可达性，后端不可达不影响探测本身的 200 响应
pub async fn health_check(vault: web::Data<VaultClient>) -> HttpResponse {
    let probe = vault.ping().await;

    HttpResponse::Ok().json(HealthResponse {
        status: "online",
        service: SERVICE_NAME,
        obsidian: if probe.success { "online" } else { "offline" },
    })
}
