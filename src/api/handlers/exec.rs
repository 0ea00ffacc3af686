// 命令执行处理器

use actix_web::{web, HttpResponse};
use tracing::info;

use crate::api::models::ExecRequest;
use crate::errors::BridgeError;
use crate::executor::ShellExecutor;

/// 执行 shell 命令
///
/// 请求体必须是带非空 `command` 字段的 JSON 对象，否则 400，
/// 不会启动任何进程。进程层面的失败（非零退出、超时、启动失败）
/// 仍是 200 响应，由结果里的 `success` 表达。
pub async fn execute_command(
    executor: web::Data<ShellExecutor>,
    body: web::Bytes,
) -> Result<HttpResponse, BridgeError> {
    let request: ExecRequest = serde_json::from_slice(&body)?;

    if request.command.trim().is_empty() {
        return Err(BridgeError::validation("No command"));
    }

    info!("执行命令: {}", request.command);
    let result = executor.execute(&request.command).await;

    Ok(HttpResponse::Ok().json(result))
}
