// 笔记库转发处理器
// 把请求转发给 Obsidian Local REST API 后端并原样包装结果

use actix_web::{web, HttpResponse};
use serde_json::Value;

use crate::api::models::SearchRequest;
use crate::vault::VaultClient;

/// 列出 vault 根目录
pub async fn list_vault(vault: web::Data<VaultClient>) -> HttpResponse {
    HttpResponse::Ok().json(vault.list_vault().await)
}

/// 读取笔记
pub async fn read_note(vault: web::Data<VaultClient>, path: web::Path<String>) -> HttpResponse {
    HttpResponse::Ok().json(vault.read_note(&path).await)
}

/// 写入笔记
///
/// 请求体是 `{content: string}` 的 JSON 对象或原始文本，
/// 正文按 text/markdown 转发
pub async fn write_note(
    vault: web::Data<VaultClient>,
    path: web::Path<String>,
    body: web::Bytes,
) -> HttpResponse {
    let content = extract_content(&body);
    HttpResponse::Ok().json(vault.write_note(&path, content).await)
}

/// 简单搜索
///
/// 请求体解析失败时退化为空查询，后端决定如何响应
pub async fn search_vault(vault: web::Data<VaultClient>, body: web::Bytes) -> HttpResponse {
    let request: SearchRequest = serde_json::from_slice(&body).unwrap_or_default();
    HttpResponse::Ok().json(vault.search(&request.query).await)
}

/// JSON 对象取 `content` 字段，其余情况按原始文本处理
fn extract_content(body: &web::Bytes) -> String {
    if let Ok(Value::Object(map)) = serde_json::from_slice::<Value>(body) {
        return match map.get("content") {
            Some(Value::String(content)) => content.clone(),
            _ => String::new(),
        };
    }

    String::from_utf8_lossy(body).into_owned()
}
