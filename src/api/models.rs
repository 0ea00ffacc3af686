// API 请求与响应模型

use serde::{Deserialize, Serialize};

/// 健康探测响应里上报的服务名
pub const SERVICE_NAME: &str = "MANUS-COMET-OBSIDIAN Bridge";

/// 命令执行请求
#[derive(Debug, Default, Deserialize)]
pub struct ExecRequest {
    /// 要执行的命令文本，缺失或为空时拒绝请求
    #[serde(default)]
    pub command: String,
}

/// 简单搜索请求
#[derive(Debug, Default, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    pub query: String,
}

/// 健康探测响应
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    /// 笔记库后端可达性："online" 或 "offline"
    pub obsidian: &'static str,
}
