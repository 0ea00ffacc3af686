// 统一错误类型定义

use actix_web::{HttpResponse, ResponseError};
use serde::{Deserialize, Serialize};

use thiserror::Error;
use tracing::error;

/// COMET Bridge 统一错误类型
///
/// 只覆盖分发器自身的失败模式：输入校验、路由、配置和序列化。
/// 外部协作者的失败不走这里，它们在各自内部归一化为 BridgeResult。
#[derive(Debug, Error, Serialize, Deserialize)]
#[serde(tag = "error_type", content = "details")]
pub enum BridgeError {
    /// 配置错误
    #[error("配置错误: {message}")]
    Configuration { message: String },

    /// 验证错误
    #[error("{message}")]
    Validation { message: String },

    /// 资源未找到
    #[error("Not found")]
    NotFound,

    /// 外部服务错误
    #[error("外部服务错误: {service} - {message}")]
    ExternalService { service: String, message: String },

    /// 超时错误
    #[error("请求超时: {operation}")]
    Timeout { operation: String },

    /// 内部服务器错误
    #[error("内部错误: {message}")]
    Internal { message: String },
}

impl BridgeError {
    /// 获取错误代码
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Configuration { .. } => "CONFIGURATION_ERROR",
            Self::Validation { .. } => "VALIDATION_ERROR",
            Self::NotFound => "NOT_FOUND",
            Self::ExternalService { .. } => "EXTERNAL_SERVICE_ERROR",
            Self::Timeout { .. } => "TIMEOUT_ERROR",
            Self::Internal { .. } => "INTERNAL_ERROR",
        }
    }

    /// 获取 HTTP 状态码
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Configuration { .. } => 500,
            Self::Validation { .. } => 400,
            Self::NotFound => 404,
            Self::ExternalService { .. } => 502,
            Self::Timeout { .. } => 408,
            Self::Internal { .. } => 500,
        }
    }

    /// 是否为客户端错误
    pub fn is_client_error(&self) -> bool {
        matches!(self.status_code(), 400..=499)
    }

    /// 是否应该记录错误日志
    pub fn should_log(&self) -> bool {
        !matches!(self, Self::Validation { .. } | Self::NotFound)
    }

    /// 创建配置错误
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// 创建验证错误
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// 创建外部服务错误
    pub fn external_service(service: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ExternalService {
            service: service.into(),
            message: message.into(),
        }
    }

    /// 创建超时错误
    pub fn timeout(operation: impl Into<String>) -> Self {
        Self::Timeout {
            operation: operation.into(),
        }
    }

    /// 创建内部错误
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

/// 实现 ResponseError trait 以便与 Actix Web 集成
///
/// 响应体固定为 `{"error": <文本>}`，调用方在失败时也总能拿到 JSON 对象
impl ResponseError for BridgeError {
    fn status_code(&self) -> actix_web::http::StatusCode {
        actix_web::http::StatusCode::from_u16(self.status_code())
            .unwrap_or(actix_web::http::StatusCode::INTERNAL_SERVER_ERROR)
    }

    fn error_response(&self) -> HttpResponse {
        if self.should_log() {
            error!(
                error_code = %self.error_code(),
                error_message = %self,
                "处理请求时发生错误"
            );
        }

        HttpResponse::build(ResponseError::status_code(self))
            .json(serde_json::json!({ "error": self.to_string() }))
    }
}

/// 从 std::io::Error 转换
impl From<std::io::Error> for BridgeError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => Self::NotFound,
            std::io::ErrorKind::TimedOut => Self::timeout("IO 操作"),
            _ => Self::internal(format!("IO 错误: {}", err)),
        }
    }
}

/// 从 serde_json::Error 转换
impl From<serde_json::Error> for BridgeError {
    fn from(err: serde_json::Error) -> Self {
        Self::validation(format!("JSON 解析错误: {}", err))
    }
}

/// 从 config::ConfigError 转换
impl From<config::ConfigError> for BridgeError {
    fn from(err: config::ConfigError) -> Self {
        Self::configuration(format!("配置加载错误: {}", err))
    }
}
