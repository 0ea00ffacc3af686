// Obsidian 笔记库客户端
// 面向 Local REST API 后端的 HTTP 客户端，携带静态 Bearer 凭证

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Method};
use tracing::{debug, warn};

use crate::bridge::BridgeResult;
use crate::config::VaultConfig;
use crate::errors::BridgeError;

/// 请求体形式
#[derive(Debug, Clone)]
pub enum VaultBody {
    /// JSON 值，按 application/json 发送
    Json(serde_json::Value),
    /// 原始文本，按给定 Content-Type 发送（笔记正文用 text/markdown）
    Raw {
        content: String,
        content_type: String,
    },
}

/// 笔记库后端客户端
///
/// 每次调用只尝试一次，没有重试；后端错误和传输错误都归一化为
/// BridgeResult，不会作为异常越过分发器边界。
#[derive(Debug, Clone)]
pub struct VaultClient {
    client: Client,
    base_url: String,
}

impl VaultClient {
    /// 创建客户端
    pub fn new(config: &VaultConfig) -> Result<Self, BridgeError> {
        let mut headers = HeaderMap::new();
        let mut bearer = HeaderValue::from_str(&format!("Bearer {}", config.api_key))
            .map_err(|e| BridgeError::configuration(format!("凭证包含非法字符: {}", e)))?;
        bearer.set_sensitive(true);
        headers.insert(AUTHORIZATION, bearer);

        let mut builder = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .default_headers(headers);

        // 后端是本机自签名证书的同宿主服务，只有显式开启时才放宽校验
        if config.trust_local_cert {
            builder = builder.danger_accept_invalid_certs(true);
        }

        let client = builder
            .build()
            .map_err(|e| BridgeError::internal(format!("创建 HTTP 客户端失败: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// 发起一次后端请求并归一化结果
    ///
    /// 成功响应体尝试按 JSON 解析，失败则原样作为文本返回；
    /// 后端错误响应带上其状态码，传输层错误没有状态码。
    pub async fn request(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<VaultBody>,
    ) -> BridgeResult {
        let url = format!("{}{}", self.base_url, endpoint);
        debug!("后端请求: {} {}", method, url);

        let mut request = self.client.request(method, &url);
        match body {
            Some(VaultBody::Json(value)) => {
                request = request.json(&value);
            }
            Some(VaultBody::Raw {
                content,
                content_type,
            }) => {
                request = request.header(CONTENT_TYPE, content_type).body(content);
            }
            None => {}
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                warn!("后端请求失败: {}", e);
                return BridgeResult::failure(e.to_string());
            }
        };

        let status = response.status();
        let text = match response.text().await {
            Ok(text) => text,
            Err(e) => {
                return if status.is_success() {
                    BridgeResult::failure(e.to_string())
                } else {
                    BridgeResult::failure_with_status(e.to_string(), status.as_u16())
                };
            }
        };

        if status.is_success() {
            match serde_json::from_str::<serde_json::Value>(&text) {
                Ok(value) => BridgeResult::data(value),
                Err(_) => BridgeResult::data(serde_json::Value::String(text)),
            }
        } else {
            debug!("后端错误响应: {} {}", status, text);
            BridgeResult::failure_with_status(text, status.as_u16())
        }
    }

    /// 轻量可达性探测
    pub async fn ping(&self) -> BridgeResult {
        self.request(Method::GET, "/", None).await
    }

    /// 列出 vault 根目录
    pub async fn list_vault(&self) -> BridgeResult {
        self.request(Method::GET, "/vault/", None).await
    }

    /// 读取笔记
    pub async fn read_note(&self, note: &str) -> BridgeResult {
        self.request(Method::GET, &format!("/vault/{}", note), None)
            .await
    }

    /// 写入笔记正文
    pub async fn write_note(&self, note: &str, content: String) -> BridgeResult {
        self.request(
            Method::PUT,
            &format!("/vault/{}", note),
            Some(VaultBody::Raw {
                content,
                content_type: "text/markdown".to_string(),
            }),
        )
        .await
    }

    /// 简单搜索
    pub async fn search(&self, query: &str) -> BridgeResult {
        self.request(
            Method::POST,
            "/search/simple/",
            Some(VaultBody::Json(serde_json::json!({ "query": query }))),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::VaultConfig;

    fn test_config(base_url: &str) -> VaultConfig {
        VaultConfig {
            base_url: base_url.to_string(),
            api_key: "test-key".to_string(),
            timeout_seconds: 2,
            trust_local_cert: true,
        }
    }

    #[test]
    fn test_client_construction() {
        assert!(VaultClient::new(&test_config("https://127.0.0.1:27124")).is_ok());
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = VaultClient::new(&test_config("https://127.0.0.1:27124/")).unwrap();
        assert_eq!(client.base_url, "https://127.0.0.1:27124");
    }

    #[test]
    fn test_invalid_credential_rejected() {
        let mut config = test_config("https://127.0.0.1:27124");
        config.api_key = "bad\nkey".to_string();
        assert!(VaultClient::new(&config).is_err());
    }

    #[tokio::test]
    async fn test_transport_error_normalized() {
        // 端口 9（discard）上没有服务，连接失败必须归一化而不是 panic
        let client = VaultClient::new(&test_config("https://127.0.0.1:9")).unwrap();
        let result = client.ping().await;

        assert!(!result.success);
        assert!(result.error.is_some());
        assert!(result.status.is_none());
    }
}
