// 桥接结果类型
// 所有外部协作者（进程执行器、笔记库客户端）的统一结果形状

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// 统一操作结果
///
/// HTTP 传输成功与操作成功是两回事：外部操作失败时响应仍是 200，
/// 由 `success` 字段表达结果。未设置的字段不参与序列化，
/// 因此命令执行结果和后端转发结果呈现各自的线格式。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BridgeResult {
    pub success: bool,
    /// 进程 stdout（仅命令执行路径）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    /// 后端响应数据（仅转发路径）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    /// 失败描述，或进程 stderr
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// 后端 HTTP 状态码（传输层失败时缺失）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
}

impl BridgeResult {
    /// 进程执行完毕：stdout/stderr 原样带回，成功与否由退出码决定
    pub fn completed(
        success: bool,
        output: impl Into<String>,
        error: impl Into<String>,
    ) -> Self {
        Self {
            success,
            output: Some(output.into()),
            data: None,
            error: Some(error.into()),
            status: None,
        }
    }

    /// 后端成功响应
    pub fn data(value: Value) -> Self {
        Self {
            success: true,
            output: None,
            data: Some(value),
            error: None,
            status: None,
        }
    }

    /// 无状态码的失败（传输错误、超时、启动失败）
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            output: None,
            data: None,
            error: Some(error.into()),
            status: None,
        }
    }

    /// 带后端状态码的失败
    pub fn failure_with_status(error: impl Into<String>, status: u16) -> Self {
        Self {
            success: false,
            output: None,
            data: None,
            error: Some(error.into()),
            status: Some(status),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completed_serializes_both_streams() {
        let result = BridgeResult::completed(true, "hello\n", "");
        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(json["success"], true);
        assert_eq!(json["output"], "hello\n");
        assert_eq!(json["error"], "");
        assert!(json.get("data").is_none());
        assert!(json.get("status").is_none());
    }

    #[test]
    fn test_data_omits_unset_fields() {
        let result = BridgeResult::data(serde_json::json!({"files": []}));
        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(json["success"], true);
        assert_eq!(json["data"]["files"], serde_json::json!([]));
        assert!(json.get("output").is_none());
        assert!(json.get("error").is_none());
    }

    #[test]
    fn test_failure_with_status() {
        let result = BridgeResult::failure_with_status("not found", 404);
        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(json["success"], false);
        assert_eq!(json["error"], "not found");
        assert_eq!(json["status"], 404);
    }
}
