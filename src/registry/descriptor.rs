// 插件描述符与注册表快照类型定义

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// 插件类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PluginKind {
    /// Obsidian 内置插件
    Native,
    /// 社区插件
    Community,
}

/// 插件分类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PluginCategory {
    Navigation,
    Visual,
    Editing,
    Productivity,
    Utility,
    Ai,
    Data,
    Search,
    Integration,
    #[serde(other)]
    Other,
}

impl PluginCategory {
    /// 面向代理提示的分类显示名
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Ai => "🤖 Plugins de IA",
            Self::Productivity => "📋 Produtividade",
            Self::Navigation => "🧭 Navegação",
            Self::Visual => "🎨 Visual",
            Self::Data => "📊 Dados",
            Self::Search => "🔍 Busca",
            Self::Integration => "🔗 Integração",
            Self::Utility => "🔧 Utilitários",
            Self::Editing => "✏️ Edição",
            Self::Other => "📦 Outros",
        }
    }
}

/// 插件描述符
///
/// 注册表中的一条记录，来自静态种子或磁盘扫描发现的 manifest。
/// `triggers` 是小写自由文本短语，`integrations` 可以包含通配符 `*`
/// 表示与一切组合。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PluginDescriptor {
    /// 全注册表唯一的稳定键
    pub id: String,
    /// 显示名
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub author: String,
    #[serde(rename = "type")]
    pub kind: PluginKind,
    pub category: PluginCategory,
    /// 有序命令标识符，可以为空
    #[serde(default)]
    pub commands: Vec<String>,
    /// 触发词，按注册表存储顺序做子串匹配
    #[serde(default)]
    pub triggers: Vec<String>,
    /// 与之组合的其他插件 id
    #[serde(default)]
    pub integrations: Vec<String>,
    /// 依赖的外部服务名（仅文档用途）
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub api_required: Vec<String>,
    /// 示例短语（仅文档用途，不参与匹配）
    #[serde(default)]
    pub prompt_examples: Vec<String>,
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_true")]
    pub installed: bool,
    /// 最近一次（重新）注册的时间
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registered_at: Option<DateTime<Utc>>,
}

fn default_true() -> bool {
    true
}

/// 注册表快照
///
/// 唯一的持久化文档，只由扫描操作变更，进程启动时读取，
/// 每次扫描后原子写回。插件保持插入顺序，解析顺序由它定义。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistrySnapshot {
    #[serde(default)]
    pub plugins: IndexMap<String, PluginDescriptor>,
    #[serde(default)]
    pub last_scan: Option<DateTime<Utc>>,
    #[serde(default = "default_snapshot_version")]
    pub version: String,
}

fn default_snapshot_version() -> String {
    "1.0".to_string()
}

impl Default for RegistrySnapshot {
    fn default() -> Self {
        Self {
            plugins: IndexMap::new(),
            last_scan: None,
            version: default_snapshot_version(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_wire_format() {
        let json = serde_json::to_string(&PluginKind::Native).unwrap();
        assert_eq!(json, "\"native\"");
    }

    #[test]
    fn test_unknown_category_deserializes_as_other() {
        let category: PluginCategory = serde_json::from_str("\"holografia\"").unwrap();
        assert_eq!(category, PluginCategory::Other);
    }

    #[test]
    fn test_descriptor_round_trip() {
        let descriptor = PluginDescriptor {
            id: "omnisearch".to_string(),
            name: "Omnisearch".to_string(),
            version: Some("1.0.0".to_string()),
            description: "Busca avançada".to_string(),
            author: String::new(),
            kind: PluginKind::Community,
            category: PluginCategory::Search,
            commands: vec!["omnisearch:show-modal".to_string()],
            triggers: vec!["buscar".to_string()],
            integrations: vec![],
            api_required: vec![],
            prompt_examples: vec![],
            enabled: true,
            installed: true,
            registered_at: None,
        };

        let json = serde_json::to_string(&descriptor).unwrap();
        assert!(json.contains("\"type\":\"community\""));

        let parsed: PluginDescriptor = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.id, descriptor.id);
        assert_eq!(parsed.category, PluginCategory::Search);
        assert!(parsed.enabled);
    }

    #[test]
    fn test_snapshot_defaults() {
        let snapshot: RegistrySnapshot = serde_json::from_str("{}").unwrap();
        assert!(snapshot.plugins.is_empty());
        assert!(snapshot.last_scan.is_none());
        assert_eq!(snapshot.version, "1.0");
    }
}
