// 触发词注册表
// 静态种子与磁盘发现的插件合并后的内存目录，提供触发词解析、
// 分类/集成索引与 JSON 快照持久化

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tokio::fs;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, warn};

use crate::config::RegistryConfig;
use crate::errors::BridgeError;

use super::descriptor::{PluginCategory, PluginDescriptor, PluginKind, RegistrySnapshot};

/// main.js 中 addCommand 的 id 字段模式
static COMMAND_ID_PATTERN: OnceLock<Regex> = OnceLock::new();

fn command_id_pattern() -> &'static Regex {
    COMMAND_ID_PATTERN
        .get_or_init(|| Regex::new(r#"id:\s*["']([^"']+)["']"#).expect("命令模式是合法正则"))
}

/// 插件 manifest.json 中关心的字段
#[derive(Debug, Default, Deserialize)]
struct PluginManifest {
    #[serde(default)]
    id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    version: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    author: String,
}

/// 系统上下文文档（只读），提供 vault 路径
#[derive(Debug, Default, Deserialize)]
struct SystemContext {
    #[serde(default)]
    paths: ContextPaths,
}

#[derive(Debug, Default, Deserialize)]
struct ContextPaths {
    #[serde(default)]
    vault: String,
}

/// 面向外部代理的只读投影
///
/// `all_triggers` / `all_commands` 是反向索引，键冲突时后注册的
/// 插件静默覆盖先注册的（与原始行为一致，无冲突检测）
#[derive(Debug, Clone, Serialize)]
pub struct AgentExport {
    pub plugins: IndexMap<String, PluginDescriptor>,
    pub categories: Vec<PluginCategory>,
    pub ai_plugins: Vec<String>,
    pub all_triggers: IndexMap<String, String>,
    pub all_commands: IndexMap<String, String>,
    pub integration_graph: IndexMap<String, Vec<String>>,
    pub prompt_context: String,
}

/// 触发词注册表
///
/// 快照在扫描完成后视为不可变，读取不需要加锁协调；
/// 扫描（读-改-写快照及其文件）由互斥锁串行化。
pub struct TriggerRegistry {
    snapshot: RwLock<RegistrySnapshot>,
    seed: Vec<PluginDescriptor>,
    config: RegistryConfig,
    scan_lock: Mutex<()>,
}

impl TriggerRegistry {
    /// 用给定种子表和配置加载注册表
    ///
    /// 快照文件缺失或无法解析时从空注册表开始
    pub async fn load(
        seed: Vec<PluginDescriptor>,
        config: RegistryConfig,
    ) -> Result<Self, BridgeError> {
        let snapshot = Self::read_snapshot(&config.registry_file).await;
        info!(
            "插件注册表已加载: {} 个插件, 种子 {} 条",
            snapshot.plugins.len(),
            seed.len()
        );

        Ok(Self {
            snapshot: RwLock::new(snapshot),
            seed,
            config,
            scan_lock: Mutex::new(()),
        })
    }

    async fn read_snapshot(path: &Path) -> RegistrySnapshot {
        let raw = match fs::read_to_string(path).await {
            Ok(raw) => raw,
            Err(_) => return RegistrySnapshot::default(),
        };

        match serde_json::from_str(&raw) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                warn!("快照解析失败，使用空注册表: {}", e);
                RegistrySnapshot::default()
            }
        }
    }

    /// 解析插件目录：配置覆盖优先，否则从系统上下文推导
    async fn plugins_directory(&self) -> Option<PathBuf> {
        if let Some(dir) = &self.config.plugins_dir {
            return Some(dir.clone());
        }

        let raw = fs::read_to_string(&self.config.context_file).await.ok()?;
        let context: SystemContext = serde_json::from_str(&raw).ok()?;
        if context.paths.vault.is_empty() {
            return None;
        }

        Some(
            PathBuf::from(context.paths.vault)
                .join(".obsidian")
                .join("plugins"),
        )
    }

    /// 扫描插件目录并更新快照
    ///
    /// 返回磁盘上发现的插件。磁盘上消失的插件不会被移除，
    /// 静态定义的内置插件无论磁盘状态如何都重申为启用/已安装。
    pub async fn scan(&self) -> Result<Vec<PluginDescriptor>, BridgeError> {
        // 扫描串行化，防止交错写入破坏快照文件
        let _guard = self.scan_lock.lock().await;

        let mut discovered = Vec::new();

        if let Some(dir) = self.plugins_directory().await {
            match fs::read_dir(&dir).await {
                Ok(mut entries) => {
                    while let Ok(Some(entry)) = entries.next_entry().await {
                        let path = entry.path();
                        if !path.is_dir() {
                            continue;
                        }
                        if let Some(plugin) = self.load_discovered(&path).await {
                            discovered.push(plugin);
                        }
                    }
                }
                Err(e) => {
                    warn!("插件目录不可读: {}: {}", dir.display(), e);
                }
            }
        } else {
            debug!("未配置插件目录，跳过磁盘发现");
        }

        let now = Utc::now();
        let mut snapshot = self.snapshot.write().await;

        for plugin in &discovered {
            snapshot.plugins.insert(plugin.id.clone(), plugin.clone());
        }

        // 内置插件始终在场
        for definition in self.seed.iter().filter(|d| d.kind == PluginKind::Native) {
            let mut plugin = definition.clone();
            plugin.enabled = true;
            plugin.installed = true;
            plugin.registered_at = Some(now);
            snapshot.plugins.insert(plugin.id.clone(), plugin);
        }

        snapshot.last_scan = Some(now);
        Self::persist_snapshot(&self.config.registry_file, &snapshot).await?;

        info!(
            "扫描完成: 发现 {} 个插件, 注册表共 {} 条",
            discovered.len(),
            snapshot.plugins.len()
        );

        Ok(discovered)
    }

    /// 从一个插件目录读取 manifest 并与静态定义合并
    async fn load_discovered(&self, plugin_dir: &Path) -> Option<PluginDescriptor> {
        let manifest_path = plugin_dir.join("manifest.json");
        let raw = fs::read_to_string(&manifest_path).await.ok()?;
        let manifest: PluginManifest = match serde_json::from_str(&raw) {
            Ok(manifest) => manifest,
            Err(e) => {
                warn!("manifest 解析失败: {}: {}", manifest_path.display(), e);
                return None;
            }
        };

        let dir_name = plugin_dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let plugin_id = if manifest.id.is_empty() {
            dir_name
        } else {
            manifest.id.clone()
        };

        Some(self.merge_descriptor(&plugin_id, manifest, plugin_dir).await)
    }

    /// 合并规则：发现的元数据仅在非空时覆盖静态默认值；
    /// 静态的触发词/集成/示例在发现侧缺失时保留
    async fn merge_descriptor(
        &self,
        plugin_id: &str,
        manifest: PluginManifest,
        plugin_dir: &Path,
    ) -> PluginDescriptor {
        let definition = self.seed.iter().find(|d| d.id == plugin_id);

        let mut commands = definition.map(|d| d.commands.clone()).unwrap_or_default();
        if commands.is_empty() {
            commands = self.scrape_commands(plugin_id, plugin_dir).await;
        }

        let name = if !manifest.name.is_empty() {
            manifest.name
        } else if let Some(def) = definition {
            def.name.clone()
        } else {
            plugin_id.to_string()
        };

        let description = if !manifest.description.is_empty() {
            manifest.description
        } else {
            definition.map(|d| d.description.clone()).unwrap_or_default()
        };

        let version = if manifest.version.is_empty() {
            "unknown".to_string()
        } else {
            manifest.version
        };

        PluginDescriptor {
            id: plugin_id.to_string(),
            name,
            version: Some(version),
            description,
            author: manifest.author,
            kind: PluginKind::Community,
            category: definition
                .map(|d| d.category)
                .unwrap_or(PluginCategory::Other),
            commands,
            triggers: definition.map(|d| d.triggers.clone()).unwrap_or_default(),
            integrations: definition
                .map(|d| d.integrations.clone())
                .unwrap_or_default(),
            api_required: definition
                .map(|d| d.api_required.clone())
                .unwrap_or_default(),
            prompt_examples: definition
                .map(|d| d.prompt_examples.clone())
                .unwrap_or_default(),
            enabled: true,
            installed: true,
            registered_at: Some(Utc::now()),
        }
    }

    /// 启发式补全：在 main.js 文本中找 `id: "..."` 赋值模式
    ///
    /// 仅作元数据富化，不保证正确，结果数量有硬上限
    async fn scrape_commands(&self, plugin_id: &str, plugin_dir: &Path) -> Vec<String> {
        let main_js = plugin_dir.join("main.js");
        let bytes = match fs::read(&main_js).await {
            Ok(bytes) => bytes,
            Err(_) => return Vec::new(),
        };
        let source = String::from_utf8_lossy(&bytes);

        command_id_pattern()
            .captures_iter(&source)
            .take(self.config.max_scraped_commands)
            .map(|capture| format!("{}:{}", plugin_id, &capture[1]))
            .collect()
    }

    /// 原子持久化：写临时文件后重命名替换，崩溃不会破坏已提交的快照
    async fn persist_snapshot(
        path: &Path,
        snapshot: &RegistrySnapshot,
    ) -> Result<(), BridgeError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let json = serde_json::to_vec_pretty(snapshot)?;
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, &json).await?;
        fs::rename(&tmp, path).await?;

        debug!("快照已写入: {}", path.display());
        Ok(())
    }

    /// 按触发词找插件：存储顺序下第一个触发词为 `text` 子串的插件
    ///
    /// 多个插件可能同时匹配，只取首个，这是刻意的简单性取舍，不做排名
    pub async fn find_by_trigger(&self, text: &str) -> Option<PluginDescriptor> {
        let text = text.to_lowercase();
        let snapshot = self.snapshot.read().await;

        snapshot
            .plugins
            .values()
            .find(|plugin| {
                plugin
                    .triggers
                    .iter()
                    .any(|trigger| text.contains(&trigger.to_lowercase()))
            })
            .cloned()
    }

    /// 按匹配触发词长度降序返回所有命中的插件
    ///
    /// 附加能力，不改变 `find_by_trigger` 的首个匹配语义；
    /// 等长时保持存储顺序
    pub async fn find_by_trigger_ranked(&self, text: &str) -> Vec<PluginDescriptor> {
        let text = text.to_lowercase();
        let snapshot = self.snapshot.read().await;

        let mut matches: Vec<(usize, PluginDescriptor)> = snapshot
            .plugins
            .values()
            .filter_map(|plugin| {
                plugin
                    .triggers
                    .iter()
                    .filter(|trigger| text.contains(&trigger.to_lowercase()))
                    .map(|trigger| trigger.chars().count())
                    .max()
                    .map(|len| (len, plugin.clone()))
            })
            .collect();

        matches.sort_by(|a, b| b.0.cmp(&a.0));
        matches.into_iter().map(|(_, plugin)| plugin).collect()
    }

    /// 把动作文本解析为命令标识符
    ///
    /// 与触发词匹配相同的扫描，但要求命中的插件至少有一个命令，
    /// 返回其第一个命令
    pub async fn resolve_command(&self, action: &str) -> Option<String> {
        let action = action.to_lowercase();
        let snapshot = self.snapshot.read().await;

        snapshot
            .plugins
            .values()
            .find(|plugin| {
                !plugin.commands.is_empty()
                    && plugin
                        .triggers
                        .iter()
                        .any(|trigger| action.contains(&trigger.to_lowercase()))
            })
            .and_then(|plugin| plugin.commands.first().cloned())
    }

    /// 按 id 取插件
    pub async fn get(&self, plugin_id: &str) -> Option<PluginDescriptor> {
        let snapshot = self.snapshot.read().await;
        snapshot.plugins.get(plugin_id).cloned()
    }

    /// 所有插件（保持存储顺序）
    pub async fn all_plugins(&self) -> IndexMap<String, PluginDescriptor> {
        let snapshot = self.snapshot.read().await;
        snapshot.plugins.clone()
    }

    /// 注册表条目数
    pub async fn plugin_count(&self) -> usize {
        let snapshot = self.snapshot.read().await;
        snapshot.plugins.len()
    }

    /// 最近一次扫描时间
    pub async fn last_scan(&self) -> Option<DateTime<Utc>> {
        let snapshot = self.snapshot.read().await;
        snapshot.last_scan
    }

    /// 按分类过滤
    pub async fn by_category(&self, category: PluginCategory) -> Vec<PluginDescriptor> {
        let snapshot = self.snapshot.read().await;
        snapshot
            .plugins
            .values()
            .filter(|plugin| plugin.category == category)
            .cloned()
            .collect()
    }

    /// 所有 AI 插件
    pub async fn ai_plugins(&self) -> Vec<PluginDescriptor> {
        self.by_category(PluginCategory::Ai).await
    }

    /// 集成关系邻接表
    ///
    /// 有向图，允许自环和不存在的目标，不做校验，仅文档级用途
    pub async fn integration_graph(&self) -> IndexMap<String, Vec<String>> {
        let snapshot = self.snapshot.read().await;
        snapshot
            .plugins
            .iter()
            .map(|(id, plugin)| (id.clone(), plugin.integrations.clone()))
            .collect()
    }

    /// 生成面向代理的提示上下文文本
    pub async fn prompt_context(&self) -> String {
        let snapshot = self.snapshot.read().await;
        Self::render_prompt_context(&snapshot)
    }

    fn render_prompt_context(snapshot: &RegistrySnapshot) -> String {
        let mut groups: IndexMap<PluginCategory, Vec<&PluginDescriptor>> = IndexMap::new();
        for plugin in snapshot.plugins.values() {
            groups.entry(plugin.category).or_default().push(plugin);
        }

        let mut context = String::from("=== PLUGINS DO OBSIDIAN DISPONÍVEIS ===\n\n");
        for (category, plugins) in &groups {
            context.push_str(&format!("\n{}:\n", category.display_name()));
            for plugin in plugins {
                let triggers: Vec<&str> = plugin
                    .triggers
                    .iter()
                    .take(3)
                    .map(String::as_str)
                    .collect();
                context.push_str(&format!("  • {}: {}\n", plugin.name, triggers.join(", ")));
            }
        }

        context
    }

    /// 导出面向外部代理的只读投影
    pub async fn export_for_agent(&self) -> AgentExport {
        let snapshot = self.snapshot.read().await;

        let mut categories = Vec::new();
        let mut ai_plugins = Vec::new();
        let mut all_triggers = IndexMap::new();
        let mut all_commands = IndexMap::new();
        let mut integration_graph = IndexMap::new();

        for (id, plugin) in &snapshot.plugins {
            if !categories.contains(&plugin.category) {
                categories.push(plugin.category);
            }
            if plugin.category == PluginCategory::Ai {
                ai_plugins.push(id.clone());
            }
            for trigger in &plugin.triggers {
                all_triggers.insert(trigger.to_lowercase(), id.clone());
            }
            for command in &plugin.commands {
                all_commands.insert(command.clone(), id.clone());
            }
            integration_graph.insert(id.clone(), plugin.integrations.clone());
        }

        AgentExport {
            plugins: snapshot.plugins.clone(),
            categories,
            ai_plugins,
            all_triggers,
            all_commands,
            integration_graph,
            prompt_context: Self::render_prompt_context(&snapshot),
        }
    }
}
