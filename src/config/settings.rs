// 应用程序设置和配置
// 定义配置结构体和加载逻辑

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::errors::BridgeError;

/// 应用程序配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub vault: VaultConfig,
    pub executor: ExecutorConfig,
    pub registry: RegistryConfig,
    pub logging: LoggingConfig,
}

/// 服务器配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

/// Obsidian 笔记库后端配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VaultConfig {
    /// 后端基础 URL
    pub base_url: String,
    /// Bearer 凭证，必须通过配置或环境变量提供，不允许留空
    pub api_key: String,
    /// 单次调用超时（秒）
    pub timeout_seconds: u64,
    /// 信任本机自签名证书（跳过主机名与证书校验）
    pub trust_local_cert: bool,
}

/// 进程执行器配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutorConfig {
    /// shell 解释器
    pub shell: String,
    /// 传给解释器的前置参数，命令文本追加在其后
    pub shell_args: Vec<String>,
    /// 默认命令超时（秒）
    pub timeout_seconds: u64,
}

/// 插件注册表配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// 注册表快照文件
    pub registry_file: PathBuf,
    /// 系统上下文文件（只读，提供 vault 路径）
    pub context_file: PathBuf,
    /// 插件目录覆盖；为空时从系统上下文推导 <vault>/.obsidian/plugins
    pub plugins_dir: Option<PathBuf>,
    /// main.js 启发式提取的命令数量上限
    pub max_scraped_commands: usize,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl AppConfig {
    /// 从环境变量和配置文件加载配置
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Config::builder();

        // 1. 加载默认配置
        config = config.add_source(Config::try_from(&AppConfig::default())?);

        // 2. 尝试加载配置文件
        if Path::new("config.toml").exists() {
            config = config.add_source(File::with_name("config"));
        }

        // 3. 加载环境变量（优先级最高）
        config = config.add_source(
            Environment::with_prefix("COMET")
                .prefix_separator("_")
                .separator("__"),
        );

        // 4. 构建并反序列化
        let config = config.build()?;
        config.try_deserialize()
    }

    /// 验证配置
    ///
    /// 凭证缺失是启动期致命错误，不允许带空 Authorization 头运行
    pub fn validate(&self) -> Result<(), BridgeError> {
        if self.server.port == 0 {
            return Err(BridgeError::configuration("server.port 不能为 0"));
        }

        if self.vault.api_key.trim().is_empty() {
            return Err(BridgeError::configuration(
                "vault.api_key 未配置，凭证必须通过 COMET_VAULT__API_KEY 或配置文件提供",
            ));
        }

        if !self.vault.base_url.starts_with("http://") && !self.vault.base_url.starts_with("https://")
        {
            return Err(BridgeError::configuration(format!(
                "vault.base_url 无效: {}",
                self.vault.base_url
            )));
        }

        if self.executor.timeout_seconds == 0 {
            return Err(BridgeError::configuration(
                "executor.timeout_seconds 必须大于 0",
            ));
        }

        if self.executor.shell.trim().is_empty() {
            return Err(BridgeError::configuration("executor.shell 不能为空"));
        }

        Ok(())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 5000,
                workers: None,
            },
            vault: VaultConfig {
                base_url: "https://127.0.0.1:27124".to_string(),
                api_key: String::new(),
                timeout_seconds: 30,
                trust_local_cert: true,
            },
            executor: ExecutorConfig::default(),
            registry: RegistryConfig::default(),
            logging: LoggingConfig {
                level: "info".to_string(),
                format: "compact".to_string(),
            },
        }
    }
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        if cfg!(windows) {
            Self {
                shell: "powershell".to_string(),
                shell_args: vec!["-Command".to_string()],
                timeout_seconds: 60,
            }
        } else {
            Self {
                shell: "sh".to_string(),
                shell_args: vec!["-c".to_string()],
                timeout_seconds: 60,
            }
        }
    }
}

impl Default for RegistryConfig {
    fn default() -> Self {
        let base = dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("COMET");
        Self {
            registry_file: base.join("plugin_registry.json"),
            context_file: base.join("SYSTEM_CONTEXT.json"),
            plugins_dir: None,
            max_scraped_commands: 10,
        }
    }
}
