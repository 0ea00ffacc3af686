// 配置加载器
// 处理配置文件加载和环境变量解析

use crate::config::AppConfig;
use crate::errors::BridgeError;
use dotenvy::dotenv;
use std::sync::OnceLock;
use tracing::info;

/// 全局配置实例
static CONFIG: OnceLock<AppConfig> = OnceLock::new();

/// 配置加载器
pub struct ConfigLoader;

impl ConfigLoader {
    /// 初始化配置
    pub fn init() -> Result<&'static AppConfig, BridgeError> {
        // 加载 .env 文件（不存在时忽略）
        let _ = dotenv();

        // 加载并验证配置
        let config = AppConfig::load()?;
        config.validate()?;

        // 存储到全局变量
        CONFIG
            .set(config)
            .map_err(|_| BridgeError::internal("配置已经初始化"))?;

        let config = CONFIG.get().ok_or_else(|| BridgeError::internal("配置未初始化"))?;

        info!("配置加载成功");
        info!("服务器: {}:{}", config.server.host, config.server.port);
        info!("后端: {}", config.vault.base_url);

        Ok(config)
    }

    /// 获取配置
    pub fn get() -> &'static AppConfig {
        CONFIG
            .get()
            .expect("配置未初始化，请先调用 ConfigLoader::init()")
    }

    /// 打印配置摘要
    pub fn print_summary() {
        let config = Self::get();

        println!("=== COMET Bridge 配置摘要 ===");
        println!("服务器: {}:{}", config.server.host, config.server.port);
        println!("后端: {}", config.vault.base_url);
        println!("信任本机证书: {}", config.vault.trust_local_cert);
        println!(
            "执行器: {} {:?} (超时 {}s)",
            config.executor.shell, config.executor.shell_args, config.executor.timeout_seconds
        );
        println!("注册表文件: {}", config.registry.registry_file.display());
        println!("日志级别: {}", config.logging.level);
        println!("=============================");
    }
}
