// 日志系统设置

use crate::config::LoggingConfig;
use anyhow::Result;

use tracing::Level;
use tracing_subscriber::EnvFilter;

/// 日志系统初始化器
pub struct LoggingSetup;

impl LoggingSetup {
    /// 初始化日志系统
    pub fn init(config: &LoggingConfig) -> Result<()> {
        // RUST_LOG 优先于配置文件中的级别
        let env_filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(&config.level))
            .unwrap_or_else(|_| EnvFilter::new("info"));

        match config.format.as_str() {
            "json" => {
                let subscriber = tracing_subscriber::fmt()
                    .json()
                    .with_env_filter(env_filter)
                    .with_target(true)
                    .finish();
                tracing::subscriber::set_global_default(subscriber)?;
            }
            "pretty" => {
                let subscriber = tracing_subscriber::fmt()
                    .pretty()
                    .with_env_filter(env_filter)
                    .with_target(true)
                    .finish();
                tracing::subscriber::set_global_default(subscriber)?;
            }
            _ => {
                let subscriber = tracing_subscriber::fmt()
                    .compact()
                    .with_env_filter(env_filter)
                    .with_target(true)
                    .finish();
                tracing::subscriber::set_global_default(subscriber)?;
            }
        }

        tracing::info!("日志系统初始化完成");
        tracing::info!("日志级别: {}", config.level);
        tracing::info!("日志格式: {}", config.format);

        Ok(())
    }

    /// 解析日志级别
    pub fn parse_level(level: &str) -> Level {
        match level.to_lowercase().as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "info" => Level::INFO,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::INFO,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        assert_eq!(LoggingSetup::parse_level("debug"), Level::DEBUG);
        assert_eq!(LoggingSetup::parse_level("WARN"), Level::WARN);
        assert_eq!(LoggingSetup::parse_level("unknown"), Level::INFO);
    }
}
