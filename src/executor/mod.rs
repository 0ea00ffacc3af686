// 外部进程执行器
// 通过宿主 shell 运行单条命令并捕获退出码与输出流

use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;
use tracing::{debug, warn};

use crate::bridge::BridgeResult;
use crate::config::ExecutorConfig;

/// shell 命令执行器
///
/// 以宿主进程的权限执行任意命令，这是受信调用方的能力，不做沙箱。
/// 所有失败模式（非零退出、超时、启动失败）都归一化为 BridgeResult，
/// 对分发器进程永远不是致命错误。
#[derive(Debug, Clone)]
pub struct ShellExecutor {
    config: ExecutorConfig,
}

impl ShellExecutor {
    /// 创建执行器
    pub fn new(config: ExecutorConfig) -> Self {
        Self { config }
    }

    /// 以默认超时执行命令
    pub async fn execute(&self, command: &str) -> BridgeResult {
        self.execute_with_timeout(command, Duration::from_secs(self.config.timeout_seconds))
            .await
    }

    /// 以指定超时执行命令
    ///
    /// 超时后子进程继续在后台运行，取消不会传播过超时边界
    pub async fn execute_with_timeout(&self, command: &str, timeout: Duration) -> BridgeResult {
        debug!("执行命令: {} {:?} {}", self.config.shell, self.config.shell_args, command);

        let mut cmd = Command::new(&self.config.shell);
        cmd.args(&self.config.shell_args)
            .arg(command)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(false);

        let child = match cmd.spawn() {
            Ok(child) => child,
            Err(e) => {
                warn!("启动命令失败: {}", e);
                return BridgeResult::failure(e.to_string());
            }
        };

        match tokio::time::timeout(timeout, child.wait_with_output()).await {
            Ok(Ok(output)) => BridgeResult::completed(
                output.status.success(),
                String::from_utf8_lossy(&output.stdout).into_owned(),
                String::from_utf8_lossy(&output.stderr).into_owned(),
            ),
            Ok(Err(e)) => {
                warn!("等待命令结束失败: {}", e);
                BridgeResult::failure(e.to_string())
            }
            Err(_) => {
                warn!("命令执行超时 ({}s)", timeout.as_secs());
                BridgeResult::failure("Timeout")
            }
        }
    }
}
