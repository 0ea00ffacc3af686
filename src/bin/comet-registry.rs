// 插件注册表 CLI 工具
// 扫描插件目录、刷新快照并导出代理提示上下文

use std::env;

use comet_bridge::config::AppConfig;
use comet_bridge::registry::{default_seed, TriggerRegistry};
use tracing::{error, info};

fn print_help() {
    println!("comet-registry - COMET 插件注册表工具");
    println!();
    println!("用法:");
    println!("  comet-registry scan       扫描插件目录并刷新快照");
    println!("  comet-registry context    打印代理提示上下文");
    println!("  comet-registry export     以 JSON 导出代理投影");
    println!("  comet-registry resolve <texto>   把动作文本解析为命令");
}

#[tokio::main]
async fn main() {
    // 初始化日志
    tracing_subscriber::fmt::init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 || args.contains(&"--help".to_string()) || args.contains(&"-h".to_string()) {
        print_help();
        return;
    }

    // 加载配置（注册表不需要后端凭证，跳过完整校验）
    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            error!("加载配置失败: {}", e);
            std::process::exit(1);
        }
    };

    // 加载注册表
    let registry = match TriggerRegistry::load(default_seed(), config.registry.clone()).await {
        Ok(registry) => registry,
        Err(e) => {
            error!("加载注册表失败: {}", e);
            std::process::exit(1);
        }
    };

    match args[1].as_str() {
        "scan" => {
            let discovered = match registry.scan().await {
                Ok(discovered) => discovered,
                Err(e) => {
                    error!("扫描失败: {}", e);
                    std::process::exit(1);
                }
            };
            println!(
                "扫描完成: 发现 {} 个插件, 注册表共 {} 条",
                discovered.len(),
                registry.plugin_count().await
            );
            println!();
            println!("{}", registry.prompt_context().await);
        }
        "context" => {
            println!("{}", registry.prompt_context().await);
        }
        "export" => {
            let export = registry.export_for_agent().await;
            match serde_json::to_string_pretty(&export) {
                Ok(json) => println!("{}", json),
                Err(e) => {
                    error!("序列化导出失败: {}", e);
                    std::process::exit(1);
                }
            }
        }
        "resolve" => {
            let Some(text) = args.get(2) else {
                print_help();
                std::process::exit(1);
            };
            match registry.resolve_command(text).await {
                Some(command) => println!("{}", command),
                None => {
                    println!("nenhum comando encontrado");
                    std::process::exit(1);
                }
            }
        }
        other => {
            error!("未知命令: {}", other);
            print_help();
            std::process::exit(1);
        }
    }

    info!("命令执行完成");
}
