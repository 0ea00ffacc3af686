use actix_web::{web, App, HttpServer};
use actix_cors::Cors;

use comet_bridge::api::routes::ApiRouteConfig;
use comet_bridge::config::ConfigLoader;
use comet_bridge::executor::ShellExecutor;
use comet_bridge::logging::LoggingSetup;
use comet_bridge::vault::VaultClient;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // 初始化配置（凭证缺失在这里直接失败）
    let config = ConfigLoader::init()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))?;

    // 初始化结构化日志系统
    LoggingSetup::init(&config.logging)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?;

    tracing::info!("🚀 启动 COMET Bridge v{}", env!("CARGO_PKG_VERSION"));

    // 外部协作者：进程执行器与笔记库客户端
    let executor = web::Data::new(ShellExecutor::new(config.executor.clone()));
    let vault = VaultClient::new(&config.vault)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))?;

    // 启动期探测一次后端可达性，仅用于日志，不阻止启动
    match vault.ping().await {
        probe if probe.success => tracing::info!("Obsidian 后端在线: {}", config.vault.base_url),
        _ => tracing::warn!("Obsidian 后端不可达: {}", config.vault.base_url),
    }
    let vault = web::Data::new(vault);

    // 打印配置摘要
    ConfigLoader::print_summary();

    tracing::info!("🌐 服务器启动地址: http://{}:{}", config.server.host, config.server.port);
    tracing::info!("📋 健康检查: http://{}:{}/health", config.server.host, config.server.port);

    // 启动 HTTP 服务器
    let mut server = HttpServer::new(move || {
        App::new()
            // CORS 配置
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            // 添加 tracing 中间件
            .wrap(tracing_actix_web::TracingLogger::default())
            .app_data(executor.clone())
            .app_data(vault.clone())
            .configure(ApiRouteConfig::configure)
    });

    // 配置服务器参数
    if let Some(workers) = config.server.workers {
        server = server.workers(workers);
    }

    server
        .bind((config.server.host.clone(), config.server.port))?
        .run()
        .await
}
