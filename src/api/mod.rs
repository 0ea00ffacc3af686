// API 模块
// HTTP 路由、请求/响应模型与处理器

pub mod handlers;
pub mod models;
pub mod routes;

#[cfg(test)]
mod tests;

pub use models::*;
pub use routes::ApiRouteConfig;
