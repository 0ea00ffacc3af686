// COMET Bridge Library
// 导出主要模块供二进制目标和测试使用

pub mod api;
pub mod bridge;
pub mod config;
pub mod errors;
pub mod executor;
pub mod logging;
pub mod registry;
pub mod vault;

pub use bridge::BridgeResult;
