// 请求处理器

pub mod exec;
pub mod health;
pub mod vault;
