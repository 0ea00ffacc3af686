// 插件注册表模块
// 插件目录、触发词解析与快照持久化

pub mod descriptor;
pub mod seed;
pub mod trigger_registry;


pub use descriptor::*;
pub use seed::default_seed;
pub use trigger_registry::*;
