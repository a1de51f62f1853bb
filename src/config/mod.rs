// ==========================================
// 周班次排班系统 - 配置层
// ==========================================
// 职责: 排班规则、运行参数, 支持从员工库覆写
// 存储: config_kv 表
// ==========================================

pub mod config_manager;
pub mod error;
pub mod rules;

// 重导出核心配置类型
pub use config_manager::{config_keys, ConfigManager};
pub use error::{ConfigError, ConfigResult};
pub use rules::{
    default_store_path, DomainTarget, PlannerConfig, Shift2Relaxation, ShiftRules, SiteLayout,
    COOLDOWN_FLOOR_WEEKS,
};
