// ==========================================
// 周班次排班系统 - 核心库
// ==========================================
// 技术栈: Rust + SQLite
// 系统定位: 多周班次分配引擎（轮换 / 冷却 / 公平性约束）
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 名册层 - 读取与校验
pub mod roster;

// 数据仓储层 - 数据访问
pub mod repository;

// 引擎层 - 排班规则
pub mod engine;

// 报表层 - 透视表与 CSV
pub mod report;

// 配置层 - 规则与运行参数
pub mod config;

// 运行层 - 串联各层
pub mod planner;

// 数据库基础设施（连接初始化/PRAGMA 统一）
pub mod db;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{Band, EmployeeId, ShiftCode, Week};

// 领域实体
pub use domain::{Assignment, CohortKey, Employee, Schedule};

// 引擎
pub use engine::{
    AssignmentStrategy, CooldownLedger, Diagnostic, FairnessCoordinator, FairnessReport,
    PlanOutcome, RotationState, ScheduleVerifier, VerificationReport, WeeklyAssignmentEngine,
};

// 配置
pub use config::{PlannerConfig, ShiftRules, SiteLayout};

// 运行
pub use planner::{PlanRun, PlannerError, PlannerResult, ShiftPlanner};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "周班次排班系统";
