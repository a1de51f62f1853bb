// ==========================================
// 周班次排班系统 - 运行层
// ==========================================
// 职责: 串联名册、引擎、校验与下游; 不含选择规则
// ==========================================

pub mod error;
pub mod service;

pub use error::{PlannerError, PlannerResult};
pub use service::{PlanRun, ShiftPlanner};
