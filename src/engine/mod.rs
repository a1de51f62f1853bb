// ==========================================
// 周班次排班系统 - 引擎层
// ==========================================
// 职责: 冷却台账、轮换状态、三个班次选择器、周引擎、公平性协调器
// 红线: Engine 不访问存储, 随机源由调用方注入
// ==========================================

pub mod cooldown;
pub mod diagnostics;
pub mod fairness;
pub mod rotation;
pub mod selection;
pub mod shift1;
pub mod shift2;
pub mod shift3;
pub mod strategy;
pub mod verifier;
pub mod weekly;

// 重导出核心引擎
pub use cooldown::CooldownLedger;
pub use diagnostics::Diagnostic;
pub use fairness::{CohortSpread, FairnessCoordinator, FairnessReport, PlanOutcome};
pub use rotation::{RoleRotation, RotationState};
pub use selection::{AttemptState, RotationRole};
pub use strategy::AssignmentStrategy;
pub use verifier::{Finding, ScheduleVerifier, Severity, VerificationReport};
pub use weekly::{GenerationResult, WeeklyAssignmentEngine};
