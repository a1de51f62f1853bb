// ==========================================
// 周班次排班系统 - 引擎诊断信息
// ==========================================
// 红线: 非致命结果一律作为诊断值返回, 不作为错误
// ==========================================

use crate::domain::employee::CohortKey;
use crate::domain::types::{EmployeeId, ShiftCode, Week};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// 放宽阶梯走完仍有席位空缺, 对应员工本周休息
    UnfilledSlot {
        week: Week,
        slot: ShiftCode,
        missing: usize,
    },
    /// 本周冷却间隔低于首选值
    CooldownDegraded { week: Week, gap: u32 },
    /// 班次选择使用了放宽层级（level >= 2）
    LadderRelaxed {
        week: Week,
        slot: ShiftCode,
        level: u8,
    },
    /// 达到最大尝试次数仍未满足公平性
    FairnessUnattainable {
        attempts: u32,
        uncovered: Vec<EmployeeId>,
        cohort_violations: Vec<CohortKey>,
    },
}

impl Diagnostic {
    /// 是否意味着排班结果不满足硬性要求
    pub fn is_degraded(&self) -> bool {
        matches!(
            self,
            Diagnostic::UnfilledSlot { .. } | Diagnostic::FairnessUnattainable { .. }
        )
    }

    pub fn week(&self) -> Option<Week> {
        match self {
            Diagnostic::UnfilledSlot { week, .. }
            | Diagnostic::CooldownDegraded { week, .. }
            | Diagnostic::LadderRelaxed { week, .. } => Some(*week),
            Diagnostic::FairnessUnattainable { .. } => None,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::UnfilledSlot {
                week,
                slot,
                missing,
            } => write!(f, "第 {} 周班次 {} 空缺 {} 人", week, slot, missing),
            Diagnostic::CooldownDegraded { week, gap } => {
                write!(f, "第 {} 周冷却间隔降级为 {} 周", week, gap)
            }
            Diagnostic::LadderRelaxed { week, slot, level } => {
                write!(f, "第 {} 周班次 {} 使用放宽层级 {}", week, slot, level)
            }
            Diagnostic::FairnessUnattainable {
                attempts,
                uncovered,
                cohort_violations,
            } => write!(
                f,
                "{} 次尝试后仍未满足公平性: 未排班 {} 人, 失衡分组 {} 个",
                attempts,
                uncovered.len(),
                cohort_violations.len()
            ),
        }
    }
}
