// ==========================================
// 周班次排班系统 - 冷却台账
// ==========================================
// 职责: 记录每名员工最近一次工作班次 (周, 班次)
// 红线: 只按周顺序前进; 每次生成尝试重新创建
// ==========================================

use crate::domain::types::{EmployeeId, ShiftCode, Week};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CooldownLedger {
    last_work: BTreeMap<EmployeeId, (Week, ShiftCode)>,
}

impl CooldownLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// 最近一次工作班次所在周
    pub fn last_work_week(&self, employee_id: EmployeeId) -> Option<Week> {
        self.last_work.get(&employee_id).map(|(week, _)| *week)
    }

    /// 最近一次工作班次代码
    pub fn last_shift(&self, employee_id: EmployeeId) -> Option<ShiftCode> {
        self.last_work.get(&employee_id).map(|(_, code)| *code)
    }

    /// 冷却检查
    ///
    /// # 返回
    /// 从未上班, 或 current_week - last_work_week >= gap
    pub fn eligible(&self, employee_id: EmployeeId, current_week: Week, gap: u32) -> bool {
        match self.last_work_week(employee_id) {
            None => true,
            Some(last) => current_week.saturating_sub(last) >= gap,
        }
    }

    /// 记录工作班次（休息不记录）
    pub fn record(&mut self, employee_id: EmployeeId, week: Week, shift_code: ShiftCode) {
        if shift_code.is_working() {
            self.last_work.insert(employee_id, (week, shift_code));
        }
    }
}
