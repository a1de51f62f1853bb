// ==========================================
// 周班次排班系统 - 排班结果模型
// ==========================================
// 红线: 每个 (员工, 周) 恰好一条分配记录
// ==========================================

use crate::domain::types::{EmployeeId, ShiftCode, Week};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ==========================================
// Assignment - 单条分配记录
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    pub employee_id: EmployeeId,
    pub week: Week,
    pub shift_code: ShiftCode,
}

// ==========================================
// Schedule - 全周期排班表
// ==========================================
// 存储为 员工 → 按周排列的班次, 初始全部为休息(G),
// 因此 "每个 (员工, 周) 恰好一条" 由结构本身保证
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    horizon_weeks: u32,
    rows: BTreeMap<EmployeeId, Vec<ShiftCode>>,
}

impl Schedule {
    /// 创建全部为休息的排班表
    pub fn new(employee_ids: impl IntoIterator<Item = EmployeeId>, horizon_weeks: u32) -> Self {
        let rows = employee_ids
            .into_iter()
            .map(|id| (id, vec![ShiftCode::Rest; horizon_weeks as usize]))
            .collect();
        Self { horizon_weeks, rows }
    }

    pub fn horizon_weeks(&self) -> u32 {
        self.horizon_weeks
    }

    pub fn employee_count(&self) -> usize {
        self.rows.len()
    }

    pub fn employee_ids(&self) -> impl Iterator<Item = EmployeeId> + '_ {
        self.rows.keys().copied()
    }

    /// 查询某员工某周的班次
    pub fn get(&self, employee_id: EmployeeId, week: Week) -> Option<ShiftCode> {
        let idx = week.checked_sub(1)? as usize;
        self.rows.get(&employee_id)?.get(idx).copied()
    }

    /// 写入某员工某周的班次
    ///
    /// # 返回
    /// - true: 写入成功
    /// - false: 员工不存在或周序号越界
    pub fn set(&mut self, employee_id: EmployeeId, week: Week, shift_code: ShiftCode) -> bool {
        let Some(idx) = week.checked_sub(1).map(|w| w as usize) else {
            return false;
        };
        match self.rows.get_mut(&employee_id).and_then(|row| row.get_mut(idx)) {
            Some(cell) => {
                *cell = shift_code;
                true
            }
            None => false,
        }
    }

    /// 某员工整行班次
    pub fn row(&self, employee_id: EmployeeId) -> Option<&[ShiftCode]> {
        self.rows.get(&employee_id).map(|r| r.as_slice())
    }

    /// 某员工全周期工作班次总数
    pub fn working_count(&self, employee_id: EmployeeId) -> usize {
        self.row(employee_id)
            .map(|row| row.iter().filter(|c| c.is_working()).count())
            .unwrap_or(0)
    }

    /// 某员工上工作班次的周序号（升序）
    pub fn working_weeks(&self, employee_id: EmployeeId) -> Vec<Week> {
        self.row(employee_id)
            .map(|row| {
                row.iter()
                    .enumerate()
                    .filter(|(_, c)| c.is_working())
                    .map(|(i, _)| i as Week + 1)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// 某周持有指定班次的员工
    pub fn holders(&self, week: Week, shift_code: ShiftCode) -> Vec<EmployeeId> {
        self.rows
            .keys()
            .copied()
            .filter(|id| self.get(*id, week) == Some(shift_code))
            .collect()
    }

    /// 展开为分配记录（按员工、周升序）
    pub fn assignments(&self) -> impl Iterator<Item = Assignment> + '_ {
        self.rows.iter().flat_map(|(id, row)| {
            row.iter().enumerate().map(move |(i, code)| Assignment {
                employee_id: *id,
                week: i as Week + 1,
                shift_code: *code,
            })
        })
    }
}
