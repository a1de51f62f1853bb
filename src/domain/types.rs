// ==========================================
// 周班次排班系统 - 领域类型定义
// ==========================================
// 职责: 员工级别、班次代码等基础枚举
// 序列化格式: 与员工库/报表中的原始取值一致
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 员工ID（与员工库主键一致）
pub type EmployeeId = i64;

/// 周序号（从 1 开始）
pub type Week = u32;

// ==========================================
// 员工级别 (Band)
// ==========================================
// 红线: 级别决定可上的班次, Other 永不进入工作班次
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Band {
    Associate, // 助理
    Layam,     // Layam 级
    Other,     // 其他（仅休息）
}

impl Band {
    pub fn as_str(&self) -> &'static str {
        match self {
            Band::Associate => "Associate",
            Band::Layam => "Layam",
            Band::Other => "Other",
        }
    }

    /// 是否可以承担任一工作班次
    pub fn is_slot_capable(&self) -> bool {
        matches!(self, Band::Associate | Band::Layam)
    }
}

impl fmt::Display for Band {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Band {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "associate" => Ok(Band::Associate),
            "layam" => Ok(Band::Layam),
            "other" | "" => Ok(Band::Other),
            other => Err(format!("未知员工级别: {}", other)),
        }
    }
}

// ==========================================
// 班次代码 (Shift Code)
// ==========================================
// G = 休息, 1/2/3 = 三个工作班次
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ShiftCode {
    #[serde(rename = "G")]
    Rest,
    #[serde(rename = "1")]
    Slot1,
    #[serde(rename = "2")]
    Slot2,
    #[serde(rename = "3")]
    Slot3,
}

impl ShiftCode {
    /// 所有工作班次（按周内分配顺序）
    pub const WORKING: [ShiftCode; 3] = [ShiftCode::Slot1, ShiftCode::Slot2, ShiftCode::Slot3];

    pub fn as_str(&self) -> &'static str {
        match self {
            ShiftCode::Rest => "G",
            ShiftCode::Slot1 => "1",
            ShiftCode::Slot2 => "2",
            ShiftCode::Slot3 => "3",
        }
    }

    pub fn is_working(&self) -> bool {
        !matches!(self, ShiftCode::Rest)
    }

    /// 每周该班次需要的人数
    pub fn seats_per_week(&self) -> usize {
        match self {
            ShiftCode::Rest => 0,
            ShiftCode::Slot1 => 1,
            ShiftCode::Slot2 => 2,
            ShiftCode::Slot3 => 2,
        }
    }
}

impl fmt::Display for ShiftCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ShiftCode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "G" | "g" => Ok(ShiftCode::Rest),
            "1" => Ok(ShiftCode::Slot1),
            "2" => Ok(ShiftCode::Slot2),
            "3" => Ok(ShiftCode::Slot3),
            other => Err(format!("未知班次代码: {}", other)),
        }
    }
}
