// ==========================================
// 周班次排班系统 - 排班结果校验器
// ==========================================
// 职责: 事后检查一份排班是否满足全部硬约束, 并列出提示项
// 用途: 主程序输出后自检; verify_schedule 工具读取 CSV 后检查
// ==========================================

use crate::config::rules::{ShiftRules, COOLDOWN_FLOOR_WEEKS};
use crate::domain::employee::Employee;
use crate::domain::schedule::Schedule;
use crate::domain::types::{Band, EmployeeId, ShiftCode, Week};
use crate::engine::rotation::toggle_value;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// 违反硬约束
    Violation,
    /// 提示（软约束未满足）
    Notice,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Finding {
    RestingEmployeeWorked {
        employee_id: EmployeeId,
        week: Week,
    },
    SlotCount {
        week: Week,
        slot: ShiftCode,
        expected: usize,
        actual: usize,
    },
    BandMismatch {
        week: Week,
        slot: ShiftCode,
        employee_id: EmployeeId,
    },
    DomainMix {
        week: Week,
        slot: ShiftCode,
    },
    CooldownBelowFloor {
        employee_id: EmployeeId,
        from: Week,
        to: Week,
    },
    CooldownBelowPreferred {
        employee_id: EmployeeId,
        from: Week,
        to: Week,
    },
    ExperienceDiff {
        week: Week,
        slot: ShiftCode,
        diff: u32,
    },
    UnexpectedSubDomain {
        employee_id: EmployeeId,
    },
    AlternationMiss {
        week: Week,
        slot: ShiftCode,
        employee_id: EmployeeId,
    },
}

impl Finding {
    pub fn severity(&self) -> Severity {
        match self {
            Finding::CooldownBelowPreferred { .. } | Finding::AlternationMiss { .. } => {
                Severity::Notice
            }
            _ => Severity::Violation,
        }
    }

    /// 涉及的员工（按周/班次汇总的项没有）
    pub fn employee_id(&self) -> Option<EmployeeId> {
        match self {
            Finding::RestingEmployeeWorked { employee_id, .. }
            | Finding::BandMismatch { employee_id, .. }
            | Finding::CooldownBelowFloor { employee_id, .. }
            | Finding::CooldownBelowPreferred { employee_id, .. }
            | Finding::UnexpectedSubDomain { employee_id }
            | Finding::AlternationMiss { employee_id, .. } => Some(*employee_id),
            Finding::SlotCount { .. } | Finding::DomainMix { .. } | Finding::ExperienceDiff { .. } => {
                None
            }
        }
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Finding::RestingEmployeeWorked { employee_id, week } => {
                write!(f, "员工 {} 不应上班, 但第 {} 周有工作班次", employee_id, week)
            }
            Finding::SlotCount {
                week,
                slot,
                expected,
                actual,
            } => write!(f, "第 {} 周班次 {} 人数 {} (应为 {})", week, slot, actual, expected),
            Finding::BandMismatch {
                week,
                slot,
                employee_id,
            } => write!(f, "第 {} 周班次 {} 的员工 {} 级别不符", week, slot, employee_id),
            Finding::DomainMix { week, slot } => {
                write!(f, "第 {} 周班次 {} 站点/级别组合不符", week, slot)
            }
            Finding::CooldownBelowFloor {
                employee_id,
                from,
                to,
            } => write!(
                f,
                "员工 {} 第 {} 周与第 {} 周间隔低于 {} 周",
                employee_id, from, to, COOLDOWN_FLOOR_WEEKS
            ),
            Finding::CooldownBelowPreferred {
                employee_id,
                from,
                to,
            } => write!(f, "员工 {} 第 {} 周与第 {} 周间隔低于首选值", employee_id, from, to),
            Finding::ExperienceDiff { week, slot, diff } => {
                write!(f, "第 {} 周班次 {} 经验差 {}", week, slot, diff)
            }
            Finding::UnexpectedSubDomain { employee_id } => {
                write!(f, "员工 {} 所在站点不应有子区域", employee_id)
            }
            Finding::AlternationMiss {
                week,
                slot,
                employee_id,
            } => write!(f, "第 {} 周班次 {} 员工 {} 未轮换站点/子区域", week, slot, employee_id),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VerificationReport {
    pub findings: Vec<Finding>,
}

impl VerificationReport {
    pub fn violations(&self) -> impl Iterator<Item = &Finding> {
        self.findings
            .iter()
            .filter(|f| f.severity() == Severity::Violation)
    }

    pub fn notices(&self) -> impl Iterator<Item = &Finding> {
        self.findings.iter().filter(|f| f.severity() == Severity::Notice)
    }

    pub fn is_valid(&self) -> bool {
        self.violations().next().is_none()
    }
}

// ==========================================
// ScheduleVerifier
// ==========================================
pub struct ScheduleVerifier<'r> {
    rules: &'r ShiftRules,
}

impl<'r> ScheduleVerifier<'r> {
    pub fn new(rules: &'r ShiftRules) -> Self {
        Self { rules }
    }

    /// 检查排班
    ///
    /// # 检查项
    /// 1. 不可排班员工（经验 0 / Other）全程休息
    /// 2. 每周 1/2/2 人数与级别、站点组合
    /// 3. 冷却间隔（低于下限为违规, 低于首选值为提示）
    /// 4. 班次2/3 搭档经验差
    /// 5. 非分区站点不带子区域
    /// 6. 轮换（提示）
    pub fn verify(&self, employees: &[Employee], schedule: &Schedule) -> VerificationReport {
        let by_id: BTreeMap<EmployeeId, &Employee> = employees.iter().map(|e| (e.id, e)).collect();
        let mut findings = Vec::new();

        for e in employees {
            if e.sub_domain.is_some() && !self.rules.site.is_split(&e.domain) {
                findings.push(Finding::UnexpectedSubDomain { employee_id: e.id });
            }
            if !e.is_schedulable() {
                for week in schedule.working_weeks(e.id) {
                    findings.push(Finding::RestingEmployeeWorked {
                        employee_id: e.id,
                        week,
                    });
                }
            }
            self.check_cooldown(e.id, schedule, &mut findings);
        }

        for week in 1..=schedule.horizon_weeks() {
            for slot in ShiftCode::WORKING {
                let holders: Vec<&Employee> = schedule
                    .holders(week, slot)
                    .into_iter()
                    .filter_map(|id| by_id.get(&id).copied())
                    .collect();
                self.check_slot(week, slot, &holders, &mut findings);
            }
        }

        self.check_shift3_alternation(&by_id, schedule, &mut findings);

        VerificationReport { findings }
    }

    fn check_cooldown(&self, employee_id: EmployeeId, schedule: &Schedule, findings: &mut Vec<Finding>) {
        let weeks = schedule.working_weeks(employee_id);
        for pair in weeks.windows(2) {
            let (from, to) = (pair[0], pair[1]);
            let gap = to - from;
            if gap < COOLDOWN_FLOOR_WEEKS {
                findings.push(Finding::CooldownBelowFloor {
                    employee_id,
                    from,
                    to,
                });
            } else if gap < self.rules.preferred_gap() {
                findings.push(Finding::CooldownBelowPreferred {
                    employee_id,
                    from,
                    to,
                });
            }
        }
    }

    fn check_slot(&self, week: Week, slot: ShiftCode, holders: &[&Employee], findings: &mut Vec<Finding>) {
        let expected = slot.seats_per_week();
        if holders.len() != expected {
            findings.push(Finding::SlotCount {
                week,
                slot,
                expected,
                actual: holders.len(),
            });
        }

        let allowed = |band: Band| match slot {
            ShiftCode::Slot1 => band == Band::Associate,
            ShiftCode::Slot2 => band == Band::Layam,
            ShiftCode::Slot3 => band.is_slot_capable(),
            ShiftCode::Rest => true,
        };
        for e in holders.iter().filter(|e| !allowed(e.band)) {
            findings.push(Finding::BandMismatch {
                week,
                slot,
                employee_id: e.id,
            });
        }

        if holders.len() != 2 {
            return;
        }
        let (a, b) = (holders[0], holders[1]);
        let site = &self.rules.site;

        let mix_ok = match slot {
            ShiftCode::Slot2 => {
                let primary = holders.iter().filter(|e| e.domain == site.primary_domain).count();
                let split = holders.iter().filter(|e| site.is_split(&e.domain)).count();
                primary == 1 && split == 1
            }
            ShiftCode::Slot3 => a.band != b.band,
            _ => true,
        };
        if !mix_ok {
            findings.push(Finding::DomainMix { week, slot });
        }

        let diff = a.experience.abs_diff(b.experience);
        if diff > self.rules.max_experience_diff {
            findings.push(Finding::ExperienceDiff { week, slot, diff });
        }

        if slot == ShiftCode::Slot2 {
            let desired = toggle_value(&self.rules.shift2_sub_toggle, week);
            for e in holders.iter().filter(|e| site.is_split(&e.domain)) {
                if desired.is_some_and(|d| !e.has_sub_domain(d)) {
                    findings.push(Finding::AlternationMiss {
                        week,
                        slot,
                        employee_id: e.id,
                    });
                }
            }
        }
    }

    /// 班次3 同级别角色相邻两次的站点应不同
    fn check_shift3_alternation(
        &self,
        by_id: &BTreeMap<EmployeeId, &Employee>,
        schedule: &Schedule,
        findings: &mut Vec<Finding>,
    ) {
        let mut last_domain: BTreeMap<Band, &str> = BTreeMap::new();
        for week in 1..=schedule.horizon_weeks() {
            for id in schedule.holders(week, ShiftCode::Slot3) {
                let Some(e) = by_id.get(&id) else { continue };
                if last_domain.get(&e.band) == Some(&e.domain.as_str()) {
                    findings.push(Finding::AlternationMiss {
                        week,
                        slot: ShiftCode::Slot3,
                        employee_id: id,
                    });
                }
                last_domain.insert(e.band, e.domain.as_str());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn employee(id: EmployeeId, band: Band, exp: u32, domain: &str, sub: Option<&str>) -> Employee {
        Employee {
            id,
            name: format!("E{}", id),
            band,
            experience: exp,
            domain: domain.to_string(),
            sub_domain: sub.map(str::to_string),
        }
    }

    #[test]
    fn test_detects_hard_violations() {
        let rules = ShiftRules::default();
        let roster = vec![
            employee(1, Band::Associate, 0, "AD-SEL", None),
            employee(2, Band::Layam, 1, "AD-SEL", None),
            employee(3, Band::Layam, 5, "AD-SEL", None),
        ];
        let mut schedule = Schedule::new([1, 2, 3], 3);
        schedule.set(1, 1, ShiftCode::Slot1);
        schedule.set(2, 1, ShiftCode::Slot2);
        schedule.set(3, 1, ShiftCode::Slot2);
        schedule.set(2, 2, ShiftCode::Slot3);

        let report = ScheduleVerifier::new(&rules).verify(&roster, &schedule);
        assert!(!report.is_valid());
        let has = |pred: &dyn Fn(&Finding) -> bool| report.findings.iter().any(|f| pred(f));
        assert!(has(&|f| matches!(f, Finding::RestingEmployeeWorked { employee_id: 1, week: 1 })));
        assert!(has(&|f| matches!(f, Finding::DomainMix { week: 1, slot: ShiftCode::Slot2 })));
        assert!(has(&|f| matches!(f, Finding::ExperienceDiff { week: 1, diff: 4, .. })));
        assert!(has(&|f| matches!(f, Finding::CooldownBelowFloor { employee_id: 2, from: 1, to: 2 })));
    }

    #[test]
    fn test_preferred_gap_is_notice_only() {
        let rules = ShiftRules::default();
        let roster = vec![employee(1, Band::Associate, 2, "AD-SEL", None)];
        let mut schedule = Schedule::new([1], 5);
        schedule.set(1, 1, ShiftCode::Slot1);
        schedule.set(1, 5, ShiftCode::Slot1);

        let report = ScheduleVerifier::new(&rules).verify(&roster, &schedule);
        assert!(report
            .notices()
            .any(|f| matches!(f, Finding::CooldownBelowPreferred { .. })));
        assert!(report
            .violations()
            .all(|f| matches!(f, Finding::SlotCount { .. })));
    }
}
