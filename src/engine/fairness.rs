// ==========================================
// 周班次排班系统 - 公平性协调器
// ==========================================
// 职责: 在外层重复整周期生成, 直到:
//   1. 每名可排班员工至少上一次工作班次
//   2. 每个 (经验, 级别, 站点, 子区域) 分组的班次总数极差 ≤ 容差
// 红线: 尝试次数有上限; 达到上限返回最后一次结果 + FairnessUnattainable
// ==========================================

use crate::domain::employee::{CohortKey, Employee};
use crate::domain::schedule::Schedule;
use crate::domain::types::EmployeeId;
use crate::engine::diagnostics::Diagnostic;
use crate::engine::weekly::WeeklyAssignmentEngine;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, info, instrument, warn};

// ==========================================
// FairnessReport - 公平性检查结果
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FairnessReport {
    /// 可排班但整个周期未上班的员工
    pub uncovered: Vec<EmployeeId>,
    /// 极差超出容差的分组
    pub cohort_violations: Vec<CohortSpread>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CohortSpread {
    pub cohort: CohortKey,
    pub members: usize,
    pub min_shifts: usize,
    pub max_shifts: usize,
}

impl CohortSpread {
    pub fn spread(&self) -> usize {
        self.max_shifts - self.min_shifts
    }
}

impl FairnessReport {
    /// 检查一份排班
    ///
    /// # 参数
    /// - `employees`: 名册
    /// - `schedule`: 待检查排班
    /// - `tolerance`: 分组极差容差
    pub fn evaluate(employees: &[Employee], schedule: &Schedule, tolerance: usize) -> Self {
        let uncovered = employees
            .iter()
            .filter(|e| e.is_schedulable() && schedule.working_count(e.id) == 0)
            .map(|e| e.id)
            .collect();

        let mut cohorts: BTreeMap<CohortKey, Vec<usize>> = BTreeMap::new();
        for e in employees.iter().filter(|e| e.experience > 0) {
            cohorts
                .entry(e.cohort_key())
                .or_default()
                .push(schedule.working_count(e.id));
        }

        let cohort_violations = cohorts
            .into_iter()
            .filter(|(_, counts)| counts.len() >= 2)
            .filter_map(|(cohort, counts)| {
                let min_shifts = counts.iter().copied().min()?;
                let max_shifts = counts.iter().copied().max()?;
                (max_shifts - min_shifts > tolerance).then(|| CohortSpread {
                    cohort,
                    members: counts.len(),
                    min_shifts,
                    max_shifts,
                })
            })
            .collect();

        Self {
            uncovered,
            cohort_violations,
        }
    }

    pub fn is_fair(&self) -> bool {
        self.uncovered.is_empty() && self.cohort_violations.is_empty()
    }
}

// ==========================================
// PlanOutcome - 协调器输出
// ==========================================
#[derive(Debug, Clone)]
pub struct PlanOutcome {
    pub schedule: Schedule,
    pub diagnostics: Vec<Diagnostic>,
    /// 实际执行的尝试次数
    pub attempts: u32,
    /// 最终采用的那次尝试的种子（可单独复现）
    pub attempt_seed: u64,
    pub fairness: FairnessReport,
}

impl PlanOutcome {
    pub fn is_fair(&self) -> bool {
        self.fairness.is_fair()
    }
}

// ==========================================
// FairnessCoordinator - 公平性协调器
// ==========================================
pub struct FairnessCoordinator<'a> {
    engine: WeeklyAssignmentEngine<'a>,
    employees: &'a [Employee],
    max_attempts: u32,
    tolerance: usize,
}

impl<'a> FairnessCoordinator<'a> {
    pub fn new(
        engine: WeeklyAssignmentEngine<'a>,
        employees: &'a [Employee],
        max_attempts: u32,
        tolerance: usize,
    ) -> Self {
        Self {
            engine,
            employees,
            max_attempts: max_attempts.max(1),
            tolerance,
        }
    }

    /// 运行有界重生成循环
    ///
    /// 每次尝试从注入的随机源抽取一个种子, 用 StdRng 独立生成,
    /// 尝试之间不共享任何状态
    #[instrument(skip(self, rng), fields(max_attempts = self.max_attempts))]
    pub fn run<R: Rng + ?Sized>(&self, rng: &mut R) -> PlanOutcome {
        let mut attempt = 0u32;
        loop {
            attempt += 1;
            let seed: u64 = rng.random();
            let result = self.engine.generate(&mut StdRng::seed_from_u64(seed));
            let fairness = FairnessReport::evaluate(self.employees, &result.schedule, self.tolerance);

            if fairness.is_fair() {
                info!(attempt, seed, "排班满足公平性要求");
                return PlanOutcome {
                    schedule: result.schedule,
                    diagnostics: result.diagnostics,
                    attempts: attempt,
                    attempt_seed: seed,
                    fairness,
                };
            }

            debug!(
                attempt,
                seed,
                uncovered = fairness.uncovered.len(),
                cohort_violations = fairness.cohort_violations.len(),
                "公平性未满足, 重新生成"
            );

            if attempt >= self.max_attempts {
                warn!(
                    attempts = attempt,
                    uncovered = ?fairness.uncovered,
                    "达到最大尝试次数, 返回最后一次结果"
                );
                let mut diagnostics = result.diagnostics;
                diagnostics.push(Diagnostic::FairnessUnattainable {
                    attempts: attempt,
                    uncovered: fairness.uncovered.clone(),
                    cohort_violations: fairness
                        .cohort_violations
                        .iter()
                        .map(|c| c.cohort.clone())
                        .collect(),
                });
                return PlanOutcome {
                    schedule: result.schedule,
                    diagnostics,
                    attempts: attempt,
                    attempt_seed: seed,
                    fairness,
                };
            }
        }
    }
}
