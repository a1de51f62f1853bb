// ==========================================
// 周班次排班系统 - 周排班引擎
// ==========================================
// 流程（单次生成尝试）: Init → 逐周(1..N) → Done
// 每周:
//   1. 经验为 0 的员工休息
//   2. 班次1 → 3. 班次2 → 4. 班次3
//   5. 其余员工休息
// 冷却阶梯: 按 cooldown_gaps 逐级试算整周, 全部填满即采用
// 红线: 周必须按顺序处理, 不读写任何外部存储
// ==========================================

use crate::config::rules::ShiftRules;
use crate::domain::schedule::Schedule;
use crate::domain::types::{Band, EmployeeId, ShiftCode, Week};
use crate::engine::diagnostics::Diagnostic;
use crate::engine::selection::{available, AttemptState, SlotOutcome, WeekContext};
use crate::engine::strategy::AssignmentStrategy;
use crate::engine::{shift1, shift2, shift3};
use crate::roster::index::RosterIndex;
use rand::Rng;
use std::collections::BTreeSet;
use tracing::{debug, instrument, warn};

/// 单次生成结果
#[derive(Debug, Clone)]
pub struct GenerationResult {
    pub schedule: Schedule,
    pub diagnostics: Vec<Diagnostic>,
}

impl GenerationResult {
    /// 存在空缺席位的周数
    pub fn unfilled_weeks(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| matches!(d, Diagnostic::UnfilledSlot { .. }))
            .filter_map(Diagnostic::week)
            .collect::<BTreeSet<_>>()
            .len()
    }
}

/// 单周在某一冷却间隔下的试算结果
struct WeekPlan {
    gap: u32,
    assignments: Vec<(EmployeeId, ShiftCode)>,
    diagnostics: Vec<Diagnostic>,
    missing: usize,
}

// ==========================================
// WeeklyAssignmentEngine - 周排班引擎
// ==========================================
pub struct WeeklyAssignmentEngine<'a> {
    index: &'a RosterIndex<'a>,
    rules: &'a ShiftRules,
    strategy: AssignmentStrategy,
    horizon_weeks: u32,
}

impl<'a> WeeklyAssignmentEngine<'a> {
    /// 创建引擎
    ///
    /// # 参数
    /// - `index`: 名册索引（只读）
    /// - `rules`: 已校验的排班规则
    /// - `strategy`: 候选排序策略
    /// - `horizon_weeks`: 排班周数
    pub fn new(
        index: &'a RosterIndex<'a>,
        rules: &'a ShiftRules,
        strategy: AssignmentStrategy,
        horizon_weeks: u32,
    ) -> Self {
        Self {
            index,
            rules,
            strategy,
            horizon_weeks,
        }
    }

    pub fn horizon_weeks(&self) -> u32 {
        self.horizon_weeks
    }

    /// 生成完整周期的排班（一次尝试）
    ///
    /// 冷却台账、轮换状态、班次计数都在本次调用内创建并丢弃
    #[instrument(skip(self, rng), fields(weeks = self.horizon_weeks, strategy = %self.strategy))]
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> GenerationResult {
        let mut schedule = Schedule::new(self.index.ids(), self.horizon_weeks);
        let mut diagnostics = Vec::new();
        let mut state = AttemptState::new();

        for week in 1..=self.horizon_weeks {
            let (plan, next_state) = self.plan_week(week, &state, rng);
            state = next_state;

            for (employee_id, code) in &plan.assignments {
                schedule.set(*employee_id, week, *code);
            }

            if plan.gap < self.rules.preferred_gap() {
                warn!(week, gap = plan.gap, "冷却间隔降级");
                diagnostics.push(Diagnostic::CooldownDegraded { week, gap: plan.gap });
            }
            diagnostics.extend(plan.diagnostics);
        }

        GenerationResult {
            schedule,
            diagnostics,
        }
    }

    /// 按冷却阶梯试算一周
    ///
    /// # 返回
    /// 首个填满全部席位的试算; 都填不满时取填充人数最多者（间隔大者优先）
    fn plan_week<R: Rng + ?Sized>(
        &self,
        week: Week,
        state: &AttemptState,
        rng: &mut R,
    ) -> (WeekPlan, AttemptState) {
        let mut best: Option<(WeekPlan, AttemptState)> = None;

        for &gap in &self.rules.cooldown_gaps {
            let mut trial = state.clone();
            let plan = self.try_week(week, gap, &mut trial, rng);
            let complete = plan.missing == 0;

            let better = best
                .as_ref()
                .map_or(true, |(b, _)| plan.assignments.len() > b.assignments.len());
            if better {
                best = Some((plan, trial));
            }
            if complete {
                break;
            }
            debug!(week, gap, "当前冷却间隔无法填满全部席位, 尝试下一级");
        }

        best.unwrap_or_else(|| {
            // cooldown_gaps 为空（未经校验的规则）时整周休息
            (
                WeekPlan {
                    gap: 0,
                    assignments: Vec::new(),
                    diagnostics: Vec::new(),
                    missing: 0,
                },
                state.clone(),
            )
        })
    }

    /// 在固定冷却间隔下执行一周的三个班次选择
    fn try_week<R: Rng + ?Sized>(
        &self,
        week: Week,
        gap: u32,
        state: &mut AttemptState,
        rng: &mut R,
    ) -> WeekPlan {
        let ctx = WeekContext {
            week,
            gap,
            rules: self.rules,
            strategy: self.strategy,
        };
        let mut plan = WeekPlan {
            gap,
            assignments: Vec::new(),
            diagnostics: Vec::new(),
            missing: 0,
        };
        // 经验为 0 / Other 级别的员工从不进入候选池, 保持休息
        let mut taken: BTreeSet<EmployeeId> = BTreeSet::new();
        let associates = self.index.schedulable(Band::Associate);
        let layams = self.index.schedulable(Band::Layam);

        // ===== 班次1 =====
        let pool = available(associates, state, &ctx, &taken);
        let outcome = shift1::select(&ctx, &pool, state, rng);
        Self::apply(&ctx, ShiftCode::Slot1, outcome, state, &mut taken, &mut plan);

        // ===== 班次2 =====
        let pool = available(layams, state, &ctx, &taken);
        let outcome = shift2::select(&ctx, &pool, state, rng);
        Self::apply(&ctx, ShiftCode::Slot2, outcome, state, &mut taken, &mut plan);

        // ===== 班次3 =====
        let assoc_pool = available(associates, state, &ctx, &taken);
        let layam_pool = available(layams, state, &ctx, &taken);
        let outcome = shift3::select(&ctx, &assoc_pool, &layam_pool, state, rng);
        Self::apply(&ctx, ShiftCode::Slot3, outcome, state, &mut taken, &mut plan);

        plan
    }

    fn apply(
        ctx: &WeekContext<'_>,
        code: ShiftCode,
        outcome: SlotOutcome<'_>,
        state: &mut AttemptState,
        taken: &mut BTreeSet<EmployeeId>,
        plan: &mut WeekPlan,
    ) {
        for pick in &outcome.picks {
            state.commit(pick, ctx.week, code);
            taken.insert(pick.employee.id);
            plan.assignments.push((pick.employee.id, code));
            debug!(
                week = ctx.week,
                gap = ctx.gap,
                slot = %code,
                employee_id = pick.employee.id,
                domain = %pick.employee.domain,
                "分配班次"
            );
        }

        if outcome.level > 1 {
            warn!(week = ctx.week, slot = %code, level = outcome.level, "班次选择放宽");
            plan.diagnostics.push(Diagnostic::LadderRelaxed {
                week: ctx.week,
                slot: code,
                level: outcome.level,
            });
        }
        if outcome.missing > 0 {
            warn!(week = ctx.week, slot = %code, missing = outcome.missing, "班次席位空缺");
            plan.missing += outcome.missing;
            plan.diagnostics.push(Diagnostic::UnfilledSlot {
                week: ctx.week,
                slot: code,
                missing: outcome.missing,
            });
        }
    }
}
