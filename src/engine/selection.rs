// ==========================================
// 周班次排班系统 - 选择器公共部分
// ==========================================
// 职责: 尝试级状态（冷却台账 + 轮换状态 + 班次计数）、
//       周上下文、候选排序
// ==========================================

use crate::config::rules::ShiftRules;
use crate::domain::employee::Employee;
use crate::domain::types::{EmployeeId, ShiftCode, Week};
use crate::engine::cooldown::CooldownLedger;
use crate::engine::rotation::{RoleRotation, RotationState};
use crate::engine::strategy::AssignmentStrategy;
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::{BTreeMap, BTreeSet};

/// 轮换角色
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationRole {
    Shift1,
    Shift2Primary,
    Shift2Split,
    Shift3Associate,
    Shift3Layam,
}

// ==========================================
// AttemptState - 单次生成尝试的可变状态
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct AttemptState {
    pub ledger: CooldownLedger,
    pub rotation: RotationState,
    tally: BTreeMap<EmployeeId, usize>,
}

impl AttemptState {
    pub fn new() -> Self {
        Self::default()
    }

    /// 到目前为止的工作班次数
    pub fn shifts_so_far(&self, employee_id: EmployeeId) -> usize {
        self.tally.get(&employee_id).copied().unwrap_or(0)
    }

    /// 上一个工作班次是否为指定班次
    pub fn last_shift_was(&self, employee_id: EmployeeId, shift_code: ShiftCode) -> bool {
        self.ledger.last_shift(employee_id) == Some(shift_code)
    }

    fn role_mut(&mut self, role: RotationRole) -> &mut RoleRotation {
        match role {
            RotationRole::Shift1 => &mut self.rotation.shift1,
            RotationRole::Shift2Primary => &mut self.rotation.shift2_primary,
            RotationRole::Shift2Split => &mut self.rotation.shift2_split,
            RotationRole::Shift3Associate => &mut self.rotation.shift3_associate,
            RotationRole::Shift3Layam => &mut self.rotation.shift3_layam,
        }
    }

    /// 提交一次选择: 更新冷却台账、班次计数与角色轮换
    pub fn commit(&mut self, pick: &Pick<'_>, week: Week, shift_code: ShiftCode) {
        self.ledger.record(pick.employee.id, week, shift_code);
        *self.tally.entry(pick.employee.id).or_insert(0) += 1;
        self.role_mut(pick.role).record(pick.employee);
    }
}

// ==========================================
// WeekContext - 当前周的只读上下文
// ==========================================
pub struct WeekContext<'r> {
    pub week: Week,
    pub gap: u32,
    pub rules: &'r ShiftRules,
    pub strategy: AssignmentStrategy,
}

impl<'r> WeekContext<'r> {
    /// 经验差是否在上限内
    pub fn experience_compatible(&self, a: &Employee, b: &Employee) -> bool {
        a.experience.abs_diff(b.experience) <= self.rules.max_experience_diff
    }

    /// 单人均衡键
    pub fn balance_one(&self, state: &AttemptState, e: &Employee) -> (usize, usize) {
        let t = state.shifts_so_far(e.id);
        self.strategy.balance_key(t, t)
    }

    /// 两人均衡键（最大值, 和）
    pub fn balance_pair(&self, state: &AttemptState, a: &Employee, b: &Employee) -> (usize, usize) {
        let (ta, tb) = (state.shifts_so_far(a.id), state.shifts_so_far(b.id));
        self.strategy.balance_key(ta.max(tb), ta + tb)
    }
}

// ==========================================
// Pick / SlotOutcome - 选择结果
// ==========================================
#[derive(Debug, Clone, Copy)]
pub struct Pick<'a> {
    pub employee: &'a Employee,
    pub role: RotationRole,
}

#[derive(Debug, Clone)]
pub struct SlotOutcome<'a> {
    pub picks: Vec<Pick<'a>>,
    /// 实际使用的放宽层级（1 = 最严格）
    pub level: u8,
    /// 未填满的席位数
    pub missing: usize,
}

impl<'a> SlotOutcome<'a> {
    pub fn filled(picks: Vec<Pick<'a>>, level: u8) -> Self {
        Self {
            picks,
            level,
            missing: 0,
        }
    }

    pub fn partial(picks: Vec<Pick<'a>>, seats: usize, level: u8) -> Self {
        let missing = seats.saturating_sub(picks.len());
        Self {
            picks,
            level,
            missing,
        }
    }
}

/// 先洗牌再稳定排序: 相同排序键之间由随机数决定先后
pub fn rank_by<T, K, R, F>(items: &mut [T], rng: &mut R, key: F)
where
    K: Ord,
    R: Rng + ?Sized,
    F: FnMut(&T) -> K,
{
    items.shuffle(rng);
    items.sort_by_key(key);
}

/// 本周仍可用的候选: 未被本周选中, 且满足当前冷却间隔
pub fn available<'a>(
    pool: &[&'a Employee],
    state: &AttemptState,
    ctx: &WeekContext<'_>,
    taken: &BTreeSet<EmployeeId>,
) -> Vec<&'a Employee> {
    pool.iter()
        .copied()
        .filter(|e| !taken.contains(&e.id) && state.ledger.eligible(e.id, ctx.week, ctx.gap))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::Band;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn employee(id: EmployeeId) -> Employee {
        Employee {
            id,
            name: format!("E{}", id),
            band: Band::Associate,
            experience: 1,
            domain: "AD-SEL".to_string(),
            sub_domain: None,
        }
    }

    #[test]
    fn test_commit_updates_all_state() {
        let e = employee(7);
        let mut state = AttemptState::new();
        state.commit(
            &Pick {
                employee: &e,
                role: RotationRole::Shift1,
            },
            2,
            ShiftCode::Slot1,
        );
        assert_eq!(state.shifts_so_far(7), 1);
        assert!(state.last_shift_was(7, ShiftCode::Slot1));
        assert_eq!(state.rotation.shift1.last_domain.as_deref(), Some("AD-SEL"));
    }

    #[test]
    fn test_rank_by_orders_by_key_then_random() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut items = vec![(2, 'a'), (1, 'b'), (2, 'c'), (0, 'd')];
        rank_by(&mut items, &mut rng, |(k, _)| *k);
        assert_eq!(items[0], (0, 'd'));
        assert_eq!(items[1], (1, 'b'));
    }

    #[test]
    fn test_available_filters_cooldown_and_taken() {
        let roster = vec![employee(1), employee(2), employee(3)];
        let pool: Vec<&Employee> = roster.iter().collect();
        let rules = ShiftRules::default();
        let ctx = WeekContext {
            week: 4,
            gap: 5,
            rules: &rules,
            strategy: AssignmentStrategy::CohortFair,
        };
        let mut state = AttemptState::new();
        state.ledger.record(1, 1, ShiftCode::Slot2);
        let taken: BTreeSet<EmployeeId> = [3].into_iter().collect();

        let ids: Vec<_> = available(&pool, &state, &ctx, &taken).iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![2]);
    }
}
