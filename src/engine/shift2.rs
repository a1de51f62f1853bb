// ==========================================
// 周班次排班系统 - 班次2 选择器
// ==========================================
// 席位: 2 名 Layam, A 站点与 B 站点各一
// B 站点席位的期望子区域按 (周-1) mod 2 轮换
// 阶梯（默认 ExclusivityFirst）:
//   1. 期望子区域 + 两人上一个工作班次都不是班次2
//   2. 放宽 "上一个工作班次不是班次2"
//   3. 放宽期望子区域
//   4. 只填仍可填的单个席位
// 红线: 冷却任一层级都不放宽; 经验差超限时退回经验差最小的搭档
// ==========================================

use crate::config::rules::Shift2Relaxation;
use crate::domain::employee::Employee;
use crate::domain::types::ShiftCode;
use crate::engine::rotation::toggle_value;
use crate::engine::selection::{rank_by, AttemptState, Pick, RotationRole, SlotOutcome, WeekContext};
use rand::Rng;
use tracing::warn;

/// 层级约束: (期望子区域, 班次互斥)
type Shift2Level = (bool, bool);

fn ladder(relaxation: Shift2Relaxation) -> [Shift2Level; 3] {
    match relaxation {
        Shift2Relaxation::ExclusivityFirst => [(true, true), (true, false), (false, false)],
        Shift2Relaxation::AlternationFirst => [(true, true), (false, true), (false, false)],
    }
}

/// 班次2 选择
///
/// # 参数
/// - `layams`: 本周仍可用的 Layam（已按冷却过滤）
///
/// # 返回
/// 两人（A 站点在前）; 单席位兜底时 missing > 0
pub fn select<'a, R: Rng + ?Sized>(
    ctx: &WeekContext<'_>,
    layams: &[&'a Employee],
    state: &AttemptState,
    rng: &mut R,
) -> SlotOutcome<'a> {
    let site = &ctx.rules.site;
    let primary: Vec<&'a Employee> = layams
        .iter()
        .copied()
        .filter(|e| e.domain == site.primary_domain)
        .collect();
    let split: Vec<&'a Employee> = layams
        .iter()
        .copied()
        .filter(|e| site.is_split(&e.domain))
        .collect();

    let desired = toggle_value(&ctx.rules.shift2_sub_toggle, ctx.week);
    let honors_sub = |b: &Employee| desired.map_or(true, |d| b.has_sub_domain(d));
    let fresh = |e: &Employee| !state.last_shift_was(e.id, ShiftCode::Slot2);
    let last_split = &state.rotation.shift2_split;

    let all_pairs: Vec<(&'a Employee, &'a Employee)> = primary
        .iter()
        .flat_map(|a| split.iter().map(move |b| (*a, *b)))
        .collect();

    let levels = ladder(ctx.rules.shift2_relaxation);
    for (idx, (need_sub, need_fresh)) in levels.into_iter().enumerate() {
        let mut pairs: Vec<(&'a Employee, &'a Employee)> = all_pairs
            .iter()
            .copied()
            .filter(|(a, b)| {
                ctx.experience_compatible(a, b)
                    && (!need_sub || honors_sub(b))
                    && (!need_fresh || (fresh(a) && fresh(b)))
            })
            .collect();
        if pairs.is_empty() {
            continue;
        }

        rank_by(&mut pairs, rng, |(a, b)| {
            // 班次数相同时, 已放宽子区域的层级仍优先与上次不同的子区域
            let alternates =
                last_split.alternates_sub_domain(b, site, &ctx.rules.shift2_sub_toggle, ctx.week);
            let same_sub = (!need_sub && !alternates) as u8;
            (ctx.balance_pair(state, a, b), same_sub)
        });
        let (a, b) = pairs[0];
        return SlotOutcome::filled(pair_picks(a, b), idx as u8 + 1);
    }

    // 经验差无法满足: 取经验差最小的搭档
    if !all_pairs.is_empty() {
        let mut pairs = all_pairs;
        rank_by(&mut pairs, rng, |(a, b)| {
            (a.experience.abs_diff(b.experience), ctx.balance_pair(state, a, b))
        });
        let (a, b) = pairs[0];
        warn!(
            week = ctx.week,
            primary_id = a.id,
            split_id = b.id,
            diff = a.experience.abs_diff(b.experience),
            "班次2 无经验差合规搭档, 采用经验差最小的组合"
        );
        return SlotOutcome::filled(pair_picks(a, b), 3);
    }

    // 某一站点无人可用: 只填另一席位
    let mut picks = Vec::new();
    for (pool, role) in [
        (primary, RotationRole::Shift2Primary),
        (split, RotationRole::Shift2Split),
    ] {
        let mut pool = pool;
        if pool.is_empty() {
            continue;
        }
        rank_by(&mut pool, rng, |e| (ctx.balance_one(state, e), !fresh(e) as u8));
        picks.push(Pick {
            employee: pool[0],
            role,
        });
    }
    SlotOutcome::partial(picks, ShiftCode::Slot2.seats_per_week(), 4)
}

fn pair_picks<'a>(primary: &'a Employee, split: &'a Employee) -> Vec<Pick<'a>> {
    vec![
        Pick {
            employee: primary,
            role: RotationRole::Shift2Primary,
        },
        Pick {
            employee: split,
            role: RotationRole::Shift2Split,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::rules::ShiftRules;
    use crate::domain::types::{Band, EmployeeId};
    use crate::engine::selection::RotationRole;
    use crate::engine::strategy::AssignmentStrategy;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn layam(id: EmployeeId, exp: u32, domain: &str, sub: Option<&str>) -> Employee {
        Employee {
            id,
            name: format!("L{}", id),
            band: Band::Layam,
            experience: exp,
            domain: domain.to_string(),
            sub_domain: sub.map(str::to_string),
        }
    }

    fn ctx(rules: &ShiftRules, week: u32) -> WeekContext<'_> {
        WeekContext {
            week,
            gap: 5,
            rules,
            strategy: AssignmentStrategy::CohortFair,
        }
    }

    #[test]
    fn test_pair_honors_desired_sub_domain() {
        let rules = ShiftRules::default();
        let roster = vec![
            layam(1, 2, "AD-SEL", None),
            layam(2, 2, "FD-SEL", Some("Transmission")),
            layam(3, 2, "FD-SEL", Some("Hydraulic")),
        ];
        let pool: Vec<&Employee> = roster.iter().collect();
        let mut rng = StdRng::seed_from_u64(5);

        // 第 1 周期望 Transmission, 第 2 周期望 Hydraulic
        let week1 = select(&ctx(&rules, 1), &pool, &AttemptState::new(), &mut rng);
        assert_eq!(week1.level, 1);
        assert_eq!(week1.picks[0].employee.id, 1);
        assert_eq!(week1.picks[1].employee.id, 2);

        let week2 = select(&ctx(&rules, 2), &pool, &AttemptState::new(), &mut rng);
        assert_eq!(week2.picks[1].employee.id, 3);
    }

    #[test]
    fn test_relaxes_sub_domain_when_only_one_split_layam() {
        let rules = ShiftRules::default();
        let roster = vec![layam(1, 1, "AD-SEL", None), layam(2, 1, "FD-SEL", Some("Hydraulic"))];
        let pool: Vec<&Employee> = roster.iter().collect();
        let mut rng = StdRng::seed_from_u64(6);

        let outcome = select(&ctx(&rules, 1), &pool, &AttemptState::new(), &mut rng);
        assert_eq!(outcome.level, 3);
        assert_eq!(outcome.missing, 0);
        assert_eq!(outcome.picks[1].employee.id, 2);
    }

    #[test]
    fn test_exclusivity_relaxed_before_sub_domain() {
        let rules = ShiftRules::default();
        let roster = vec![layam(1, 1, "AD-SEL", None), layam(2, 1, "FD-SEL", Some("Transmission"))];
        let pool: Vec<&Employee> = roster.iter().collect();
        let mut state = AttemptState::new();
        state.ledger.record(1, 1, ShiftCode::Slot2);
        let mut rng = StdRng::seed_from_u64(7);

        let outcome = select(&ctx(&rules, 7), &pool, &state, &mut rng);
        assert_eq!(outcome.level, 2);

        let alternation_first = ShiftRules {
            shift2_relaxation: Shift2Relaxation::AlternationFirst,
            ..ShiftRules::default()
        };
        let outcome = select(&ctx(&alternation_first, 7), &pool, &state, &mut rng);
        assert_eq!(outcome.level, 3);
    }

    #[test]
    fn test_experience_fallback_picks_min_diff() {
        let rules = ShiftRules::default();
        let roster = vec![
            layam(1, 9, "AD-SEL", None),
            layam(2, 1, "FD-SEL", Some("Transmission")),
            layam(3, 5, "FD-SEL", Some("Hydraulic")),
        ];
        let pool: Vec<&Employee> = roster.iter().collect();
        let mut rng = StdRng::seed_from_u64(8);

        let outcome = select(&ctx(&rules, 1), &pool, &AttemptState::new(), &mut rng);
        assert_eq!(outcome.picks.len(), 2);
        assert_eq!(outcome.picks[1].employee.id, 3);
    }

    #[test]
    fn test_single_seat_when_domain_missing() {
        let rules = ShiftRules::default();
        let roster = vec![layam(2, 1, "FD-SEL", Some("Hydraulic"))];
        let pool: Vec<&Employee> = roster.iter().collect();
        let mut rng = StdRng::seed_from_u64(9);

        let outcome = select(&ctx(&rules, 1), &pool, &AttemptState::new(), &mut rng);
        assert_eq!(outcome.level, 4);
        assert_eq!(outcome.missing, 1);
        assert_eq!(outcome.picks[0].role, RotationRole::Shift2Split);
    }

    #[test]
    fn test_relaxed_level_prefers_fewest_shifts() {
        let rules = ShiftRules::default();
        let previous = layam(9, 1, "FD-SEL", Some("Hydraulic"));
        let roster = vec![
            layam(1, 1, "AD-SEL", None),
            layam(2, 1, "FD-SEL", Some("Hydraulic")),
            layam(3, 1, "FD-SEL", Some("Pneumatic")),
        ];
        let mut state = AttemptState::new();
        state.rotation.shift2_split.record(&previous);
        // 3 号子区域与上次不同, 但已上 3 次班
        for week in [1, 2, 3] {
            state.commit(
                &Pick {
                    employee: &roster[2],
                    role: RotationRole::Shift1,
                },
                week,
                ShiftCode::Slot1,
            );
        }
        let pool: Vec<&Employee> = roster.iter().collect();

        // 第 1 周期望 Transmission, 无人满足, 落到第 3 级
        for seed in 0..8 {
            let mut rng = StdRng::seed_from_u64(seed);
            let outcome = select(&ctx(&rules, 1), &pool, &state, &mut rng);
            assert_eq!(outcome.level, 3);
            assert_eq!(outcome.picks[1].employee.id, 2, "seed {}", seed);
        }
    }
}
