// ==========================================
// 周班次排班系统 - 班次3 选择器
// ==========================================
// 席位: 1 名 Associate + 1 名 Layam
// 两个角色各自轮换站点（分区站点同时轮换子区域）
// 阶梯: 1. 两角色都轮换 → 2. 放宽 Layam → 3. 放宽 Associate → 4. 都放宽
// 红线: 冷却与经验差在所有层级都是硬约束
// ==========================================

use crate::domain::employee::Employee;
use crate::domain::types::ShiftCode;
use crate::engine::selection::{rank_by, AttemptState, Pick, RotationRole, SlotOutcome, WeekContext};
use rand::Rng;

/// 层级约束: (Associate 轮换, Layam 轮换)
const LADDER: [(bool, bool); 4] = [(true, true), (true, false), (false, true), (false, false)];

/// 班次3 选择
///
/// # 参数
/// - `associates` / `layams`: 本周仍可用的候选（已按冷却过滤, 已排除班次1/2 人选）
///
/// # 返回
/// - 两人: Associate 在前
/// - 某一级别候选池为空时只填另一角色
/// - 两池均非空但无经验差合规搭档时不填
pub fn select<'a, R: Rng + ?Sized>(
    ctx: &WeekContext<'_>,
    associates: &[&'a Employee],
    layams: &[&'a Employee],
    state: &AttemptState,
    rng: &mut R,
) -> SlotOutcome<'a> {
    let site = &ctx.rules.site;
    let toggle = &ctx.rules.shift3_sub_toggle;
    let rotation = &state.rotation;
    let assoc_alt = |e: &Employee| rotation.shift3_associate.alternates(e, site, toggle, ctx.week);
    let layam_alt = |e: &Employee| rotation.shift3_layam.alternates(e, site, toggle, ctx.week);
    let repeat = |e: &Employee| state.last_shift_was(e.id, ShiftCode::Slot3) as u8;

    let all_pairs: Vec<(&'a Employee, &'a Employee)> = associates
        .iter()
        .flat_map(|a| layams.iter().map(move |l| (*a, *l)))
        .filter(|(a, l)| ctx.experience_compatible(a, l))
        .collect();

    for (idx, (need_assoc, need_layam)) in LADDER.into_iter().enumerate() {
        let mut pairs: Vec<(&'a Employee, &'a Employee)> = all_pairs
            .iter()
            .copied()
            .filter(|(a, l)| (!need_assoc || assoc_alt(a)) && (!need_layam || layam_alt(l)))
            .collect();
        if pairs.is_empty() {
            continue;
        }

        rank_by(&mut pairs, rng, |(a, l)| {
            (ctx.balance_pair(state, a, l), repeat(a) + repeat(l))
        });
        let (a, l) = pairs[0];
        return SlotOutcome::filled(
            vec![
                Pick {
                    employee: a,
                    role: RotationRole::Shift3Associate,
                },
                Pick {
                    employee: l,
                    role: RotationRole::Shift3Layam,
                },
            ],
            idx as u8 + 1,
        );
    }

    let seats = ShiftCode::Slot3.seats_per_week();
    let single = match (associates.is_empty(), layams.is_empty()) {
        (false, true) => Some((associates, RotationRole::Shift3Associate)),
        (true, false) => Some((layams, RotationRole::Shift3Layam)),
        _ => None,
    };
    let Some((pool, role)) = single else {
        return SlotOutcome::partial(Vec::new(), seats, LADDER.len() as u8);
    };

    let mut pool: Vec<&'a Employee> = pool.to_vec();
    rank_by(&mut pool, rng, |e| {
        let alt = match role {
            RotationRole::Shift3Associate => assoc_alt(e),
            _ => layam_alt(e),
        };
        (ctx.balance_one(state, e), !alt as u8, repeat(e))
    });
    SlotOutcome::partial(
        vec![Pick {
            employee: pool[0],
            role,
        }],
        seats,
        LADDER.len() as u8,
    )
}
