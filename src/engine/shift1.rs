// ==========================================
// 周班次排班系统 - 班次1 选择器
// ==========================================
// 席位: 1 名 Associate
// 阶梯: (a) 站点+子区域均匹配本周目标 → (b) 仅站点匹配 → (c) 任意候选
// 红线: 冷却由候选池保证, 任一层级都不放宽
// ==========================================

use crate::domain::employee::Employee;
use crate::domain::types::ShiftCode;
use crate::engine::selection::{rank_by, AttemptState, Pick, RotationRole, SlotOutcome, WeekContext};
use rand::Rng;

/// 班次1 选择
///
/// # 参数
/// - `ctx`: 当前周上下文（周序号、冷却间隔、规则、策略）
/// - `associates`: 本周仍可用的 Associate（已按冷却过滤）
/// - `state`: 尝试级状态, 只读
///
/// # 返回
/// 选中 0 或 1 人; 候选池为空时 missing = 1
pub fn select<'a, R: Rng + ?Sized>(
    ctx: &WeekContext<'_>,
    associates: &[&'a Employee],
    state: &AttemptState,
    rng: &mut R,
) -> SlotOutcome<'a> {
    let cycle = &ctx.rules.shift1_cycle;
    let target = if cycle.is_empty() {
        None
    } else {
        cycle.get((ctx.week.saturating_sub(1) as usize) % cycle.len())
    };

    let domain_match = |e: &Employee| target.map_or(true, |t| e.domain == t.domain);
    let full_match = |e: &Employee| {
        domain_match(e)
            && target
                .and_then(|t| t.sub_domain.as_deref())
                .map_or(true, |sub| e.has_sub_domain(sub))
    };

    let levels: [(u8, &dyn Fn(&Employee) -> bool); 3] =
        [(1, &full_match), (2, &domain_match), (3, &|_: &Employee| true)];

    for (level, accept) in levels {
        let mut candidates: Vec<&'a Employee> =
            associates.iter().copied().filter(|e| accept(*e)).collect();
        if candidates.is_empty() {
            continue;
        }

        let last = &state.rotation.shift1;
        rank_by(&mut candidates, rng, |e| {
            let repeat = state.last_shift_was(e.id, ShiftCode::Slot1) as u8;
            // 班次数相同时, 末级候选优先换一个站点
            let same_domain = (level == 3 && !last.alternates_domain(e)) as u8;
            (ctx.balance_one(state, e), same_domain, repeat)
        });

        let chosen = candidates[0];
        return SlotOutcome::filled(
            vec![Pick {
                employee: chosen,
                role: RotationRole::Shift1,
            }],
            level,
        );
    }

    SlotOutcome::partial(Vec::new(), ShiftCode::Slot1.seats_per_week(), 1)
}
