// ==========================================
// 周班次排班系统 - 排班结果校验工具
// ==========================================
// 用法:
//   verify_schedule [RESULT.csv]
// 读取 CSV 透视表, 按默认规则逐项检查并输出报告
// 退出码: 存在硬约束违规时为 1
// ==========================================

use anyhow::{Context, Result};
use shift_roster::config::rules::DEFAULT_OUTPUT_PATH;
use shift_roster::config::ShiftRules;
use shift_roster::engine::{FairnessReport, ScheduleVerifier};
use shift_roster::logging;
use shift_roster::report::read_schedule_grid;
use std::path::PathBuf;

fn main() -> Result<()> {
    logging::init();

    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_PATH));

    let grid = read_schedule_grid(&path)
        .with_context(|| format!("读取排班表失败: {}", path.display()))?;
    let rules = ShiftRules::default();

    let report = ScheduleVerifier::new(&rules).verify(&grid.employees, &grid.schedule);
    let fairness = FairnessReport::evaluate(
        &grid.employees,
        &grid.schedule,
        rules.cohort_spread_tolerance,
    );

    println!(
        "排班表: {} ({} 名员工, {} 周)",
        path.display(),
        grid.employees.len(),
        grid.schedule.horizon_weeks()
    );

    let violations: Vec<_> = report.violations().collect();
    if violations.is_empty() {
        println!("✅ 硬约束全部满足");
    } else {
        println!("❌ 硬约束违规 {} 项:", violations.len());
        for finding in &violations {
            let name = grid
                .employees
                .iter()
                .find(|e| Some(e.id) == finding.employee_id())
                .map(|e| e.name.as_str())
                .unwrap_or("-");
            println!("  - {} [{}]", finding, name);
        }
    }

    let notices: Vec<_> = report.notices().collect();
    if !notices.is_empty() {
        println!("提示 {} 项:", notices.len());
        for finding in notices {
            println!("  - {}", finding);
        }
    }

    if fairness.is_fair() {
        println!("✅ 公平性满足: 全员覆盖, 同组极差 ≤ {}", rules.cohort_spread_tolerance);
    } else {
        println!(
            "⚠️ 公平性未满足: 未排班 {} 人, 失衡分组 {} 个",
            fairness.uncovered.len(),
            fairness.cohort_violations.len()
        );
        for spread in &fairness.cohort_violations {
            println!(
                "  - {}: {} 人, 班次数 {}..{}",
                spread.cohort, spread.members, spread.min_shifts, spread.max_shifts
            );
        }
    }

    if !violations.is_empty() {
        std::process::exit(1);
    }
    Ok(())
}
