// ==========================================
// 周班次排班系统 - 主入口
// ==========================================
// 用法:
//   shift-roster [--db PATH] [--table NAME] [--output PATH]
//                [--weeks N] [--seed N] [--attempts N] [--strategy NAME]
// 优先级: 命令行 > config_kv 覆写 > 默认值
// ==========================================

use anyhow::{bail, Context, Result};
use shift_roster::config::PlannerConfig;
use shift_roster::engine::AssignmentStrategy;
use shift_roster::report::ScheduleTable;
use shift_roster::{logging, ShiftPlanner};

fn main() -> Result<()> {
    logging::init();

    tracing::info!("==================================================");
    tracing::info!("{} v{}", shift_roster::APP_NAME, shift_roster::VERSION);
    tracing::info!("==================================================");

    let args = CliArgs::parse(std::env::args().skip(1))?;

    let mut base = PlannerConfig::default();
    if let Some(db) = &args.db {
        base.store_path = db.clone();
    }
    tracing::info!("使用员工库: {}", base.store_path);

    // config_kv 覆写后再应用命令行参数
    let stored = ShiftPlanner::from_store(base)?;
    let config = args.apply(stored.config().clone());
    let planner = ShiftPlanner::new(config)?;

    let run = planner.run()?;

    let table = ScheduleTable::build(&run.employees, &run.outcome.schedule, &planner.config().rules.site);
    println!(
        "\nFinal Shift Planner Result (Pivoted {} Weeks):\n",
        planner.config().horizon_weeks
    );
    print!("{}", table.render_tab());
    println!("\nFinal result saved to '{}'\n", planner.config().output_path);

    for diagnostic in &run.outcome.diagnostics {
        tracing::info!("诊断: {}", diagnostic);
    }
    for finding in run.verification.violations() {
        tracing::warn!("校验: {}", finding);
    }
    tracing::info!(
        master_seed = run.master_seed,
        attempt_seed = run.outcome.attempt_seed,
        attempts = run.outcome.attempts,
        fair = run.outcome.is_fair(),
        "运行结束"
    );

    Ok(())
}

/// 命令行参数（均为可选覆写）
#[derive(Debug, Default)]
struct CliArgs {
    db: Option<String>,
    table: Option<String>,
    output: Option<String>,
    weeks: Option<u32>,
    seed: Option<u64>,
    attempts: Option<u32>,
    strategy: Option<AssignmentStrategy>,
}

impl CliArgs {
    fn parse(mut args: impl Iterator<Item = String>) -> Result<Self> {
        let mut parsed = CliArgs::default();
        while let Some(flag) = args.next() {
            let mut value = || {
                args.next()
                    .with_context(|| format!("参数 {} 缺少取值", flag))
            };
            match flag.as_str() {
                "--db" => parsed.db = Some(value()?),
                "--table" => parsed.table = Some(value()?),
                "--output" => parsed.output = Some(value()?),
                "--weeks" => parsed.weeks = Some(value()?.parse().context("--weeks 需要整数")?),
                "--seed" => parsed.seed = Some(value()?.parse().context("--seed 需要整数")?),
                "--attempts" => {
                    parsed.attempts = Some(value()?.parse().context("--attempts 需要整数")?)
                }
                "--strategy" => {
                    parsed.strategy = Some(value()?.parse().map_err(anyhow::Error::msg)?)
                }
                other => bail!("未知参数: {}", other),
            }
        }
        Ok(parsed)
    }

    fn apply(&self, mut config: PlannerConfig) -> PlannerConfig {
        if let Some(table) = &self.table {
            config.table_name = table.clone();
        }
        if let Some(output) = &self.output {
            config.output_path = output.clone();
        }
        if let Some(weeks) = self.weeks {
            config.horizon_weeks = weeks;
        }
        if let Some(seed) = self.seed {
            config.random_seed = Some(seed);
        }
        if let Some(attempts) = self.attempts {
            config.max_attempts = attempts;
        }
        if let Some(strategy) = self.strategy {
            config.strategy = strategy;
        }
        config
    }
}
