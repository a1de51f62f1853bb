// ==========================================
// 周班次排班系统 - 排班运行服务
// ==========================================
// 流程:
//   1. 读取并校验名册（一次）
//   2. 公平性协调器驱动周引擎生成排班
//   3. 事后校验
//   4. 交给下游（ShiftAssignments 表、CSV 报表）
// 红线: 名册校验失败时不运行引擎; 下游只在排班采用后调用一次
// ==========================================

use crate::config::config_manager::ConfigManager;
use crate::config::rules::PlannerConfig;
use crate::domain::employee::Employee;
use crate::engine::fairness::{FairnessCoordinator, PlanOutcome};
use crate::engine::verifier::{ScheduleVerifier, VerificationReport};
use crate::engine::weekly::WeeklyAssignmentEngine;
use crate::planner::error::PlannerResult;
use crate::report::csv_report::CsvReportWriter;
use crate::report::ScheduleSink;
use crate::repository::{AssignmentRepository, EmployeeRepository};
use crate::roster::index::RosterIndex;
use crate::roster::source::RosterSource;
use crate::roster::validator::RosterValidator;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{info, instrument, warn};

/// 一次完整运行的结果
#[derive(Debug, Clone)]
pub struct PlanRun {
    pub employees: Vec<Employee>,
    pub outcome: PlanOutcome,
    pub verification: VerificationReport,
    /// 本次运行使用的主种子
    pub master_seed: u64,
}

// ==========================================
// ShiftPlanner - 排班运行服务
// ==========================================
pub struct ShiftPlanner {
    config: PlannerConfig,
}

impl ShiftPlanner {
    /// 创建服务（配置先校验）
    pub fn new(config: PlannerConfig) -> PlannerResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// 以员工库中 config_kv 的覆写项构建服务
    pub fn from_store(base: PlannerConfig) -> PlannerResult<Self> {
        let manager = ConfigManager::new(&base.store_path)?;
        let config = manager.load_planner_config(base)?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// 读取并校验名册
    pub fn load_roster(&self, source: &dyn RosterSource) -> PlannerResult<Vec<Employee>> {
        let employees = RosterValidator::new(&self.config.rules.site).load(source)?;
        Ok(employees)
    }

    /// 在已校验的名册上生成排班（不访问任何存储）
    pub fn plan<R: Rng + ?Sized>(&self, employees: &[Employee], rng: &mut R) -> PlanOutcome {
        let index = RosterIndex::new(employees);
        let engine = WeeklyAssignmentEngine::new(
            &index,
            &self.config.rules,
            self.config.strategy,
            self.config.horizon_weeks,
        );
        let coordinator = FairnessCoordinator::new(
            engine,
            employees,
            self.config.max_attempts,
            self.config.rules.cohort_spread_tolerance,
        );
        coordinator.run(rng)
    }

    /// 名册 → 排班 → 校验 → 下游
    ///
    /// # 参数
    /// - `source`: 名册数据源
    /// - `sinks`: 结果下游（按顺序调用）
    #[instrument(skip(self, source, sinks), fields(horizon = self.config.horizon_weeks))]
    pub fn run_with(
        &self,
        source: &dyn RosterSource,
        sinks: &[&dyn ScheduleSink],
    ) -> PlannerResult<PlanRun> {
        let employees = self.load_roster(source)?;

        let master_seed = match self.config.random_seed {
            Some(seed) => seed,
            None => {
                let seed = rand::random::<u64>();
                info!(seed, "未配置随机种子, 已随机生成");
                seed
            }
        };
        let mut rng = StdRng::seed_from_u64(master_seed);

        let outcome = self.plan(&employees, &mut rng);
        if !outcome.is_fair() {
            warn!(attempts = outcome.attempts, "公平性未满足, 采用最后一次生成结果");
        }
        for diagnostic in outcome.diagnostics.iter().filter(|d| d.is_degraded()) {
            warn!(%diagnostic, "排班诊断");
        }

        let verification = ScheduleVerifier::new(&self.config.rules).verify(&employees, &outcome.schedule);

        for sink in sinks {
            sink.publish(&employees, &outcome.schedule)?;
        }

        info!(
            employees = employees.len(),
            attempts = outcome.attempts,
            attempt_seed = outcome.attempt_seed,
            diagnostics = outcome.diagnostics.len(),
            violations = verification.violations().count(),
            "排班运行完成"
        );

        Ok(PlanRun {
            employees,
            outcome,
            verification,
            master_seed,
        })
    }

    /// 使用配置中的员工库与输出路径完成一次运行
    pub fn run(&self) -> PlannerResult<PlanRun> {
        let roster = EmployeeRepository::new(&self.config.store_path, &self.config.table_name)?;
        let store = AssignmentRepository::new(&self.config.store_path)?;
        let report = CsvReportWriter::new(&self.config.output_path, self.config.rules.site.clone());
        let sinks: [&dyn ScheduleSink; 2] = [&store, &report];
        self.run_with(&roster, &sinks)
    }
}
