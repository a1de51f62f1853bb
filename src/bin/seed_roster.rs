// ==========================================
// 周班次排班系统 - 员工库初始化工具
// ==========================================
// 用法:
//   seed_roster [DB_PATH] [--csv ROSTER.csv] [--seed N]
// 不带 --csv 时生成示例名册:
//   14 名 Associate、18 名 Layam（A/B 站点各半, B 站点分两个子区域）、2 名经验为 0 的员工
// ==========================================

use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use shift_roster::config::{default_store_path, SiteLayout};
use shift_roster::domain::{Band, Employee};
use shift_roster::logging;
use shift_roster::repository::EmployeeRepository;
use shift_roster::roster::{CsvRosterSource, RosterValidator};

const TABLE_NAME: &str = "Employees";
const SAMPLE_ASSOCIATES: i64 = 14;
const SAMPLE_LAYAMS: i64 = 18;

fn main() -> Result<()> {
    logging::init();

    let mut db_path: Option<String> = None;
    let mut csv_path: Option<String> = None;
    let mut seed: u64 = 2024;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--csv" => csv_path = Some(args.next().context("--csv 缺少路径")?),
            "--seed" => {
                seed = args
                    .next()
                    .context("--seed 缺少取值")?
                    .parse()
                    .context("--seed 需要整数")?
            }
            _ => db_path = Some(arg),
        }
    }
    let db_path = db_path.unwrap_or_else(default_store_path);
    let site = SiteLayout::default();

    let employees = match &csv_path {
        Some(path) => RosterValidator::new(&site)
            .load(&CsvRosterSource::new(path))
            .with_context(|| format!("读取名册失败: {}", path))?,
        None => sample_roster(&site, seed),
    };

    let repo = EmployeeRepository::new(&db_path, TABLE_NAME)?;
    repo.ensure_table()?;
    let written = repo.upsert_all(&employees)?;

    tracing::info!(db = %db_path, written, "员工名册已写入");
    println!("已写入 {} 名员工 → {}", written, db_path);
    Ok(())
}

/// 生成示例名册（经验 1..=3 随机, 种子固定则结果固定）
fn sample_roster(site: &SiteLayout, seed: u64) -> Vec<Employee> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut employees = Vec::new();
    let mut next_id = 1i64;

    let mut push = |band: Band, experience: u32, domain: &str, sub_domain: Option<&str>| {
        employees.push(Employee {
            id: next_id,
            name: format!("{}-{:02}", band, next_id),
            band,
            experience,
            domain: domain.to_string(),
            sub_domain: sub_domain.map(str::to_string),
        });
        next_id += 1;
    };

    for (band, count) in [(Band::Associate, SAMPLE_ASSOCIATES), (Band::Layam, SAMPLE_LAYAMS)] {
        for i in 0..count {
            let experience = rng.random_range(1..=3);
            if i % 2 == 0 {
                push(band, experience, &site.primary_domain, None);
            } else {
                let sub = &site.sub_domains[(i as usize / 2) % site.sub_domains.len()];
                push(band, experience, &site.split_domain, Some(sub));
            }
        }
    }

    push(Band::Associate, 0, &site.primary_domain, None);
    push(Band::Layam, 0, &site.split_domain, Some(&site.sub_domains[0]));

    employees
}
