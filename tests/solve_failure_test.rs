// ==========================================
// 求解失败路径测试
// ==========================================
// 测试目标: 不可行/错误状态必须点名上报,绝不静默
// 覆盖范围: 零工时上限、请求数上限挤压、注入求解器错误状态
// ==========================================

use chrono::NaiveDate;
use service_request_aps::domain::ServiceRequest;
use service_request_aps::engine::{
    EngineError, EngineResult, IlpSolver, ModelBuilder, ScheduleModel, SolveOutcome, SolveStatus,
    UtilityScorer,
};
use service_request_aps::repository::RequestStore;
use service_request_aps::{ConfigError, GoodLpSolver, ScheduleConfig, ScheduleOrchestrator};

// ==========================================
// 测试辅助函数
// ==========================================

fn start_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2015, 5, 8).unwrap()
}

fn create_test_store(count: u32, horizon_days: u32) -> RequestStore {
    let mut store = RequestStore::new(horizon_days);
    for id in 1..=count {
        store
            .insert_request(ServiceRequest {
                request_id: id,
                submission_date: start_date(),
                urgency: 0,
                duration_hours: 4.0,
            })
            .unwrap();
        store.record_gold_assignment(1, id).unwrap();
    }
    store.seal().unwrap()
}

// ==========================================
// 测试用例 1: 零工时上限 → 求解器报不可行
// ==========================================

#[test]
fn test_zero_work_hour_limit_reports_infeasible() {
    println!("\n=== 测试：零工时上限不可行 ===");

    let store = create_test_store(1, 2);
    // 绕过配置文件校验,直接以 0 上限建模: 正工时请求必然排不下
    let config = ScheduleConfig {
        horizon_days: 2,
        schedule_start_date: start_date(),
        daily_work_hour_limit: 0.0,
        daily_request_count_limit: None,
    };

    let builder = ModelBuilder::new();
    let scorer = UtilityScorer::new(start_date());
    let model = builder.build(&store, &scorer, &config).unwrap();

    let solver = GoodLpSolver::new();
    let outcome = solver.solve(&model).unwrap();
    assert_eq!(outcome.status, SolveStatus::Infeasible);

    let err = outcome.require_success().unwrap_err();
    println!("✓ 错误信息: {}", err);
    match err {
        EngineError::Solve { status } => assert_eq!(status, SolveStatus::Infeasible),
        other => panic!("期望 Solve 错误, 实际 {:?}", other),
    }
}

// ==========================================
// 测试用例 2: 请求数上限挤压 → 不可行
// ==========================================

#[test]
fn test_count_limit_squeeze_reports_infeasible() {
    println!("\n=== 测试：请求数上限挤压不可行 ===");

    // 3 个请求 / 2 天 / 每天至多 1 单: 约束A 无法全部满足
    let store = create_test_store(3, 2);
    let config = ScheduleConfig {
        horizon_days: 2,
        schedule_start_date: start_date(),
        daily_work_hour_limit: 104.0,
        daily_request_count_limit: Some(1),
    };

    let orchestrator = ScheduleOrchestrator::new(config).unwrap();
    let err = orchestrator.run(&store).unwrap_err();

    println!("✓ 错误信息: {}", err);
    assert!(matches!(
        err,
        EngineError::Solve {
            status: SolveStatus::Infeasible
        }
    ));
}

// ==========================================
// 测试用例 3: 配置校验拒绝非正上限
// ==========================================

#[test]
fn test_orchestrator_rejects_non_positive_limit_config() {
    println!("\n=== 测试：配置校验拒绝非正上限 ===");

    let config = ScheduleConfig {
        horizon_days: 2,
        schedule_start_date: start_date(),
        daily_work_hour_limit: -1.0,
        daily_request_count_limit: None,
    };

    let err = ScheduleOrchestrator::new(config).unwrap_err();
    println!("✓ 错误信息: {}", err);
    assert!(matches!(
        err,
        EngineError::Configuration(ConfigError::NonPositiveWorkHourLimit(_))
    ));
}

// ==========================================
// 测试用例 4: 注入求解器的错误状态向上传递
// ==========================================

/// 恒定返回指定状态的桩求解器
struct StubSolver {
    status: SolveStatus,
}

impl IlpSolver for StubSolver {
    fn solve(&self, _model: &ScheduleModel) -> EngineResult<SolveOutcome> {
        Ok(SolveOutcome {
            status: self.status,
            assignment: Vec::new(),
            objective_value: 0.0,
        })
    }
}

#[test]
fn test_injected_solver_error_status_propagates() {
    println!("\n=== 测试：求解器错误状态传递 ===");

    let store = create_test_store(2, 2);
    let config = ScheduleConfig {
        horizon_days: 2,
        schedule_start_date: start_date(),
        daily_work_hour_limit: 104.0,
        daily_request_count_limit: None,
    };

    for status in [SolveStatus::Unbounded, SolveStatus::Error] {
        let orchestrator =
            ScheduleOrchestrator::with_solver(config.clone(), StubSolver { status }).unwrap();
        let err = orchestrator.run(&store).unwrap_err();
        println!("✓ {} 状态上报: {}", status, err);
        match err {
            EngineError::Solve { status: reported } => assert_eq!(reported, status),
            other => panic!("期望 Solve 错误, 实际 {:?}", other),
        }
    }
}

// ==========================================
// 测试用例 5: 零请求 → 拒绝构建退化模型
// ==========================================

#[test]
fn test_zero_requests_rejected_at_build() {
    println!("\n=== 测试：零请求拒绝建模 ===");

    let store = RequestStore::new(3); // 未装载任何请求
    let config = ScheduleConfig {
        horizon_days: 3,
        schedule_start_date: start_date(),
        daily_work_hour_limit: 104.0,
        daily_request_count_limit: None,
    };

    let builder = ModelBuilder::new();
    let scorer = UtilityScorer::new(start_date());
    let err = builder.build(&store, &scorer, &config).unwrap_err();

    println!("✓ 错误信息: {}", err);
    assert!(matches!(
        err,
        EngineError::Configuration(ConfigError::DegenerateModel { requests: 0, .. })
    ));
}
