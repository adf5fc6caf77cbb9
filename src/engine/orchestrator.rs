// ==========================================
// 服务请求排期系统 - 引擎编排器
// ==========================================
// 用途: 协调 装载 → 建模 → 求解 → 解码 → 评估 主流程
// 红线: 单线程同步批处理; 任一环节失败即整体失败,
//       绝不静默返回部分日程
// ==========================================

use crate::config::ScheduleConfig;
use crate::domain::DaySchedule;
use crate::engine::decoder::ScheduleDecoder;
use crate::engine::error::EngineResult;
use crate::engine::evaluator::{EvaluationReport, ScheduleEvaluator};
use crate::engine::model_builder::ModelBuilder;
use crate::engine::solver::{GoodLpSolver, IlpSolver, SolveStatus};
use crate::engine::utility::UtilityScorer;
use crate::importer::CsvRequestReader;
use crate::repository::RequestStore;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

// ==========================================
// ScheduleRunResult - 排期运行结果
// ==========================================
#[derive(Debug, Clone)]
pub struct ScheduleRunResult {
    /// 求解状态 (成功路径为 OPTIMAL / FEASIBLE)
    pub status: SolveStatus,

    /// 解码得到的计算日程
    pub computed_schedule: DaySchedule,

    /// 评估报告
    pub report: EvaluationReport,
}

// ==========================================
// ScheduleOrchestrator - 引擎编排器
// ==========================================
#[derive(Debug)]
pub struct ScheduleOrchestrator<S: IlpSolver> {
    config: ScheduleConfig,
    scorer: UtilityScorer,
    builder: ModelBuilder,
    decoder: ScheduleDecoder,
    evaluator: ScheduleEvaluator,
    solver: S,

    // 诊断旁路: 配置后在求解前转储 LP 文本
    model_dump_path: Option<PathBuf>,
}

impl ScheduleOrchestrator<GoodLpSolver> {
    /// 以内置 good_lp 求解器创建编排器
    ///
    /// # 错误
    /// - `Configuration`: 配置校验失败 (零排期、非正上限)
    pub fn new(config: ScheduleConfig) -> EngineResult<Self> {
        Self::with_solver(config, GoodLpSolver::new())
    }
}

impl<S: IlpSolver> ScheduleOrchestrator<S> {
    /// 以注入的求解器创建编排器
    pub fn with_solver(config: ScheduleConfig, solver: S) -> EngineResult<Self> {
        config.validate()?;
        let scorer = UtilityScorer::new(config.schedule_start_date);
        Ok(Self {
            config,
            scorer,
            builder: ModelBuilder::new(),
            decoder: ScheduleDecoder::new(),
            evaluator: ScheduleEvaluator::new(),
            solver,
            model_dump_path: None,
        })
    }

    /// 配置模型转储路径 (诊断用)
    pub fn set_model_dump_path(&mut self, path: Option<PathBuf>) {
        self.model_dump_path = path;
    }

    /// 排期配置
    pub fn config(&self) -> &ScheduleConfig {
        &self.config
    }

    /// 从 CSV 文件执行完整排期流程
    pub fn run_from_csv(&self, csv_path: &Path) -> anyhow::Result<ScheduleRunResult> {
        // ==========================================
        // 步骤1: 装载请求清单与黄金日程
        // ==========================================
        debug!("步骤1: 装载请求清单");
        let reader = CsvRequestReader::new();
        let store = reader.load_into_store(csv_path, self.config.horizon_days)?;

        Ok(self.run(&store)?)
    }

    /// 对已封存仓储执行 建模 → 求解 → 解码 → 评估
    pub fn run(&self, store: &RequestStore) -> EngineResult<ScheduleRunResult> {
        info!(
            requests = store.request_count(),
            horizon_days = store.horizon_days(),
            "开始执行排期流程"
        );

        // ==========================================
        // 步骤2: 构建整数规划模型
        // ==========================================
        debug!("步骤2: 构建整数规划模型");
        let model = self.builder.build(store, &self.scorer, &self.config)?;

        if let Some(dump_path) = &self.model_dump_path {
            let mut file = std::fs::File::create(dump_path)
                .map_err(|e| anyhow::anyhow!("模型转储文件创建失败: {}", e))?;
            model
                .write_lp(&mut file)
                .map_err(|e| anyhow::anyhow!("模型转储失败: {}", e))?;
            info!(path = %dump_path.display(), "模型已转储");
        }

        // ==========================================
        // 步骤3: 调用求解器
        // ==========================================
        debug!("步骤3: 调用求解器");
        let outcome = self.solver.solve(&model)?.require_success()?;
        info!(
            status = %outcome.status,
            objective_value = outcome.objective_value,
            "求解完成"
        );

        // ==========================================
        // 步骤4: 解码计算日程
        // ==========================================
        debug!("步骤4: 解码计算日程");
        let computed_schedule = self
            .decoder
            .decode(&outcome.assignment, model.index(), store)?;

        // ==========================================
        // 步骤5: 对照黄金日程评估
        // ==========================================
        debug!("步骤5: 评估计算日程");
        let report = self.evaluator.evaluate(
            &computed_schedule,
            store.gold_schedule(),
            outcome.objective_value,
            store,
            &self.config,
        );

        info!(
            average_accuracy = report.average_accuracy,
            num_scheduled = report.num_scheduled,
            total_requests = report.total_requests,
            "排期流程完成"
        );

        Ok(ScheduleRunResult {
            status: outcome.status,
            computed_schedule,
            report,
        })
    }
}
