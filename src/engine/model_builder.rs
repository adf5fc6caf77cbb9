// ==========================================
// 服务请求排期系统 - 模型构建引擎
// ==========================================
// 职责: 由请求仓储与效用函数一次性构建整数规划模型
// 红线: 纯构建,无跨调用共享状态; 变量枚举顺序固定为请求优先、日次之
// ==========================================

use crate::config::{ConfigError, ScheduleConfig};
use crate::engine::error::EngineResult;
use crate::engine::model::{ConstraintSense, ConstraintSpec, ScheduleModel, VariableIndex};
use crate::engine::utility::UtilityScorer;
use crate::repository::RequestStore;
use tracing::{debug, instrument};

// ==========================================
// ModelBuilder - 模型构建引擎
// ==========================================
#[derive(Debug)]
pub struct ModelBuilder;

impl ModelBuilder {
    /// 构造函数
    pub fn new() -> Self {
        Self
    }

    /// 构建排期整数规划模型
    ///
    /// 约束体系:
    /// - 约束A (每请求一行): Σ_j x(i,j) = 1,每个请求恰好安排一天;
    ///   排不下属于不可行,由求解器报出,不得静默放宽为"至多一次"
    /// - 约束B (每日一行): Σ_i duration(i) × x(i,j) <= 单日工时上限
    /// - 约束C (每日一行,配置了请求数上限时): Σ_i x(i,j) <= 上限
    ///
    /// # 参数
    /// - `store`: 封存后的请求仓储
    /// - `scorer`: 效用计算引擎
    /// - `config`: 排期配置 (此处仅取上限值,不重复做取值校验)
    ///
    /// # 错误
    /// - `Configuration(DegenerateModel)`: N × M = 0,拒绝构建空模型
    #[instrument(skip(self, store, scorer, config), fields(
        requests = store.request_count(),
        horizon_days = store.horizon_days()
    ))]
    pub fn build(
        &self,
        store: &RequestStore,
        scorer: &UtilityScorer,
        config: &ScheduleConfig,
    ) -> EngineResult<ScheduleModel> {
        let num_requests = store.request_count() as u32;
        let horizon_days = store.horizon_days();
        let index = VariableIndex::new(num_requests, horizon_days);

        if index.is_empty() {
            return Err(ConfigError::DegenerateModel {
                requests: store.request_count(),
                horizon_days,
            }
            .into());
        }

        // 目标系数: 按枚举顺序逐变量取效用
        let mut objective = Vec::with_capacity(index.len());
        for request in store.iter() {
            for day in 1..=horizon_days {
                objective.push(scorer.utility(request, day));
            }
        }

        let mut constraints = Vec::new();

        // 约束A: 每个请求恰好安排一天
        for request in store.iter() {
            let terms = (1..=horizon_days)
                .map(|day| {
                    let position = index
                        .position(request.request_id, day)
                        .expect("请求与日均在枚举域内");
                    (position, 1.0)
                })
                .collect();
            constraints.push(ConstraintSpec {
                name: format!("request{}", request.request_id),
                terms,
                sense: ConstraintSense::Eq,
                rhs: 1.0,
            });
        }

        // 约束B: 单日工时上限
        for day in 1..=horizon_days {
            let terms = store
                .iter()
                .map(|request| {
                    let position = index
                        .position(request.request_id, day)
                        .expect("请求与日均在枚举域内");
                    (position, request.duration_hours)
                })
                .collect();
            constraints.push(ConstraintSpec {
                name: format!("day{}", day),
                terms,
                sense: ConstraintSense::Le,
                rhs: config.daily_work_hour_limit,
            });
        }

        // 约束C: 单日请求数上限 (仅在配置时施加)
        if let Some(count_limit) = config.daily_request_count_limit {
            for day in 1..=horizon_days {
                let terms = store
                    .iter()
                    .map(|request| {
                        let position = index
                            .position(request.request_id, day)
                            .expect("请求与日均在枚举域内");
                        (position, 1.0)
                    })
                    .collect();
                constraints.push(ConstraintSpec {
                    name: format!("day{}/count", day),
                    terms,
                    sense: ConstraintSense::Le,
                    rhs: f64::from(count_limit),
                });
            }
        }

        debug!(
            variables = index.len(),
            constraints = constraints.len(),
            "模型构建完成"
        );
        Ok(ScheduleModel::new(index, objective, constraints))
    }
}

impl Default for ModelBuilder {
    fn default() -> Self {
        Self::new()
    }
}
