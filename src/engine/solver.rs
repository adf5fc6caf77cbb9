// ==========================================
// 服务请求排期系统 - 求解器适配层
// ==========================================
// 职责: 以统一契约调用外部整数规划求解能力
// 红线: 核心不读取求解器内部状态 (对偶值/松弛量) 做行为决策;
//       变量取值按 >= 0.5 容差判定,不做浮点精确相等比较
// ==========================================

use crate::engine::error::{EngineError, EngineResult};
use crate::engine::model::{ConstraintSense, ScheduleModel};
use good_lp::{
    constraint, default_solver, variable, variables, Expression, ResolutionError, Solution,
    SolverModel,
};
use serde::Serialize;
use std::fmt;
use tracing::{debug, instrument, warn};

// 变量取值判定容差: 取值 >= 0.5 视为"已安排"
pub const ASSIGNMENT_TOLERANCE: f64 = 0.5;

// ==========================================
// SolveStatus - 求解状态
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SolveStatus {
    Optimal,    // 最优解
    Feasible,   // 可行解 (未证最优)
    Infeasible, // 不可行
    Unbounded,  // 无界
    Error,      // 求解器错误
}

impl SolveStatus {
    /// 是否为可用解 (Optimal / Feasible)
    pub fn is_success(&self) -> bool {
        matches!(self, SolveStatus::Optimal | SolveStatus::Feasible)
    }
}

impl fmt::Display for SolveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolveStatus::Optimal => write!(f, "OPTIMAL"),
            SolveStatus::Feasible => write!(f, "FEASIBLE"),
            SolveStatus::Infeasible => write!(f, "INFEASIBLE"),
            SolveStatus::Unbounded => write!(f, "UNBOUNDED"),
            SolveStatus::Error => write!(f, "ERROR"),
        }
    }
}

// ==========================================
// SolveOutcome - 求解结果
// ==========================================
#[derive(Debug, Clone)]
pub struct SolveOutcome {
    pub status: SolveStatus,

    /// 变量取值,按模型枚举顺序 (失败状态时为空)
    pub assignment: Vec<f64>,

    /// 目标函数值 (总效用)
    pub objective_value: f64,
}

impl SolveOutcome {
    /// 要求可用解,否则转为点名状态的求解错误
    pub fn require_success(self) -> EngineResult<Self> {
        if self.status.is_success() {
            Ok(self)
        } else {
            Err(EngineError::Solve {
                status: self.status,
            })
        }
    }
}

// ==========================================
// Trait: IlpSolver
// ==========================================
// 用途: 求解能力的注入点,便于测试替换
pub trait IlpSolver {
    /// 求解模型,返回状态与变量赋值
    fn solve(&self, model: &ScheduleModel) -> EngineResult<SolveOutcome>;
}

// ==========================================
// GoodLpSolver - good_lp 后端适配器
// ==========================================
// 说明: microlp 后端采用分支定界求至最优,
//       因此成功返回的解一律标记 OPTIMAL
#[derive(Debug)]
pub struct GoodLpSolver;

impl GoodLpSolver {
    /// 构造函数
    pub fn new() -> Self {
        Self
    }
}

impl Default for GoodLpSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl IlpSolver for GoodLpSolver {
    #[instrument(skip(self, model), fields(
        variables = model.variable_count(),
        constraints = model.constraints().len()
    ))]
    fn solve(&self, model: &ScheduleModel) -> EngineResult<SolveOutcome> {
        let mut vars = variables!();
        let xs = vars.add_vector(variable().binary(), model.variable_count());

        let objective: Expression = model
            .objective()
            .iter()
            .zip(&xs)
            .map(|(coefficient, var)| *coefficient * *var)
            .sum();

        let mut problem = vars.maximise(objective.clone()).using(default_solver);

        for row in model.constraints() {
            let expr: Expression = row
                .terms
                .iter()
                .map(|(position, coefficient)| *coefficient * xs[*position])
                .sum();
            problem = match row.sense {
                ConstraintSense::Eq => problem.with(constraint!(expr == row.rhs)),
                ConstraintSense::Le => problem.with(constraint!(expr <= row.rhs)),
            };
        }

        match problem.solve() {
            Ok(solution) => {
                let assignment: Vec<f64> = xs.iter().map(|var| solution.value(*var)).collect();
                let objective_value = solution.eval(objective);
                debug!(objective_value, "求解完成");
                Ok(SolveOutcome {
                    status: SolveStatus::Optimal,
                    assignment,
                    objective_value,
                })
            }
            Err(ResolutionError::Infeasible) => Ok(SolveOutcome {
                status: SolveStatus::Infeasible,
                assignment: Vec::new(),
                objective_value: 0.0,
            }),
            Err(ResolutionError::Unbounded) => Ok(SolveOutcome {
                status: SolveStatus::Unbounded,
                assignment: Vec::new(),
                objective_value: 0.0,
            }),
            Err(err) => {
                warn!(error = %err, "求解器返回错误状态");
                Ok(SolveOutcome {
                    status: SolveStatus::Error,
                    assignment: Vec::new(),
                    objective_value: 0.0,
                })
            }
        }
    }
}
