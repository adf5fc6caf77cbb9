// ==========================================
// 服务请求排期系统 - 核心库
// ==========================================
// 技术栈: Rust + good_lp (整数规划)
// 系统定位: 决策支持系统 (排期结果对照历史黄金日程评估)
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 数据仓储层 - 数据访问
pub mod repository;

// 引擎层 - 业务规则
pub mod engine;

// 导入层 - 外部数据
pub mod importer;

// 配置层 - 系统配置
pub mod config;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::{DaySchedule, RawRequestRecord, ServiceRequest};

// 仓储
pub use repository::{RequestStore, StoreError};

// 配置
pub use config::{ConfigError, ScheduleConfig};

// 引擎
pub use engine::{
    EngineError, EvaluationReport, GoodLpSolver, IlpSolver, ModelBuilder, ScheduleDecoder,
    ScheduleEvaluator, ScheduleModel, ScheduleOrchestrator, ScheduleRunResult, SolveStatus,
    UtilityScorer, VariableIndex,
};

// 导入
pub use importer::{CsvRequestReader, ImportError};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "服务请求排期系统";

// ==========================================
// 预编译检查
// ==========================================
