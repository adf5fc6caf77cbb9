// ==========================================
// 服务请求排期系统 - 领域模型层
// ==========================================
// 职责: 定义领域实体与值对象
// 红线: 不含数据访问逻辑,不含引擎逻辑
// ==========================================

pub mod request;
pub mod schedule;

// 重导出核心类型
pub use request::{RawRequestRecord, ServiceRequest};
pub use schedule::DaySchedule;
