// ==========================================
// 服务请求排期系统 - 引擎层错误类型
// ==========================================
// 工具: thiserror 派生宏
// 红线: 四类错误 (配置/求解/解码/数据) 全部向上传递,不吞错不重试
// ==========================================

use crate::engine::solver::SolveStatus;
use thiserror::Error;

/// 引擎层错误类型
#[derive(Error, Debug)]
pub enum EngineError {
    // ===== 配置错误 =====
    // 退化或非法的模型参数 (零请求、零排期、非正上限)
    #[error("配置非法: {0}")]
    Configuration(#[from] crate::config::ConfigError),

    // ===== 求解错误 =====
    // 求解器返回不可行/无界/错误状态,必须点名具体状态
    #[error("求解失败: 求解器状态为 {status}")]
    Solve { status: SolveStatus },

    // ===== 解码错误 =====
    // 变量枚举与逆映射不一致,属致命内部错误,不可恢复
    #[error("解码失败: 赋值向量长度 {actual} 与变量数 {expected} 不符")]
    DecodeLengthMismatch { expected: usize, actual: usize },

    #[error("解码失败: 变量位置 {position} 超出枚举域 (变量数 {variable_count})")]
    DecodePositionOutOfRange {
        position: usize,
        variable_count: usize,
    },

    #[error("解码失败: 变量位置 {position} 引用未知请求 request_id={request_id}")]
    DecodeUnknownRequest { position: usize, request_id: u32 },

    // ===== 通用错误 =====
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result 类型别名
pub type EngineResult<T> = Result<T, EngineError>;
