// ==========================================
// 服务请求排期系统 - 导入模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use thiserror::Error;

/// 导入模块错误类型
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== 文件相关错误 =====
    #[error("文件不存在: {0}")]
    FileNotFound(String),

    #[error("文件读取失败: {0}")]
    FileReadError(String),

    #[error("CSV 解析失败: {0}")]
    CsvParseError(String),

    // ===== 数据映射错误 =====
    #[error("主键缺失 (行 {0}): request_id 为空")]
    PrimaryKeyMissing(usize),

    #[error("类型转换失败 (行 {row}, 字段 {field}): {message}")]
    TypeConversionError {
        row: usize,
        field: String,
        message: String,
    },

    #[error("日期格式错误 (行 {row}, 字段 {field}): 期望 {expected}，实际 {value}")]
    DateFormatError {
        row: usize,
        field: String,
        expected: String,
        value: String,
    },

    // ===== 分组结构错误 =====
    #[error("数据行出现在首个日分隔行之前 (行 {0})")]
    RecordBeforeFirstDayMarker(usize),

    #[error("日分隔行数量超出排期天数: 第 {marker_day} 个分隔行 (行 {row}), 排期天数={horizon_days}")]
    TooManyDayMarkers {
        marker_day: u32,
        row: usize,
        horizon_days: u32,
    },

    // ===== 数据一致性错误 =====
    #[error("请求数据不一致: {0}")]
    InconsistentData(#[from] crate::repository::StoreError),

    // ===== 通用错误 =====
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// 实现 From<std::io::Error>
impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::FileReadError(err.to_string())
    }
}

// 实现 From<csv::Error>
impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        ImportError::CsvParseError(err.to_string())
    }
}

/// Result 类型别名
pub type ImportResult<T> = Result<T, ImportError>;
