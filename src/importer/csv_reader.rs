// ==========================================
// 服务请求排期系统 - CSV 请求读取器
// ==========================================
// 职责: 解析请求清单 CSV,产出请求记录与黄金日程分组
// 格式: 首行表头; 首列非数字的行为日分隔行,开启下一排期日;
//       数据行为 request_id, 提交日期, 紧急等级, 所需工时
// ==========================================

use crate::domain::{RawRequestRecord, ServiceRequest};
use crate::importer::error::{ImportError, ImportResult};
use crate::repository::RequestStore;
use chrono::NaiveDate;
use csv::ReaderBuilder;
use std::fs::File;
use std::path::Path;
use tracing::{debug, info};

// 提交日期格式 (与历史数据口径一致)
const DATE_FORMAT: &str = "%m/%d/%y";

// ==========================================
// CsvRequestReader - CSV 请求读取器
// ==========================================
pub struct CsvRequestReader;

impl CsvRequestReader {
    /// 构造函数
    pub fn new() -> Self {
        Self
    }

    /// 读取 CSV 并装载为封存后的 RequestStore
    ///
    /// # 参数
    /// - `file_path`: CSV 文件路径
    /// - `horizon_days`: 排期天数 M (日分隔行数量不得超过该值)
    ///
    /// # 返回
    /// 封存后的 RequestStore (请求主数据 + 黄金日程)
    pub fn load_into_store(
        &self,
        file_path: &Path,
        horizon_days: u32,
    ) -> ImportResult<RequestStore> {
        if !file_path.exists() {
            return Err(ImportError::FileNotFound(
                file_path.display().to_string(),
            ));
        }

        let file = File::open(file_path)?;
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true) // 日分隔行与数据行列数不同
            .from_reader(file);

        let mut store = RequestStore::new(horizon_days);
        let mut schedule_day: u32 = 0;

        for (row_idx, result) in reader.records().enumerate() {
            let row_number = row_idx + 1; // 不含表头,从 1 计数
            let record = result?;

            // 跳过完全空白的行
            if record.iter().all(|v| v.trim().is_empty()) {
                continue;
            }

            let first = record.get(0).unwrap_or("").trim();

            // 日分隔行: 首列非数字,开启下一排期日
            if !first.chars().all(|c| c.is_ascii_digit()) || first.is_empty() {
                schedule_day += 1;
                if schedule_day > horizon_days {
                    return Err(ImportError::TooManyDayMarkers {
                        marker_day: schedule_day,
                        row: row_number,
                        horizon_days,
                    });
                }
                debug!(row = row_number, day = schedule_day, "进入排期日分组");
                continue;
            }

            if schedule_day == 0 {
                return Err(ImportError::RecordBeforeFirstDayMarker(row_number));
            }

            let raw = Self::map_raw_record(&record, row_number)?;
            let request = Self::validate_record(raw)?;
            let request_id = request.request_id;

            store.insert_request(request)?;
            store.record_gold_assignment(schedule_day, request_id)?;
        }

        let store = store.seal()?;
        info!(
            requests = store.request_count(),
            horizon_days,
            "请求清单装载完成"
        );
        Ok(store)
    }

    /// 将 CSV 行映射为原始记录 (仅做字段切分与类型转换)
    fn map_raw_record(
        record: &csv::StringRecord,
        row_number: usize,
    ) -> ImportResult<RawRequestRecord> {
        let mut raw = RawRequestRecord {
            row_number,
            ..RawRequestRecord::default()
        };

        let field = |idx: usize| record.get(idx).map(str::trim).unwrap_or("");

        raw.request_id = Some(Self::parse_u32(field(0), row_number, "request_id")?);
        raw.submission_date = Some(Self::parse_date(field(1), row_number, "submission_date")?);
        raw.urgency = Some(Self::parse_u32(field(2), row_number, "urgency")?);
        raw.duration_hours = Some(Self::parse_f64(field(3), row_number, "duration_hours")?);

        Ok(raw)
    }

    /// 原始记录 -> 领域实体 (必填字段检查)
    fn validate_record(raw: RawRequestRecord) -> ImportResult<ServiceRequest> {
        match raw {
            RawRequestRecord {
                request_id: Some(request_id),
                submission_date: Some(submission_date),
                urgency: Some(urgency),
                duration_hours: Some(duration_hours),
                ..
            } => Ok(ServiceRequest {
                request_id,
                submission_date,
                urgency,
                duration_hours,
            }),
            RawRequestRecord {
                request_id: None,
                row_number,
                ..
            } => Err(ImportError::PrimaryKeyMissing(row_number)),
            RawRequestRecord { row_number, .. } => Err(ImportError::TypeConversionError {
                row: row_number,
                field: "record".to_string(),
                message: "必填字段缺失".to_string(),
            }),
        }
    }

    fn parse_u32(value: &str, row: usize, field: &str) -> ImportResult<u32> {
        value
            .parse::<u32>()
            .map_err(|e| ImportError::TypeConversionError {
                row,
                field: field.to_string(),
                message: format!("{}: {}", e, value),
            })
    }

    fn parse_f64(value: &str, row: usize, field: &str) -> ImportResult<f64> {
        value
            .parse::<f64>()
            .map_err(|e| ImportError::TypeConversionError {
                row,
                field: field.to_string(),
                message: format!("{}: {}", e, value),
            })
    }

    fn parse_date(value: &str, row: usize, field: &str) -> ImportResult<NaiveDate> {
        NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| ImportError::DateFormatError {
            row,
            field: field.to_string(),
            expected: DATE_FORMAT.to_string(),
            value: value.to_string(),
        })
    }
}

impl Default for CsvRequestReader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_csv(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_groups_gold_schedule_by_markers() {
        let csv = "\
id,date,urgency,time
Day 1,,,
1,05/01/15,0,4
2,05/02/15,1,6
Day 2,,,
3,05/03/15,0,2
";
        let file = write_csv(csv);
        let reader = CsvRequestReader::new();
        let store = reader.load_into_store(file.path(), 2).unwrap();

        assert_eq!(store.request_count(), 3);
        let gold = store.gold_schedule();
        assert_eq!(
            gold.day_set(1).unwrap().iter().copied().collect::<Vec<_>>(),
            vec![1, 2]
        );
        assert_eq!(
            gold.day_set(2).unwrap().iter().copied().collect::<Vec<_>>(),
            vec![3]
        );
    }

    #[test]
    fn test_record_before_first_marker_rejected() {
        let csv = "\
id,date,urgency,time
1,05/01/15,0,4
";
        let file = write_csv(csv);
        let reader = CsvRequestReader::new();
        let err = reader.load_into_store(file.path(), 2).unwrap_err();
        assert!(matches!(err, ImportError::RecordBeforeFirstDayMarker(1)));
    }

    #[test]
    fn test_too_many_markers_rejected() {
        let csv = "\
id,date,urgency,time
Day 1,,,
1,05/01/15,0,4
Day 2,,,
Day 3,,,
";
        let file = write_csv(csv);
        let reader = CsvRequestReader::new();
        let err = reader.load_into_store(file.path(), 2).unwrap_err();
        assert!(matches!(err, ImportError::TooManyDayMarkers { marker_day: 3, .. }));
    }

    #[test]
    fn test_duplicate_id_surfaces_store_error() {
        let csv = "\
id,date,urgency,time
Day 1,,,
1,05/01/15,0,4
1,05/02/15,1,6
";
        let file = write_csv(csv);
        let reader = CsvRequestReader::new();
        let err = reader.load_into_store(file.path(), 1).unwrap_err();
        assert!(matches!(err, ImportError::InconsistentData(_)));
    }

    #[test]
    fn test_bad_date_reports_row_and_field() {
        let csv = "\
id,date,urgency,time
Day 1,,,
1,2015-05-01,0,4
";
        let file = write_csv(csv);
        let reader = CsvRequestReader::new();
        let err = reader.load_into_store(file.path(), 1).unwrap_err();
        match err {
            ImportError::DateFormatError { row, field, .. } => {
                assert_eq!(row, 2);
                assert_eq!(field, "submission_date");
            }
            other => panic!("期望 DateFormatError, 实际 {:?}", other),
        }
    }
}
