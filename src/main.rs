// ==========================================
// 服务请求排期系统 - 命令行主入口
// ==========================================
// 用法: service-request-aps <请求清单.csv> [配置.json] [--dump-model <路径>]
// ==========================================

use service_request_aps::engine::ScheduleRunResult;
use service_request_aps::{logging, ScheduleConfig, ScheduleOrchestrator};
use std::path::PathBuf;
use std::process::ExitCode;

fn main() -> ExitCode {
    // 初始化日志系统
    logging::init();

    tracing::info!("==================================================");
    tracing::info!("{} - 决策支持系统", service_request_aps::APP_NAME);
    tracing::info!("系统版本: {}", service_request_aps::VERSION);
    tracing::info!("==================================================");

    let args: Vec<String> = std::env::args().skip(1).collect();
    let (csv_path, config_path, dump_path) = match parse_args(&args) {
        Ok(parsed) => parsed,
        Err(message) => {
            eprintln!("{}", message);
            eprintln!("用法: service-request-aps <请求清单.csv> [配置.json] [--dump-model <路径>]");
            return ExitCode::FAILURE;
        }
    };

    // 装载配置 (未提供配置文件时使用内置默认值)
    let config = match &config_path {
        Some(path) => match ScheduleConfig::from_json_file(path) {
            Ok(config) => config,
            Err(err) => {
                tracing::error!("配置装载失败: {}", err);
                return ExitCode::FAILURE;
            }
        },
        None => ScheduleConfig::default(),
    };
    tracing::info!(
        horizon_days = config.horizon_days,
        start_date = %config.schedule_start_date,
        work_hour_limit = config.daily_work_hour_limit,
        "排期配置就绪"
    );

    // 创建编排器并执行主流程
    let mut orchestrator = match ScheduleOrchestrator::new(config) {
        Ok(orchestrator) => orchestrator,
        Err(err) => {
            tracing::error!("编排器初始化失败: {}", err);
            return ExitCode::FAILURE;
        }
    };
    orchestrator.set_model_dump_path(dump_path);

    match orchestrator.run_from_csv(&csv_path) {
        Ok(result) => {
            render_report(&result);
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::error!("排期流程失败: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

/// 解析命令行参数: (CSV路径, 配置路径, 模型转储路径)
fn parse_args(args: &[String]) -> Result<(PathBuf, Option<PathBuf>, Option<PathBuf>), String> {
    let mut csv_path = None;
    let mut config_path = None;
    let mut dump_path = None;

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if arg == "--dump-model" {
            let path = iter
                .next()
                .ok_or_else(|| "--dump-model 缺少路径参数".to_string())?;
            dump_path = Some(PathBuf::from(path));
        } else if csv_path.is_none() {
            csv_path = Some(PathBuf::from(arg));
        } else if config_path.is_none() {
            config_path = Some(PathBuf::from(arg));
        } else {
            return Err(format!("多余的参数: {}", arg));
        }
    }

    let csv_path = csv_path.ok_or_else(|| "缺少请求清单 CSV 路径".to_string())?;
    Ok((csv_path, config_path, dump_path))
}

/// 渲染评估报告 (人类可读输出,机器消费走 JSON 序列化)
fn render_report(result: &ScheduleRunResult) {
    let report = &result.report;

    println!();
    println!("** 求解状态: {} **", result.status);
    println!();
    println!("** 逐日命中率 **");
    for day in &report.day_reports {
        println!(
            "第 {} 天 ({}): 安排 {} 单, 命中 {}/{}, 命中率 {:.1}%, 工时 {:.1}/{:.1} (利用率 {:.1}%)",
            day.day,
            day.plan_date,
            day.scheduled_count,
            day.matched_count,
            day.gold_count,
            day.accuracy * 100.0,
            day.used_hours,
            day.work_hour_limit,
            day.utilization * 100.0,
        );
    }
    println!();
    println!("总效用        = {}", report.total_utility);
    println!(
        "已安排请求    = {} / {} ({:.1}%)",
        report.num_scheduled,
        report.total_requests,
        report.percentage_scheduled * 100.0
    );
    println!("平均命中率    = {:.1}%", report.average_accuracy * 100.0);
}
