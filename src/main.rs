// ==========================================
// 智能库存预测与补货预警系统 - 主入口
// ==========================================
// 技术栈: Rust + SQLite + CSV
// 系统定位: 决策支持系统（后台预警守护进程）
// ==========================================

use anyhow::Context;
use smart_stock_aps::app::{get_default_config_path, AppState};
use smart_stock_aps::config::AppConfig;
use smart_stock_aps::logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 初始化日志系统
    logging::init();

    tracing::info!("==================================================");
    tracing::info!("{} - 决策支持系统", smart_stock_aps::APP_NAME);
    tracing::info!("系统版本: {}", smart_stock_aps::VERSION);
    tracing::info!("==================================================");

    // 加载配置（命令行参数 > 环境变量 > 默认路径）
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(get_default_config_path);
    tracing::info!("使用配置文件: {}", config_path);
    let config = AppConfig::load_or_default(&config_path);

    // 创建AppState
    tracing::info!("正在初始化AppState...");
    let app_state = AppState::new(config).context("无法初始化AppState")?;
    tracing::info!("AppState初始化成功");

    // 启动调度器（独立后台任务,重启后全部日程重新武装）
    let scheduler = app_state.build_scheduler();
    tracing::info!("注册定时任务: {} 个", scheduler.job_count());
    let scheduler_handle = tokio::spawn(scheduler.run());

    // 等待退出信号
    tokio::signal::ctrl_c()
        .await
        .context("等待退出信号失败")?;
    tracing::info!("收到退出信号,正在停止调度器...");
    scheduler_handle.abort();

    tracing::info!("应用已退出");
    Ok(())
}
