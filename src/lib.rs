// ==========================================
// 智能库存预测与补货预警系统 - 核心库
// ==========================================
// 技术栈: Rust + SQLite + CSV
// 系统定位: 决策支持系统 (预测 → 比对 → 预警)
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

// 通知层 - 邮件投递
pub mod notify;

// 配置层 - 系统配置
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA 统一）
pub mod db;

// 日志系统
pub mod logging;

// API 层 - 业务接口
pub mod api;

// 应用层 - 状态装配
pub mod app;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域实体
pub use domain::{
    AlertMessage, AlertSeverity, ForecastResult, InventoryItem, MonthlyDemand, Recipient,
    SalesRecord,
};

// 引擎
pub use engine::{
    AlertEngine, AlertService, DemandPredictor, FeatureBuilder, Scheduler, SystemClock,
};

// API
pub use api::{AuthApi, ForecastApi, InventoryApi};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "智能库存预测与补货预警系统";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
