// ==========================================
// 智能库存预测与补货预警系统 - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型、业务规则接口
// 红线: 不含数据访问逻辑,不含引擎逻辑
// ==========================================

pub mod alert;
pub mod forecast;
pub mod inventory;
pub mod sales;

// 重导出核心类型
pub use alert::{AlertMessage, AlertSeverity, Recipient};
pub use forecast::{DemandFeatures, ForecastResult};
pub use inventory::InventoryItem;
pub use sales::{MonthlyDemand, SalesRecord, LAG_WINDOWS};
