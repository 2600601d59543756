// ==========================================
// 智能库存预测与补货预警系统 - API 层
// ==========================================
// 职责: 面向交互调用方的业务接口
// 红线: 仓储错误在此转换为用户可理解的错误
// ==========================================

pub mod auth_api;
pub mod error;
pub mod forecast_api;
pub mod inventory_api;

// 重导出核心类型
pub use auth_api::AuthApi;
pub use error::{ApiError, ApiResult};
pub use forecast_api::ForecastApi;
pub use inventory_api::InventoryApi;
