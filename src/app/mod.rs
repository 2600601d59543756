// ==========================================
// 智能库存预测与补货预警系统 - 应用层
// ==========================================
// 职责: 状态装配,连接仓储、引擎与调度器
// ==========================================

pub mod state;

// 重导出
pub use state::{get_default_config_path, AppState};
