// ==========================================
// 智能库存预测与补货预警系统 - 数据仓储层
// ==========================================
// 职责: 数据访问（销售历史/库存/账户）
// 红线: Repository 不含业务逻辑
// ==========================================

pub mod error;
pub mod inventory_repo;
pub mod recipient_repo;
pub mod sales_repo;

// 重导出核心类型
pub use error::{RepositoryError, RepositoryResult};
pub use inventory_repo::{CsvInventoryStore, InventoryStore};
pub use recipient_repo::{NewAccount, RecipientRepository};
pub use sales_repo::SalesHistoryRepository;
