// ==========================================
// 智能库存预测与补货预警系统 - 库存 API
// ==========================================
// 职责: 库存查询与人工调整
// 红线: 调整先落盘后返回;落盘失败时库存视为未变更
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::domain::inventory::InventoryItem;
use crate::repository::inventory_repo::InventoryStore;
use std::sync::Arc;
use tracing::info;

// ==========================================
// InventoryApi - 库存 API
// ==========================================
/// 库存API
///
/// 职责：
/// 1. 库存条目查询
/// 2. 人工库存调整（带符号增量,立即持久化）
pub struct InventoryApi {
    inventory: Arc<dyn InventoryStore>,
}

impl InventoryApi {
    /// 创建新的InventoryApi实例
    pub fn new(inventory: Arc<dyn InventoryStore>) -> Self {
        Self { inventory }
    }

    /// 列出全部库存条目
    pub fn list_items(&self) -> ApiResult<Vec<InventoryItem>> {
        Ok(self.inventory.read_all()?)
    }

    /// 按产品 ID 查询库存条目
    pub fn get_item(&self, product_id: &str) -> ApiResult<InventoryItem> {
        self.inventory
            .get(product_id)?
            .ok_or_else(|| ApiError::NotFound(format!("InventoryItem (id={})", product_id)))
    }

    /// 人工调整库存
    ///
    /// # 参数
    /// - product_id: 产品唯一标识
    /// - delta: 带符号增量
    ///
    /// # 返回
    /// - Ok(i64): 调整后的新库存量（已持久化）
    /// - Err(NotFound): 产品不存在
    /// - Err(PersistenceFailure): 落盘失败,库存未变更
    ///
    /// # 并发
    /// 同一产品的并发调整不做序列化,采用“最后写入者获胜”
    pub fn adjust_stock(&self, product_id: &str, delta: i64) -> ApiResult<i64> {
        if product_id.trim().is_empty() {
            return Err(ApiError::InvalidInput("product_id 不能为空".to_string()));
        }

        let new_quantity = self.inventory.adjust(product_id, delta)?;
        info!(product_id, delta, new_quantity, "库存调整完成");
        Ok(new_quantity)
    }
}
