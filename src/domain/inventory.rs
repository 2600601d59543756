// ==========================================
// 智能库存预测与补货预警系统 - 库存领域模型
// ==========================================
// 红线: 系统内唯一可变实体,每次调整后立即回写持久层
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// InventoryItem - 库存条目
// ==========================================
// 字段名与库存数据文件表头对齐
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryItem {
    #[serde(rename = "Product_ID")]
    pub product_id: String, // 产品唯一标识

    #[serde(rename = "Product_Name")]
    pub product_name: String, // 产品名称

    #[serde(rename = "Stock_Quantity")]
    pub stock_quantity: i64, // 当前库存量（人工调整可能短暂越过 0）
}

impl InventoryItem {
    /// 是否缺货（数量 ≤ 0）
    pub fn is_out_of_stock(&self) -> bool {
        self.stock_quantity <= 0
    }

    /// 是否低库存（0 < 数量 < 阈值）
    pub fn is_low_stock(&self, threshold: i64) -> bool {
        self.stock_quantity > 0 && self.stock_quantity < threshold
    }
}
