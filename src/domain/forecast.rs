// ==========================================
// 智能库存预测与补货预警系统 - 预测领域模型
// ==========================================
// 用途: 预测结果为瞬态对象,按需计算,从不持久化
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// DemandFeatures - 模型特征向量
// ==========================================
// 固定顺序: [lag_1, lag_2, lag_3, lag_6, year, month]
// 红线: 顺序与离线训练时的特征列一致,不可变更
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DemandFeatures {
    pub lag_1: f64,
    pub lag_2: f64,
    pub lag_3: f64,
    pub lag_6: f64,
    pub year: f64,
    pub month: f64,
}

impl DemandFeatures {
    /// 展开为定长特征数组（模型输入）
    pub fn to_array(&self) -> [f64; 6] {
        [
            self.lag_1, self.lag_2, self.lag_3, self.lag_6, self.year, self.month,
        ]
    }
}

// ==========================================
// ForecastResult - 补货预测结果
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastResult {
    pub product_id: String,   // 产品唯一标识
    pub product_name: String, // 产品名称
    pub category: String,     // 产品类目

    // ===== 预测与比对 =====
    pub predicted_sales: i64,       // 预测销量（四舍五入,下限 0）
    pub current_stock: i64,         // 当前库存
    pub required_stock_to_add: i64, // 建议补货量 = max(0, 预测 - 库存)
}
