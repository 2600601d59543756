// ==========================================
// 智能库存预测与补货预警系统 - 销售领域模型
// ==========================================
// 用途: 销售历史导入 → 月度聚合 → 滞后特征
// 红线: SalesRecord 为只读事实,聚合结果每轮全量重算
// ==========================================

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// 滞后特征窗口（月）
///
/// 固定顺序,与模型特征向量顺序一致
pub const LAG_WINDOWS: [usize; 4] = [1, 2, 3, 6];

// ==========================================
// SalesRecord - 原始销售记录
// ==========================================
// 来源: 销售历史 CSV（逐笔交易）
// 字段名与原始数据文件表头对齐
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalesRecord {
    #[serde(rename = "Product_ID")]
    pub product_id: String, // 产品唯一标识

    #[serde(rename = "Product_Name")]
    pub product_name: String, // 产品名称

    #[serde(rename = "Category")]
    pub category: String, // 产品类目

    #[serde(rename = "Date")]
    pub date: NaiveDate, // 交易日期（ISO DATE）

    #[serde(rename = "Units_Sold")]
    pub units_sold: i64, // 销量（≥0）
}

// ==========================================
// MonthlyDemand - 月度聚合需求行
// ==========================================
// 派生: 按 (product_id, 自然月) 聚合 SalesRecord
// 约束: 仅当全部滞后字段齐备时可用于预测
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthlyDemand {
    pub product_id: String,   // 产品唯一标识
    pub product_name: String, // 产品名称
    pub category: String,     // 产品类目

    // ===== 期间 =====
    pub year: i32, // 年
    pub month: u32, // 月（1-12）

    // ===== 聚合值 =====
    pub units_sold: i64, // 当月总销量

    // ===== 滞后特征（N 期前的聚合销量）=====
    pub lag_1: Option<i64>,
    pub lag_2: Option<i64>,
    pub lag_3: Option<i64>,
    pub lag_6: Option<i64>,
}

impl MonthlyDemand {
    /// 全部滞后字段是否齐备（可用于预测的前提）
    pub fn has_all_lags(&self) -> bool {
        self.lag_1.is_some() && self.lag_2.is_some() && self.lag_3.is_some() && self.lag_6.is_some()
    }

    /// 按固定顺序取滞后值，缺失按 0 处理
    pub fn lag_values(&self) -> [f64; 4] {
        [
            self.lag_1.unwrap_or(0) as f64,
            self.lag_2.unwrap_or(0) as f64,
            self.lag_3.unwrap_or(0) as f64,
            self.lag_6.unwrap_or(0) as f64,
        ]
    }
}
