// ==========================================
// 智能库存预测与补货预警系统 - 特征构建引擎
// ==========================================
// 职责: 逐笔销售记录 → 月度聚合 → 滞后特征
// 输入: 全量 SalesRecord
// 输出: DemandSeries (按产品组织的可预测行集)
// 红线: 每轮全量重算,不做增量维护
// ==========================================

use crate::domain::sales::{MonthlyDemand, SalesRecord, LAG_WINDOWS};
use chrono::Datelike;
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

// ==========================================
// DemandSeries - 月度需求序列
// ==========================================
/// 月度需求序列
///
/// 仅包含滞后特征齐备的行;历史不足的产品不出现在序列中,
/// 调用方应将缺失视为“历史数据不足”,而非错误。
#[derive(Debug, Default)]
pub struct DemandSeries {
    // product_id -> 按 (year, month) 升序排列的可预测行
    by_product: HashMap<String, Vec<MonthlyDemand>>,
}

impl DemandSeries {
    /// 产品最近一行可预测数据（滞后向量来源）
    pub fn latest_row(&self, product_id: &str) -> Option<&MonthlyDemand> {
        self.by_product.get(product_id).and_then(|rows| rows.last())
    }

    /// 产品的全部可预测行（时间升序）
    pub fn rows_for(&self, product_id: &str) -> &[MonthlyDemand] {
        self.by_product
            .get(product_id)
            .map(|rows| rows.as_slice())
            .unwrap_or(&[])
    }

    /// 含可预测行的产品数
    pub fn product_count(&self) -> usize {
        self.by_product.len()
    }

    /// 可预测行总数
    pub fn row_count(&self) -> usize {
        self.by_product.values().map(|rows| rows.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.by_product.is_empty()
    }
}

// ==========================================
// FeatureBuilder - 特征构建引擎
// ==========================================
pub struct FeatureBuilder {
    // 无状态引擎,不需要注入依赖
}

impl FeatureBuilder {
    /// 构造函数
    pub fn new() -> Self {
        Self {}
    }

    /// 构建月度需求序列
    ///
    /// # 算法
    /// 1. 按 (product_id, 年, 自然月) 聚合销量,产品名/类目取最近记录值
    /// 2. 每个产品按期间升序排列,lag_k 取序列中 k 行之前的聚合销量
    ///    （与零销量月不产生聚合行的口径一致,即行位移而非严格日历回看）
    /// 3. 丢弃任何滞后字段缺失的行
    ///
    /// # 返回
    /// DemandSeries;不足 max(滞后窗口)+1 个销售月的产品产出 0 行
    pub fn build(&self, records: &[SalesRecord]) -> DemandSeries {
        // 1. 月度聚合 (BTreeMap 保证期间升序)
        let mut aggregated: HashMap<String, BTreeMap<(i32, u32), i64>> = HashMap::new();
        let mut labels: HashMap<String, (String, String)> = HashMap::new();

        for record in records {
            let period = (record.date.year(), record.date.month());
            *aggregated
                .entry(record.product_id.clone())
                .or_default()
                .entry(period)
                .or_insert(0) += record.units_sold;
            labels.insert(
                record.product_id.clone(),
                (record.product_name.clone(), record.category.clone()),
            );
        }

        // 2+3. 滞后位移并丢弃不完整行
        let max_lag = LAG_WINDOWS.iter().copied().max().unwrap_or(0);
        let mut by_product: HashMap<String, Vec<MonthlyDemand>> = HashMap::new();

        for (product_id, months) in aggregated {
            let (product_name, category) = labels
                .get(&product_id)
                .cloned()
                .unwrap_or_else(|| (String::new(), String::new()));

            let series: Vec<((i32, u32), i64)> = months.into_iter().collect();
            let mut rows = Vec::new();

            for (index, ((year, month), units_sold)) in series.iter().enumerate() {
                if index < max_lag {
                    continue; // 滞后不足,整行丢弃
                }

                let lag_at = |k: usize| Some(series[index - k].1);
                rows.push(MonthlyDemand {
                    product_id: product_id.clone(),
                    product_name: product_name.clone(),
                    category: category.clone(),
                    year: *year,
                    month: *month,
                    units_sold: *units_sold,
                    lag_1: lag_at(LAG_WINDOWS[0]),
                    lag_2: lag_at(LAG_WINDOWS[1]),
                    lag_3: lag_at(LAG_WINDOWS[2]),
                    lag_6: lag_at(LAG_WINDOWS[3]),
                });
            }

            if !rows.is_empty() {
                by_product.insert(product_id, rows);
            }
        }

        let result = DemandSeries { by_product };
        debug!(
            products = result.product_count(),
            rows = result.row_count(),
            "月度需求序列构建完成"
        );
        result
    }
}

impl Default for FeatureBuilder {
    fn default() -> Self {
        Self::new()
    }
}
