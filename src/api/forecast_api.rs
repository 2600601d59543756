// ==========================================
// 智能库存预测与补货预警系统 - 预测 API
// ==========================================
// 职责: 手动补货预测查询
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::domain::forecast::ForecastResult;
use crate::engine::predictor::{DemandPredictor, PredictError};
use crate::engine::stock::build_forecast;
use crate::repository::inventory_repo::InventoryStore;
use std::sync::Arc;
use tracing::debug;

// ==========================================
// ForecastApi - 预测 API
// ==========================================
/// 预测API
///
/// 职责：
/// 1. 手动预测查询（产品 × 目标期间）
/// 2. 预测结果与当前库存的比对组装
pub struct ForecastApi {
    predictor: Arc<DemandPredictor>,
    inventory: Arc<dyn InventoryStore>,
}

impl ForecastApi {
    /// 创建新的ForecastApi实例
    ///
    /// # 参数
    /// - predictor: 需求预测引擎
    /// - inventory: 库存存储
    pub fn new(predictor: Arc<DemandPredictor>, inventory: Arc<dyn InventoryStore>) -> Self {
        Self {
            predictor,
            inventory,
        }
    }

    /// 手动补货预测查询
    ///
    /// # 参数
    /// - product_id: 产品唯一标识
    /// - target_year: 目标年
    /// - target_month: 目标月（1-12）
    ///
    /// # 返回
    /// - Ok(ForecastResult): 预测结果（瞬态,不持久化）
    /// - Err(InsufficientHistory): 产品无可预测历史
    /// - Err(InvalidInput): 入参非法
    ///
    /// # 说明
    /// 库存中不存在的产品按当前库存 0 计算
    pub fn manual_forecast(
        &self,
        product_id: &str,
        target_year: i32,
        target_month: u32,
    ) -> ApiResult<ForecastResult> {
        if product_id.trim().is_empty() {
            return Err(ApiError::InvalidInput("product_id 不能为空".to_string()));
        }
        if !(1..=12).contains(&target_month) {
            return Err(ApiError::InvalidInput(format!(
                "目标月必须在 1-12 之间: {}",
                target_month
            )));
        }

        let prediction = self
            .predictor
            .predict(product_id, target_year, target_month)
            .map_err(|e| match e {
                PredictError::InsufficientHistory { product_id } => {
                    ApiError::InsufficientHistory(product_id)
                }
            })?;

        let current_stock = self
            .inventory
            .get(product_id)?
            .map(|item| item.stock_quantity)
            .unwrap_or(0);

        let forecast = build_forecast(&prediction, current_stock);
        debug!(
            product_id,
            target_year,
            target_month,
            predicted = forecast.predicted_sales,
            required = forecast.required_stock_to_add,
            "手动预测完成"
        );
        Ok(forecast)
    }
}
