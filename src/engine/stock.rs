// ==========================================
// 智能库存预测与补货预警系统 - 库存比对
// ==========================================
// 职责: 预测销量 × 当前库存 → 建议补货量
// 红线: 纯函数,无副作用;结果下限 0,从不建议减库存
// ==========================================

use crate::domain::forecast::ForecastResult;
use crate::engine::predictor::Prediction;

/// 预测销量取整（四舍五入,下限 0）
pub fn round_predicted_units(predicted_units: f64) -> i64 {
    predicted_units.round().max(0.0) as i64
}

/// 计算建议补货量
///
/// # 公式
/// required = max(0, round(predicted_units) - current_stock)
pub fn required_stock_to_add(predicted_units: f64, current_stock: i64) -> i64 {
    (round_predicted_units(predicted_units) - current_stock).max(0)
}

/// 组装补货预测结果
pub fn build_forecast(prediction: &Prediction, current_stock: i64) -> ForecastResult {
    ForecastResult {
        product_id: prediction.product_id.clone(),
        product_name: prediction.product_name.clone(),
        category: prediction.category.clone(),
        predicted_sales: round_predicted_units(prediction.predicted_units),
        current_stock,
        required_stock_to_add: required_stock_to_add(prediction.predicted_units, current_stock),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_never_negative() {
        assert_eq!(required_stock_to_add(10.0, 50), 0);
        assert_eq!(required_stock_to_add(0.0, 0), 0);
        assert_eq!(required_stock_to_add(-5.0, 0), 0);
    }

    #[test]
    fn test_required_zero_when_stock_covers_prediction() {
        assert_eq!(required_stock_to_add(20.4, 20), 0);
        assert_eq!(required_stock_to_add(19.6, 20), 0);
    }

    #[test]
    fn test_required_is_rounded_gap() {
        assert_eq!(required_stock_to_add(20.0, 5), 15);
        assert_eq!(required_stock_to_add(20.5, 5), 16);
    }

    #[test]
    fn test_round_clamps_negative_prediction() {
        assert_eq!(round_predicted_units(-3.2), 0);
        assert_eq!(round_predicted_units(3.5), 4);
    }
}
