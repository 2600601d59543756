// ==========================================
// 智能库存预测与补货预警系统 - 需求预测引擎
// ==========================================
// 职责: 产品 × 目标期间 → 预测销量
// 红线: 模型是外部协作方,引擎只依赖“6 维特征 → 1 个实数”契约
// 已知口径: 滞后向量始终取最近历史行,不随预测期滚动推进;
//           预测期跨度 > 1 个月时可能低估漂移（保留原口径,不修正）
// ==========================================

use crate::domain::forecast::DemandFeatures;
use crate::engine::feature_builder::DemandSeries;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

// ==========================================
// 错误类型
// ==========================================

/// 预测错误
#[derive(Error, Debug)]
pub enum PredictError {
    /// 产品没有任何可预测的聚合历史（非致命,调用方按“无结果”处理）
    #[error("历史数据不足: product_id={product_id}")]
    InsufficientHistory { product_id: String },
}

/// 模型加载错误
#[derive(Error, Debug)]
pub enum ModelLoadError {
    #[error("模型文件读取失败: {0}")]
    Io(#[from] std::io::Error),

    #[error("模型文件解析失败: {0}")]
    Parse(#[from] serde_json::Error),
}

// ==========================================
// DemandModel - 回归模型接口
// ==========================================
/// 回归模型接口
///
/// 训练过程、算法选型均在系统之外;实现方只需满足
/// “给定固定顺序的 6 维特征向量,返回一个实数预测值”。
pub trait DemandModel: Send + Sync {
    fn predict(&self, features: &DemandFeatures) -> f64;
}

// ==========================================
// LinearDemandModel - 线性回归模型
// ==========================================
/// 线性回归模型
///
/// 由离线训练产出的系数文件 (JSON) 加载:
/// `{"intercept": f64, "coefficients": [f64; 6]}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearDemandModel {
    pub intercept: f64,
    pub coefficients: [f64; 6],
}

impl LinearDemandModel {
    /// 从 JSON 系数文件加载模型
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ModelLoadError> {
        let raw = std::fs::read_to_string(path)?;
        let model: LinearDemandModel = serde_json::from_str(&raw)?;
        Ok(model)
    }
}

impl DemandModel for LinearDemandModel {
    fn predict(&self, features: &DemandFeatures) -> f64 {
        let x = features.to_array();
        self.intercept
            + self
                .coefficients
                .iter()
                .zip(x.iter())
                .map(|(c, v)| c * v)
                .sum::<f64>()
    }
}

// ==========================================
// Prediction - 预测输出
// ==========================================
#[derive(Debug, Clone)]
pub struct Prediction {
    pub product_id: String,
    pub product_name: String,
    pub category: String,
    pub predicted_units: f64, // 模型原始输出（未取整）
}

// ==========================================
// DemandPredictor - 需求预测引擎
// ==========================================
pub struct DemandPredictor {
    series: DemandSeries,
    model: Arc<dyn DemandModel>,
}

impl DemandPredictor {
    /// 创建新的 DemandPredictor 实例
    ///
    /// # 参数
    /// - series: 特征构建引擎产出的月度需求序列
    /// - model: 回归模型
    pub fn new(series: DemandSeries, model: Arc<dyn DemandModel>) -> Self {
        Self { series, model }
    }

    /// 预测产品在目标期间的销量
    ///
    /// # 参数
    /// - product_id: 产品唯一标识
    /// - target_year / target_month: 目标期间
    ///
    /// # 返回
    /// - Ok(Prediction): 预测成功
    /// - Err(InsufficientHistory): 产品无可预测历史
    ///
    /// # 说明
    /// 滞后向量取该产品最近一行可预测数据,缺失滞后按 0 处理
    pub fn predict(
        &self,
        product_id: &str,
        target_year: i32,
        target_month: u32,
    ) -> Result<Prediction, PredictError> {
        let row = self.series.latest_row(product_id).ok_or_else(|| {
            PredictError::InsufficientHistory {
                product_id: product_id.to_string(),
            }
        })?;

        let lags = row.lag_values();
        let features = DemandFeatures {
            lag_1: lags[0],
            lag_2: lags[1],
            lag_3: lags[2],
            lag_6: lags[3],
            year: target_year as f64,
            month: target_month as f64,
        };

        let predicted_units = self.model.predict(&features);
        debug!(
            product_id,
            target_year, target_month, predicted_units, "需求预测完成"
        );

        Ok(Prediction {
            product_id: row.product_id.clone(),
            product_name: row.product_name.clone(),
            category: row.category.clone(),
            predicted_units,
        })
    }

    /// 底层需求序列（供只读查询）
    pub fn series(&self) -> &DemandSeries {
        &self.series
    }
}
