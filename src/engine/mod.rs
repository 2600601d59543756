// ==========================================
// 智能库存预测与补货预警系统 - 引擎层
// ==========================================
// 职责: 业务规则（特征构建/需求预测/库存比对/预警/调度）
// 红线: 引擎无持久化副作用,数据访问经由仓储接口注入
// ==========================================

pub mod alert;
pub mod feature_builder;
pub mod predictor;
pub mod scheduler;
pub mod stock;

// 重导出核心类型
pub use alert::{next_calendar_month, AlertEngine, AlertService};
pub use feature_builder::{DemandSeries, FeatureBuilder};
pub use predictor::{
    DemandModel, DemandPredictor, ModelLoadError, PredictError, Prediction, LinearDemandModel,
};
pub use scheduler::{Clock, Scheduler, SystemClock, Trigger};
pub use stock::{build_forecast, required_stock_to_add, round_predicted_units};
