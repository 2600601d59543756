// ==========================================
// 智能库存预测与补货预警系统 - 应用状态
// ==========================================
// 职责: 管理应用级别的共享状态和API实例
// ==========================================

use std::sync::Arc;

use crate::api::{AuthApi, ForecastApi, InventoryApi};
use crate::config::AppConfig;
use crate::engine::alert::{AlertEngine, AlertService};
use crate::engine::feature_builder::FeatureBuilder;
use crate::engine::predictor::{DemandPredictor, LinearDemandModel};
use crate::engine::scheduler::{Clock, Scheduler, SystemClock, Trigger};
use crate::notify::{AlertDispatcher, SmtpMailer};
use crate::repository::inventory_repo::{CsvInventoryStore, InventoryStore};
use crate::repository::recipient_repo::RecipientRepository;
use crate::repository::sales_repo::SalesHistoryRepository;
use anyhow::Context;
use tracing::info;

/// 应用状态
///
/// 包含所有API实例和共享资源;
/// 交互路径与调度器后台任务共享库存存储与需求序列
pub struct AppState {
    /// 应用配置
    pub config: AppConfig,

    /// 预测API
    pub forecast_api: Arc<ForecastApi>,

    /// 库存API
    pub inventory_api: Arc<InventoryApi>,

    /// 账户API
    pub auth_api: Arc<AuthApi>,

    /// 预警任务驱动
    pub alert_service: Arc<AlertService>,

    /// 系统时钟
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    /// 创建应用状态
    ///
    /// # 步骤
    /// 1. 加载销售历史并构建月度需求序列
    /// 2. 加载回归模型系数
    /// 3. 打开库存存储与账户数据库
    /// 4. 装配引擎、API 与预警服务
    pub fn new(config: AppConfig) -> anyhow::Result<Self> {
        // 1. 销售历史 → 特征
        let sales_repo = SalesHistoryRepository::new(&config.data.sales_csv);
        let records = sales_repo
            .load_all()
            .with_context(|| format!("销售历史加载失败: {}", config.data.sales_csv))?;
        let series = FeatureBuilder::new().build(&records);
        info!(
            sales_records = records.len(),
            forecastable_products = series.product_count(),
            "特征构建完成"
        );

        // 2. 回归模型
        let model = LinearDemandModel::load(&config.data.model_file)
            .with_context(|| format!("模型加载失败: {}", config.data.model_file))?;
        let predictor = Arc::new(DemandPredictor::new(series, Arc::new(model)));

        // 3. 存储
        let inventory: Arc<dyn InventoryStore> = Arc::new(
            CsvInventoryStore::open(&config.data.inventory_csv)
                .with_context(|| format!("库存数据打开失败: {}", config.data.inventory_csv))?,
        );
        let recipients = Arc::new(
            RecipientRepository::new(&config.data.users_db)
                .with_context(|| format!("账户数据库打开失败: {}", config.data.users_db))?,
        );

        // 4. 装配
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);
        let dispatcher = Arc::new(AlertDispatcher::new(Arc::new(SmtpMailer::new(
            config.mail.relay_host.clone(),
        ))));
        let alert_service = Arc::new(AlertService::new(
            AlertEngine::new(config.alert.low_stock_threshold),
            inventory.clone(),
            predictor.clone(),
            recipients.clone(),
            dispatcher,
            clock.clone(),
        ));

        let forecast_api = Arc::new(ForecastApi::new(predictor, inventory.clone()));
        let inventory_api = Arc::new(InventoryApi::new(inventory));
        let auth_api = Arc::new(AuthApi::new(recipients));

        Ok(Self {
            config,
            forecast_api,
            inventory_api,
            auth_api,
            alert_service,
            clock,
        })
    }

    /// 构建调度器并注册三类预警任务
    ///
    /// 任务在调度器自身上下文内同步顺序执行,
    /// 不阻塞交互路径
    pub fn build_scheduler(&self) -> Scheduler {
        let mut scheduler = Scheduler::new(self.clock.clone());

        let service = self.alert_service.clone();
        scheduler.register(
            "low_stock_check",
            Trigger::Every(self.config.low_stock_interval()),
            move || {
                service.run_low_stock_check();
            },
        );

        let service = self.alert_service.clone();
        scheduler.register(
            "end_of_day_report",
            Trigger::DailyAt(self.config.daily_report_time()),
            move || {
                service.run_end_of_day_report();
            },
        );

        let service = self.alert_service.clone();
        scheduler.register(
            "monthly_forecast_report",
            Trigger::DailyAt(self.config.monthly_report_time()),
            move || {
                service.run_monthly_forecast_report();
            },
        );

        scheduler
    }
}

/// 获取默认配置文件路径
///
/// 优先级: 环境变量 SMART_STOCK_APS_CONFIG > 用户数据目录 > 当前目录
pub fn get_default_config_path() -> String {
    if let Ok(path) = std::env::var("SMART_STOCK_APS_CONFIG") {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }

    if let Some(data_dir) = dirs::data_dir() {
        let candidate = data_dir.join("smart-stock-aps").join("config.json");
        if candidate.exists() {
            if let Some(s) = candidate.to_str() {
                return s.to_string();
            }
        }
    }

    "./config.json".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_default_config_path() {
        let path = get_default_config_path();
        assert!(!path.is_empty());
        assert!(path.ends_with(".json"));
    }

    // 注意：AppState::new() 的测试需要真实的数据文件
    // 这些测试在集成测试中进行
}
