// ==========================================
// 智能库存预测与补货预警系统 - 预警引擎
// ==========================================
// 职责: 库存状态/预测结果 → 预警消息组装与广播
// 三类策略: 低库存巡检 / 日终报告 / 月度预测报告
// 红线: 策略无状态、幂等,每次执行基于当前数据全量重算;
//       无合格条目时静默不发（空结果是合法终态,不是错误）
// ==========================================

use crate::domain::alert::{AlertMessage, AlertSeverity};
use crate::domain::inventory::InventoryItem;
use crate::engine::predictor::DemandPredictor;
use crate::engine::scheduler::Clock;
use crate::engine::stock::build_forecast;
use crate::notify::AlertDispatcher;
use crate::repository::inventory_repo::InventoryStore;
use crate::repository::recipient_repo::RecipientRepository;
use chrono::{Datelike, NaiveDate};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, warn};

/// 默认低库存阈值
pub const DEFAULT_LOW_STOCK_THRESHOLD: i64 = 25;

/// 计算下一个自然月（含跨年进位）
pub fn next_calendar_month(year: i32, month: u32) -> (i32, u32) {
    if month >= 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    }
}

// ==========================================
// AlertEngine - 预警消息组装引擎
// ==========================================
pub struct AlertEngine {
    low_stock_threshold: i64,
}

impl AlertEngine {
    /// 构造函数
    ///
    /// # 参数
    /// - low_stock_threshold: 低库存阈值（默认 25）
    pub fn new(low_stock_threshold: i64) -> Self {
        Self {
            low_stock_threshold,
        }
    }

    /// 低库存巡检消息
    ///
    /// # 返回
    /// - Some(AlertMessage): 存在缺货或低库存条目,缺货组在前
    /// - None: 全部条目库存充足（静默,不产生消息）
    pub fn low_stock_message(&self, items: &[InventoryItem]) -> Option<AlertMessage> {
        let mut out_of_stock = Vec::new();
        let mut low_stock = Vec::new();

        for item in items {
            if item.is_out_of_stock() {
                out_of_stock.push(format!(
                    "• {} (ID:{}) — OUT OF STOCK",
                    item.product_name, item.product_id
                ));
            } else if item.is_low_stock(self.low_stock_threshold) {
                low_stock.push(format!(
                    "• {} (ID:{}) — {} units left",
                    item.product_name, item.product_id, item.stock_quantity
                ));
            }
        }

        if out_of_stock.is_empty() && low_stock.is_empty() {
            return None;
        }

        let mut body = String::from("LOW STOCK ALERT\n\n");
        if !out_of_stock.is_empty() {
            body.push_str("OUT OF STOCK ITEMS:\n");
            body.push_str(&out_of_stock.join("\n"));
            body.push_str("\n\n");
        }
        if !low_stock.is_empty() {
            body.push_str("LOW STOCK ITEMS:\n");
            body.push_str(&low_stock.join("\n"));
        }

        let severity = if out_of_stock.is_empty() {
            AlertSeverity::LowStock
        } else {
            AlertSeverity::OutOfStock
        };

        Some(AlertMessage {
            subject: "Inventory Low Stock Alert".to_string(),
            body,
            severity,
        })
    }

    /// 日终库存报告消息（无条件列出全部条目）
    ///
    /// # 返回
    /// - Some(AlertMessage): 当日报告
    /// - None: 库存为空
    pub fn end_of_day_message(
        &self,
        items: &[InventoryItem],
        today: NaiveDate,
    ) -> Option<AlertMessage> {
        if items.is_empty() {
            return None;
        }

        let date = today.format("%Y-%m-%d");
        let mut body = format!("DAILY STOCK REPORT – {}\n\n", date);
        for item in items {
            body.push_str(&format!(
                "• {} (ID:{}) — {} units\n",
                item.product_name, item.product_id, item.stock_quantity
            ));
        }

        Some(AlertMessage {
            subject: format!("Daily Stock Report – {}", date),
            body,
            severity: AlertSeverity::Info,
        })
    }

    /// 月度预测报告消息（目标期间 = 下一个自然月）
    ///
    /// # 说明
    /// - 对每个去重后的产品执行 预测 + 比对
    /// - 历史不足的产品直接跳过,不视为错误
    ///
    /// # 返回
    /// - Some(AlertMessage): 至少一个产品产出预测
    /// - None: 库存为空或无任何可预测产品
    pub fn monthly_forecast_message(
        &self,
        items: &[InventoryItem],
        predictor: &DemandPredictor,
        target_year: i32,
        target_month: u32,
    ) -> Option<AlertMessage> {
        if items.is_empty() {
            return None;
        }

        // 去重（同一产品多行库存只预测一次,保序）
        let mut stock_by_product: HashMap<&str, i64> = HashMap::new();
        let mut ordered_ids: Vec<&str> = Vec::new();
        for item in items {
            if !stock_by_product.contains_key(item.product_id.as_str()) {
                ordered_ids.push(item.product_id.as_str());
            }
            *stock_by_product.entry(item.product_id.as_str()).or_insert(0) +=
                item.stock_quantity;
        }

        let mut lines = Vec::new();
        for product_id in ordered_ids {
            let prediction = match predictor.predict(product_id, target_year, target_month) {
                Ok(p) => p,
                Err(_) => continue, // 历史不足,跳过
            };
            let current_stock = stock_by_product.get(product_id).copied().unwrap_or(0);
            let forecast = build_forecast(&prediction, current_stock);
            lines.push(format!(
                "• {} (ID:{}) → Need {} units",
                forecast.product_name, forecast.product_id, forecast.required_stock_to_add
            ));
        }

        if lines.is_empty() {
            return None;
        }

        let mut body = format!(
            "MONTHLY STOCK FORECAST – {}/{}\n\n",
            target_month, target_year
        );
        body.push_str(&lines.join("\n"));
        body.push('\n');

        Some(AlertMessage {
            subject: format!("Monthly Stock Forecast – {}/{}", target_month, target_year),
            body,
            severity: AlertSeverity::Info,
        })
    }
}

impl Default for AlertEngine {
    fn default() -> Self {
        Self::new(DEFAULT_LOW_STOCK_THRESHOLD)
    }
}

// ==========================================
// AlertService - 预警任务驱动
// ==========================================
/// 预警任务驱动
///
/// 职责: 读取当前数据 → 组装消息 → 广播给全部接收人。
/// 任务内任何失败只记日志,不向调度器传播,不影响兄弟任务。
pub struct AlertService {
    engine: AlertEngine,
    inventory: Arc<dyn InventoryStore>,
    predictor: Arc<DemandPredictor>,
    recipients: Arc<RecipientRepository>,
    dispatcher: Arc<AlertDispatcher>,
    clock: Arc<dyn Clock>,
}

impl AlertService {
    /// 创建新的 AlertService 实例
    pub fn new(
        engine: AlertEngine,
        inventory: Arc<dyn InventoryStore>,
        predictor: Arc<DemandPredictor>,
        recipients: Arc<RecipientRepository>,
        dispatcher: Arc<AlertDispatcher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            engine,
            inventory,
            predictor,
            recipients,
            dispatcher,
            clock,
        }
    }

    /// 执行低库存巡检任务
    ///
    /// # 返回
    /// 成功投递的接收人数（无消息或任务失败时为 0）
    pub fn run_low_stock_check(&self) -> usize {
        info!("执行低库存巡检");
        let items = match self.inventory.read_all() {
            Ok(items) => items,
            Err(e) => {
                warn!(error = %e, "库存读取失败,本次巡检跳过");
                return 0;
            }
        };

        match self.engine.low_stock_message(&items) {
            Some(message) => self.broadcast(&message),
            None => {
                info!("无缺货/低库存条目,不发送预警");
                0
            }
        }
    }

    /// 执行日终库存报告任务
    pub fn run_end_of_day_report(&self) -> usize {
        info!("执行日终库存报告");
        let items = match self.inventory.read_all() {
            Ok(items) => items,
            Err(e) => {
                warn!(error = %e, "库存读取失败,本次日报跳过");
                return 0;
            }
        };

        let today = self.clock.now().date();
        match self.engine.end_of_day_message(&items, today) {
            Some(message) => self.broadcast(&message),
            None => 0,
        }
    }

    /// 执行月度预测报告任务（目标期间 = 今天 + 1 个自然月）
    pub fn run_monthly_forecast_report(&self) -> usize {
        info!("执行月度预测报告");
        let items = match self.inventory.read_all() {
            Ok(items) => items,
            Err(e) => {
                warn!(error = %e, "库存读取失败,本次月度报告跳过");
                return 0;
            }
        };

        let today = self.clock.now().date();
        let (target_year, target_month) = next_calendar_month(today.year(), today.month());

        match self
            .engine
            .monthly_forecast_message(&items, &self.predictor, target_year, target_month)
        {
            Some(message) => self.broadcast(&message),
            None => {
                info!("无可预测产品,不发送月度报告");
                0
            }
        }
    }

    /// 广播消息给全部注册接收人
    fn broadcast(&self, message: &AlertMessage) -> usize {
        let recipients = match self.recipients.list_recipients() {
            Ok(list) => list,
            Err(e) => {
                warn!(error = %e, "接收人列表读取失败,本次预警放弃");
                return 0;
            }
        };

        if recipients.is_empty() {
            info!("无注册接收人,预警消息丢弃");
            return 0;
        }

        self.dispatcher.broadcast(&recipients, message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_calendar_month_rollover() {
        assert_eq!(next_calendar_month(2024, 6), (2024, 7));
        assert_eq!(next_calendar_month(2024, 12), (2025, 1));
    }
}
