// ==========================================
// AlertEngine 引擎测试
// ==========================================
// 测试目标: 验证三类预警策略的消息组装
// 覆盖范围: 静默条件、缺货/低库存分组、日报、月度预测
// ==========================================

mod test_helpers;

use chrono::NaiveDate;
use smart_stock_aps::domain::alert::AlertSeverity;
use smart_stock_aps::domain::inventory::InventoryItem;
use smart_stock_aps::engine::predictor::DemandPredictor;
use smart_stock_aps::engine::{AlertEngine, FeatureBuilder};
use std::sync::Arc;
use test_helpers::{monthly_history, StubModel};

/// 创建测试用的库存条目
fn item(product_id: &str, product_name: &str, quantity: i64) -> InventoryItem {
    InventoryItem {
        product_id: product_id.to_string(),
        product_name: product_name.to_string(),
        stock_quantity: quantity,
    }
}

// ==========================================
// 低库存巡检
// ==========================================

#[test]
fn test_low_stock_silent_when_all_above_threshold() {
    let engine = AlertEngine::new(25);
    let items = vec![item("A", "Milk", 25), item("B", "Bread", 100)];
    assert!(engine.low_stock_message(&items).is_none());
}

#[test]
fn test_low_stock_silent_on_empty_inventory() {
    let engine = AlertEngine::new(25);
    assert!(engine.low_stock_message(&[]).is_none());
}

#[test]
fn test_low_stock_partitions_out_of_stock_first() {
    let engine = AlertEngine::new(25);
    let items = vec![item("A", "Milk", 0), item("B", "Bread", 10), item("C", "Eggs", 30)];

    let message = engine.low_stock_message(&items).expect("应产生预警消息");
    assert_eq!(message.severity, AlertSeverity::OutOfStock);
    assert_eq!(message.subject, "Inventory Low Stock Alert");

    // A 在缺货组,B 在低库存组,C 不出现
    assert!(message.body.contains("Milk (ID:A) — OUT OF STOCK"));
    assert!(message.body.contains("Bread (ID:B) — 10 units left"));
    assert!(!message.body.contains("Eggs"));

    // 缺货组在前
    let out_pos = message.body.find("OUT OF STOCK ITEMS:").unwrap();
    let low_pos = message.body.find("LOW STOCK ITEMS:").unwrap();
    assert!(out_pos < low_pos);
}

#[test]
fn test_low_stock_only_low_items_has_low_severity() {
    let engine = AlertEngine::new(25);
    let items = vec![item("B", "Bread", 10)];

    let message = engine.low_stock_message(&items).unwrap();
    assert_eq!(message.severity, AlertSeverity::LowStock);
    assert!(!message.body.contains("OUT OF STOCK ITEMS:"));
}

#[test]
fn test_negative_quantity_counts_as_out_of_stock() {
    let engine = AlertEngine::new(25);
    let items = vec![item("A", "Milk", -3)];

    let message = engine.low_stock_message(&items).unwrap();
    assert_eq!(message.severity, AlertSeverity::OutOfStock);
}

// ==========================================
// 日终报告
// ==========================================

#[test]
fn test_end_of_day_lists_every_item_with_date() {
    let engine = AlertEngine::default();
    let items = vec![item("A", "Milk", 0), item("B", "Bread", 40)];
    let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();

    let message = engine.end_of_day_message(&items, today).unwrap();
    assert_eq!(message.severity, AlertSeverity::Info);
    assert_eq!(message.subject, "Daily Stock Report – 2024-06-15");
    assert!(message.body.contains("Milk (ID:A) — 0 units"));
    assert!(message.body.contains("Bread (ID:B) — 40 units"));
}

#[test]
fn test_end_of_day_none_on_empty_inventory() {
    let engine = AlertEngine::default();
    let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
    assert!(engine.end_of_day_message(&[], today).is_none());
}

// ==========================================
// 月度预测报告
// ==========================================

fn stub_predictor(prediction: f64) -> DemandPredictor {
    let records = monthly_history("X", "Widget", "Tools", 2024, 1, &[8, 30, 31, 9, 12, 10, 60]);
    let series = FeatureBuilder::new().build(&records);
    DemandPredictor::new(series, Arc::new(StubModel { fixed_prediction: prediction }))
}

#[test]
fn test_monthly_forecast_lists_required_units() {
    let engine = AlertEngine::default();
    let predictor = stub_predictor(20.0);
    let items = vec![item("X", "Widget", 5)];

    let message = engine
        .monthly_forecast_message(&items, &predictor, 2024, 7)
        .unwrap();
    assert_eq!(message.severity, AlertSeverity::Info);
    assert_eq!(message.subject, "Monthly Stock Forecast – 7/2024");
    assert!(message.body.contains("Widget (ID:X) → Need 15 units"));
}

#[test]
fn test_monthly_forecast_skips_products_without_history() {
    let engine = AlertEngine::default();
    let predictor = stub_predictor(20.0);
    let items = vec![item("X", "Widget", 5), item("Y", "Gadget", 3)];

    let message = engine
        .monthly_forecast_message(&items, &predictor, 2024, 7)
        .unwrap();
    assert!(message.body.contains("Widget"));
    assert!(!message.body.contains("Gadget")); // 无历史,静默跳过
}

#[test]
fn test_monthly_forecast_none_when_nothing_forecastable() {
    let engine = AlertEngine::default();
    let predictor = stub_predictor(20.0);
    let items = vec![item("Y", "Gadget", 3)];

    assert!(engine
        .monthly_forecast_message(&items, &predictor, 2024, 7)
        .is_none());
    assert!(engine
        .monthly_forecast_message(&[], &predictor, 2024, 7)
        .is_none());
}

#[test]
fn test_monthly_forecast_stock_covers_demand() {
    let engine = AlertEngine::default();
    let predictor = stub_predictor(20.0);
    let items = vec![item("X", "Widget", 50)];

    let message = engine
        .monthly_forecast_message(&items, &predictor, 2024, 7)
        .unwrap();
    assert!(message.body.contains("Widget (ID:X) → Need 0 units"));
}
