// ==========================================
// 测试辅助函数
// ==========================================
// 职责: 提供测试所需的销售历史构造、临时 CSV/SQLite 文件、
//       确定性模型桩与邮件传输桩
// ==========================================

#![allow(dead_code)]

use chrono::NaiveDate;
use smart_stock_aps::domain::alert::Recipient;
use smart_stock_aps::domain::forecast::DemandFeatures;
use smart_stock_aps::domain::inventory::InventoryItem;
use smart_stock_aps::domain::sales::SalesRecord;
use smart_stock_aps::engine::predictor::DemandModel;
use smart_stock_aps::notify::{MailTransport, NotifyError};
use std::error::Error;
use std::sync::Mutex;
use tempfile::NamedTempFile;

/// 构造单条销售记录
pub fn make_sales_record(
    product_id: &str,
    product_name: &str,
    category: &str,
    year: i32,
    month: u32,
    day: u32,
    units_sold: i64,
) -> SalesRecord {
    SalesRecord {
        product_id: product_id.to_string(),
        product_name: product_name.to_string(),
        category: category.to_string(),
        date: NaiveDate::from_ymd_opt(year, month, day).unwrap(),
        units_sold,
    }
}

/// 构造连续月度销售历史（每月一笔,从 start_year/start_month 开始）
pub fn monthly_history(
    product_id: &str,
    product_name: &str,
    category: &str,
    start_year: i32,
    start_month: u32,
    monthly_units: &[i64],
) -> Vec<SalesRecord> {
    let mut records = Vec::new();
    let mut year = start_year;
    let mut month = start_month;
    for units in monthly_units {
        records.push(make_sales_record(
            product_id,
            product_name,
            category,
            year,
            month,
            15,
            *units,
        ));
        month += 1;
        if month > 12 {
            month = 1;
            year += 1;
        }
    }
    records
}

/// 创建临时库存 CSV 文件
///
/// # 返回
/// - NamedTempFile: 临时文件（需要保持存活）
/// - String: 文件路径
pub fn create_inventory_csv(
    items: &[(&str, &str, i64)],
) -> Result<(NamedTempFile, String), Box<dyn Error>> {
    let temp_file = NamedTempFile::new()?;
    let path = temp_file.path().to_str().unwrap().to_string();

    let mut writer = csv::Writer::from_path(&path)?;
    writer.write_record(["Product_ID", "Product_Name", "Stock_Quantity"])?;
    for (product_id, product_name, quantity) in items {
        writer.write_record([
            product_id.to_string(),
            product_name.to_string(),
            quantity.to_string(),
        ])?;
    }
    writer.flush()?;

    Ok((temp_file, path))
}

/// 创建临时账户数据库文件
pub fn create_users_db() -> Result<(NamedTempFile, String), Box<dyn Error>> {
    let temp_file = NamedTempFile::new()?;
    let path = temp_file.path().to_str().unwrap().to_string();
    Ok((temp_file, path))
}

/// 从路径读取库存 CSV（验证持久化结果用）
pub fn read_inventory_csv(path: &str) -> Result<Vec<InventoryItem>, Box<dyn Error>> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut items = Vec::new();
    for row in reader.deserialize::<InventoryItem>() {
        items.push(row?);
    }
    Ok(items)
}

// ==========================================
// StubModel - 确定性模型桩
// ==========================================
/// 固定输出的回归模型桩
pub struct StubModel {
    pub fixed_prediction: f64,
}

impl DemandModel for StubModel {
    fn predict(&self, _features: &DemandFeatures) -> f64 {
        self.fixed_prediction
    }
}

// ==========================================
// StubTransport - 邮件传输桩
// ==========================================
/// 记录发送并可按地址模拟失败的传输桩
pub struct StubTransport {
    /// (address, subject) 发送记录
    pub sent: Mutex<Vec<(String, String)>>,
    /// 对该地址模拟凭据失败
    pub fail_address: Option<String>,
}

impl StubTransport {
    pub fn new() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail_address: None,
        }
    }

    pub fn failing_for(address: &str) -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail_address: Some(address.to_string()),
        }
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

impl MailTransport for StubTransport {
    fn send(&self, recipient: &Recipient, subject: &str, _body: &str) -> Result<(), NotifyError> {
        if let Some(fail) = &self.fail_address {
            if fail == &recipient.alert_address {
                // 用地址解析错误模拟单接收人投递失败
                return Err(NotifyError::Address(
                    "not-an-address".parse::<lettre::Address>().unwrap_err(),
                ));
            }
        }
        self.sent
            .lock()
            .unwrap()
            .push((recipient.alert_address.clone(), subject.to_string()));
        Ok(())
    }
}
