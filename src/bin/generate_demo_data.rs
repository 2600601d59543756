// ==========================================
// 智能库存预测与补货预警系统 - 演示数据生成
// ==========================================
// 用途: 生成销售历史/库存 CSV 与模型系数文件,
//       便于本地联调与端到端验证
// 使用: cargo run --bin generate_demo_data [输出目录]
// ==========================================

use anyhow::Context;
use chrono::NaiveDate;
use serde_json::json;
use std::path::PathBuf;

// 简单线性同余发生器,保证可复现
struct Lcg(u64);

impl Lcg {
    fn next_in(&mut self, low: i64, high: i64) -> i64 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        low + ((self.0 >> 33) as i64 % (high - low + 1))
    }
}

fn main() -> anyhow::Result<()> {
    let out_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));
    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("输出目录创建失败: {}", out_dir.display()))?;

    let products = [
        ("P001", "Whole Milk 1L", "Dairy", 120),
        ("P002", "White Bread", "Bakery", 90),
        ("P003", "Free Range Eggs 12pk", "Dairy", 60),
        ("P004", "Orange Juice 1L", "Beverages", 75),
        ("P005", "Basmati Rice 5kg", "Grains", 40),
    ];

    let mut rng = Lcg(42);

    // 1. 销售历史: 每个产品 14 个月,每月 3 笔交易
    let sales_path = out_dir.join("supermarket_sales.csv");
    let mut sales = csv::Writer::from_path(&sales_path)?;
    sales.write_record(["Product_ID", "Product_Name", "Category", "Date", "Units_Sold"])?;
    for (product_id, name, category, base) in &products {
        for offset in 0..14u32 {
            let year = 2023 + (offset / 12) as i32;
            let month = 1 + offset % 12;
            for day in [5u32, 14, 23] {
                let date = NaiveDate::from_ymd_opt(year, month, day)
                    .context("非法演示日期")?;
                let units = (*base as i64) / 3 + rng.next_in(-8, 8);
                sales.write_record([
                    product_id.to_string(),
                    name.to_string(),
                    category.to_string(),
                    date.to_string(),
                    units.max(0).to_string(),
                ])?;
            }
        }
    }
    sales.flush()?;
    println!("已生成销售历史: {}", sales_path.display());

    // 2. 库存数据
    let inventory_path = out_dir.join("inventory_data.csv");
    let mut inventory = csv::Writer::from_path(&inventory_path)?;
    inventory.write_record(["Product_ID", "Product_Name", "Stock_Quantity"])?;
    for (product_id, name, _category, base) in &products {
        let quantity = rng.next_in(0, (*base as i64) / 2);
        inventory.write_record([product_id.to_string(), name.to_string(), quantity.to_string()])?;
    }
    inventory.flush()?;
    println!("已生成库存数据: {}", inventory_path.display());

    // 3. 模型系数（离线训练产物的演示替身）
    //    特征顺序: [lag_1, lag_2, lag_3, lag_6, year, month]
    let model_path = out_dir.join("demand_model.json");
    let model = json!({
        "intercept": 12.0,
        "coefficients": [0.45, 0.25, 0.15, 0.05, 0.0, 0.8]
    });
    std::fs::write(&model_path, serde_json::to_string_pretty(&model)?)?;
    println!("已生成模型系数: {}", model_path.display());

    Ok(())
}
