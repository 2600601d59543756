// ==========================================
// 智能库存预测与补货预警系统 - 配置层
// ==========================================
// 职责: 配置加载、默认值、类型化读取
// 存储: JSON 文件（全字段可缺省）
// ==========================================

use crate::engine::scheduler::parse_daily_time;
use chrono::{Duration, NaiveTime};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::warn;

/// 配置加载错误
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件读取失败: {0}")]
    Io(#[from] std::io::Error),

    #[error("配置文件解析失败: {0}")]
    Parse(#[from] serde_json::Error),
}

// ==========================================
// DataConfig - 数据文件路径
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    pub sales_csv: String,     // 销售历史 CSV
    pub inventory_csv: String, // 库存数据 CSV
    pub users_db: String,      // 账户数据库 (SQLite)
    pub model_file: String,    // 回归模型系数文件 (JSON)
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            sales_csv: "supermarket_sales.csv".to_string(),
            inventory_csv: "inventory_data.csv".to_string(),
            users_db: "users.db".to_string(),
            model_file: "demand_model.json".to_string(),
        }
    }
}

// ==========================================
// AlertConfig - 预警策略配置
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AlertConfig {
    pub low_stock_threshold: i64,     // 低库存阈值
    pub low_stock_interval_secs: i64, // 低库存巡检间隔（秒）
    pub daily_report_time: String,    // 日终报告定点时刻 "HH:MM"
    pub monthly_report_time: String,  // 月度预测定点时刻 "HH:MM"
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            low_stock_threshold: 25,
            low_stock_interval_secs: 30,
            daily_report_time: "22:57".to_string(),
            monthly_report_time: "22:58".to_string(),
        }
    }
}

// ==========================================
// MailConfig - 邮件中继配置
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MailConfig {
    pub relay_host: String, // SMTP 中继主机（隐式 TLS）
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            relay_host: "smtp.gmail.com".to_string(),
        }
    }
}

// ==========================================
// AppConfig - 应用配置
// ==========================================
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub data: DataConfig,
    pub alert: AlertConfig,
    pub mail: MailConfig,
}

impl AppConfig {
    /// 从 JSON 文件加载配置
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// 从 JSON 文件加载配置,失败时回退到默认配置
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        match Self::load(&path) {
            Ok(config) => config,
            Err(e) => {
                warn!(
                    path = %path.as_ref().display(),
                    error = %e,
                    "配置加载失败,使用默认配置"
                );
                Self::default()
            }
        }
    }

    /// 低库存巡检间隔
    pub fn low_stock_interval(&self) -> Duration {
        Duration::seconds(self.alert.low_stock_interval_secs.max(1))
    }

    /// 日终报告定点时刻（解析失败回退 22:57）
    pub fn daily_report_time(&self) -> NaiveTime {
        let fallback = NaiveTime::from_hms_opt(22, 57, 0).unwrap_or_default();
        parse_daily_time(&self.alert.daily_report_time, fallback)
    }

    /// 月度预测定点时刻（解析失败回退 22:58）
    pub fn monthly_report_time(&self) -> NaiveTime {
        let fallback = NaiveTime::from_hms_opt(22, 58, 0).unwrap_or_default();
        parse_daily_time(&self.alert.monthly_report_time, fallback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.alert.low_stock_threshold, 25);
        assert_eq!(config.alert.low_stock_interval_secs, 30);
        assert_eq!(config.mail.relay_host, "smtp.gmail.com");
        assert_eq!(
            config.daily_report_time(),
            NaiveTime::from_hms_opt(22, 57, 0).unwrap()
        );
    }

    #[test]
    fn test_partial_json_falls_back_to_defaults() {
        let config: AppConfig =
            serde_json::from_str(r#"{"alert": {"low_stock_threshold": 10}}"#).unwrap();
        assert_eq!(config.alert.low_stock_threshold, 10);
        assert_eq!(config.alert.low_stock_interval_secs, 30);
        assert_eq!(config.data.users_db, "users.db");
    }
}
