// ==========================================
// 智能库存预测与补货预警系统 - 预警领域模型
// ==========================================
// 用途: 预警消息为瞬态对象,由预警引擎组装后广播
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// AlertSeverity - 预警级别
// ==========================================
// 序列化格式: SCREAMING_SNAKE_CASE
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AlertSeverity {
    OutOfStock, // 缺货
    LowStock,   // 低库存
    Info,       // 信息类（日报/月度预测）
}

impl fmt::Display for AlertSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlertSeverity::OutOfStock => write!(f, "OUT_OF_STOCK"),
            AlertSeverity::LowStock => write!(f, "LOW_STOCK"),
            AlertSeverity::Info => write!(f, "INFO"),
        }
    }
}

// ==========================================
// AlertMessage - 预警消息
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertMessage {
    pub subject: String,         // 邮件主题
    pub body: String,            // 邮件正文
    pub severity: AlertSeverity, // 预警级别
}

// ==========================================
// Recipient - 预警接收人
// ==========================================
// 来源: 账户存储（本子系统只读）
// 说明: 接收人用自己的凭据登录中继,给自己发送预警
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipient {
    pub display_name: String,     // 显示名（用户名）
    pub alert_address: String,    // 预警邮箱地址
    pub alert_credential: String, // 邮箱应用凭据（非登录密码）
}
