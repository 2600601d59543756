// ==========================================
// 智能库存预测与补货预警系统 - 通知层
// ==========================================
// 职责: 预警消息的邮件投递
// 红线: 尽力而为、发完即弃;单个接收人失败只记日志,
//       不中断同批其余接收人,无重试队列（刻意的简化取舍）
// ==========================================

use crate::domain::alert::{AlertMessage, Recipient};
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

// ==========================================
// 错误类型
// ==========================================

/// 通知层错误类型
#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("邮箱地址无效: {0}")]
    Address(#[from] lettre::address::AddressError),

    #[error("邮件组装失败: {0}")]
    Message(#[from] lettre::error::Error),

    #[error("SMTP 发送失败: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),
}

// ==========================================
// MailTransport - 邮件传输接口
// ==========================================
/// 邮件传输接口
///
/// 外部邮件中继是协作方;一次 send = 一封 subject+body
/// 发往一个地址,并用该地址自己的凭据完成认证
pub trait MailTransport: Send + Sync {
    fn send(&self, recipient: &Recipient, subject: &str, body: &str) -> Result<(), NotifyError>;
}

// ==========================================
// SmtpMailer - SMTP 邮件传输
// ==========================================
/// SMTP 邮件传输
/// 职责: 每次发送建立一条加密连接,登录、发送、关闭
pub struct SmtpMailer {
    relay_host: String,
}

impl SmtpMailer {
    /// 创建新的 SmtpMailer 实例
    ///
    /// # 参数
    /// - relay_host: 邮件中继主机名（隐式 TLS）
    pub fn new(relay_host: impl Into<String>) -> Self {
        Self {
            relay_host: relay_host.into(),
        }
    }
}

impl MailTransport for SmtpMailer {
    fn send(&self, recipient: &Recipient, subject: &str, body: &str) -> Result<(), NotifyError> {
        // 接收人给自己发送,发件地址 = 收件地址
        let mailbox: Mailbox = recipient.alert_address.parse()?;
        let email = Message::builder()
            .from(mailbox.clone())
            .to(mailbox)
            .subject(subject)
            .body(body.to_string())?;

        let credentials = Credentials::new(
            recipient.alert_address.clone(),
            recipient.alert_credential.clone(),
        );

        let mailer = SmtpTransport::relay(&self.relay_host)?
            .credentials(credentials)
            .build();

        mailer.send(&email)?;
        Ok(())
    }
}

// ==========================================
// AlertDispatcher - 预警广播器
// ==========================================
/// 预警广播器
/// 职责: 将一条预警消息逐个（严格串行）投递给全部接收人
pub struct AlertDispatcher {
    transport: Arc<dyn MailTransport>,
}

impl AlertDispatcher {
    /// 创建新的 AlertDispatcher 实例
    pub fn new(transport: Arc<dyn MailTransport>) -> Self {
        Self { transport }
    }

    /// 广播预警消息
    ///
    /// # 返回
    /// 成功投递的接收人数
    ///
    /// # 说明
    /// 单个接收人失败（凭据错误/网络错误）记 warn 后继续,
    /// 不会中断其余接收人的投递
    pub fn broadcast(&self, recipients: &[Recipient], message: &AlertMessage) -> usize {
        let mut delivered = 0;

        for recipient in recipients {
            match self
                .transport
                .send(recipient, &message.subject, &message.body)
            {
                Ok(()) => {
                    info!(
                        address = %recipient.alert_address,
                        severity = %message.severity,
                        "预警邮件已发送"
                    );
                    delivered += 1;
                }
                Err(e) => {
                    warn!(
                        address = %recipient.alert_address,
                        error = %e,
                        "预警邮件发送失败,继续投递其余接收人"
                    );
                }
            }
        }

        delivered
    }
}
