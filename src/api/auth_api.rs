// ==========================================
// 智能库存预测与补货预警系统 - 账户 API
// ==========================================
// 职责: 账户注册与登录校验
// 红线: 登录失败统一返回 AuthFailure,不泄露账户是否存在
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::domain::alert::Recipient;
use crate::repository::recipient_repo::{NewAccount, RecipientRepository};
use std::sync::Arc;
use tracing::info;

// ==========================================
// AuthApi - 账户 API
// ==========================================
/// 账户API
///
/// 职责：
/// 1. 账户注册（邮箱唯一,重复注册无部分写入）
/// 2. 登录校验（返回接收人视图）
pub struct AuthApi {
    recipients: Arc<RecipientRepository>,
}

impl AuthApi {
    /// 创建新的AuthApi实例
    pub fn new(recipients: Arc<RecipientRepository>) -> Self {
        Self { recipients }
    }

    /// 注册新账户
    ///
    /// # 返回
    /// - Ok(()): 注册成功
    /// - Err(DuplicateRecipient): 邮箱已注册
    /// - Err(InvalidInput): 入参非法
    pub fn register(&self, account: NewAccount) -> ApiResult<()> {
        if account.username.trim().is_empty() {
            return Err(ApiError::InvalidInput("用户名不能为空".to_string()));
        }
        if account.email.trim().is_empty() || !account.email.contains('@') {
            return Err(ApiError::InvalidInput(format!(
                "邮箱地址无效: {}",
                account.email
            )));
        }
        if account.password.is_empty() {
            return Err(ApiError::InvalidInput("密码不能为空".to_string()));
        }

        self.recipients.create(&account)?;
        info!(username = %account.username, "账户注册成功");
        Ok(())
    }

    /// 登录校验
    ///
    /// # 返回
    /// - Ok(Recipient): 校验通过,返回接收人视图
    /// - Err(AuthFailure): 用户不存在或密码错误（不区分）
    pub fn login(&self, username: &str, password: &str) -> ApiResult<Recipient> {
        match self.recipients.verify_credentials(username, password)? {
            Some(recipient) => {
                info!(username, "登录成功");
                Ok(recipient)
            }
            None => Err(ApiError::AuthFailure),
        }
    }
}
