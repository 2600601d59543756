// ==========================================
// 智能库存预测与补货预警系统 - API 层错误类型
// ==========================================
// 职责: 定义API层错误类型,转换仓储错误为用户友好的错误消息
// 红线: 登录失败不泄露账户是否存在
// ==========================================

use crate::repository::error::RepositoryError;
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 业务规则错误
    // ==========================================
    #[error("无效输入: {0}")]
    InvalidInput(String),

    #[error("资源未找到: {0}")]
    NotFound(String),

    /// 历史数据不足（预测路径的“未找到”,非致命）
    #[error("历史数据不足: product_id={0}")]
    InsufficientHistory(String),

    /// 注册地址已存在,无部分写入
    #[error("邮箱已注册: {0}")]
    DuplicateRecipient(String),

    /// 登录被拒（不区分用户不存在与密码错误）
    #[error("用户名或密码错误")]
    AuthFailure,

    // ==========================================
    // 数据访问错误
    // ==========================================
    /// 存储不可达或写入失败;库存状态不可假定已变更
    #[error("持久化失败: {0}")]
    PersistenceFailure(String),

    #[error("内部错误: {0}")]
    InternalError(String),
}

// 实现 From<RepositoryError>
impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound { entity, id } => {
                ApiError::NotFound(format!("{} (id={})", entity, id))
            }
            RepositoryError::UniqueConstraintViolation(msg) => ApiError::DuplicateRecipient(msg),
            RepositoryError::PersistenceFailure(msg) => ApiError::PersistenceFailure(msg),
            other => ApiError::InternalError(other.to_string()),
        }
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;
