// ==========================================
// 智能库存预测与补货预警系统 - 账户/接收人仓储
// ==========================================
// 职责: 管理 users 表（注册、查询、凭据校验、接收人列表）
// 红线: 登录密码只存 argon2 哈希;邮箱凭据仅供邮件中继登录
// 红线: 校验失败不区分“用户不存在”与“密码错误”
// ==========================================

use crate::db::open_sqlite_connection;
use crate::domain::alert::Recipient;
use crate::repository::error::{RepositoryError, RepositoryResult};
use argon2::password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use rusqlite::{params, Connection};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::debug;

// ==========================================
// NewAccount - 注册入参
// ==========================================
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub username: String,        // 用户名（显示名）
    pub email: String,           // 邮箱地址（唯一）
    pub mail_credential: String, // 邮箱应用凭据（发信用）
    pub password: String,        // 登录密码（明文入参,仅存哈希）
}

// ==========================================
// RecipientRepository - 账户/接收人仓储
// ==========================================
/// 账户/接收人仓储
/// 职责: users 表数据访问;预警子系统通过 list_recipients 只读消费
pub struct RecipientRepository {
    conn: Arc<Mutex<Connection>>,
}

impl RecipientRepository {
    /// 创建新的 RecipientRepository 实例并初始化 schema
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)?;
        let repo = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        repo.init_schema()?;
        Ok(repo)
    }

    /// 从已有连接创建仓储实例
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> RepositoryResult<Self> {
        let repo = Self { conn };
        repo.init_schema()?;
        Ok(repo)
    }

    /// 获取数据库连接
    fn get_conn(&self) -> RepositoryResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 初始化 users 表
    fn init_schema(&self) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                username TEXT NOT NULL,
                email TEXT NOT NULL UNIQUE,
                mail_credential TEXT NOT NULL,
                password_hash TEXT NOT NULL,
                created_at TEXT NOT NULL DEFAULT (datetime('now'))
            )
            "#,
            [],
        )?;
        Ok(())
    }

    /// 注册新账户
    ///
    /// # 参数
    /// - account: 注册入参
    ///
    /// # 返回
    /// - Ok(()): 注册成功
    /// - Err(UniqueConstraintViolation): 邮箱已存在,无部分写入
    pub fn create(&self, account: &NewAccount) -> RepositoryResult<()> {
        let password_hash = hash_password(&account.password)?;

        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO users (username, email, mail_credential, password_hash)
            VALUES (?1, ?2, ?3, ?4)
            "#,
            params![
                account.username,
                account.email,
                account.mail_credential,
                password_hash,
            ],
        )?;

        debug!(username = %account.username, "账户注册成功");
        Ok(())
    }

    /// 按用户名查询接收人视图
    ///
    /// # 返回
    /// - Ok(Some(Recipient)): 找到账户
    /// - Ok(None): 账户不存在
    pub fn find_by_username(&self, username: &str) -> RepositoryResult<Option<Recipient>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            "SELECT username, email, mail_credential FROM users WHERE username = ?1 LIMIT 1",
        )?;

        let result = stmt.query_row(params![username], |row| {
            Ok(Recipient {
                display_name: row.get(0)?,
                alert_address: row.get(1)?,
                alert_credential: row.get(2)?,
            })
        });

        match result {
            Ok(recipient) => Ok(Some(recipient)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// 校验登录凭据
    ///
    /// # 返回
    /// - Ok(Some(Recipient)): 校验通过
    /// - Ok(None): 用户不存在或密码错误（对调用方不可区分）
    pub fn verify_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> RepositoryResult<Option<Recipient>> {
        let stored = {
            let conn = self.get_conn()?;
            let mut stmt = conn.prepare(
                "SELECT username, email, mail_credential, password_hash FROM users WHERE username = ?1 LIMIT 1",
            )?;

            let result = stmt.query_row(params![username], |row| {
                Ok((
                    Recipient {
                        display_name: row.get(0)?,
                        alert_address: row.get(1)?,
                        alert_credential: row.get(2)?,
                    },
                    row.get::<_, String>(3)?,
                ))
            });

            match result {
                Ok(pair) => Some(pair),
                Err(rusqlite::Error::QueryReturnedNoRows) => None,
                Err(e) => return Err(e.into()),
            }
        };

        let (recipient, password_hash) = match stored {
            Some(pair) => pair,
            None => return Ok(None),
        };

        if verify_password(password, &password_hash)? {
            Ok(Some(recipient))
        } else {
            Ok(None)
        }
    }

    /// 列出全部预警接收人
    ///
    /// # 返回
    /// - Ok(Vec<Recipient>): 全部注册账户的接收人视图
    pub fn list_recipients(&self) -> RepositoryResult<Vec<Recipient>> {
        let conn = self.get_conn()?;
        let mut stmt =
            conn.prepare("SELECT username, email, mail_credential FROM users ORDER BY id")?;

        let rows = stmt.query_map([], |row| {
            Ok(Recipient {
                display_name: row.get(0)?,
                alert_address: row.get(1)?,
                alert_credential: row.get(2)?,
            })
        })?;

        let mut recipients = Vec::new();
        for row in rows {
            recipients.push(row?);
        }
        Ok(recipients)
    }
}

// ==========================================
// 密码哈希辅助函数
// ==========================================

/// 生成 argon2 密码哈希（随机盐）
fn hash_password(password: &str) -> RepositoryResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| RepositoryError::CredentialHashError(e.to_string()))?;
    Ok(hash.to_string())
}

/// 校验明文密码与存储哈希
fn verify_password(password: &str, stored_hash: &str) -> RepositoryResult<bool> {
    let parsed = PasswordHash::new(stored_hash)
        .map_err(|e| RepositoryError::CredentialHashError(e.to_string()))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}
