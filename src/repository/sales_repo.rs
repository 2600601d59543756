// ==========================================
// 智能库存预测与补货预警系统 - 销售历史仓储
// ==========================================
// 职责: 销售历史 CSV 的全量读取
// 红线: 运行期只读,每轮特征重算时整体加载
// ==========================================

use crate::domain::sales::SalesRecord;
use crate::repository::error::RepositoryResult;
use std::path::{Path, PathBuf};
use tracing::debug;

// ==========================================
// SalesHistoryRepository - 销售历史仓储
// ==========================================
/// 销售历史仓储
/// 职责: 从 CSV 文件整体读取逐笔销售记录
pub struct SalesHistoryRepository {
    path: PathBuf,
}

impl SalesHistoryRepository {
    /// 创建新的 SalesHistoryRepository 实例
    ///
    /// # 参数
    /// - path: 销售历史 CSV 文件路径
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// 全量读取销售记录
    ///
    /// # 返回
    /// - Ok(Vec<SalesRecord>): 全部销售记录（文件顺序）
    /// - Err: 文件不可读或行格式错误
    pub fn load_all(&self) -> RepositoryResult<Vec<SalesRecord>> {
        let mut reader = csv::Reader::from_path(&self.path)?;

        let mut records = Vec::new();
        for row in reader.deserialize::<SalesRecord>() {
            records.push(row?);
        }

        debug!(count = records.len(), path = %self.path.display(), "销售历史加载完成");
        Ok(records)
    }
}
