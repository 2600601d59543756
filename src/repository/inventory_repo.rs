// ==========================================
// 智能库存预测与补货预警系统 - 库存仓储
// ==========================================
// 职责: 库存数据的读取与调整持久化
// 红线: 调整必须先落盘成功再返回;落盘失败时内存状态回滚
// 并发: 单条调整由内部互斥锁串行化;跨上下文采用“最后写入者获胜”
// ==========================================

use crate::domain::inventory::InventoryItem;
use crate::repository::error::{RepositoryError, RepositoryResult};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use tracing::debug;

// ==========================================
// InventoryStore - 库存存储接口
// ==========================================
/// 库存存储接口
///
/// 文件型或服务型后端均可实现;调用方只依赖此窄接口
pub trait InventoryStore: Send + Sync {
    /// 读取全部库存条目
    fn read_all(&self) -> RepositoryResult<Vec<InventoryItem>>;

    /// 按产品 ID 查询单条库存
    fn get(&self, product_id: &str) -> RepositoryResult<Option<InventoryItem>>;

    /// 按增量调整库存并持久化
    ///
    /// # 返回
    /// - Ok(i64): 调整后的新库存量
    /// - Err(NotFound): 产品不存在
    /// - Err(PersistenceFailure): 落盘失败,库存视为未变更
    fn adjust(&self, product_id: &str, delta: i64) -> RepositoryResult<i64>;
}

// ==========================================
// CsvInventoryStore - CSV 文件库存存储
// ==========================================
/// CSV 文件库存存储
/// 职责: 打开时整体加载,每次调整后整体重写文件
pub struct CsvInventoryStore {
    path: PathBuf,
    items: Mutex<Vec<InventoryItem>>,
}

impl CsvInventoryStore {
    /// 打开库存 CSV 文件并加载全部条目
    ///
    /// # 参数
    /// - path: 库存 CSV 文件路径
    pub fn open<P: AsRef<Path>>(path: P) -> RepositoryResult<Self> {
        let path = path.as_ref().to_path_buf();
        let mut reader = csv::Reader::from_path(&path)?;

        let mut items = Vec::new();
        for row in reader.deserialize::<InventoryItem>() {
            items.push(row?);
        }

        debug!(count = items.len(), path = %path.display(), "库存数据加载完成");
        Ok(Self {
            path,
            items: Mutex::new(items),
        })
    }

    /// 获取内部条目锁
    fn lock_items(&self) -> RepositoryResult<MutexGuard<'_, Vec<InventoryItem>>> {
        self.items
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 将条目整体写回 CSV 文件
    fn write_all(&self, items: &[InventoryItem]) -> RepositoryResult<()> {
        let mut writer = csv::Writer::from_path(&self.path)
            .map_err(|e| RepositoryError::PersistenceFailure(e.to_string()))?;

        for item in items {
            writer
                .serialize(item)
                .map_err(|e| RepositoryError::PersistenceFailure(e.to_string()))?;
        }

        writer
            .flush()
            .map_err(|e| RepositoryError::PersistenceFailure(e.to_string()))?;
        Ok(())
    }
}

impl InventoryStore for CsvInventoryStore {
    fn read_all(&self) -> RepositoryResult<Vec<InventoryItem>> {
        Ok(self.lock_items()?.clone())
    }

    fn get(&self, product_id: &str) -> RepositoryResult<Option<InventoryItem>> {
        let items = self.lock_items()?;
        Ok(items.iter().find(|i| i.product_id == product_id).cloned())
    }

    fn adjust(&self, product_id: &str, delta: i64) -> RepositoryResult<i64> {
        let mut items = self.lock_items()?;

        let index = items
            .iter()
            .position(|i| i.product_id == product_id)
            .ok_or_else(|| RepositoryError::NotFound {
                entity: "InventoryItem".to_string(),
                id: product_id.to_string(),
            })?;

        let old_quantity = items[index].stock_quantity;
        let new_quantity = old_quantity + delta;
        items[index].stock_quantity = new_quantity;

        // 先落盘,落盘失败则回滚内存状态
        if let Err(e) = self.write_all(&items) {
            items[index].stock_quantity = old_quantity;
            return Err(e);
        }

        debug!(
            product_id,
            delta, old_quantity, new_quantity, "库存调整已持久化"
        );
        Ok(new_quantity)
    }
}
