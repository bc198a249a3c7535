//! Server State

use std::path::PathBuf;

use sqlx::SqlitePool;

use crate::core::Config;
use crate::db::DbService;
use crate::utils::AppError;

/// 服务器状态 - 所有处理器共享的单例引用
///
/// 使用 Clone 浅拷贝（内部为连接池句柄），跨请求共享成本极低。
#[derive(Clone, Debug)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// 数据库服务
    pub db: DbService,
}

impl ServerState {
    /// 初始化服务器状态
    ///
    /// 1. 确保工作目录与上传目录存在
    /// 2. 打开数据库并执行迁移
    pub async fn initialize(config: &Config) -> Result<Self, AppError> {
        std::fs::create_dir_all(&config.work_dir)
            .map_err(|e| AppError::internal(format!("Failed to create work dir: {}", e)))?;

        let uploads = PathBuf::from(&config.work_dir).join("uploads");
        std::fs::create_dir_all(&uploads)
            .map_err(|e| AppError::internal(format!("Failed to create uploads dir: {}", e)))?;

        let db = DbService::new(&config.database_path).await?;

        Ok(Self {
            config: config.clone(),
            db,
        })
    }

    /// Shared handle to the connection pool
    pub fn pool(&self) -> SqlitePool {
        self.db.pool()
    }

    /// Directory uploaded files are written to
    pub fn uploads_dir(&self) -> PathBuf {
        PathBuf::from(&self.config.work_dir).join("uploads")
    }
}
