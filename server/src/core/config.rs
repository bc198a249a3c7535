//! 服务器配置
//!
//! # 环境变量
//!
//! | 环境变量 | 默认值 | 说明 |
//! |----------|--------|------|
//! | WORK_DIR | ./data | 工作目录（数据库、上传文件） |
//! | HTTP_PORT | 80 | HTTP 服务端口 |
//! | DATABASE_PATH | {WORK_DIR}/petmall.db | SQLite 数据库文件 |
//! | ENVIRONMENT | development | 运行环境 |
//! | ENABLE_DEBUG_HEADER | true | 是否接受 x-debug-openid 调试身份头 |
//!
//! 生产环境强制关闭调试身份头，无论 ENABLE_DEBUG_HEADER 如何设置。
//!
//! # 示例
//!
//! ```ignore
//! WORK_DIR=/data/petmall HTTP_PORT=8080 cargo run
//! ```

/// Server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// 工作目录，存储数据库与上传文件
    pub work_dir: String,
    /// HTTP API 服务端口
    pub http_port: u16,
    /// SQLite 数据库文件路径
    pub database_path: String,
    /// 运行环境: development | staging | production
    pub environment: String,
    /// 是否接受调试身份头（生产环境恒为 false）
    pub enable_debug_header: bool,
}

impl Config {
    /// 从环境变量加载配置，未设置时使用默认值
    pub fn from_env() -> Self {
        let environment = std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into());
        let work_dir = std::env::var("WORK_DIR").unwrap_or_else(|_| "./data".into());
        let database_path = std::env::var("DATABASE_PATH")
            .unwrap_or_else(|_| format!("{}/petmall.db", work_dir));

        // 调试身份头绕过认证，生产部署必须关闭
        let enable_debug_header = environment != "production"
            && std::env::var("ENABLE_DEBUG_HEADER")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true);

        Self {
            work_dir,
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(80),
            database_path,
            environment,
            enable_debug_header,
        }
    }

    /// 使用自定义值覆盖部分配置
    ///
    /// 常用于测试场景
    pub fn with_overrides(work_dir: impl Into<String>, http_port: u16) -> Self {
        let work_dir = work_dir.into();
        let mut config = Self::from_env();
        config.database_path = format!("{}/petmall.db", work_dir);
        config.work_dir = work_dir;
        config.http_port = http_port;
        config
    }

    /// 是否生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// 是否开发环境
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
