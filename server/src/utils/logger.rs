//! 日志初始化
//!
//! 控制台结构化日志；生产部署可追加按天滚动的文件输出。

use std::path::Path;

/// Console-only logging with the default level
pub fn init_logger() {
    init_logger_with_file(None, None);
}

/// Initialize logging, optionally teeing into a daily-rolling file
///
/// 级别取 `log_level` 参数，缺省时读 `LOG_LEVEL` 环境变量，最终回退 info。
/// `log_dir` 不存在时静默退回纯控制台输出。
pub fn init_logger_with_file(log_level: Option<&str>, log_dir: Option<&str>) {
    let level = log_level
        .map(str::to_owned)
        .or_else(|| std::env::var("LOG_LEVEL").ok())
        .unwrap_or_else(|| "info".into());

    let builder = tracing_subscriber::fmt()
        .with_max_level(level.parse().unwrap_or(tracing::Level::INFO))
        .with_target(false)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false);

    match log_dir.map(Path::new).filter(|dir| dir.exists()) {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "petmall-server");
            builder.with_writer(appender).init();
        }
        None => builder.init(),
    }
}
