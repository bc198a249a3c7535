use petmall_server::{Config, Server, ServerState, init_logger};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. 环境与日志
    dotenv::dotenv().ok();
    init_logger();

    tracing::info!("🐾 PetMall server starting...");

    // 2. 加载配置
    let config = Config::from_env();
    if config.enable_debug_header {
        tracing::warn!("x-debug-openid fallback is enabled; do not use in production");
    }

    // 3. 初始化状态并启动
    let state = ServerState::initialize(&config)
        .await
        .map_err(|e| anyhow::anyhow!("initialization failed: {}", e))?;

    let server = Server::with_state(config, state);
    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(anyhow::anyhow!("server exited with error: {}", e));
    }

    Ok(())
}
