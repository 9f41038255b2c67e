use crate::storage::Storage;
use std::sync::Arc;
use tracing::info;

pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
}

/// 准备服务器启动的上下文
/// 安装 TLS 加密提供者，连接数据库并运行迁移
pub async fn prepare_server_startup() -> StartupContext {
    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("Failed to install rustls crypto provider");

    let storage = crate::storage::create_storage()
        .await
        .expect("Failed to create storage backend");
    info!("Storage backend initialized and migrations completed");

    StartupContext { storage }
}
