//! File Upload Handler

use axum::Json;
use axum::extract::{Multipart, State};
use uuid::Uuid;

use crate::AppError;
use crate::core::ServerState;
use crate::utils::{AppResponse, AppResult, ok};

/// Maximum file size (5MB)
const MAX_FILE_SIZE: usize = 5 * 1024 * 1024;

/// POST /api/upload - multipart 文件上传
///
/// 文件以 UUID + 原始后缀重命名，返回可直接回读的相对路径。
pub async fn upload(
    State(state): State<ServerState>,
    mut multipart: Multipart,
) -> AppResult<Json<AppResponse<String>>> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("file") {
            continue;
        }

        let original_name = field.file_name().unwrap_or_default().to_string();
        let data = field.bytes().await?;

        if data.is_empty() {
            return Err(AppError::validation("文件为空"));
        }
        if data.len() > MAX_FILE_SIZE {
            return Err(AppError::validation(format!(
                "File too large. Maximum size is {}MB",
                MAX_FILE_SIZE / 1024 / 1024
            )));
        }

        // 保留原始后缀，文件名换成 UUID
        let filename = match original_name.rsplit_once('.') {
            Some((_, ext)) if !ext.is_empty() => format!("{}.{}", Uuid::new_v4(), ext),
            _ => Uuid::new_v4().to_string(),
        };

        let dest = state.uploads_dir().join(&filename);
        tokio::fs::write(&dest, &data)
            .await
            .map_err(|e| AppError::internal(format!("文件上传失败: {}", e)))?;

        tracing::info!(filename = %filename, size = data.len(), "File uploaded");
        return Ok(ok(format!("/uploads/{}", filename)));
    }

    Err(AppError::validation("Missing file field"))
}
