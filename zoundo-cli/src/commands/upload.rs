// zoundo-cli/src/commands/upload.rs
use crate::output::{print_response, OutputFormat, Response};
use anyhow::{anyhow, Context, Result};
use std::path::Path;
use tracing::info;
use zoundo_client::ZoundoClient;

/// Upload a local file as an asset, as multipart form or inline base64
pub async fn handle_upload(
    client: &ZoundoClient,
    path: &Path,
    base64: bool,
    format: OutputFormat,
) -> Result<()> {
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| anyhow!("Invalid file path: {}", path.display()))?;
    let data = tokio::fs::read(path)
        .await
        .with_context(|| format!("Cannot read {}", path.display()))?;

    info!(file = file_name, bytes = data.len(), base64, "uploading asset");

    let asset = if base64 {
        client.assets().upload_base64(file_name, &data, &[]).await?
    } else {
        let mime = mime_guess::from_path(path).first_raw();
        client.assets().upload_form(file_name, mime, data).await?
    };

    print_response(&Response::ok(asset), format);
    Ok(())
}
