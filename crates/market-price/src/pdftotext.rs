//! Text extraction through the poppler `pdftotext` tool.

use std::path::Path;
use tokio::process::Command;

use crate::error::ExtractError;
use crate::parse::{parse_price_list, PriceList};

pub const PDFTOTEXT_BIN: &str = "pdftotext";

/// Run `pdftotext <path> -` and return its stdout.
pub async fn pdf_to_text(path: &Path) -> Result<String, ExtractError> {
    let output = Command::new(PDFTOTEXT_BIN)
        .arg(path)
        .arg("-")
        .output()
        .await
        .map_err(|source| ExtractError::Spawn {
            path: path.to_path_buf(),
            source,
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        tracing::error!("pdftotext failed for {}: {stderr}", path.display());
        return Err(ExtractError::CommandFailed {
            path: path.to_path_buf(),
            status: output.status,
            stderr,
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Extract and parse every price entry in the document at `path`.
pub async fn extract_price_list(path: &Path) -> Result<PriceList, ExtractError> {
    tracing::info!("Extracting market prices from {}", path.display());
    let text = pdf_to_text(path).await?;
    let list = parse_price_list(&text);
    tracing::info!(
        "Parsed {} price entries ({} model headings)",
        list.prices.len(),
        list.model_headings.len()
    );
    Ok(list)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_document_fails() {
        let result = extract_price_list(Path::new("/nonexistent/price-list.pdf")).await;
        // Either the tool is absent (spawn error) or it rejects the path.
        assert!(matches!(
            result,
            Err(ExtractError::Spawn { .. }) | Err(ExtractError::CommandFailed { .. })
        ));
    }
}
