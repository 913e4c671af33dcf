//! SOP reference document handed to the assistant as conversation context.
//!
//! The document is produced offline from the store's PDF procedures, one record per
//! page.

use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::fs;
use tracing::{info, warn};

pub const NO_CONTEXT: &str = "No SOP data available";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SopPage {
    pub page_number: u32,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_file: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SopDocument {
    #[serde(default)]
    pub pages: Vec<SopPage>,
}

impl SopDocument {
    pub fn context(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| NO_CONTEXT.to_string())
    }
}

pub fn context_for(document: Option<&SopDocument>) -> String {
    document.map_or_else(|| NO_CONTEXT.to_string(), SopDocument::context)
}

pub async fn load_sop(path: &Path) -> Option<SopDocument> {
    match fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice::<SopDocument>(&bytes) {
            Ok(document) => {
                info!("loaded SOP document with {} pages", document.pages.len());
                Some(document)
            }
            Err(err) => {
                warn!("failed to parse SOP document {}: {err}", path.display());
                None
            }
        },
        Err(err) => {
            warn!("SOP document {} unavailable: {err}", path.display());
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_document_uses_placeholder_context() {
        assert_eq!(context_for(None), NO_CONTEXT);
    }

    #[test]
    fn document_context_is_json() {
        let document: SopDocument = serde_json::from_str(
            r#"{"pages":[{"page_number":1,"text":"Stage freight by zone.","image_file":"page_1.jpg"}]}"#,
        )
        .unwrap();
        let context = context_for(Some(&document));
        assert!(context.contains("Stage freight by zone."));
        assert!(context.starts_with(r#"{"pages":["#));
    }

    #[tokio::test]
    async fn load_sop_tolerates_missing_file() {
        let mut path = std::env::temp_dir();
        path.push(format!("productivity_pal_missing_sop_{}.json", std::process::id()));
        assert!(load_sop(&path).await.is_none());
    }
}
