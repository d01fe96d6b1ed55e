use serde::{Deserialize, Serialize};

use crate::capabilities::HttpError;
use crate::error::CatalogError;

/// One product as served by the remote catalog. Unknown fields are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogRecord {
    pub id: u64,
    pub title: String,
    pub category: String,
    pub price: f64,
    #[serde(rename = "image")]
    pub image_url: String,
}

impl CatalogRecord {
    #[must_use]
    pub fn price_text(&self) -> String {
        format!("${:.2}", self.price)
    }
}

/// Turns a finished catalog request into records.
pub fn decode_catalog(
    result: crux_http::Result<crux_http::Response<Vec<CatalogRecord>>>,
) -> Result<Vec<CatalogRecord>, CatalogError> {
    let mut response = result.map_err(|e| HttpError::Transport {
        message: e.to_string(),
    })?;
    let status = response.status();
    if !status.is_success() {
        return Err(HttpError::Status {
            status: u16::from(status),
        }
        .into());
    }
    response.take_body().ok_or(CatalogError::Http(HttpError::EmptyBody))
}
