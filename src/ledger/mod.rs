//! Ledger Record Sources
//!
//! Supplies the raw boxes that the proof pipeline decodes. The source is
//! chosen once at startup from [`SourceMode`]:
//!
//! ```text
//! ┌─────────────────┐
//! │ SourceMode      │
//! └────────┬────────┘
//!          │ build_record_source
//!          ▼
//! ┌─────────────────┐     ┌─────────────────┐
//! │ ExplorerClient  │ or  │ DemoRecordSource│
//! │ (Ergo explorer) │     │ (random boxes)  │
//! └────────┬────────┘     └────────┬────────┘
//!          └──────────┬────────────┘
//!                     ▼
//!           Arc<dyn RawRecordSource>
//! ```

pub mod demo;
pub mod explorer;
pub mod types;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::error::QueryResult;

pub use demo::{DemoRecordSource, StaticRecordSource};
pub use explorer::{ExplorerClient, ExplorerConfig, REPUTATION_PROOF_TEMPLATE_HASH};
pub use types::{BoxSearchPage, BoxSearchRequest, RawAsset, RawBox, RawRegister};

/// Anything that can list the unspent proof boxes of an owner
#[async_trait]
pub trait RawRecordSource: Send + Sync {
    /// Either the complete listing or a [`QueryError`](crate::error::QueryError);
    /// never a partial one.
    async fn fetch(&self, owner_pk: &str) -> QueryResult<Vec<RawBox>>;
}

/// Where raw records come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceMode {
    #[default]
    Explorer,
    Demo,
}

impl FromStr for SourceMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "explorer" => Ok(Self::Explorer),
            "demo" => Ok(Self::Demo),
            other => Err(format!("unknown source mode '{}' (expected explorer or demo)", other)),
        }
    }
}

impl fmt::Display for SourceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Explorer => write!(f, "explorer"),
            Self::Demo => write!(f, "demo"),
        }
    }
}

/// Build the record source selected by configuration
pub fn build_record_source(
    config: &crate::config::ProofsConfig,
) -> QueryResult<Arc<dyn RawRecordSource>> {
    let source: Arc<dyn RawRecordSource> = match config.source.mode {
        SourceMode::Explorer => Arc::new(ExplorerClient::new(
            config.explorer.clone(),
            config.registers.owner_register.clone(),
        )?),
        SourceMode::Demo => Arc::new(DemoRecordSource::new(
            config.source.demo_records,
            config.registers.clone(),
        )),
    };
    Ok(source)
}
