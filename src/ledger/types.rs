//! Raw Ledger Record Types
//!
//! Mirrors the box shape returned by the Ergo Explorer v1 API. Fields are
//! optional so that one malformed box surfaces as a per-record decode error
//! instead of failing the whole listing.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Unspent box as listed by the explorer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawBox {
    #[serde(default)]
    pub box_id: Option<String>,

    /// Tokens held by the box; the reputation token comes first
    #[serde(default)]
    pub assets: Vec<RawAsset>,

    /// Non-mandatory registers R4..R9
    #[serde(default)]
    pub additional_registers: BTreeMap<String, RawRegister>,
}

impl RawBox {
    pub fn register(&self, id: &str) -> Option<&RawRegister> {
        self.additional_registers.get(id)
    }

    /// Rendered value of a register, if the register is present
    pub fn rendered(&self, id: &str) -> Option<&str> {
        self.register(id).and_then(|r| r.rendered_value.as_deref())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawAsset {
    #[serde(default)]
    pub token_id: Option<String>,

    /// Kept untyped: a non-numeric amount is a decode error for this box only
    #[serde(default)]
    pub amount: Option<serde_json::Value>,
}

/// Typed register value as rendered by the explorer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawRegister {
    #[serde(default)]
    pub serialized_value: Option<String>,
    #[serde(default)]
    pub sigma_type: Option<String>,
    #[serde(default)]
    pub rendered_value: Option<String>,
}

impl RawRegister {
    pub fn rendered(value: impl Into<String>) -> Self {
        Self {
            serialized_value: None,
            sigma_type: None,
            rendered_value: Some(value.into()),
        }
    }
}

/// Body of `POST /api/v1/boxes/unspent/search`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoxSearchRequest {
    pub ergo_tree_template_hash: String,
    pub registers: BTreeMap<String, String>,
    pub constants: BTreeMap<String, String>,
    pub assets: Vec<String>,
}

impl BoxSearchRequest {
    /// Search for boxes of one contract template owned by `owner_pk`
    pub fn for_owner(template_hash: &str, owner_register: &str, owner_pk: &str) -> Self {
        let mut registers = BTreeMap::new();
        registers.insert(owner_register.to_string(), owner_pk.to_string());
        Self {
            ergo_tree_template_hash: template_hash.to_string(),
            registers,
            constants: BTreeMap::new(),
            assets: Vec::new(),
        }
    }
}

/// One page of search results
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoxSearchPage {
    pub items: Vec<RawBox>,
    pub total: u64,
}
