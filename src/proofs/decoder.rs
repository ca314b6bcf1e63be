//! Raw box to [`ReputationProof`] decoding.
//!
//! The reputation token is the first asset of the box; its amount is the
//! proof's total. Everything else is read from registers according to a
//! [`RegisterLayout`].

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::model::ReputationProof;
use crate::error::DecodeError;
use crate::ledger::{RawBox, RawRegister};

/// Serialized form of an empty `Coll[Byte]` constant
const EMPTY_BYTE_COLL: &str = "0e00";

/// Which registers carry which proof fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterLayout {
    /// Owner public key
    pub owner_register: String,
    /// Amount already expended (`SLong`)
    pub expended_register: String,
    /// Any of these set marks the proof as assigned to a task
    pub assignment_registers: Vec<String>,
}

impl Default for RegisterLayout {
    fn default() -> Self {
        Self {
            owner_register: "R4".to_string(),
            expended_register: "R7".to_string(),
            assignment_registers: vec!["R5".to_string(), "R6".to_string()],
        }
    }
}

impl RegisterLayout {
    /// Register ids must be R4..R9 and each may serve one purpose only
    pub fn validate(&self) -> anyhow::Result<()> {
        let mut seen: Vec<&str> = Vec::new();
        let all = [&self.owner_register, &self.expended_register]
            .into_iter()
            .chain(self.assignment_registers.iter());

        for id in all {
            if !is_additional_register(id) {
                return Err(anyhow::anyhow!(
                    "Register {} is not an additional register (expected R4..R9)",
                    id
                ));
            }
            if seen.contains(&id.as_str()) {
                return Err(anyhow::anyhow!("Register {} is assigned more than one role", id));
            }
            seen.push(id.as_str());
        }

        Ok(())
    }
}

fn is_additional_register(id: &str) -> bool {
    matches!(id, "R4" | "R5" | "R6" | "R7" | "R8" | "R9")
}

#[derive(Debug, Clone, Default)]
pub struct ProofDecoder {
    layout: RegisterLayout,
}

impl ProofDecoder {
    pub fn new(layout: RegisterLayout) -> Self {
        Self { layout }
    }

    pub fn layout(&self) -> &RegisterLayout {
        &self.layout
    }

    /// Decode one box listed for `owner_pk`
    pub fn decode(&self, raw: &RawBox, owner_pk: &str) -> Result<ReputationProof, DecodeError> {
        let box_id = non_empty(raw.box_id.as_deref()).ok_or(DecodeError::MissingField("box_id"))?;

        let token = raw.assets.first().ok_or(DecodeError::MissingField("token_id"))?;
        let token_id =
            non_empty(token.token_id.as_deref()).ok_or(DecodeError::MissingField("token_id"))?;
        let total_amount = token
            .amount
            .as_ref()
            .ok_or(DecodeError::MissingField("total_amount"))
            .and_then(|v| amount_from_json("total_amount", v))?;

        let owner = raw
            .rendered(&self.layout.owner_register)
            .ok_or(DecodeError::MissingField("owner_pk"))?;
        if owner != owner_pk {
            return Err(DecodeError::OwnerMismatch {
                expected: owner_pk.to_string(),
                found: owner.to_string(),
            });
        }

        let expended_amount = raw
            .rendered(&self.layout.expended_register)
            .ok_or(DecodeError::MissingField("expended_amount"))
            .and_then(|v| parse_amount("expended_amount", v))?;

        let has_assignment = self
            .layout
            .assignment_registers
            .iter()
            .filter_map(|id| raw.register(id))
            .any(is_marker_set);

        ReputationProof::new(
            box_id,
            token_id,
            owner,
            total_amount,
            expended_amount,
            has_assignment,
        )
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Assignment markers are written as empty byte collections while unassigned
fn is_marker_set(register: &RawRegister) -> bool {
    match register.rendered_value.as_deref() {
        Some(rendered) => !rendered.trim().is_empty(),
        None => register
            .serialized_value
            .as_deref()
            .map(str::trim)
            .is_some_and(|s| !s.is_empty() && s != EMPTY_BYTE_COLL),
    }
}

fn amount_from_json(field: &'static str, value: &Value) -> Result<u64, DecodeError> {
    match value {
        Value::Number(n) => n.as_u64().ok_or_else(|| DecodeError::NotANumber {
            field,
            value: n.to_string(),
        }),
        Value::String(s) => parse_amount(field, s),
        other => Err(DecodeError::NotANumber {
            field,
            value: other.to_string(),
        }),
    }
}

fn parse_amount(field: &'static str, value: &str) -> Result<u64, DecodeError> {
    value.trim().parse().map_err(|_| DecodeError::NotANumber {
        field,
        value: value.to_string(),
    })
}
