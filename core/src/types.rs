//! Handle record DTOs.
//!
//! # Design
//! These types mirror the JSON the handle server accepts on `PUT`. They are
//! defined independently from the mock-server crate; integration tests catch
//! any schema drift between the two.

use serde::{Deserialize, Serialize};

/// One typed value attached to a handle.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HandleEntry {
    /// Position of the entry, starting at 1 and unique within a document.
    pub index: u32,
    #[serde(rename = "type")]
    pub entry_type: String,
    pub data: String,
}

/// A handle together with its entries, as sent on create/update.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HandleDocument {
    pub handle: String,
    #[serde(default)]
    pub values: Vec<HandleEntry>,
}

impl HandleDocument {
    pub fn new(handle: impl Into<String>, values: Vec<HandleEntry>) -> Self {
        Self {
            handle: handle.into(),
            values,
        }
    }
}
