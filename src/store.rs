/// Record store client: the remote service that owns the saved tabs.
/// Transport lives in the page shim; this module owns the typed boundary.

use serde::de::DeserializeOwned;
use thiserror::Error;
use wasm_bindgen::prelude::*;

use crate::record::{RecordDelta, RecordPatch, TabRecord, UpdateRequest};

// Import JS bridge functions
#[wasm_bindgen(module = "/tabs.js")]
extern "C" {
    #[wasm_bindgen(catch)]
    async fn fetchRecords() -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn updateRecords(body: JsValue) -> Result<JsValue, JsValue>;
}

/// Full list retrieval failed; the page shows this instead of the list
#[derive(Debug, Clone, PartialEq, Error)]
#[error("failed to fetch saved tabs: {0}")]
pub struct FetchError(pub String);

/// A mutation round-trip failed; state does not advance for those ids
#[derive(Debug, Clone, PartialEq, Error)]
#[error("failed to update saved tabs: {0}")]
pub struct MutationError(pub String);

pub async fn fetch_all() -> Result<Vec<TabRecord>, FetchError> {
    let records = fetchRecords()
        .await
        .map_err(|err| FetchError(format!("{:?}", err)))?;

    parse(records).map_err(FetchError)
}

/// Apply a partial update to every record in `ids` and return the store's
/// view of the records it touched
pub async fn apply_update(
    ids: Vec<String>,
    patch: RecordPatch,
) -> Result<Vec<RecordDelta>, MutationError> {
    let request = UpdateRequest { ids, update: patch };
    let body = serde_wasm_bindgen::to_value(&request)
        .map_err(|err| MutationError(format!("failed to serialize request: {}", err)))?;

    let updated = updateRecords(body)
        .await
        .map_err(|err| MutationError(format!("{:?}", err)))?;

    parse(updated).map_err(MutationError)
}

fn parse<T: DeserializeOwned>(value: JsValue) -> Result<T, String> {
    serde_wasm_bindgen::from_value(value).map_err(|err| format!("failed to parse response: {}", err))
}
