// Copyright 2025 the MagicScript Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Reasons a whole property document is rejected.
///
/// Individual malformed properties are never errors; see the crate docs.
#[derive(Debug, thiserror::Error)]
pub enum PropsError {
    /// The text is not valid JSON.
    #[error("property document is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// The document parsed, but its root is not an object.
    #[error("property document must be a JSON object, found {found}")]
    NotAnObject {
        /// JSON kind of the root value.
        found: &'static str,
    },
}
