// Copyright 2025 the MagicScript Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! MagicScript Props: the property-bag boundary between the scripting layer and UI nodes.
//!
//! Scripts describe node state as loosely typed key/value documents. Nodes consume them through
//! [`Props`], whose accessors are deliberately tolerant:
//!
//! - an absent key yields `None`;
//! - a key holding a value of the wrong shape yields `None`;
//! - an enum token that is not in the lookup table yields `None` (logged at debug level).
//!
//! Nodes only assign a field when its accessor returns `Some`, so a malformed property leaves
//! the previous value in place and never surfaces an error. Only the document itself can be
//! rejected (see [`PropsError`]).
//!
//! ## Example
//!
//! ```rust
//! use magicscript_math::Alignment;
//! use magicscript_props::Props;
//!
//! let props = Props::from_json_str(
//!     r#"{ "roundness": 2.75, "alignment": "center-left", "localPosition": [0, 1] }"#,
//! )
//! .unwrap();
//! assert_eq!(props.number("roundness"), Some(2.75));
//! assert_eq!(props.token::<Alignment>("alignment"), Some(Alignment::CenterLeft));
//! // Wrong arity: ignored rather than reported.
//! assert_eq!(props.vec3("localPosition"), None);
//! ```

mod bag;
mod color;
mod error;
mod token;

pub use bag::Props;
pub use color::Color;
pub use error::PropsError;
pub use token::Token;
