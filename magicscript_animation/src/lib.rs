// Copyright 2025 the MagicScript Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! MagicScript Animation: time driven state for UI node animations.
//!
//! Nodes never own threads or timers. The host calls a per-frame update with the elapsed time
//! in seconds, and each node advances the small state machines in this crate synchronously.
//! Suspension is "next frame", never a blocking wait.
//!
//! - [`AnimationState`]: a linear timeline with optional autoreverse and repetition. Buttons use
//!   it for the press animation and spinners for their rotation.
//! - [`ConfirmationProgress`]: a value driven forward while a long press is held and backward
//!   after release, reporting completion and cancellation exactly once.
//! - [`VisibilityFade`]: a delayed opacity fade used by scroll bars in automatic mode.
//!
//! ## Example
//!
//! ```rust
//! use magicscript_animation::{AnimationState, Tick};
//!
//! // A 0.1 s press that springs back: total run time 0.2 s.
//! let mut press = AnimationState::new(0.1).autoreversing();
//! press.start();
//! assert_eq!(press.advance(0.1), Tick::Running { progress: 1.0 });
//! assert_eq!(press.advance(0.1), Tick::Finished { progress: 0.0 });
//! assert!(!press.is_running());
//! ```
//!
//! This crate is `no_std` and has no dependencies.

#![no_std]

mod confirmation;
mod fade;
mod timeline;

pub use confirmation::{ConfirmationOutcome, ConfirmationProgress, ConfirmationStep};
pub use fade::VisibilityFade;
pub use timeline::{AnimationState, Tick};
