//! Interpretive inference over collected OSINT signals.
//!
//! Every surface of a [`SignalProfile`](signalscope_core::SignalProfile) is
//! classified into a [`SignalInference`] with a hedged strategic reading, and
//! the seven readings are folded into a single posture paragraph. Absence of
//! data is an expected input, never an error: it is translated into a
//! plausible business explanation instead of a "missing" marker.

pub mod engine;
pub mod posture;
pub mod types;

pub use engine::InferenceEngine;
pub use posture::{synthesize_posture, PostureProfile, POSTURE_MARKER};
pub use types::{InferredProfile, SignalInference};
