//! curvesketch Bridge
//!
//! The host side of the prompt-to-curve call. The sketching front end posts a
//! prompt to this process over a local HTTP endpoint; the bridge forwards it to
//! a generative-language API, pulls the JSON geometry out of the reply and
//! returns it.
//!
//! ## Protocol
//!
//! ```text
//! POST /ai/generate-curve   { "prompt": "a spiral staircase" }
//! 200 OK                    { "anchors": [{ "x", "y", "z" }], "controls": [{ "cp1", "cp2" }] }
//! 4xx/5xx                   { "error": "..." }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod gemini;
pub mod generator;
pub mod server;

pub use client::{BridgeClient, ClientError};
pub use config::BridgeConfig;
pub use error::{BridgeError, ErrorBody};
pub use gemini::GeminiClient;
pub use generator::{BoxFuture, CurveGenerator};
pub use server::{GENERATE_CURVE_ROUTE, GenerateCurveRequest, router};
