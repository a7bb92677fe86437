//! Seam between the HTTP surface and whatever produces curves.

use crate::error::BridgeError;
use crate::gemini::GeminiClient;
use curvesketch_core::GeneratedCurve;
use std::future::Future;
use std::pin::Pin;

/// Boxed future type alias for object-safe async trait methods.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Turns a prompt into curve geometry.
pub trait CurveGenerator: Send + Sync {
    fn generate<'a>(&'a self, prompt: &'a str) -> BoxFuture<'a, Result<GeneratedCurve, BridgeError>>;
}

impl CurveGenerator for GeminiClient {
    fn generate<'a>(&'a self, prompt: &'a str) -> BoxFuture<'a, Result<GeneratedCurve, BridgeError>> {
        Box::pin(self.generate_curve(prompt))
    }
}
