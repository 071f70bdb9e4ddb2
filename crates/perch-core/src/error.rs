#![allow(non_snake_case)]
use crate::View;
use std::panic::{AssertUnwindSafe, catch_unwind};

pub struct ErrorInfo {
    pub message: String,
}

/// Composes `content`, substituting `fallback` if it panics. Keeps a broken
/// subtree from taking down the whole composition.
pub fn ErrorBoundary(
    fallback: impl Fn(ErrorInfo) -> View + 'static,
    content: impl Fn() -> View + 'static,
) -> View {
    match catch_unwind(AssertUnwindSafe(&content)) {
        Ok(view) => view,
        Err(err) => {
            let message = if let Some(s) = err.downcast_ref::<String>() {
                s.clone()
            } else if let Some(s) = err.downcast_ref::<&str>() {
                s.to_string()
            } else {
                "Unknown panic".to_string()
            };
            log::error!("composition panicked: {message}");

            fallback(ErrorInfo { message })
        }
    }
}
