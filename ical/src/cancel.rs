// SPDX-FileCopyrightText: 2026 The Calyx Developers
//
// SPDX-License-Identifier: Apache-2.0

//! Cooperative cancellation shared between the tokenizer and the parser.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// A cloneable flag that asks a running parse to stop.
///
/// All clones observe the same flag. The parser checks it before every
/// token it consumes, and the tokenizer checks it before every logical line,
/// so cancellation takes effect at the next token boundary.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    /// Create a token that has not been cancelled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Signal cancellation to every holder of this token.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    /// Whether [`cancel`](Self::cancel) has been called on any clone.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}
