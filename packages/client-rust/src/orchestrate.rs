//! Multi-step operations.
//!
//! A [`Chain`] sequences dependent remote calls into one [`Call`]. Step `k+1`
//! is built from step `k`'s value and only issued after step `k` produced a
//! successful envelope:
//!
//! - a failed step resolves the whole operation with that step's error code
//!   and the final type's empty value; later steps are never issued,
//! - a step may finish early with [`Step::Resolve`], e.g. with `None` when a
//!   fetched record turned out to be absent. That is a success.
//!
//! The resulting call's [`entry_method`](Call::entry_method) names the first
//! step only. Callers cannot cancel or track the later steps.

use nimbus_core::Envelope;

use crate::call::{Call, EnvelopeFuture};

/// What to do after a successful step.
pub enum Step<U> {
    /// Issue another remote call and use its envelope.
    Issue(Call<U>),
    /// Finish with this value without another call.
    Resolve(U),
}

/// A sequence of dependent remote calls under construction.
#[must_use = "a chain does nothing until finished and awaited"]
pub struct Chain<T> {
    entry: &'static str,
    future: EnvelopeFuture<T>,
    steps: usize,
}

impl<T: Send + 'static> Chain<T> {
    /// Begin with the entry call.
    pub fn start(call: Call<T>) -> Self {
        let (entry, future) = call.into_parts();
        Self {
            entry,
            future,
            steps: 1,
        }
    }

    /// Append a step built from the previous step's value.
    pub fn then<U, F>(self, next: F) -> Chain<U>
    where
        U: Default + Send + 'static,
        F: FnOnce(T) -> Step<U> + Send + 'static,
    {
        let Self {
            entry,
            future,
            steps,
        } = self;

        let future: EnvelopeFuture<U> = Box::pin(async move {
            let (value, code) = future.await.into_parts();
            if !code.is_none() {
                tracing::debug!(
                    entry,
                    completed_steps = steps - 1,
                    code = %code,
                    "orchestration short-circuited"
                );
                return Envelope::failure(code);
            }
            match next(value) {
                Step::Issue(call) => call.envelope().await,
                Step::Resolve(value) => Envelope::success(value),
            }
        });

        Chain {
            entry,
            future,
            steps: steps + 1,
        }
    }

    /// Turn the chain into a single call.
    pub fn finish(self) -> Call<T> {
        Call::from_boxed(self.entry, self.future)
    }
}
