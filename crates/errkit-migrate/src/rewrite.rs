//! One pass of the call rewrite over a single line.

use crate::config::MigrateConfig;
use crate::handlers::{HandlerMap, RenderContext};
use crate::rule::{LineOutcome, ReviewReason};
use crate::syntax::{Call, locate_invocation};

/// Locates the first legacy call on a line and replaces it.
pub struct CallRewriter {
    legacy_prefix: String,
    handlers: HandlerMap,
    context: RenderContext,
}

impl CallRewriter {
    pub fn new(config: &MigrateConfig) -> Self {
        Self {
            legacy_prefix: config.legacy_prefix(),
            handlers: HandlerMap::default(),
            context: RenderContext::from_config(config),
        }
    }

    pub fn legacy_prefix(&self) -> &str {
        &self.legacy_prefix
    }

    /// Rewrite the first legacy call on `line`.
    ///
    /// Prefix and suffix around the call are kept byte for byte.
    pub fn rewrite_line(&self, line: &str) -> LineOutcome {
        let invocation = match locate_invocation(line, &self.legacy_prefix) {
            Ok(Some(invocation)) => invocation,
            Ok(None) => return LineOutcome::Untouched,
            Err(err) => return LineOutcome::Malformed(err),
        };

        let call = match Call::from_invocation(&invocation) {
            Ok(call) => call,
            Err(err) => return LineOutcome::Malformed(err),
        };

        let Some(handler) = self.handlers.get(call.function) else {
            tracing::debug!(function = call.function, "No handler for legacy call");
            return LineOutcome::NeedsReview(ReviewReason::UnknownCallee(call.function.to_string()));
        };

        match handler.render(&call.args, &self.context) {
            Some(replacement) => LineOutcome::Rewritten(format!(
                "{}{}{}",
                invocation.prefix(line),
                replacement,
                invocation.suffix(line)
            )),
            None => {
                tracing::debug!(function = call.function, args = call.args.len(), "Handler declined call");
                LineOutcome::NeedsReview(ReviewReason::Declined(call.function.to_string()))
            }
        }
    }
}
