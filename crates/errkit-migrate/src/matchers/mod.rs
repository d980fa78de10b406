//! The matcher cascade.
//!
//! Each matcher recognizes one message shape and turns a formatted message
//! plus positional values into a plain message and labeled values:
//!
//! ```text
//! "Failed to get PV %s", pvName   =>   "Failed to get PV", "PV", pvName
//! ```
//!
//! Matchers are tried in a fixed order, most specific first; the first one
//! that produces a [`Rewrite`] wins. A matcher that is not certain declines
//! by returning `None`.

mod braced;
mod labeled;
mod separated;
mod single;
mod single_append;
pub mod template;

pub use braced::BracedPairMatcher;
pub use labeled::LabeledPairMatcher;
pub use separated::SeparatedPairMatcher;
pub use single::SinglePlaceholderMatcher;
pub use single_append::SingleAppendMatcher;

use crate::sanitize::sanitize_message;

/// One labeled value in the rewritten argument list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub label: String,
    /// Raw expression, copied verbatim from the original call.
    pub value: String,
}

/// A successful match: the static message and its labeled values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewrite {
    /// Message text without surrounding quotes.
    pub message: String,
    pub fields: Vec<Field>,
}

impl Rewrite {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            fields: Vec::new(),
        }
    }

    pub fn field(mut self, label: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push(Field {
            label: label.into(),
            value: value.into(),
        });
        self
    }

    /// Render as call arguments: `"message", "label1", value1, ...`.
    ///
    /// The message goes through whitespace sanitization; values are left
    /// exactly as written.
    pub fn into_args(self) -> Vec<String> {
        let mut args = Vec::with_capacity(1 + 2 * self.fields.len());
        args.push(format!("\"{}\"", sanitize_message(&self.message)));
        for field in self.fields {
            args.push(format!("\"{}\"", field.label));
            args.push(field.value);
        }
        args
    }
}

/// A single message-shape recognizer.
pub trait Matcher: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    /// Exact number of arguments (message plus values) the shape takes.
    fn arity(&self) -> usize;

    /// Match against arguments already known to have the declared arity.
    fn match_shape(&self, args: &[&str]) -> Option<Rewrite>;

    /// Check the arity, then try the shape.
    fn try_match(&self, args: &[&str]) -> Option<Rewrite> {
        if args.len() != self.arity() {
            return None;
        }
        self.match_shape(args)
    }
}

/// An ordered list of matchers.
pub struct Cascade {
    matchers: Vec<Box<dyn Matcher>>,
}

impl Cascade {
    pub fn new(matchers: Vec<Box<dyn Matcher>>) -> Self {
        Self { matchers }
    }

    /// No matchers: every input declines.
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Only the `"msg:" + value` shape, for calls that take a plain message.
    pub fn append_only() -> Self {
        Self::new(vec![Box::new(SingleAppendMatcher)])
    }

    /// Every shape, in priority order.
    pub fn full() -> Self {
        Self::new(vec![
            Box::new(SingleAppendMatcher),
            Box::new(SinglePlaceholderMatcher),
            Box::new(BracedPairMatcher),
            Box::new(SeparatedPairMatcher),
            Box::new(LabeledPairMatcher),
        ])
    }

    /// Run the matchers in order and return the first rewrite.
    pub fn run(&self, args: &[&str]) -> Option<Rewrite> {
        for matcher in &self.matchers {
            if let Some(rewrite) = matcher.try_match(args) {
                tracing::debug!(matcher = matcher.name(), "Matcher accepted arguments");
                return Some(rewrite);
            }
        }
        tracing::debug!(args = args.len(), "No matcher accepted arguments");
        None
    }

    /// Matcher names in priority order.
    pub fn names(&self) -> Vec<&'static str> {
        self.matchers.iter().map(|m| m.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.matchers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matchers.is_empty()
    }
}
