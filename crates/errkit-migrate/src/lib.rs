//! Line-oriented migration of `github.com/pkg/errors` call sites to
//! `github.com/kanisterio/errkit`.
//!
//! ```text
//! errors.Wrapf(err, "Failed to get PVC %s", pvcName)
//!   => errkit.Wrap(err, "Failed to get PVC", "PVC", pvcName)
//! ```
//!
//! The pipeline per line is: [`syntax`] finds the first legacy call and
//! splits its arguments, [`handlers`] picks a renderer by function name,
//! and the [`matchers`] cascade turns formatted messages into labeled
//! values using [`naming`] to guess labels. [`migrate`] drives the rules over
//! whole files.

pub mod config;
pub mod conversions;
pub mod error;
pub mod handlers;
pub mod matchers;
pub mod migrate;
pub mod naming;
pub mod rewrite;
pub mod rule;
pub mod sanitize;
pub mod syntax;
pub mod utils;

pub use config::{ConfigError, MigrateConfig, Strictness};
pub use error::{ParseError, ParseResult};
pub use migrate::{Migration, ReviewPolicy, migrate_source};
pub use rewrite::CallRewriter;
pub use rule::{LineOutcome, ReviewReason, Rule, RuleRegistry};
