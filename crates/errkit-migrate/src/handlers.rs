//! Handler dispatch: from a legacy function name to the text of the new call.

use crate::config::{MigrateConfig, Strictness};
use crate::matchers::Cascade;

/// Which function of the target API a handler emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandlerFamily {
    /// `Wrap(err, message, fields...)`: the first argument is the error value.
    Wrap,
    /// `New(message, fields...)`.
    New,
}

impl HandlerFamily {
    pub fn target_function(self) -> &'static str {
        match self {
            HandlerFamily::Wrap => "Wrap",
            HandlerFamily::New => "New",
        }
    }
}

/// Settings that shape the rendered call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderContext {
    pub target_namespace: String,
    pub format_call: String,
    pub strictness: Strictness,
}

impl RenderContext {
    pub fn from_config(config: &MigrateConfig) -> Self {
        Self {
            target_namespace: config.target_namespace.clone(),
            format_call: config.format_call.clone(),
            strictness: config.strictness,
        }
    }

    fn call(&self, family: HandlerFamily, args: &[String]) -> String {
        format!(
            "{}.{}({})",
            self.target_namespace,
            family.target_function(),
            args.join(", ")
        )
    }

    fn formatted(&self, args: &[&str]) -> String {
        format!("{}({})", self.format_call, args.join(", "))
    }
}

/// Renders one legacy function.
pub struct Handler {
    family: HandlerFamily,
    cascade: Cascade,
}

impl Handler {
    pub fn new(family: HandlerFamily, cascade: Cascade) -> Self {
        Self { family, cascade }
    }

    pub fn family(&self) -> HandlerFamily {
        self.family
    }

    /// Compose the replacement call from the legacy arguments.
    ///
    /// Returns `None` when the call must be migrated by hand.
    pub fn render(&self, args: &[&str], ctx: &RenderContext) -> Option<String> {
        match self.family {
            HandlerFamily::Wrap => self.render_wrap(args, ctx),
            HandlerFamily::New => self.render_new(args, ctx),
        }
    }

    fn render_wrap(&self, args: &[&str], ctx: &RenderContext) -> Option<String> {
        let (err, rest) = args.split_first()?;

        let mut out = vec![err.to_string()];
        if let Some(rewrite) = self.cascade.run(rest) {
            out.extend(rewrite.into_args());
        } else if rest.len() <= 1 {
            out.extend(rest.iter().map(|a| a.to_string()));
        } else {
            match ctx.strictness {
                Strictness::Strict => return None,
                Strictness::Lenient => out.push(ctx.formatted(rest)),
            }
        }

        Some(ctx.call(HandlerFamily::Wrap, &out))
    }

    fn render_new(&self, args: &[&str], ctx: &RenderContext) -> Option<String> {
        if args.is_empty() {
            return None;
        }

        let out = if let Some(rewrite) = self.cascade.run(args) {
            rewrite.into_args()
        } else if args.len() == 1 {
            vec![args[0].to_string()]
        } else {
            vec![ctx.formatted(args)]
        };

        Some(ctx.call(HandlerFamily::New, &out))
    }
}

/// Legacy function name to handler, in lookup order.
pub struct HandlerMap {
    handlers: Vec<(&'static str, Handler)>,
}

impl Default for HandlerMap {
    fn default() -> Self {
        Self {
            handlers: vec![
                ("Wrap", Handler::new(HandlerFamily::Wrap, Cascade::full())),
                ("Wrapf", Handler::new(HandlerFamily::Wrap, Cascade::full())),
                ("Errorf", Handler::new(HandlerFamily::New, Cascade::full())),
                ("New", Handler::new(HandlerFamily::New, Cascade::append_only())),
            ],
        }
    }
}

impl HandlerMap {
    pub fn get(&self, function: &str) -> Option<&Handler> {
        self.handlers
            .iter()
            .find(|(name, _)| *name == function)
            .map(|(_, handler)| handler)
    }

    /// Supported legacy function names.
    pub fn names(&self) -> Vec<&'static str> {
        self.handlers.iter().map(|(name, _)| *name).collect()
    }
}
