//! Attribute pre-processing applied to every call on an [`crate::Element`].
//!
//! A [`Pipeline`] is an ordered list of [`PreProcessor`] stages. Each stage is a
//! pure function from one [`Invocation`] to the next; the output of a stage is the
//! input of the one after it.

use std::fmt;

use bumpalo::collections::String as BumpString;

use crate::{util::kebab_case, Invocation};

/// A single pre-processing stage.
pub type PreProcessor = for<'b> fn(Invocation<'b>) -> Invocation<'b>;

/// The stages used by [`crate::Dom::new`]: keyword conflicts are resolved
/// before `hx` attributes are kebab-cased.
pub const DEFAULT_PIPELINE: &[PreProcessor] =
    &[resolve_keyword_conflicts, kebab_case_hx_attributes];

/// Rust keywords, including reserved and edition-specific ones.
///
/// These are the names that can't be used as bare identifiers for named
/// attributes in `domx!`.
pub const KEYWORDS: &[&str] = &[
    "abstract", "as", "async", "await", "become", "box", "break", "const", "continue", "crate",
    "do", "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "gen", "if", "impl",
    "in", "let", "loop", "macro", "match", "mod", "move", "mut", "override", "priv", "pub",
    "ref", "return", "self", "Self", "static", "struct", "super", "trait", "true", "try",
    "type", "typeof", "unsafe", "unsized", "use", "virtual", "where", "while", "yield",
];

/// An ordered, immutable list of pre-processing stages.
#[derive(Clone, Copy)]
pub struct Pipeline<'a> {
    stages: &'a [PreProcessor],
}
impl<'a> Pipeline<'a> {
    /// Create a pipeline from a list of stages.
    pub const fn new(stages: &'a [PreProcessor]) -> Self {
        Self { stages }
    }

    /// The stages, in the order they are applied.
    pub fn stages(&self) -> &'a [PreProcessor] {
        self.stages
    }

    /// Run an invocation through every stage in order.
    pub fn run<'bump>(&self, invocation: Invocation<'bump>) -> Invocation<'bump> {
        self.stages
            .iter()
            .fold(invocation, |invocation, stage| stage(invocation))
    }
}
impl Default for Pipeline<'_> {
    fn default() -> Self {
        Self::new(DEFAULT_PIPELINE)
    }
}
impl fmt::Debug for Pipeline<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
            .field("stages", &self.stages.len())
            .finish()
    }
}

/// Strip the escaping from attribute names that would otherwise be Rust keywords.
///
/// `type_` becomes `type` (only when the prefix is a keyword) and raw
/// identifiers like `r#type` lose their `r#`. Other names pass through.
pub fn resolve_keyword_conflicts(invocation: Invocation<'_>) -> Invocation<'_> {
    invocation.rename_attributes(|bump, key| {
        if let Some(name) = key.strip_prefix("r#") {
            return Some(BumpString::from_str_in(name, bump));
        }
        key.strip_suffix('_')
            .filter(|name| KEYWORDS.contains(name))
            .map(|name| BumpString::from_str_in(name, bump))
    })
}

/// Kebab-case attribute names that start with `hx`.
///
/// `hxPushUrl` and `hx_push_url` both become `hx-push-url`.
pub fn kebab_case_hx_attributes(invocation: Invocation<'_>) -> Invocation<'_> {
    invocation.rename_attributes(|bump, key| key.starts_with("hx").then(|| kebab_case(bump, key)))
}
