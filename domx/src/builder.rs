//! Implements the tree factory for creating HTML elements through a series of methods.

use bumpalo::Bump;

use crate::{Attribute, Element, IntoAttribute, Pipeline, PreProcessor, Raw, Seq};

/// A factory for [`Element`]s, bound to a bump allocator and a [`Pipeline`].
///
/// The factory holds no per-tree state: it is `Copy` and can be reused for any
/// number of unrelated trees.
///
/// # Example
///
/// ```
/// use domx::{bumpalo::Bump, Dom};
///
/// let bump = Bump::new();
/// let dom = Dom::new(&bump);
/// let page = dom.div().attrs([("class", "container")])?.content((
///     dom.h1().content("Hello, World!")?,
///     dom.button().attrs([("hxPost", "/clicked")])?.content("Click")?,
/// ))?;
/// assert_eq!(
///     page.to_string(),
///     r#"<div class="container"><h1>Hello, World!</h1><button hx-post="/clicked">Click</button></div>"#
/// );
/// # Ok::<(), domx::DomError>(())
/// ```
///
/// A `Dom` borrows its arena, which is not `Sync`, so it cannot be shared
/// between threads. Give each thread its own `Bump` and `Dom`; the
/// [`Pipeline`] they use can be shared.
#[derive(Clone, Copy, Debug)]
pub struct Dom<'bump> {
    bump: &'bump Bump,
    pipeline: Pipeline<'bump>,
}
impl<'bump> Dom<'bump> {
    /// Create a factory using the default pipeline.
    pub fn new(bump: &'bump Bump) -> Self {
        Self::with_pipeline(bump, crate::DEFAULT_PIPELINE)
    }

    /// Create a factory using the given pre-processing stages.
    pub fn with_pipeline(bump: &'bump Bump, stages: &'bump [PreProcessor]) -> Self {
        Self {
            bump,
            pipeline: Pipeline::new(stages),
        }
    }

    /// Get a reference to the bump allocator.
    pub fn bump(&self) -> &'bump Bump {
        self.bump
    }

    /// Get the pipeline every element from this factory runs its calls through.
    pub fn pipeline(&self) -> Pipeline<'bump> {
        self.pipeline
    }

    /// Create an element with an arbitrary tag name.
    ///
    /// # Errors
    ///
    /// [`crate::DomError::BadTagName`] if the name is reserved (starts and ends
    /// with `__`).
    pub fn tag(&self, name: &str) -> Result<Element<'bump>, crate::DomError> {
        if name.starts_with("__") && name.ends_with("__") {
            tracing::debug!(tag = name, "rejected reserved tag name");
            return Err(crate::DomError::BadTagName(name.to_string()));
        }
        Ok(self.element(name))
    }

    fn element(&self, name: &str) -> Element<'bump> {
        Element::new(self.bump, name, self.pipeline)
    }

    /// Create raw HTML content that is written without escaping.
    pub fn raw(&self, html: &str) -> Raw<'bump> {
        Raw::new(self.bump, html)
    }

    /// Create an attribute from a value that implements [IntoAttribute].
    pub fn attr(&self, value: impl IntoAttribute<'bump>) -> Attribute<'bump> {
        value.into_attribute(self.bump)
    }

    /// Mark an iterable as a lazily flattened sequence of content.
    ///
    /// This is a convenience wrapper around [`crate::seq`].
    pub fn seq<I: IntoIterator>(&self, iter: I) -> Seq<I::IntoIter> {
        crate::seq(iter)
    }
}

macro_rules! non_void_builders {
    ($($tag_ident:ident),*) => {
        impl<'bump> Dom<'bump> {
            $(
                #[doc = concat!("Create a `", stringify!($tag_ident), "` element.")]
                pub fn $tag_ident(&self) -> Element<'bump> {
                    self.element(stringify!($tag_ident))
                }
            )*
        }
        /// A list of all non-void tags with a dedicated builder.
        pub const NON_VOID_TAGS: &[&str] = &[$(stringify!($tag_ident)),*];
    };
}
non_void_builders! {
    html, head, body, title, style, script, noscript, template,
    main, header, footer, nav, section, article, aside, div, span, p,
    h1, h2, h3, h4, h5, h6, a, em, strong, small, code, pre, blockquote,
    ol, ul, li, dl, dt, dd, table, caption, colgroup, thead, tbody, tfoot, tr, td, th,
    form, label, button, select, option, textarea, fieldset, legend,
    iframe, video, audio, canvas, svg, sup, sub, q, s, time, details, summary, dialog
}

macro_rules! void_builders {
    ($($tag_ident:ident),*) => {
        impl<'bump> Dom<'bump> {
            $(
                #[doc = concat!("Create a void `", stringify!($tag_ident), "` element.")]
                pub fn $tag_ident(&self) -> Element<'bump> {
                    self.element(stringify!($tag_ident))
                }
            )*
        }
        /// The tags that never have content and always self-close.
        pub const VOID_TAGS: &[&str] = &[$(stringify!($tag_ident)),*];
    };
}
void_builders! {
    area, img, wbr, command, link, meta, embed,
    param, source, br, track, input, col, base, hr
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DomError;

    #[test]
    fn reserved_names_are_rejected() {
        let bump = Bump::new();
        let dom = Dom::new(&bump);
        assert_eq!(
            dom.tag("__init__").unwrap_err(),
            DomError::BadTagName("__init__".to_string())
        );
        assert!(dom.tag("__x").is_ok());
        assert!(dom.tag("custom-element").is_ok());
    }

    #[test]
    fn factory_output_is_independent() {
        let bump = Bump::new();
        let dom = Dom::new(&bump);
        let first = dom.div().content("a").unwrap();
        let second = dom.div();
        assert_eq!(first.to_string(), "<div>a</div>");
        assert_eq!(second.to_string(), "<div></div>");
    }

    #[test]
    fn void_tag_list_is_fixed() {
        let mut tags = VOID_TAGS.to_vec();
        tags.sort_unstable();
        assert_eq!(
            tags,
            [
                "area", "base", "br", "col", "command", "embed", "hr", "img", "input", "link",
                "meta", "param", "source", "track", "wbr"
            ]
        );
        assert!(NON_VOID_TAGS.iter().all(|t| !VOID_TAGS.contains(t)));
    }

    #[test]
    fn custom_pipeline() {
        fn shout(invocation: crate::Invocation<'_>) -> crate::Invocation<'_> {
            invocation.rename_attributes(|bump, key| {
                Some(bumpalo::collections::String::from_str_in(
                    &key.to_uppercase(),
                    bump,
                ))
            })
        }
        static STAGES: &[PreProcessor] = &[shout];

        let bump = Bump::new();
        let dom = Dom::with_pipeline(&bump, STAGES);
        let div = dom.div().attrs([("hxGet", "/")]).unwrap();
        assert_eq!(div.to_string(), r#"<div HXGET="/"></div>"#);
    }
}
