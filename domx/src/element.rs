use std::fmt;

use bumpalo::collections::String as BumpString;
use bumpalo::collections::Vec as BumpVec;
use bumpalo::Bump;

use crate::{
    builder::VOID_TAGS, Attributes, Chunks, Content, DomError, IntoAttribute, IntoContent,
    Pipeline,
};

/// Tags whose text content is written without escaping.
pub const RAW_TEXT_TAGS: &[&str] = &["script"];

/// The arguments of a single call on an [`Element`]: positional content and
/// named attributes.
///
/// `content` is `None` when the call supplied no positional items at all, which
/// is distinct from supplying items that flatten to nothing.
#[derive(Debug, Clone)]
pub struct Invocation<'bump> {
    bump: &'bump Bump,
    /// The flattened positional items, if any were supplied.
    pub content: Option<BumpVec<'bump, Content<'bump>>>,
    /// The named attributes.
    pub attributes: Attributes<'bump>,
}
impl<'bump> Invocation<'bump> {
    /// Create an invocation with no content and no attributes.
    pub fn new(bump: &'bump Bump) -> Self {
        Self {
            bump,
            content: None,
            attributes: Attributes::new_in(bump),
        }
    }

    /// Get a reference to the bump allocator.
    pub fn bump(&self) -> &'bump Bump {
        self.bump
    }

    /// Add a named attribute.
    pub fn attribute(mut self, attribute: impl IntoAttribute<'bump>) -> Self {
        self.attributes.insert(attribute.into_attribute(self.bump));
        self
    }

    /// Add several named attributes.
    pub fn attributes<A: IntoAttribute<'bump>>(
        mut self,
        attributes: impl IntoIterator<Item = A>,
    ) -> Self {
        for attribute in attributes {
            self.attributes.insert(attribute.into_attribute(self.bump));
        }
        self
    }

    /// Supply positional items, flattening them onto any already supplied.
    pub fn with_content(mut self, items: impl IntoContent<'bump>) -> Result<Self, DomError> {
        let bump = self.bump;
        let content = self.content.get_or_insert_with(|| BumpVec::new_in(bump));
        items.flatten_into(bump, content)?;
        Ok(self)
    }

    /// Rebuild the attributes with new keys.
    ///
    /// `rename` returns the replacement key, or `None` to keep the key as is.
    /// Keys that collide after renaming are merged, later ones winning.
    pub fn rename_attributes(
        mut self,
        mut rename: impl FnMut(&'bump Bump, &str) -> Option<BumpString<'bump>>,
    ) -> Self {
        let mut renamed = Attributes::new_in(self.bump);
        for mut attribute in self.attributes {
            if let Some(key) = rename(self.bump, attribute.key.as_str()) {
                attribute.key = key;
            }
            renamed.insert(attribute);
        }
        self.attributes = renamed;
        self
    }
}

/// An HTML element under construction.
///
/// Elements are created by a [`crate::Dom`] and filled in by calling them. Any
/// number of attribute-only calls are allowed, but content can be assigned at
/// most once, and never to a void element.
///
/// ```
/// use domx::{bumpalo::Bump, Dom};
///
/// let bump = Bump::new();
/// let dom = Dom::new(&bump);
/// let div = dom
///     .div()
///     .attrs([("id", "test"), ("hxTarget", "root")])?
///     .content("test")?;
/// assert_eq!(div.to_string(), r#"<div id="test" hx-target="root">test</div>"#);
/// # Ok::<(), domx::DomError>(())
/// ```
#[derive(Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Element<'bump> {
    #[cfg_attr(feature = "serde", serde(skip))]
    bump: &'bump Bump,
    #[cfg_attr(feature = "serde", serde(skip))]
    pipeline: Pipeline<'bump>,
    name: BumpString<'bump>,
    attributes: Attributes<'bump>,
    content: Option<BumpVec<'bump, Content<'bump>>>,
}
impl<'bump> Element<'bump> {
    pub(crate) fn new(bump: &'bump Bump, name: &str, pipeline: Pipeline<'bump>) -> Self {
        Element {
            bump,
            pipeline,
            name: BumpString::from_str_in(name, bump),
            attributes: Attributes::new_in(bump),
            content: None,
        }
    }

    /// Apply a call to this element.
    ///
    /// The invocation is run through the element's pipeline, its attributes are
    /// merged over the existing ones, and its content (if any) is assigned.
    ///
    /// # Errors
    ///
    /// [`DomError::ContentMutation`] if content was supplied and the element
    /// already has content, [`DomError::VoidElementContent`] if content was
    /// supplied to a void element.
    pub fn invoke(mut self, invocation: Invocation<'bump>) -> Result<Self, DomError> {
        let Invocation {
            content,
            attributes,
            ..
        } = self.pipeline.run(invocation);
        self.attributes.merge(attributes);

        if let Some(items) = content {
            if self.content.is_some() {
                return Err(DomError::ContentMutation {
                    tag: self.name.as_str().to_string(),
                });
            }
            if self.is_void() {
                return Err(DomError::VoidElementContent {
                    tag: self.name.as_str().to_string(),
                });
            }
            tracing::trace!(tag = self.name(), items = items.len(), "assigned content");
            self.content = Some(items);
        }
        Ok(self)
    }

    /// Call the element with attributes only.
    ///
    /// This never returns `Err`; the `Result` lets it chain with the other calls.
    pub fn attrs<A: IntoAttribute<'bump>>(
        self,
        attributes: impl IntoIterator<Item = A>,
    ) -> Result<Self, DomError> {
        let invocation = Invocation::new(self.bump).attributes(attributes);
        self.invoke(invocation)
    }

    /// Call the element with content only.
    pub fn content(self, items: impl IntoContent<'bump>) -> Result<Self, DomError> {
        let invocation = Invocation::new(self.bump).with_content(items)?;
        self.invoke(invocation)
    }

    /// Call the element with both content and attributes.
    pub fn call<A: IntoAttribute<'bump>>(
        self,
        items: impl IntoContent<'bump>,
        attributes: impl IntoIterator<Item = A>,
    ) -> Result<Self, DomError> {
        let invocation = Invocation::new(self.bump)
            .attributes(attributes)
            .with_content(items)?;
        self.invoke(invocation)
    }

    /// The tag name.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// The attributes, in insertion order.
    pub fn attributes(&self) -> &Attributes<'bump> {
        &self.attributes
    }

    /// The content, or `None` if no content has been assigned.
    pub fn children(&self) -> Option<&[Content<'bump>]> {
        self.content.as_deref()
    }

    /// Whether the tag can never have content.
    pub fn is_void(&self) -> bool {
        VOID_TAGS.contains(&self.name())
    }

    /// Whether text inside this tag is written without escaping.
    pub fn is_raw_text(&self) -> bool {
        RAW_TEXT_TAGS.contains(&self.name())
    }

    /// Lazily serialize the element as a sequence of chunks.
    ///
    /// Each call starts a fresh, independent sequence.
    pub fn chunks(&self) -> Chunks<'_, 'bump> {
        Chunks::new(self)
    }

    /// Write the element to a writer.
    pub fn write(&self, writer: &mut dyn std::io::Write) -> std::io::Result<()> {
        for chunk in self.chunks() {
            writer.write_all(chunk.as_bytes())?;
        }
        Ok(())
    }

    /// Write the element to a string.
    pub fn write_to_string(&self) -> String {
        self.chunks().collect()
    }
}
impl fmt::Debug for Element<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Element")
            .field("name", &self.name())
            .field("attributes", &self.attributes)
            .field("content", &self.content)
            .finish()
    }
}
impl PartialEq for Element<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.attributes == other.attributes
            && self.content == other.content
    }
}
impl fmt::Display for Element<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for chunk in self.chunks() {
            f.write_str(&chunk)?;
        }
        Ok(())
    }
}
