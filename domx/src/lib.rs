#![deny(missing_docs)]
//! A crate for building HTML from a runtime-constructed tree of elements.
//!
//! Elements are created by a [`Dom`] factory and filled in by *calling* them with
//! positional content and named attributes, either through methods on [`Element`]
//! or through the [`domx!`] macro. Attribute names are run through a [`Pipeline`]
//! of pre-processing stages; the default one turns `hxPushUrl`/`hx_push_url` into
//! `hx-push-url` and `type_`/`r#type` into `type`. Trees are serialized lazily as
//! a sequence of chunks, either per element ([`Element::chunks`]) or for several
//! elements with optional buffering ([`render`]).
//!
//! All allocations are done through a bump allocator ([bumpalo::Bump]) which is
//! passed to the factory.
//!
//! # Example
//!
//! ```
//! use domx::{bumpalo::Bump, domx, Dom};
//!
//! let bump = Bump::new();
//! let dom = Dom::new(&bump);
//! let element = domx! { in dom;
//!     div(class = "container", hxTarget = "#root")(
//!         h1()("Hello, World!"),
//!         button(disabled)("Click"),
//!     )
//! }?;
//! assert_eq!(
//!     element.to_string(),
//!     r##"<div class="container" hx-target="#root"><h1>Hello, World!</h1><button disabled>Click</button></div>"##
//! );
//! # Ok::<(), domx::DomError>(())
//! ```

pub mod builder;
pub use builder::Dom;

pub mod util;

// Re-export bumpalo for convenience
pub use bumpalo;

mod attribute;
pub use attribute::{Attribute, AttributeValue, Attributes, IntoAttribute, IntoAttributeValue};

mod chunks;
pub use chunks::Chunks;

mod content;
pub use content::{flatten, seq, Content, IntoContent, Raw, Seq};

mod document;
pub use document::Document;

mod element;
pub use element::{Element, Invocation, RAW_TEXT_TAGS};

mod error;
pub use error::DomError;

mod pipeline;
pub use pipeline::{
    kebab_case_hx_attributes, resolve_keyword_conflicts, Pipeline, PreProcessor,
    DEFAULT_PIPELINE, KEYWORDS,
};

mod render;
pub use render::{render, Render, RenderOptions};

#[cfg(feature = "macros")]
pub use domx_macro::domx;
