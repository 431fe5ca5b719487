use std::borrow::Cow;

use bumpalo::collections::String as BumpString;
use bumpalo::collections::Vec as BumpVec;
use bumpalo::Bump;

use crate::{DomError, Element};

/// A single item in the body of an [`Element`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "type"))]
pub enum Content<'bump> {
    /// A nested element.
    Element(Element<'bump>),
    /// HTML written out verbatim.
    Raw(Raw<'bump>),
    /// Text, escaped on output.
    Text {
        /// The text of the item.
        text: BumpString<'bump>,
    },
}
impl<'bump> Content<'bump> {
    /// Create a text item.
    pub fn text(bump: &'bump Bump, text: &str) -> Self {
        Content::Text {
            text: BumpString::from_str_in(text, bump),
        }
    }

    /// Returns `true` if the item is an [`Element`](Content::Element).
    #[must_use]
    pub fn is_element(&self) -> bool {
        matches!(self, Self::Element(_))
    }

    /// Returns `true` if the item is [`Raw`](Content::Raw).
    #[must_use]
    pub fn is_raw(&self) -> bool {
        matches!(self, Self::Raw(_))
    }

    /// Returns `true` if the item is [`Text`](Content::Text).
    #[must_use]
    pub fn is_text(&self) -> bool {
        matches!(self, Self::Text { .. })
    }
}

/// HTML that bypasses escaping.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Raw<'bump> {
    html: BumpString<'bump>,
}
impl<'bump> Raw<'bump> {
    /// Wrap a string of HTML.
    pub fn new(bump: &'bump Bump, html: &str) -> Self {
        Raw {
            html: BumpString::from_str_in(html, bump),
        }
    }

    /// The wrapped HTML.
    pub fn as_str(&self) -> &str {
        self.html.as_str()
    }
}

/// A lazily produced sequence of content, flattened when it is assigned to an
/// element.
///
/// Iterators cannot implement [`IntoContent`] directly, so wrap them with
/// [`seq`] (or [`crate::Dom::seq`]).
#[derive(Debug, Clone)]
pub struct Seq<I>(pub I);

/// Mark an iterable as a sequence of content.
///
/// ```
/// use domx::{bumpalo::Bump, seq, Dom};
///
/// let bump = Bump::new();
/// let dom = Dom::new(&bump);
/// let list = dom
///     .ul()
///     .content(seq((1..3).map(|i| dom.li().content(format!("Name {i}")))))
///     .unwrap();
/// assert_eq!(list.to_string(), "<ul><li>Name 1</li><li>Name 2</li></ul>");
/// ```
pub fn seq<I: IntoIterator>(iter: I) -> Seq<I::IntoIter> {
    Seq(iter.into_iter())
}

/// Trait for values that can be placed in the body of an element.
///
/// Implementations push zero or more leaf items onto `out`, recursing into
/// nested collections in order and dropping `None`s. Values that can never be
/// content fail here with [`DomError::UnknownContentType`].
pub trait IntoContent<'bump> {
    /// Append the flattened items of this value to `out`.
    fn flatten_into(
        self,
        bump: &'bump Bump,
        out: &mut BumpVec<'bump, Content<'bump>>,
    ) -> Result<(), DomError>;
}

/// Flatten arbitrarily nested content into a single ordered sequence.
pub fn flatten<'bump>(
    bump: &'bump Bump,
    items: impl IntoContent<'bump>,
) -> Result<BumpVec<'bump, Content<'bump>>, DomError> {
    let mut out = BumpVec::new_in(bump);
    items.flatten_into(bump, &mut out)?;
    Ok(out)
}

impl<'bump> IntoContent<'bump> for Content<'bump> {
    fn flatten_into(
        self,
        _bump: &'bump Bump,
        out: &mut BumpVec<'bump, Content<'bump>>,
    ) -> Result<(), DomError> {
        out.push(self);
        Ok(())
    }
}
impl<'bump> IntoContent<'bump> for Element<'bump> {
    fn flatten_into(
        self,
        _bump: &'bump Bump,
        out: &mut BumpVec<'bump, Content<'bump>>,
    ) -> Result<(), DomError> {
        out.push(Content::Element(self));
        Ok(())
    }
}
impl<'bump> IntoContent<'bump> for Raw<'bump> {
    fn flatten_into(
        self,
        _bump: &'bump Bump,
        out: &mut BumpVec<'bump, Content<'bump>>,
    ) -> Result<(), DomError> {
        out.push(Content::Raw(self));
        Ok(())
    }
}
impl<'bump> IntoContent<'bump> for &str {
    fn flatten_into(
        self,
        bump: &'bump Bump,
        out: &mut BumpVec<'bump, Content<'bump>>,
    ) -> Result<(), DomError> {
        out.push(Content::text(bump, self));
        Ok(())
    }
}
impl<'bump> IntoContent<'bump> for String {
    fn flatten_into(
        self,
        bump: &'bump Bump,
        out: &mut BumpVec<'bump, Content<'bump>>,
    ) -> Result<(), DomError> {
        self.as_str().flatten_into(bump, out)
    }
}
impl<'bump> IntoContent<'bump> for &String {
    fn flatten_into(
        self,
        bump: &'bump Bump,
        out: &mut BumpVec<'bump, Content<'bump>>,
    ) -> Result<(), DomError> {
        self.as_str().flatten_into(bump, out)
    }
}
impl<'bump> IntoContent<'bump> for Cow<'_, str> {
    fn flatten_into(
        self,
        bump: &'bump Bump,
        out: &mut BumpVec<'bump, Content<'bump>>,
    ) -> Result<(), DomError> {
        self.as_ref().flatten_into(bump, out)
    }
}
impl<'bump> IntoContent<'bump> for () {
    fn flatten_into(
        self,
        _bump: &'bump Bump,
        _out: &mut BumpVec<'bump, Content<'bump>>,
    ) -> Result<(), DomError> {
        Ok(())
    }
}
impl<'bump, T: IntoContent<'bump>> IntoContent<'bump> for Option<T> {
    fn flatten_into(
        self,
        bump: &'bump Bump,
        out: &mut BumpVec<'bump, Content<'bump>>,
    ) -> Result<(), DomError> {
        match self {
            Some(item) => item.flatten_into(bump, out),
            None => Ok(()),
        }
    }
}
impl<'bump, T: IntoContent<'bump>> IntoContent<'bump> for Result<T, DomError> {
    fn flatten_into(
        self,
        bump: &'bump Bump,
        out: &mut BumpVec<'bump, Content<'bump>>,
    ) -> Result<(), DomError> {
        self?.flatten_into(bump, out)
    }
}
impl<'bump, I> IntoContent<'bump> for Seq<I>
where
    I: Iterator,
    I::Item: IntoContent<'bump>,
{
    fn flatten_into(
        self,
        bump: &'bump Bump,
        out: &mut BumpVec<'bump, Content<'bump>>,
    ) -> Result<(), DomError> {
        for item in self.0 {
            item.flatten_into(bump, out)?;
        }
        Ok(())
    }
}
impl<'bump, T: IntoContent<'bump>> IntoContent<'bump> for Vec<T> {
    fn flatten_into(
        self,
        bump: &'bump Bump,
        out: &mut BumpVec<'bump, Content<'bump>>,
    ) -> Result<(), DomError> {
        Seq(self.into_iter()).flatten_into(bump, out)
    }
}
impl<'bump, T: IntoContent<'bump>> IntoContent<'bump> for BumpVec<'bump, T> {
    fn flatten_into(
        self,
        bump: &'bump Bump,
        out: &mut BumpVec<'bump, Content<'bump>>,
    ) -> Result<(), DomError> {
        Seq(self.into_iter()).flatten_into(bump, out)
    }
}
impl<'bump, T: IntoContent<'bump>, const N: usize> IntoContent<'bump> for [T; N] {
    fn flatten_into(
        self,
        bump: &'bump Bump,
        out: &mut BumpVec<'bump, Content<'bump>>,
    ) -> Result<(), DomError> {
        Seq(self.into_iter()).flatten_into(bump, out)
    }
}

macro_rules! tuple_content {
    ($($name:ident),+) => {
        impl<'bump, $($name: IntoContent<'bump>),+> IntoContent<'bump> for ($($name,)+) {
            #[allow(non_snake_case)]
            fn flatten_into(
                self,
                bump: &'bump Bump,
                out: &mut BumpVec<'bump, Content<'bump>>,
            ) -> Result<(), DomError> {
                let ($($name,)+) = self;
                $($name.flatten_into(bump, out)?;)+
                Ok(())
            }
        }
    };
}
tuple_content!(A);
tuple_content!(A, B);
tuple_content!(A, B, C);
tuple_content!(A, B, C, D);
tuple_content!(A, B, C, D, E);
tuple_content!(A, B, C, D, E, F);
tuple_content!(A, B, C, D, E, F, G);
tuple_content!(A, B, C, D, E, F, G, H);

macro_rules! unknown_content {
    ($($ty:ty),*) => {
        $(
            impl<'bump> IntoContent<'bump> for $ty {
                fn flatten_into(
                    self,
                    _bump: &'bump Bump,
                    _out: &mut BumpVec<'bump, Content<'bump>>,
                ) -> Result<(), DomError> {
                    Err(DomError::UnknownContentType {
                        value: format!("{self:?}"),
                    })
                }
            }
        )*
    };
}
unknown_content!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, bool);

#[cfg(test)]
mod tests {
    use super::*;

    fn texts<'a>(items: &'a [Content<'_>]) -> Vec<&'a str> {
        items
            .iter()
            .map(|c| match c {
                Content::Text { text } => text.as_str(),
                Content::Raw(raw) => raw.as_str(),
                Content::Element(e) => e.name(),
            })
            .collect()
    }

    #[test]
    fn drops_none_at_any_depth() {
        let bump = Bump::new();
        let items = flatten(
            &bump,
            (vec![vec![None::<&str>, None, None]], Some("a"), [None, Some("b")]),
        )
        .unwrap();
        assert_eq!(texts(&items), ["a", "b"]);
    }

    #[test]
    fn preserves_order_across_nesting() {
        let bump = Bump::new();
        let items = flatten(
            &bump,
            (
                "1",
                vec![vec!["2", "3"], vec![]],
                seq(["4", "5"].into_iter().map(|s| vec![s])),
                "6",
            ),
        )
        .unwrap();
        assert_eq!(texts(&items), ["1", "2", "3", "4", "5", "6"]);
    }

    #[test]
    fn tolerates_deep_nesting() {
        let bump = Bump::new();
        let deep = vec![vec![vec![vec![vec![vec![vec![vec![Some("deep")]]]]]]]];
        let items = flatten(&bump, (deep, vec![vec![vec![vec![None::<&str>]]]])).unwrap();
        assert_eq!(texts(&items), ["deep"]);
    }

    #[test]
    fn numbers_are_rejected() {
        let bump = Bump::new();
        let err = flatten(&bump, ("ok", 5)).unwrap_err();
        assert_eq!(
            err,
            DomError::UnknownContentType {
                value: "5".to_string()
            }
        );
    }

    #[test]
    fn errors_propagate_from_results() {
        let bump = Bump::new();
        let failed: Result<&str, DomError> = Err(DomError::BadTagName("__init__".into()));
        assert!(flatten(&bump, vec![failed]).is_err());
    }
}
