use bumpalo::collections::Vec as BumpVec;
use bumpalo::Bump;

use crate::{render, DomError, Element, IntoContent, Render, RenderOptions};

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
/// A document is an ordered collection of top-level elements that will be
/// rendered to HTML.
///
/// Nothing is added around the elements: no doctype, whitespace or indentation.
pub struct Document<'bump> {
    /// The top-level elements of the document.
    pub children: BumpVec<'bump, Element<'bump>>,
}
impl<'bump> Document<'bump> {
    /// Create a new document with a list of children.
    pub fn new(bump: &'bump Bump, children: impl IntoIterator<Item = Element<'bump>>) -> Self {
        Document {
            children: BumpVec::from_iter_in(children, bump),
        }
    }

    /// Render the document as a lazy sequence of strings.
    ///
    /// # Errors
    ///
    /// [`DomError::InvalidBufferSize`] if the options are invalid.
    pub fn render(
        &self,
        options: RenderOptions,
    ) -> Result<Render<'_, 'bump, std::slice::Iter<'_, Element<'bump>>>, DomError> {
        render(self.children.iter(), options.chunk_size)
    }

    /// Write the document to a writer.
    pub fn write(&self, writer: &mut impl std::io::Write) -> std::io::Result<()> {
        for child in self.children.iter() {
            child.write(writer)?;
        }
        Ok(())
    }

    /// Write the document to a string.
    pub fn write_to_string(&self) -> String {
        self.children.iter().flat_map(Element::chunks).collect()
    }
}

/// The elements of a document are also valid content, so a document built
/// separately can be placed inside another element.
impl<'bump> IntoContent<'bump> for Document<'bump> {
    fn flatten_into(
        self,
        bump: &'bump Bump,
        out: &mut BumpVec<'bump, crate::Content<'bump>>,
    ) -> Result<(), DomError> {
        self.children.flatten_into(bump, out)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::Dom;

    #[test]
    fn test_inline_code() {
        let bump = Bump::new();
        let dom = Dom::new(&bump);
        let input = Document::new(
            &bump,
            [dom.p()
                .content((
                    "This is an example of ",
                    dom.code().content("inline code"),
                    " in a paragraph.",
                ))
                .unwrap()],
        );

        let output = input.write_to_string();
        assert_eq!(
            output,
            "<p>This is an example of <code>inline code</code> in a paragraph.</p>"
        );
    }

    #[test]
    fn test_empty_ul_with_class() {
        let bump = Bump::new();
        let dom = Dom::new(&bump);
        let input = Document::new(
            &bump,
            [dom.ul()
                .call(Vec::<Element>::new(), [("class", "tags")])
                .unwrap()],
        );
        assert_eq!(input.write_to_string(), "<ul class=\"tags\"></ul>");
    }

    #[test]
    fn test_void_element() {
        let bump = Bump::new();
        let dom = Dom::new(&bump);
        let input = Document::new(&bump, [dom.br()]);
        assert_eq!(input.write_to_string(), "<br />");
    }

    #[test]
    fn no_whitespace_between_siblings() {
        let bump = Bump::new();
        let dom = Dom::new(&bump);
        let input = Document::new(
            &bump,
            [
                dom.div()
                    .content((dom.p().content("Hello"), dom.p().content("World")))
                    .unwrap(),
                dom.hr(),
            ],
        );
        assert_eq!(
            input.write_to_string(),
            "<div><p>Hello</p><p>World</p></div><hr />"
        );
    }

    #[test]
    fn write_matches_render() {
        let bump = Bump::new();
        let dom = Dom::new(&bump);
        let input = Document::new(&bump, [dom.h1().content("Title").unwrap(), dom.main()]);

        let mut written = vec![];
        input.write(&mut written).unwrap();
        let rendered: String = input.render(RenderOptions::chunked(4)).unwrap().collect();
        assert_eq!(String::from_utf8(written).unwrap(), rendered);
        assert_eq!(rendered, input.write_to_string());
    }

    #[test]
    fn documents_nest_as_content() {
        let bump = Bump::new();
        let dom = Dom::new(&bump);
        let inner = Document::new(&bump, [dom.li().content("a").unwrap(), dom.li()]);
        let ul = dom.ul().content(inner).unwrap();
        assert_eq!(ul.to_string(), "<ul><li>a</li><li></li></ul>");
    }
}
