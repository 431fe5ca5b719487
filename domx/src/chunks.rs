use std::borrow::Cow;

use crate::{util::escape, Content, Element};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Open,
    Attribute(usize),
    Body(usize),
    Done,
}

#[derive(Debug, Clone)]
struct Frame<'a, 'bump> {
    element: &'a Element<'bump>,
    step: Step,
}

/// A lazy, document-order sequence of HTML chunks for one [`Element`].
///
/// Created by [`Element::chunks`]. Child elements are descended into on demand;
/// no intermediate string is built for the tree. The chunks are, in order:
/// `<tag`, one per attribute, then ` />` for void elements, `></tag>` for
/// elements without content, or `>`, one per content item and `</tag>`.
#[derive(Debug, Clone)]
pub struct Chunks<'a, 'bump> {
    stack: Vec<Frame<'a, 'bump>>,
}
impl<'a, 'bump> Chunks<'a, 'bump> {
    pub(crate) fn new(element: &'a Element<'bump>) -> Self {
        Self {
            stack: vec![Frame {
                element,
                step: Step::Open,
            }],
        }
    }
}
impl<'a, 'bump> Iterator for Chunks<'a, 'bump> {
    type Item = Cow<'a, str>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let frame = self.stack.last_mut()?;
            let element = frame.element;
            match frame.step {
                Step::Open => {
                    frame.step = Step::Attribute(0);
                    return Some(Cow::Owned(format!("<{}", element.name())));
                }
                Step::Attribute(idx) => match element.attributes().get_index(idx) {
                    Some(attribute) => {
                        frame.step = Step::Attribute(idx + 1);
                        let key = attribute.key.as_str();
                        return Some(Cow::Owned(match &attribute.value {
                            Some(value) => format!(" {key}=\"{}\"", value.to_html()),
                            None => format!(" {key}"),
                        }));
                    }
                    None if element.is_void() => {
                        frame.step = Step::Done;
                        return Some(Cow::Borrowed(" />"));
                    }
                    None if element.children().is_some() => {
                        frame.step = Step::Body(0);
                        return Some(Cow::Borrowed(">"));
                    }
                    None => {
                        frame.step = Step::Done;
                        return Some(Cow::Owned(format!("></{}>", element.name())));
                    }
                },
                Step::Body(idx) => {
                    let children = element.children().unwrap_or_default();
                    let Some(child) = children.get(idx) else {
                        frame.step = Step::Done;
                        return Some(Cow::Owned(format!("</{}>", element.name())));
                    };
                    frame.step = Step::Body(idx + 1);
                    match child {
                        Content::Element(child) => self.stack.push(Frame {
                            element: child,
                            step: Step::Open,
                        }),
                        Content::Raw(raw) => return Some(Cow::Borrowed(raw.as_str())),
                        Content::Text { text } if element.is_raw_text() => {
                            return Some(Cow::Borrowed(text.as_str()))
                        }
                        Content::Text { text } => return Some(escape(text.as_str())),
                    }
                }
                Step::Done => {
                    self.stack.pop();
                }
            }
        }
    }
}
