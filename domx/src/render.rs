//! Streaming rendering of one or more top-level elements.

use crate::{Chunks, DomError, Element};

/// Options controlling how output is split into chunks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RenderOptions {
    /// The nominal size of each chunk in bytes, or `None` to produce the whole
    /// output as a single chunk.
    pub chunk_size: Option<usize>,
}
impl RenderOptions {
    /// Options producing chunks of roughly `size` bytes.
    pub fn chunked(size: usize) -> Self {
        Self {
            chunk_size: Some(size),
        }
    }

    /// Check that the options can be used for rendering.
    ///
    /// # Errors
    ///
    /// [`DomError::InvalidBufferSize`] if the chunk size is zero.
    pub fn validate(&self) -> Result<(), DomError> {
        match self.chunk_size {
            Some(0) => Err(DomError::InvalidBufferSize { size: 0 }),
            _ => Ok(()),
        }
    }
}

/// Render elements, in order, into a lazy sequence of strings.
///
/// Without a chunk size exactly one string is produced holding the whole
/// output (empty if there are no elements). With a chunk size, the underlying
/// chunks of each element are gathered into a buffer which is yielded whenever
/// the next chunk would take it over `chunk_size` bytes. Underlying chunks are
/// never split, so a single large chunk may exceed the nominal size.
///
/// ```
/// use domx::{bumpalo::Bump, render, Dom};
///
/// let bump = Bump::new();
/// let dom = Dom::new(&bump);
/// let p = dom.p().content("Hello")?;
/// let chunks: Vec<String> = render([&p], Some(4))?.collect();
/// assert_eq!(chunks, ["<p>", "Hello", "</p>"]);
/// # Ok::<(), domx::DomError>(())
/// ```
///
/// # Errors
///
/// [`DomError::InvalidBufferSize`] if `chunk_size` is zero.
pub fn render<'a, 'bump: 'a, I>(
    elements: I,
    chunk_size: Option<usize>,
) -> Result<Render<'a, 'bump, I::IntoIter>, DomError>
where
    I: IntoIterator<Item = &'a Element<'bump>>,
{
    let options = RenderOptions { chunk_size };
    options.validate()?;
    let elements = elements.into_iter();
    tracing::debug!(
        chunk_size = ?chunk_size,
        elements = elements.size_hint().0,
        "starting render"
    );
    Ok(Render {
        elements,
        current: None,
        buffer: String::new(),
        chunk_size,
        finished: false,
    })
}

/// The lazy sequence of output strings returned by [`render`].
#[derive(Debug)]
pub struct Render<'a, 'bump, I> {
    elements: I,
    current: Option<Chunks<'a, 'bump>>,
    buffer: String,
    chunk_size: Option<usize>,
    finished: bool,
}
impl<'a, 'bump: 'a, I> Render<'a, 'bump, I>
where
    I: Iterator<Item = &'a Element<'bump>>,
{
    fn flush(&mut self) -> String {
        tracing::trace!(len = self.buffer.len(), "flushing render buffer");
        std::mem::take(&mut self.buffer)
    }
}
impl<'a, 'bump: 'a, I> Iterator for Render<'a, 'bump, I>
where
    I: Iterator<Item = &'a Element<'bump>>,
{
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        loop {
            let chunk = match self.current.as_mut().and_then(Iterator::next) {
                Some(chunk) => chunk,
                None => match self.elements.next() {
                    Some(element) => {
                        self.current = Some(element.chunks());
                        continue;
                    }
                    None => {
                        self.finished = true;
                        self.current = None;
                        return match self.chunk_size {
                            Some(_) if self.buffer.is_empty() => None,
                            _ => Some(self.flush()),
                        };
                    }
                },
            };

            if let Some(size) = self.chunk_size {
                if !self.buffer.is_empty() && self.buffer.len() + chunk.len() > size {
                    let out = self.flush();
                    self.buffer.push_str(&chunk);
                    return Some(out);
                }
            }
            self.buffer.push_str(&chunk);
        }
    }
}

#[cfg(test)]
mod tests {
    use bumpalo::Bump;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::Dom;

    #[test]
    fn no_elements_yields_one_empty_chunk() {
        let chunks: Vec<String> = render(std::iter::empty::<&Element>(), None)
            .unwrap()
            .collect();
        assert_eq!(chunks, [""]);
        let chunks: Vec<String> = render(std::iter::empty::<&Element>(), Some(8))
            .unwrap()
            .collect();
        assert!(chunks.is_empty());
    }

    #[test]
    fn zero_chunk_size_is_rejected() {
        let bump = Bump::new();
        let dom = Dom::new(&bump);
        let div = dom.div();
        let err = render([&div], Some(0)).unwrap_err();
        assert_eq!(err, DomError::InvalidBufferSize { size: 0 });
        assert_eq!(err.to_string(), "Invalid buffer size 0");
    }

    #[test]
    fn unbounded_render_concatenates_elements() {
        let bump = Bump::new();
        let dom = Dom::new(&bump);
        let a = dom.p().content("a").unwrap();
        let b = dom.br();
        let chunks: Vec<String> = render([&a, &b], None).unwrap().collect();
        assert_eq!(chunks, ["<p>a</p><br />"]);
    }

    #[test]
    fn oversized_chunks_are_not_split() {
        let bump = Bump::new();
        let dom = Dom::new(&bump);
        let p = dom.p().content("a long piece of text").unwrap();
        let chunks: Vec<String> = render([&p], Some(3)).unwrap().collect();
        assert_eq!(chunks, ["<p>", "a long piece of text", "</p>"]);
    }

    #[test]
    fn chunked_output_matches_unbounded_output() {
        let bump = Bump::new();
        let dom = Dom::new(&bump);
        let list = dom
            .ul()
            .attrs([("id", "list"), ("hxSwap", "outerHTML")])
            .and_then(|ul| ul.content(dom.seq((0..20).map(|i| dom.li().content(format!("Item {i}"))))))
            .unwrap();
        let footer = dom.footer().content(dom.raw("&copy;")).unwrap();

        let whole: String = render([&list, &footer], None).unwrap().collect();
        let pieces: Vec<String> = list
            .chunks()
            .chain(footer.chunks())
            .map(|c| c.into_owned())
            .collect();
        for size in 1..=whole.len() + 1 {
            let chunks: Vec<String> = render([&list, &footer], Some(size)).unwrap().collect();
            assert_eq!(chunks.concat(), whole, "chunk size {size}");
            for chunk in &chunks {
                assert!(
                    chunk.len() <= size || pieces.contains(chunk),
                    "chunk size {size}: {chunk:?}"
                );
            }
        }
    }

    #[test]
    fn flushes_before_exceeding_size() {
        let bump = Bump::new();
        let dom = Dom::new(&bump);
        let div = dom.div().content(("ab", "cd", "ef")).unwrap();
        // Underlying chunks: "<div" ">" "ab" "cd" "ef" "</div>"
        let chunks: Vec<String> = render([&div], Some(5)).unwrap().collect();
        assert_eq!(chunks, ["<div>", "abcd", "ef", "</div>"]);
    }

    #[test]
    fn chunk_size_counts_bytes() {
        let bump = Bump::new();
        let dom = Dom::new(&bump);
        // "héllo" is five characters but six bytes.
        let p = dom.p().content("héllo").unwrap();
        let chunks: Vec<String> = render([&p], Some(8)).unwrap().collect();
        assert_eq!(chunks, ["<p>", "héllo", "</p>"]);
    }

    #[test]
    fn elements_without_a_size_hint() {
        let bump = Bump::new();
        let dom = Dom::new(&bump);
        let items = [dom.p().content("a").unwrap(), dom.br(), dom.p().content("b").unwrap()];
        let chunks: Vec<String> = render(items.iter().filter(|e| !e.is_void()), None)
            .unwrap()
            .collect();
        assert_eq!(chunks, ["<p>a</p><p>b</p>"]);
    }
}
