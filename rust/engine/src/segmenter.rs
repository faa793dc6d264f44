//! Splits a flat stream of log lines into per-hand blocks.
//!
//! A block is a maximal run of non-delimiter lines. Delimiters are blank
//! lines and the summary-section marker; they never appear inside a block.

use std::io::BufRead;

/// First line of the summary section that closes every hand.
pub const SUMMARY_MARKER: &str = "*** SUMMARY ***";

fn is_delimiter(line: &str) -> bool {
    line.is_empty() || line.starts_with(SUMMARY_MARKER)
}

/// Lazy iterator over hand blocks. Each block holds trimmed, non-empty lines.
#[derive(Debug)]
pub struct Segmenter<I> {
    lines: I,
    done: bool,
}

impl<I> Segmenter<I> {
    pub fn new(lines: I) -> Self {
        Self { lines, done: false }
    }
}

impl<I, S> Iterator for Segmenter<I>
where
    I: Iterator<Item = S>,
    S: AsRef<str>,
{
    type Item = Vec<String>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let mut block = Vec::new();
        for raw in self.lines.by_ref() {
            let line = raw.as_ref().trim();
            if is_delimiter(line) {
                if !block.is_empty() {
                    return Some(block);
                }
            } else {
                block.push(line.to_string());
            }
        }
        self.done = true;
        if block.is_empty() { None } else { Some(block) }
    }
}

/// Segment any sequence of lines.
///
/// ```
/// use handparse_engine::segmenter::segment;
///
/// let blocks: Vec<_> = segment(["a", "b", "", "*** SUMMARY ***", "c"]).collect();
/// assert_eq!(blocks, vec![vec!["a", "b"], vec!["c"]]);
/// ```
pub fn segment<I>(lines: I) -> Segmenter<I::IntoIter>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    Segmenter::new(lines.into_iter())
}

/// Segment a buffered reader line by line.
///
/// Read errors are yielded once; iteration stops after the first error.
pub fn segment_reader<R: BufRead>(reader: R) -> ReaderBlocks<R> {
    ReaderBlocks {
        lines: reader.lines(),
        failed: false,
    }
}

#[derive(Debug)]
pub struct ReaderBlocks<R> {
    lines: std::io::Lines<R>,
    failed: bool,
}

impl<R: BufRead> Iterator for ReaderBlocks<R> {
    type Item = std::io::Result<Vec<String>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let mut block = Vec::new();
        for raw in self.lines.by_ref() {
            let raw = match raw {
                Ok(l) => l,
                Err(e) => {
                    self.failed = true;
                    return Some(Err(e));
                }
            };
            let line = raw.trim();
            if is_delimiter(line) {
                if !block.is_empty() {
                    return Some(Ok(block));
                }
            } else {
                block.push(line.to_string());
            }
        }
        self.failed = true;
        if block.is_empty() { None } else { Some(Ok(block)) }
    }
}
