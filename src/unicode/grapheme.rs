//! Grapheme cluster segmentation over rune sequences.
//!
//! Lines are stored as `[char]`, so cluster positions here are rune
//! offsets, not byte offsets.

use crate::unicode::width::{WidthMethod, cluster_width};
use unicode_segmentation::UnicodeSegmentation;

/// One grapheme cluster within a line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cluster {
    /// Rune offset of the first rune.
    pub start: usize,
    /// Number of runes in the cluster.
    pub len: usize,
    /// Display width (0, 1 or 2).
    pub width: usize,
    /// Whether every rune of the cluster is whitespace.
    pub is_space: bool,
}

impl Cluster {
    /// Rune offset one past the last rune.
    #[must_use]
    pub fn end(&self) -> usize {
        self.start + self.len
    }
}

/// Iterate over grapheme clusters in a string.
pub fn graphemes(s: &str) -> impl Iterator<Item = &str> {
    s.graphemes(true)
}

/// Display width of a string measured cluster by cluster.
///
/// Matches the widths the wrap engine assigns, so text measured here lines
/// up with wrapped rows.
#[must_use]
pub fn clustered_width(s: &str, method: WidthMethod) -> usize {
    s.graphemes(true).map(|g| cluster_width(g, method)).sum()
}

/// Split a rune sequence into clusters with their widths.
#[must_use]
pub fn clusters(runes: &[char], method: WidthMethod) -> Vec<Cluster> {
    let mut out = Vec::with_capacity(runes.len());
    // Fast path: every printable ASCII rune is its own width-1 cluster.
    if runes.iter().all(|c| c.is_ascii() && !c.is_ascii_control()) {
        for (i, &c) in runes.iter().enumerate() {
            out.push(Cluster {
                start: i,
                len: 1,
                width: 1,
                is_space: c == ' ',
            });
        }
        return out;
    }

    let text: String = runes.iter().collect();
    let mut start = 0usize;
    for g in text.graphemes(true) {
        let len = g.chars().count();
        out.push(Cluster {
            start,
            len,
            width: cluster_width(g, method),
            is_space: g.chars().all(char::is_whitespace),
        });
        start += len;
    }
    out
}

/// Cluster boundary offsets of a rune sequence, including 0 and `runes.len()`.
#[must_use]
pub fn boundaries(runes: &[char]) -> Vec<usize> {
    let mut out = vec![0];
    out.extend(
        clusters(runes, WidthMethod::WcWidth)
            .iter()
            .map(Cluster::end),
    );
    out
}

/// The cluster containing `offset`, as `(start, len)`.
///
/// Returns `None` when `offset` is at or past the end of the sequence.
#[must_use]
pub fn cluster_at(runes: &[char], offset: usize) -> Option<(usize, usize)> {
    if offset >= runes.len() {
        return None;
    }
    clusters(runes, WidthMethod::WcWidth)
        .into_iter()
        .find(|c| c.end() > offset)
        .map(|c| (c.start, c.len))
}

/// Closest cluster boundary strictly before `offset` (0 at the start).
#[must_use]
pub fn prev_boundary(runes: &[char], offset: usize) -> usize {
    boundaries(runes)
        .into_iter()
        .rev()
        .find(|&b| b < offset)
        .unwrap_or(0)
}

/// Closest cluster boundary strictly after `offset` (`runes.len()` at the end).
#[must_use]
pub fn next_boundary(runes: &[char], offset: usize) -> usize {
    boundaries(runes)
        .into_iter()
        .find(|&b| b > offset)
        .unwrap_or(runes.len())
}

/// Snap `offset` back to the cluster boundary at or before it.
#[must_use]
pub fn floor_boundary(runes: &[char], offset: usize) -> usize {
    let offset = offset.min(runes.len());
    boundaries(runes)
        .into_iter()
        .rev()
        .find(|&b| b <= offset)
        .unwrap_or(0)
}

/// Snap `offset` forward to the cluster boundary at or after it.
#[must_use]
pub fn ceil_boundary(runes: &[char], offset: usize) -> usize {
    if offset >= runes.len() {
        return runes.len();
    }
    boundaries(runes)
        .into_iter()
        .find(|&b| b >= offset)
        .unwrap_or(runes.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn runes(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn test_clusters_ascii() {
        let c = clusters(&runes("a b"), WidthMethod::WcWidth);
        assert_eq!(c.len(), 3);
        assert!(c[1].is_space);
        assert_eq!(c[2].start, 2);
    }

    #[test]
    fn test_clusters_combining() {
        // e + combining acute accent
        let c = clusters(&runes("e\u{0301}x"), WidthMethod::WcWidth);
        assert_eq!(c.len(), 2);
        assert_eq!(c[0].len, 2);
        assert_eq!(c[0].width, 1);
        assert_eq!(c[1].start, 2);
    }

    #[test]
    fn test_clusters_zwj_emoji() {
        let family = runes("👨‍👩‍👧!");
        let c = clusters(&family, WidthMethod::WcWidth);
        assert_eq!(c.len(), 2);
        assert_eq!(c[0].len, 5);
        assert_eq!(c[0].width, 2);
    }

    #[test]
    fn test_boundary_navigation() {
        let line = runes("ae\u{0301}b");
        assert_eq!(boundaries(&line), vec![0, 1, 3, 4]);
        assert_eq!(next_boundary(&line, 1), 3);
        assert_eq!(prev_boundary(&line, 3), 1);
        assert_eq!(floor_boundary(&line, 2), 1);
        assert_eq!(ceil_boundary(&line, 2), 3);
        assert_eq!(ceil_boundary(&line, 3), 3);
        assert_eq!(cluster_at(&line, 2), Some((1, 2)));
        assert_eq!(cluster_at(&line, 4), None);
        assert_eq!(next_boundary(&line, 4), 4);
        assert_eq!(prev_boundary(&line, 0), 0);
    }

    #[test]
    fn test_clustered_width() {
        assert_eq!(clustered_width("abc", WidthMethod::WcWidth), 3);
        assert_eq!(clustered_width("你好", WidthMethod::WcWidth), 4);
        assert_eq!(clustered_width("e\u{0301}👨‍👩‍👧", WidthMethod::WcWidth), 3);
    }

    #[test]
    fn test_graphemes_join_is_lossless() {
        let s = "héllo 🧋 你好";
        let joined: String = graphemes(s).collect();
        assert_eq!(joined, s);
    }
}
