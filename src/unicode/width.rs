//! Display width calculation for terminal rendering.

use std::sync::atomic::{AtomicU8, Ordering};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Width calculation method for ambiguous-width characters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum WidthMethod {
    /// POSIX-like wcwidth: ambiguous width = 1.
    #[default]
    WcWidth,
    /// Unicode East Asian Width: ambiguous width = 2.
    Unicode,
}

const WIDTH_METHOD_WCWIDTH: u8 = 0;
const WIDTH_METHOD_UNICODE: u8 = 1;

/// Widest cell span a single cluster may occupy.
pub const MAX_CLUSTER_WIDTH: usize = 2;

static WIDTH_METHOD: AtomicU8 = AtomicU8::new(WIDTH_METHOD_WCWIDTH);

/// Set the global width method used by buffers created afterwards.
pub fn set_width_method(method: WidthMethod) {
    let value = match method {
        WidthMethod::WcWidth => WIDTH_METHOD_WCWIDTH,
        WidthMethod::Unicode => WIDTH_METHOD_UNICODE,
    };
    WIDTH_METHOD.store(value, Ordering::Relaxed);
}

/// Get the global width method.
#[must_use]
pub fn width_method() -> WidthMethod {
    match WIDTH_METHOD.load(Ordering::Relaxed) {
        WIDTH_METHOD_UNICODE => WidthMethod::Unicode,
        _ => WidthMethod::WcWidth,
    }
}

/// Display width of a string under `method`, in terminal columns.
///
/// Measures the string as a whole; [`cluster_width`] is what wrapping uses.
#[must_use]
pub fn display_width_with_method(s: &str, method: WidthMethod) -> usize {
    match method {
        WidthMethod::WcWidth => UnicodeWidthStr::width(s),
        WidthMethod::Unicode => UnicodeWidthStr::width_cjk(s),
    }
}

/// Width of one grapheme cluster, always 0, 1 or 2 columns.
///
/// Zero-width marks contribute nothing, wide East Asian characters and
/// emoji contribute 2. A cluster whose base rune has no known width but
/// which is not a mark or control character counts as 1.
#[must_use]
pub fn cluster_width(cluster: &str, method: WidthMethod) -> usize {
    let width = display_width_with_method(cluster, method);
    if width == 0 {
        if let Some(base) = cluster.chars().next() {
            if !base.is_control() && UnicodeWidthChar::width(base).is_none() {
                return 1;
            }
        }
    }
    width.min(MAX_CLUSTER_WIDTH)
}
