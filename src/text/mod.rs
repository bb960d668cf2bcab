//! Text storage, wrapping and editing.
//!
//! Key types:
//!
//! - [`TextBuffer`]: ordered logical lines of runes
//! - [`WrapSegment`] and [`Layout`]: soft-wrapped visual rows
//! - [`Cursor`] and [`LineInfo`]: cursor position and its visual projection
//! - [`EditPolicy`]: limits every edit must respect
//! - [`EditBuffer`]: all of the above behind one editing API
//!
//! # Examples
//!
//! ```
//! use textarea_core::text::{TextBuffer, wrap_line};
//! use textarea_core::WidthMethod;
//!
//! let buffer = TextBuffer::with_text("foo bar baz");
//! let runes = buffer.line(0).unwrap();
//! let rows = wrap_line(0, runes, 5, WidthMethod::WcWidth);
//! assert_eq!(rows.len(), 3);
//! assert_eq!((rows[1].start, rows[1].end), (4, 8));
//! ```

mod buffer;
mod cursor;
mod edit;
mod policy;
mod wrap;

pub use buffer::{Snapshot, TextBuffer};
pub use cursor::{Cursor, LineInfo, landing_offset};
pub use edit::{DEFAULT_WRAP_WIDTH, EditBuffer};
pub use policy::{DEFAULT_CHAR_LIMIT, DEFAULT_MAX_LINES, EditPolicy};
pub use wrap::{Layout, WrapSegment, row_of_offset, wrap_clusters, wrap_line};
