//! Rendering Linear events as Telegram messages.
//!
//! Messages use Telegram's MarkdownV2 markup. Each entity type has its own
//! renderer:
//!
//! | Entity | Renderer |
//! |--------|----------|
//! | `Issue` | header by action, linked title, parent, metadata, assignee, description |
//! | `Comment` | header plus quoted body |
//! | `Project` | header plus actor |
//! | anything else | a single generic line |
//!
//! [`format_event`] never fails: payloads that cannot be rendered produce a
//! short fallback naming the entity type, action and actor.

mod comment;
pub mod escape;
mod format;
mod generic;
pub mod issue;
mod project;

pub use escape::{ELLIPSIS, RESERVED_CHARS, escape_markdown, truncate_chars};
pub use format::{FormatError, fallback_message, format_event, try_format_event};
