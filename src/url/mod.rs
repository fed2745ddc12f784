//! URL handling module for Wikitree
//!
//! Category and article ids are decoded URLs: every URL that enters a
//! record goes through [`decode_url`] so that the same page never appears
//! under two different percent-encoded spellings. Requests keep using the
//! encoded form carried by [`PageLink`].

mod decode;
mod resolve;

pub use decode::decode_url;
pub use resolve::{parse_page_url, resolve_link, PageLink};
