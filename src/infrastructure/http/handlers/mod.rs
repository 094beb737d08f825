//! HTTP Handlers

mod ping;
mod widget;

pub use ping::*;
pub use widget::*;
