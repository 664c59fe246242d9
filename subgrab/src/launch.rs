//! Opening URLs in the user's browser.

use std::io;

pub const REGISTER_URL: &str = "https://www.opensubtitles.com/";

/// Hands `url` to the platform's default handler without waiting for it.
///
/// The handler runs detached, so it neither blocks the UI nor writes over it.
///
/// # Errors
///
/// Returns `Err` if no handler could be launched.
pub fn open_url(url: &str) -> io::Result<()> {
    open::that_detached(url)
}
