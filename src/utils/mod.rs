//! Utility functions and helpers.

pub mod http;

use url::Url;

use crate::error::Result;
use crate::models::ExternalVoyageRef;

/// Build the booking page URL for a voyage.
///
/// `base` must end with a slash; the reference becomes the last path
/// segment, followed by a trailing slash as the booking site expects.
pub fn voyage_url(base: &Url, reference: &ExternalVoyageRef) -> Result<Url> {
    Ok(base.join(&format!("{reference}/"))?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_voyage_url_page_id() {
        let base = Url::parse("https://plan.asukacruise.co.jp/asuka3/").unwrap();
        let url = voyage_url(&base, &ExternalVoyageRef::PageId(97160)).unwrap();
        assert_eq!(url.as_str(), "https://plan.asukacruise.co.jp/asuka3/97160/");
    }

    #[test]
    fn test_voyage_url_code() {
        let base = Url::parse("https://plan.asukacruise.co.jp/asuka3/").unwrap();
        let url = voyage_url(&base, &ExternalVoyageRef::Code("A3-2605".into())).unwrap();
        assert_eq!(url.as_str(), "https://plan.asukacruise.co.jp/asuka3/A3-2605/");
    }
}
