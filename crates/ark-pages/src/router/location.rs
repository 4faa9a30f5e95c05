//! Raw location state and its URL codec.

use std::collections::BTreeMap;

/// Query parameters of a location, decoded
pub type QueryParams = BTreeMap<String, String>;

/// The router's view of the current URL.
///
/// `segments` are individually percent-decoded path segments, including the
/// empty segment in front of the leading `/`. `hash` is stored without `#`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawLocation {
	pub segments: Vec<String>,
	pub query: QueryParams,
	pub hash: String,
}

impl Default for RawLocation {
	fn default() -> Self {
		Self::from_url("/", "", "")
	}
}

impl RawLocation {
	pub fn new(segments: Vec<String>, query: QueryParams, hash: impl Into<String>) -> Self {
		Self {
			segments,
			query,
			hash: strip_hash(&hash.into()).to_string(),
		}
	}

	/// Parse the parts of a URL as reported by `window.location`.
	///
	/// `pathname` is percent-encoded; `search` and `hash` may carry their
	/// leading `?` / `#`. Undecodable segments are kept verbatim and an
	/// unparsable query string yields no parameters.
	pub fn from_url(pathname: &str, search: &str, hash: &str) -> Self {
		let segments = pathname
			.split('/')
			.map(|segment| match urlencoding::decode(segment) {
				Ok(decoded) => decoded.into_owned(),
				Err(_) => segment.to_string(),
			})
			.collect();

		let search = search.strip_prefix('?').unwrap_or(search);
		let query = serde_urlencoded::from_str::<Vec<(String, String)>>(search)
			.map(|pairs| pairs.into_iter().collect())
			.unwrap_or_default();

		Self {
			segments,
			query,
			hash: strip_hash(hash).to_string(),
		}
	}

	/// Split a full relative URL (`/path?query#hash`) and parse it
	pub fn parse(url: &str) -> Self {
		let (rest, hash) = url.split_once('#').unwrap_or((url, ""));
		let (pathname, search) = rest.split_once('?').unwrap_or((rest, ""));
		Self::from_url(pathname, search, hash)
	}

	/// Encode back into a relative URL.
	///
	/// Each segment is percent-encoded on its own, so a `/` inside a segment
	/// survives the round trip.
	pub fn to_url(&self) -> String {
		let mut url = self
			.segments
			.iter()
			.map(|segment| urlencoding::encode(segment).into_owned())
			.collect::<Vec<_>>()
			.join("/");

		if !self.query.is_empty()
			&& let Ok(query) = serde_urlencoded::to_string(&self.query)
		{
			url.push('?');
			url.push_str(&query);
		}

		if !self.hash.is_empty() {
			url.push('#');
			url.push_str(&self.hash);
		}

		url
	}

	pub fn query_param(&self, name: &str) -> Option<&str> {
		self.query.get(name).map(String::as_str)
	}
}

fn strip_hash(hash: &str) -> &str {
	hash.strip_prefix('#').unwrap_or(hash)
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_root() {
		let location = RawLocation::from_url("/", "", "");
		assert_eq!(location.segments, vec!["", ""]);
		assert!(location.query.is_empty());
		assert_eq!(location.hash, "");
		assert_eq!(location.to_url(), "/");
	}

	#[rstest]
	fn test_decodes_each_segment() {
		let location = RawLocation::from_url("/forum/ms/hello%20world%2Fagain", "", "");
		assert_eq!(location.segments, vec!["", "forum", "ms", "hello world/again"]);
	}

	#[rstest]
	fn test_query_and_hash() {
		let location = RawLocation::from_url("/forum/t/5", "?page=3&x=a%20b", "#m12");

		assert_eq!(location.query_param("page"), Some("3"));
		assert_eq!(location.query_param("x"), Some("a b"));
		assert_eq!(location.hash, "m12");
	}

	#[rstest]
	fn test_parse_full_url() {
		let location = RawLocation::parse("/forum/t/5?page=2#m7");

		assert_eq!(location.segments, vec!["", "forum", "t", "5"]);
		assert_eq!(location.query_param("page"), Some("2"));
		assert_eq!(location.hash, "m7");
	}

	#[rstest]
	#[case("/forum/t/5?page=2#m7")]
	#[case("/forum/ms/caf%C3%A9%20au%20lait")]
	#[case("/articles")]
	#[case("/")]
	fn test_url_round_trip(#[case] url: &str) {
		let location = RawLocation::parse(url);
		assert_eq!(RawLocation::parse(&location.to_url()), location);
	}

	#[rstest]
	fn test_to_url_encodes_slash_in_segment() {
		let location = RawLocation::new(
			vec!["".into(), "forum".into(), "ms".into(), "a/b".into()],
			QueryParams::new(),
			"",
		);
		assert_eq!(location.to_url(), "/forum/ms/a%2Fb");
	}

	#[rstest]
	fn test_new_strips_hash_marker() {
		let location = RawLocation::new(vec!["".into(), "".into()], QueryParams::new(), "#top");
		assert_eq!(location.hash, "top");
	}

	#[rstest]
	fn test_malformed_percent_sequence_kept() {
		let location = RawLocation::from_url("/forum/ms/%E0%A4%A", "", "");
		assert_eq!(location.segments[3], "%E0%A4%A");
	}
}
