//! Path templates.
//!
//! A template is a `/`-separated list of segments, each either a literal or a
//! `:name` placeholder. It matches a location only when both have the same
//! number of segments and every literal is equal, case included. There are no
//! wildcards and no partial matches.
//!
//! Templates split the same way URL paths do, so the leading `/` produces an
//! empty first segment and `"/"` alone has two empty segments.
//!
//! ```ignore
//! let template = PathTemplate::new("/forum/t/:threadId");
//! let params = template.matches(&["", "forum", "t", "42"]).unwrap();
//! assert_eq!(params["threadId"], "42");
//! ```

use std::collections::BTreeMap;

use super::error::PathError;

/// Placeholder values captured by a match, keyed by name without the `:`.
pub type PathParams = BTreeMap<String, String>;

#[derive(Debug, Clone, PartialEq, Eq)]
enum TemplateSegment {
	Literal(String),
	Param(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathTemplate {
	template: String,
	segments: Vec<TemplateSegment>,
}

impl PathTemplate {
	pub fn new(template: &str) -> Self {
		let segments = template
			.split('/')
			.map(|segment| match segment.strip_prefix(':') {
				Some(name) => TemplateSegment::Param(name.to_string()),
				None => TemplateSegment::Literal(segment.to_string()),
			})
			.collect();

		Self {
			template: template.to_string(),
			segments,
		}
	}

	pub fn template(&self) -> &str {
		&self.template
	}

	pub fn segment_count(&self) -> usize {
		self.segments.len()
	}

	/// Placeholder names in positional order
	pub fn param_names(&self) -> Vec<&str> {
		self.segments
			.iter()
			.filter_map(|segment| match segment {
				TemplateSegment::Param(name) => Some(name.as_str()),
				TemplateSegment::Literal(_) => None,
			})
			.collect()
	}

	/// Match already-decoded path segments against this template.
	///
	/// `None` is the normal "does not match" outcome.
	pub fn matches<S: AsRef<str>>(&self, location: &[S]) -> Option<PathParams> {
		if location.len() != self.segments.len() {
			return None;
		}

		let mut params = PathParams::new();
		for (segment, value) in self.segments.iter().zip(location) {
			match segment {
				TemplateSegment::Literal(literal) => {
					if literal != value.as_ref() {
						return None;
					}
				}
				TemplateSegment::Param(name) => {
					params.insert(name.clone(), value.as_ref().to_string());
				}
			}
		}

		Some(params)
	}

	/// Build path segments by substituting `params` into the placeholders
	pub fn reverse(&self, params: &PathParams) -> Result<Vec<String>, PathError> {
		self.segments
			.iter()
			.map(|segment| match segment {
				TemplateSegment::Literal(literal) => Ok(literal.clone()),
				TemplateSegment::Param(name) => {
					params
						.get(name)
						.cloned()
						.ok_or_else(|| PathError::MissingParameter {
							template: self.template.clone(),
							param: name.clone(),
						})
				}
			})
			.collect()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	fn segments(path: &str) -> Vec<String> {
		path.split('/').map(str::to_string).collect()
	}

	#[rstest]
	#[case("/", 2)]
	#[case("/articles", 2)]
	#[case("/forum/s/:sectionId", 4)]
	#[case("/article/d/:articleId/:version", 5)]
	fn test_segment_count(#[case] template: &str, #[case] expected: usize) {
		assert_eq!(PathTemplate::new(template).segment_count(), expected);
	}

	#[rstest]
	fn test_param_names_in_order() {
		let template = PathTemplate::new("/forum/ac/:articleId/:articleVersion");
		assert_eq!(template.param_names(), vec!["articleId", "articleVersion"]);
		assert!(PathTemplate::new("/signup").param_names().is_empty());
	}

	#[rstest]
	fn test_root_matches_only_root() {
		let root = PathTemplate::new("/");

		assert_eq!(root.matches(&segments("/")), Some(PathParams::new()));
		assert_eq!(root.matches(&segments("/articles")), None);
		assert_eq!(root.matches(&[""]), None);
	}

	#[rstest]
	fn test_captures_placeholders() {
		let template = PathTemplate::new("/article/d/:articleId/:version");

		let params = template.matches(&segments("/article/d/17/3")).unwrap();

		assert_eq!(params["articleId"], "17");
		assert_eq!(params["version"], "3");
		assert_eq!(params.len(), 2);
	}

	#[rstest]
	#[case("/forum/t")]
	#[case("/forum/t/1/2")]
	#[case("/forum/s/1")]
	#[case("/Forum/t/1")]
	#[case("/forum/t/1/")]
	fn test_rejects_non_matching(#[case] path: &str) {
		let template = PathTemplate::new("/forum/t/:threadId");
		assert_eq!(template.matches(&segments(path)), None);
	}

	#[rstest]
	fn test_placeholder_accepts_any_value() {
		let template = PathTemplate::new("/forum/ms/:searchString");

		let params = template
			.matches(&["", "forum", "ms", "hello world/with slash"])
			.unwrap();

		assert_eq!(params["searchString"], "hello world/with slash");
	}

	#[rstest]
	fn test_reverse() {
		let template = PathTemplate::new("/forum/ss/:subSectionId");
		let mut params = PathParams::new();
		params.insert("subSectionId".to_string(), "9".to_string());

		assert_eq!(
			template.reverse(&params).unwrap(),
			vec!["", "forum", "ss", "9"]
		);
	}

	#[rstest]
	fn test_reverse_missing_parameter() {
		let template = PathTemplate::new("/forum/ss/:subSectionId");

		let err = template.reverse(&PathParams::new()).unwrap_err();

		assert_eq!(
			err,
			PathError::MissingParameter {
				template: "/forum/ss/:subSectionId".to_string(),
				param: "subSectionId".to_string(),
			}
		);
	}
}
