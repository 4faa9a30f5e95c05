//! Error types for client-side routing.

/// Error building a path from a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathError {
	/// A placeholder had no value in the parameter map.
	MissingParameter {
		/// Template being reversed.
		template: String,
		/// Name of the placeholder, without the leading `:`.
		param: String,
	},
}

impl std::fmt::Display for PathError {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::MissingParameter { template, param } => {
				write!(f, "Missing parameter '{}' for template {}", param, template)
			}
		}
	}
}

impl std::error::Error for PathError {}

/// Error type for router operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouterError {
	/// The history backend refused the new entry.
	History(String),
	/// The target path could not be built.
	Path(PathError),
}

impl std::fmt::Display for RouterError {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::History(msg) => write!(f, "History update failed: {}", msg),
			Self::Path(err) => write!(f, "Path error: {}", err),
		}
	}
}

impl std::error::Error for RouterError {
	fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
		match self {
			Self::Path(err) => Some(err),
			Self::History(_) => None,
		}
	}
}

impl From<PathError> for RouterError {
	fn from(err: PathError) -> Self {
		Self::Path(err)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use std::error::Error;

	#[rstest]
	fn test_path_error_display() {
		let err = PathError::MissingParameter {
			template: "/forum/t/:threadId".to_string(),
			param: "threadId".to_string(),
		};
		assert_eq!(
			err.to_string(),
			"Missing parameter 'threadId' for template /forum/t/:threadId"
		);
	}

	#[rstest]
	fn test_router_error_display_and_source() {
		let history = RouterError::History("SecurityError".to_string());
		assert_eq!(history.to_string(), "History update failed: SecurityError");
		assert!(history.source().is_none());

		let path: RouterError = PathError::MissingParameter {
			template: "/article/a/:articleId".to_string(),
			param: "articleId".to_string(),
		}
		.into();
		assert!(path.to_string().starts_with("Path error: Missing parameter"));
		assert!(path.source().is_some());
	}
}
