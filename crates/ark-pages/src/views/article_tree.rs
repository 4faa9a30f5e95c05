//! Article folder tree.

use crate::api::models::ArticleInfo;

/// One folder of the tree.
///
/// The root has an empty segment. Children are sorted by segment and
/// articles by name, at every level.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ArticleTreeNode {
	pub segment: String,
	pub children: Vec<ArticleTreeNode>,
	pub articles: Vec<ArticleInfo>,
}

impl ArticleTreeNode {
	fn new(segment: &str) -> Self {
		Self {
			segment: segment.to_string(),
			..Self::default()
		}
	}

	pub fn is_empty(&self) -> bool {
		self.children.is_empty() && self.articles.is_empty()
	}

	fn child_mut(&mut self, segment: &str) -> &mut ArticleTreeNode {
		let index = match self.children.iter().position(|c| c.segment == segment) {
			Some(index) => index,
			None => {
				self.children.push(ArticleTreeNode::new(segment));
				self.children.len() - 1
			}
		};
		&mut self.children[index]
	}

	fn sort(&mut self) {
		self.children.sort_by(|a, b| a.segment.cmp(&b.segment));
		self.articles.sort_by(|a, b| a.name.cmp(&b.name));
		for child in &mut self.children {
			child.sort();
		}
	}
}

/// Build the folder tree from the `/`-separated article paths.
///
/// An article lands in the node of the last segment of its path.
pub fn build_article_tree(articles: &[ArticleInfo]) -> ArticleTreeNode {
	let mut root = ArticleTreeNode::default();

	for article in articles {
		let mut node = &mut root;
		for segment in article.path.split('/') {
			node = node.child_mut(segment);
		}
		node.articles.push(article.clone());
	}

	root.sort();
	root
}

/// Articles whose path or name contains `filter`, ignoring case.
///
/// A blank filter keeps everything.
pub fn filter_articles(articles: &[ArticleInfo], filter: &str) -> Vec<ArticleInfo> {
	if filter.is_empty() {
		return articles.to_vec();
	}

	let filter = filter.to_lowercase();
	articles
		.iter()
		.filter(|a| a.path.to_lowercase().contains(&filter) || a.name.to_lowercase().contains(&filter))
		.cloned()
		.collect()
}
