//! Pure derivations over loaded data.
//!
//! Nothing here touches the reactive runtime; stores call these from their
//! accessors so the results are recomputed from current state every time.

mod article_tree;
mod breadcrumb;
mod grouping;
mod page;
mod paging;
mod search;
mod title;

pub use article_tree::{ArticleTreeNode, build_article_tree, filter_articles};
pub use breadcrumb::{ARTICLES_LABEL, COMMENTS_LABEL, Crumb, MAIN_LABEL, breadcrumb};
pub use grouping::{group_threads_by_sub_section, thread_count_by_section};
pub use page::PageData;
pub use paging::{PageLink, page_window, total_pages};
pub use search::SearchFormType;
pub use title::page_title;
