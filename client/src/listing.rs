//! Client-side search and pagination over a fetched post list.

use crate::Post;

/// Posts per page on the board.
pub const DEFAULT_PAGE_SIZE: usize = 6;

/// Posts containing `term` in a searchable field, ignoring case,
/// in their original order. A blank term keeps every post.
pub fn search<'a>(posts: &'a [Post], term: &str) -> Vec<&'a Post> {
    let term = term.trim();
    posts
        .iter()
        .filter(|post| term.is_empty() || post.contains_text(term))
        .collect()
}

/// The 1-based `page` of `items`, `size` items per page.
///
/// Page 0, pages past the end and a zero size yield an empty slice.
pub fn paginate<T>(items: &[T], page: usize, size: usize) -> &[T] {
    if page == 0 || size == 0 {
        return &[];
    }

    let start = (page - 1).saturating_mul(size).min(items.len());
    let end = page.saturating_mul(size).min(items.len());
    &items[start..end]
}

/// Number of pages needed for `len` items.
pub fn total_pages(len: usize, size: usize) -> usize {
    if size == 0 {
        0
    } else {
        len.div_ceil(size)
    }
}

/// View state of the board list: fetched posts, a search term and the
/// current page.
#[derive(Debug, Clone)]
pub struct Listing {
    posts: Vec<Post>,
    term: String,
    page: usize,
    page_size: usize,
}

impl Listing {
    pub fn new(posts: Vec<Post>) -> Self {
        Self::with_page_size(posts, DEFAULT_PAGE_SIZE)
    }

    pub fn with_page_size(posts: Vec<Post>, page_size: usize) -> Self {
        Self {
            posts,
            term: String::new(),
            page: 1,
            page_size,
        }
    }

    /// Replaces the fetched posts, keeping the search term and going back
    /// to the first page.
    pub fn set_posts(&mut self, posts: Vec<Post>) {
        self.posts = posts;
        self.page = 1;
    }

    /// Changes the search term and goes back to the first page.
    pub fn set_search(&mut self, term: impl Into<String>) {
        self.term = term.into();
        self.page = 1;
    }

    pub fn search_term(&self) -> &str {
        &self.term
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page;
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn filtered(&self) -> Vec<&Post> {
        search(&self.posts, &self.term)
    }

    pub fn total_pages(&self) -> usize {
        total_pages(self.filtered().len(), self.page_size)
    }

    /// Posts of the current page.
    pub fn current(&self) -> Vec<&Post> {
        paginate(&self.filtered(), self.page, self.page_size).to_vec()
    }
}
