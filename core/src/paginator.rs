/// A result list split into consecutive pages.
#[derive(Debug, Clone)]
pub struct Paginator<'a, T> {
    pages: Vec<&'a [T]>,
}

/// Split `items` into pages of `page_size`; the last page may be shorter. A page size of 0 counts as 1.
pub fn paginate<T>(items: &[T], page_size: usize) -> Paginator<'_, T> {
    Paginator { pages: items.chunks(page_size.max(1)).collect() }
}

impl<'a, T> Paginator<'a, T> {
    pub fn len(&self) -> usize { self.pages.len() }

    pub fn is_empty(&self) -> bool { self.pages.is_empty() }

    pub fn page(&self, n: usize) -> Option<&'a [T]> { self.pages.get(n).copied() }

    pub fn iter(&self) -> impl Iterator<Item = &'a [T]> + '_ { self.pages.iter().copied() }
}

impl<'a, T> IntoIterator for Paginator<'a, T> {
    type Item = &'a [T];
    type IntoIter = std::vec::IntoIter<&'a [T]>;

    fn into_iter(self) -> Self::IntoIter { self.pages.into_iter() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_page_is_short() {
        let items = [1, 2, 3, 4, 5];
        let pages = paginate(&items, 2);
        assert_eq!(pages.len(), 3);
        assert_eq!(pages.page(2), Some(&[5][..]));
        assert_eq!(pages.iter().flatten().count(), 5);
    }

    #[test]
    fn empty_input_has_no_pages() {
        let items: [u8; 0] = [];
        assert!(paginate(&items, 3).is_empty());
    }

    #[test]
    fn zero_page_size_counts_as_one() {
        let pages: Vec<&[char]> = paginate(&['a', 'b'], 0).into_iter().collect();
        assert_eq!(pages, vec![&['a'][..], &['b'][..]]);
    }
}
