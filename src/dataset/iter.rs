use super::{Dataset, Row};

/// Iterator over the rows of a dataset, in row order
pub struct RowIter<'a> {
    dataset: &'a Dataset,
    idx: usize,
}

impl<'a> RowIter<'a> {
    pub fn new(dataset: &'a Dataset) -> RowIter<'a> {
        RowIter { dataset, idx: 0 }
    }
}

impl<'a> Iterator for RowIter<'a> {
    type Item = Row<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.idx >= self.dataset.nsamples() {
            return None;
        }

        self.idx += 1;
        Some(self.dataset.row(self.idx - 1))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.dataset.nsamples() - self.idx;
        (remaining, Some(remaining))
    }
}

impl<'a> ExactSizeIterator for RowIter<'a> {}
