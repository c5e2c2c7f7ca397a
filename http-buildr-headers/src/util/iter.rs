pub(crate) trait IterExt: Iterator {
    /// Yields the only item of the iterator,
    /// `None` if it was empty or had more than one item.
    fn just_one(&mut self) -> Option<Self::Item> {
        let one = self.next()?;
        match self.next() {
            Some(_) => None,
            None => Some(one),
        }
    }
}

impl<T: Iterator> IterExt for T {}
