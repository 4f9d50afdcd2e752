// Row container capability
//
// The splitter and decoder only ever push to the back of whatever the caller
// hands them, so any ordered container with an append operation will do.

use std::collections::{LinkedList, VecDeque};

/// An ordered container that can grow at the end.
pub trait Appendable<T> {
    fn append(&mut self, value: T);
}

impl<T> Appendable<T> for Vec<T> {
    #[inline]
    fn append(&mut self, value: T) {
        self.push(value);
    }
}

impl<T> Appendable<T> for VecDeque<T> {
    #[inline]
    fn append(&mut self, value: T) {
        self.push_back(value);
    }
}

impl<T> Appendable<T> for LinkedList<T> {
    #[inline]
    fn append(&mut self, value: T) {
        self.push_back(value);
    }
}
