//! Queue / list operations
//!
//! Queues are addressed by name. Which end a push, pop or trim works on is
//! chosen by [`Direction`], which maps to the `*_front` / `*_back` command.
//! Unless stated otherwise, pushes go to the back and pops come from the
//! front.

use crate::error::Result;
use crate::network::Transport;
use crate::protocol::{keyed, range, Arg, Command, Direction, Order, Range};

use super::Client;

impl<T: Transport> Client<T> {
    // =========================================================================
    // Size
    // =========================================================================

    /// Number of elements; 0 for a missing queue
    pub fn qsize(&mut self, name: &str) -> Result<i64> {
        self.request(keyed("qsize", name))
    }

    pub fn qclear(&mut self, name: &str) -> Result<()> {
        self.request(keyed("qclear", name))
    }

    // =========================================================================
    // Push / Pop
    // =========================================================================

    /// Push one or more values onto `direction`'s end, returning the new
    /// length. An empty `values` sends nothing and returns 0.
    pub fn qpush<I, V>(&mut self, name: &str, values: I, direction: Direction) -> Result<i64>
    where
        I: IntoIterator<Item = V>,
        V: Into<Arg>,
    {
        let mut command = keyed(direction.push_command(), name);
        command.extend(values);
        if command.args().len() == 1 {
            return Ok(0);
        }
        self.request(command)
    }

    pub fn qpush_front<I, V>(&mut self, name: &str, values: I) -> Result<i64>
    where
        I: IntoIterator<Item = V>,
        V: Into<Arg>,
    {
        self.qpush(name, values, Direction::Front)
    }

    pub fn qpush_back<I, V>(&mut self, name: &str, values: I) -> Result<i64>
    where
        I: IntoIterator<Item = V>,
        V: Into<Arg>,
    {
        self.qpush(name, values, Direction::Back)
    }

    /// Remove and return one element; `""` if the queue is empty
    pub fn qpop(&mut self, name: &str, direction: Direction) -> Result<String> {
        self.request(keyed(direction.pop_command(), name))
    }

    pub fn qpop_front(&mut self, name: &str) -> Result<String> {
        self.qpop(name, Direction::Front)
    }

    pub fn qpop_back(&mut self, name: &str) -> Result<String> {
        self.qpop(name, Direction::Back)
    }

    /// Remove and return up to `size` elements in pop order
    pub fn qpop_many(&mut self, name: &str, size: i64, direction: Direction) -> Result<Vec<String>> {
        self.request(keyed(direction.pop_command(), name).arg(size))
    }

    // =========================================================================
    // Trim
    // =========================================================================

    /// Drop up to `size` elements from one end, returning how many went
    pub fn qtrim(&mut self, name: &str, size: i64, direction: Direction) -> Result<i64> {
        self.request(keyed(direction.trim_command(), name).arg(size))
    }

    pub fn qtrim_front(&mut self, name: &str, size: i64) -> Result<i64> {
        self.qtrim(name, size, Direction::Front)
    }

    pub fn qtrim_back(&mut self, name: &str, size: i64) -> Result<i64> {
        self.qtrim(name, size, Direction::Back)
    }

    // =========================================================================
    // Windows
    // =========================================================================

    /// Elements with index in `[begin, end]`; negative indexes count from
    /// the back (`qslice(name, 0, -1)` is the whole queue)
    pub fn qslice(&mut self, name: &str, begin: i64, end: i64) -> Result<Vec<String>> {
        self.request(keyed("qslice", name).arg(begin).arg(end))
    }

    /// At most `limit` elements starting at `offset` (negative counts from
    /// the back)
    pub fn qrange(&mut self, name: &str, offset: i64, limit: i64) -> Result<Vec<String>> {
        self.request(keyed("qrange", name).arg(offset).arg(limit))
    }

    // =========================================================================
    // Indexed Access
    // =========================================================================

    /// Replace the element at `index`. An index outside the queue is
    /// rejected by the store.
    pub fn qset(&mut self, name: &str, index: i64, value: impl Into<Arg>) -> Result<()> {
        self.request(Command::new("qset").arg(name).arg(index).arg(value))
    }

    /// Element at `index` (`-1` is the last one); `""` when out of range
    pub fn qget(&mut self, name: &str, index: i64) -> Result<String> {
        self.request(keyed("qget", name).arg(index))
    }

    pub fn qfront(&mut self, name: &str) -> Result<String> {
        self.request(keyed("qfront", name))
    }

    pub fn qback(&mut self, name: &str) -> Result<String> {
        self.request(keyed("qback", name))
    }

    // =========================================================================
    // Names
    // =========================================================================

    /// Names of queues in `(start, end]`
    pub fn qlist(&mut self, window: &Range) -> Result<Vec<String>> {
        self.request(range(Order::Forward.qlist_command(), None, window))
    }

    pub fn qrlist(&mut self, window: &Range) -> Result<Vec<String>> {
        self.request(range(Order::Reverse.qlist_command(), None, window))
    }
}
