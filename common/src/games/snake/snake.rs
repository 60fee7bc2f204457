use std::collections::{HashSet, VecDeque};

use super::types::Point;

/// Ordered body, head at the front, mirrored into a set for occupancy checks.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snake {
    body: VecDeque<Point>,
    body_set: HashSet<Point>,
}

impl Snake {
    pub fn new(start_pos: Point) -> Self {
        Self::from_segments([start_pos])
    }

    /// Builds a snake from head-to-tail segments. Duplicates are dropped.
    pub fn from_segments(segments: impl IntoIterator<Item = Point>) -> Self {
        let mut body = VecDeque::new();
        let mut body_set = HashSet::new();
        for segment in segments {
            if body_set.insert(segment) {
                body.push_back(segment);
            }
        }
        Self { body, body_set }
    }

    pub fn head(&self) -> Point {
        *self.body.front().expect("Snake body should never be empty")
    }

    pub fn tail(&self) -> Point {
        *self.body.back().expect("Snake body should never be empty")
    }

    pub fn body(&self) -> &VecDeque<Point> {
        &self.body
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn occupies(&self, pos: Point) -> bool {
        self.body_set.contains(&pos)
    }

    /// Occupancy excluding the head. The tail still counts even though it is
    /// about to move, so stepping into it is a collision.
    pub fn collides_with_body(&self, pos: Point) -> bool {
        self.occupies(pos) && pos != self.head()
    }

    pub fn push_head(&mut self, pos: Point) {
        self.body.push_front(pos);
        self.body_set.insert(pos);
    }

    pub fn pop_tail(&mut self) -> Option<Point> {
        let tail = self.body.pop_back()?;
        self.body_set.remove(&tail);
        Some(tail)
    }
}
