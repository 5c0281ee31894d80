//! Clue carousel state (rendering-agnostic)
//!
//! Holds the current clue index for one direction and cycles it with
//! wraparound. Frontends read `slides()` and `offset_percent()` to draw the
//! strip; observers registered with `on_settled` hear about every committed
//! index change exactly once.

use super::traits::Cyclable;
use crate::data::{ClueRecord, Direction, SharedClues};

/// Width of one slide, in percent of the viewport
pub const SLIDE_WIDTH_PERCENT: i64 = 100;

/// Snapshot handed to observers after an index change commits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettledIndex {
    pub direction: Direction,
    pub index: usize,
    pub offset_percent: i64,
}

type SettleObserver = Box<dyn FnMut(&SettledIndex)>;

/// Everything the clue renderer needs for one slide, borrowed from the source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlideDescriptor<'a> {
    /// Position of the slide in the strip (same as the clue's position)
    pub position: usize,
    pub direction: Direction,
    pub number: u32,
    pub complete: bool,
    pub correct: bool,
    pub text: &'a str,
}

impl<'a> SlideDescriptor<'a> {
    fn from_record(position: usize, direction: Direction, record: &'a ClueRecord) -> Self {
        Self {
            position,
            direction,
            number: record.number,
            complete: record.complete,
            correct: record.correct,
            text: &record.clue,
        }
    }
}

/// One direction's carousel
pub struct CarouselState {
    direction: Direction,
    label: Option<String>,
    clues: Option<SharedClues>,
    current_index: usize,
    observers: Vec<SettleObserver>,
}

impl CarouselState {
    /// Create a carousel at index 0. `clues` may be `None` while loading.
    pub fn new(direction: Direction, clues: Option<SharedClues>) -> Self {
        Self {
            direction,
            label: None,
            clues,
            current_index: 0,
            observers: Vec::new(),
        }
    }

    pub fn with_label(mut self, label: Option<String>) -> Self {
        self.label = label;
        self
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Header text: the label, or the upper-cased direction when no label is set
    pub fn header(&self) -> String {
        match self.label.as_deref() {
            Some(label) if !label.is_empty() => label.to_string(),
            _ => self.direction.as_str().to_uppercase(),
        }
    }

    pub fn clues(&self) -> Option<&SharedClues> {
        self.clues.as_ref()
    }

    /// Active sequence, `None` while the source or the direction is missing
    pub fn sequence(&self) -> Option<&[ClueRecord]> {
        self.clues.as_ref()?.get(self.direction)
    }

    pub fn len(&self) -> usize {
        self.sequence().map_or(0, <[ClueRecord]>::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// Clue in view, if any
    pub fn current(&self) -> Option<&ClueRecord> {
        self.sequence()?.get(self.current_index)
    }

    /// Advance one clue, wrapping from the last back to the first.
    /// No-op while the sequence is absent or empty.
    pub fn next(&mut self) {
        let len = self.len();
        if len == 0 {
            return;
        }
        self.commit((self.current_index + 1) % len);
    }

    /// Step back one clue, wrapping from the first to the last.
    /// No-op while the sequence is absent or empty.
    pub fn previous(&mut self) {
        let len = self.len();
        if len == 0 {
            return;
        }
        self.commit((self.current_index + len - 1) % len);
    }

    /// Strip offset for the current index: `-index * 100` percent of a slide
    pub fn offset_percent(&self) -> i64 {
        Self::offset_for(self.current_index)
    }

    fn offset_for(index: usize) -> i64 {
        -(index as i64) * SLIDE_WIDTH_PERCENT
    }

    /// One descriptor per clue, in sequence order, regardless of the current index
    pub fn slides(&self) -> impl Iterator<Item = SlideDescriptor<'_>> + '_ {
        let direction = self.direction;
        self.sequence()
            .into_iter()
            .flatten()
            .enumerate()
            .map(move |(position, record)| SlideDescriptor::from_record(position, direction, record))
    }

    /// Register a callback run once per committed index change
    pub fn on_settled<F>(&mut self, observer: F)
    where
        F: FnMut(&SettledIndex) + 'static,
    {
        self.observers.push(Box::new(observer));
    }

    /// Swap in a new clue source.
    ///
    /// The same `Arc` is ignored. A different one keeps the index when it is
    /// still in range for the new sequence and resets it to 0 otherwise.
    pub fn set_clues(&mut self, clues: Option<SharedClues>) {
        let same = match (&self.clues, &clues) {
            (Some(old), Some(new)) => SharedClues::ptr_eq(old, new),
            (None, None) => true,
            _ => false,
        };
        if same {
            return;
        }

        self.clues = clues;
        let len = self.len();
        tracing::debug!(
            direction = %self.direction,
            len,
            index = self.current_index,
            "Carousel clue source replaced"
        );
        if self.current_index >= len.max(1) {
            self.commit(0);
        }
    }

    fn commit(&mut self, index: usize) {
        if index == self.current_index {
            return;
        }
        self.current_index = index;
        tracing::debug!(direction = %self.direction, index, "Carousel index settled");

        let settled = SettledIndex {
            direction: self.direction,
            index,
            offset_percent: Self::offset_for(index),
        };
        for observer in &mut self.observers {
            observer(&settled);
        }
    }
}

impl std::fmt::Debug for CarouselState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CarouselState")
            .field("direction", &self.direction)
            .field("label", &self.label)
            .field("len", &self.len())
            .field("current_index", &self.current_index)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl Cyclable for CarouselState {
    fn cycle_forward(&mut self) {
        self.next();
    }

    fn cycle_backward(&mut self) {
        self.previous();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Clues;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn clues_of(direction: Direction, count: u32) -> SharedClues {
        let records = (1..=count)
            .map(|n| ClueRecord::new(n, format!("Clue {}", n)))
            .collect();
        Clues::new().with_sequence(direction, records).into_shared()
    }

    fn carousel_at(len: u32, index: usize) -> CarouselState {
        let mut carousel = CarouselState::new(Direction::Across, Some(clues_of(Direction::Across, len)));
        for _ in 0..index {
            carousel.next();
        }
        assert_eq!(carousel.current_index(), index);
        carousel
    }

    #[test]
    fn test_next_and_previous_wrap_for_every_index() {
        for len in 1..=6u32 {
            let l = len as usize;
            for i in 0..l {
                let mut fwd = carousel_at(len, i);
                fwd.next();
                assert_eq!(fwd.current_index(), (i + 1) % l, "next from {} of {}", i, l);

                let mut back = carousel_at(len, i);
                back.previous();
                assert_eq!(back.current_index(), (i + l - 1) % l, "previous from {} of {}", i, l);
            }
        }
    }

    #[test]
    fn test_boundaries_wrap() {
        let mut carousel = carousel_at(5, 4);
        carousel.next();
        assert_eq!(carousel.current_index(), 0);

        carousel.previous();
        assert_eq!(carousel.current_index(), 4);
    }

    #[test]
    fn test_next_len_times_is_round_trip() {
        for len in 1..=5u32 {
            for start in 0..len as usize {
                let mut carousel = carousel_at(len, start);
                for _ in 0..len {
                    carousel.next();
                }
                assert_eq!(carousel.current_index(), start);
            }
        }
    }

    #[test]
    fn test_absent_source_is_inert() {
        let mut carousel = CarouselState::new(Direction::Down, None);
        for _ in 0..3 {
            carousel.next();
            carousel.previous();
        }
        assert_eq!(carousel.current_index(), 0);
        assert_eq!(carousel.slides().count(), 0);
        assert_eq!(carousel.header(), "DOWN");
        assert!(carousel.current().is_none());
    }

    #[test]
    fn test_absent_direction_and_empty_sequence_are_inert() {
        // Source loaded but only has across clues
        let mut missing = CarouselState::new(Direction::Down, Some(clues_of(Direction::Across, 3)));
        missing.next();
        missing.previous();
        assert_eq!(missing.current_index(), 0);
        assert_eq!(missing.slides().count(), 0);

        let empty = Clues::new().with_sequence(Direction::Down, Vec::new()).into_shared();
        let mut carousel = CarouselState::new(Direction::Down, Some(empty));
        carousel.next();
        carousel.next();
        carousel.previous();
        assert_eq!(carousel.current_index(), 0);
        assert_eq!(carousel.slides().count(), 0);
    }

    #[test]
    fn test_single_clue_stays_put_without_notifying() {
        let mut carousel = CarouselState::new(Direction::Across, Some(clues_of(Direction::Across, 1)));
        let calls = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&calls);
        carousel.on_settled(move |_| *counter.borrow_mut() += 1);

        carousel.next();
        assert_eq!(carousel.current_index(), 0);
        assert_eq!(carousel.offset_percent(), 0);
        assert_eq!(*calls.borrow(), 0);
    }

    #[test]
    fn test_observer_sees_each_settled_index_once() {
        let mut carousel = CarouselState::new(Direction::Across, Some(clues_of(Direction::Across, 3)));
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        carousel.on_settled(move |settled| sink.borrow_mut().push(*settled));

        carousel.next();
        carousel.next();
        carousel.next();
        carousel.previous();

        let seen = seen.borrow();
        let indices: Vec<usize> = seen.iter().map(|s| s.index).collect();
        assert_eq!(indices, vec![1, 2, 0, 2]);
        assert_eq!(seen[1].offset_percent, -200);
        assert_eq!(seen[2].offset_percent, 0);
        assert!(seen.iter().all(|s| s.direction == Direction::Across));
    }

    #[test]
    fn test_offset_tracks_index() {
        let mut carousel = carousel_at(4, 0);
        for expected in [1usize, 2, 3, 0] {
            carousel.next();
            assert_eq!(carousel.offset_percent(), -(expected as i64) * 100);
        }
    }

    #[test]
    fn test_slides_follow_sequence_order_regardless_of_index() {
        let records = vec![
            ClueRecord::new(1, "Feline").with_status(true, true),
            ClueRecord::new(4, "Canine").with_status(true, false),
            ClueRecord::new(7, "Bovine"),
        ];
        let source = Clues::new().with_sequence(Direction::Across, records).into_shared();
        let mut carousel = CarouselState::new(Direction::Across, Some(source));
        carousel.next();
        carousel.next();

        let slides: Vec<SlideDescriptor<'_>> = carousel.slides().collect();
        assert_eq!(slides.len(), 3);
        assert_eq!(
            slides.iter().map(|s| s.number).collect::<Vec<_>>(),
            vec![1, 4, 7]
        );
        assert_eq!(slides[0].text, "Feline");
        assert!(slides[0].complete && slides[0].correct);
        assert!(slides[1].complete && !slides[1].correct);
        assert!(!slides[2].complete && !slides[2].correct);
        assert_eq!(slides[2].position, 2);
        assert!(slides.iter().all(|s| s.direction == Direction::Across));
    }

    #[test]
    fn test_header_prefers_non_empty_label() {
        let carousel = CarouselState::new(Direction::Across, None);
        assert_eq!(carousel.header(), "ACROSS");

        let carousel = CarouselState::new(Direction::Across, None).with_label(Some("Horizontal".into()));
        assert_eq!(carousel.header(), "Horizontal");

        let carousel = CarouselState::new(Direction::Down, None).with_label(Some(String::new()));
        assert_eq!(carousel.header(), "DOWN");
    }

    #[test]
    fn test_set_clues_keeps_in_range_index() {
        let mut carousel = carousel_at(5, 2);
        carousel.set_clues(Some(clues_of(Direction::Across, 4)));
        assert_eq!(carousel.current_index(), 2);
        assert_eq!(carousel.len(), 4);
    }

    #[test]
    fn test_set_clues_resets_out_of_range_index() {
        let mut carousel = carousel_at(5, 4);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        carousel.on_settled(move |settled| sink.borrow_mut().push(settled.index));

        carousel.set_clues(Some(clues_of(Direction::Across, 2)));
        assert_eq!(carousel.current_index(), 0);
        assert_eq!(*seen.borrow(), vec![0]);

        carousel.next();
        carousel.set_clues(None);
        assert_eq!(carousel.current_index(), 0);
        assert_eq!(carousel.slides().count(), 0);
    }

    #[test]
    fn test_set_clues_same_arc_is_ignored() {
        let source = clues_of(Direction::Across, 3);
        let mut carousel = CarouselState::new(Direction::Across, Some(SharedClues::clone(&source)));
        carousel.next();
        carousel.set_clues(Some(source));
        assert_eq!(carousel.current_index(), 1);
    }

    #[test]
    fn test_cyclable_delegates() {
        let mut carousel = carousel_at(3, 0);
        carousel.cycle_backward();
        assert_eq!(carousel.current_index(), 2);
        carousel.cycle_forward();
        assert_eq!(carousel.current_index(), 0);
    }
}
