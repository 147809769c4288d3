//! Page replacement
//!
//! A `ReplacementPolicy` owns the pool of physical frames and decides which
//! frame a newly faulted page occupies. `ClockReplacer` is the second-chance
//! implementation used by the simulator.

use std::fmt;

use log::{debug, trace};

use crate::translation::{FrameIndex, PageKey};

/// Outcome of asking the policy for a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameSelection {
    pub frame: FrameIndex,
    /// Page that occupied `frame` before, if the frame was not free
    pub evicted: Option<PageKey>,
}

pub trait ReplacementPolicy {
    /// Claim a frame for `page`, evicting its current occupant if necessary
    fn select_frame(&mut self, page: PageKey) -> FrameSelection;

    /// Record that `frame` was just used. Out-of-range frames are ignored.
    fn reference_frame(&mut self, frame: FrameIndex);

    /// Number of frames in the pool
    fn capacity(&self) -> usize;

    /// Page currently resident in `frame`
    fn resident(&self, frame: FrameIndex) -> Option<PageKey>;
}

#[derive(Debug, Clone)]
struct FrameSlot {
    page: Option<PageKey>,
    referenced: bool,
}

/// Clock (second-chance) replacement over a fixed ring of frames
#[derive(Debug, Clone)]
pub struct ClockReplacer {
    frames: Vec<FrameSlot>,
    hand: usize,
}

impl ClockReplacer {
    /// Create a pool of empty frames; a capacity of 0 is treated as 1
    pub fn new(capacity: usize) -> Self {
        ClockReplacer {
            frames: vec![FrameSlot { page: None, referenced: false }; capacity.max(1)],
            hand: 0,
        }
    }

    pub fn hand(&self) -> usize {
        self.hand
    }

    pub fn is_referenced(&self, frame: FrameIndex) -> bool {
        self.frames.get(frame).is_some_and(|slot| slot.referenced)
    }

    /// Number of frames holding a page
    pub fn occupied(&self) -> usize {
        self.frames.iter().filter(|slot| slot.page.is_some()).count()
    }

    fn claim(&mut self, frame: FrameIndex, page: PageKey) -> Option<PageKey> {
        let slot = &mut self.frames[frame];
        slot.referenced = true;
        slot.page.replace(page)
    }

    fn advance(&mut self) {
        self.hand = (self.hand + 1) % self.frames.len();
    }
}

impl ReplacementPolicy for ClockReplacer {
    fn select_frame(&mut self, page: PageKey) -> FrameSelection {
        if let Some(free) = self.frames.iter().position(|slot| slot.page.is_none()) {
            self.claim(free, page);
            return FrameSelection { frame: free, evicted: None };
        }

        // One pass clears every set bit, so the second pass must find a victim
        let limit = 2 * self.frames.len();
        for _ in 0..limit {
            if self.frames[self.hand].referenced {
                self.frames[self.hand].referenced = false;
                self.advance();
            } else {
                break;
            }
        }

        let victim = self.hand;
        let evicted = self.claim(victim, page);
        self.advance();
        if let Some(old) = evicted {
            debug!("clock evicted {} from frame {} for {}", old, victim, page);
            trace!("clock state: {}", self);
        }
        FrameSelection { frame: victim, evicted }
    }

    fn reference_frame(&mut self, frame: FrameIndex) {
        if let Some(slot) = self.frames.get_mut(frame) {
            slot.referenced = true;
        }
    }

    fn capacity(&self) -> usize {
        self.frames.len()
    }

    fn resident(&self, frame: FrameIndex) -> Option<PageKey> {
        self.frames.get(frame).and_then(|slot| slot.page)
    }
}

/// One `[frame:page,use=bit]` cell per frame, `-` for an empty frame
impl fmt::Display for ClockReplacer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, slot) in self.frames.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            match slot.page {
                Some(page) => write!(f, "[{}:{}", i, page)?,
                None => write!(f, "[{}:-", i)?,
            }
            write!(f, ",use={}]", u8::from(slot.referenced))?;
        }
        Ok(())
    }
}
