//! Fixed-capacity scrollback storage addressed by absolute row indices.
//!
//! A [`Ring`] holds up to `max` rows in a circular buffer while presenting a
//! window `[delta, delta + len)` of valid indices into an unbounded logical
//! history. New rows arrive at the tail and the oldest rows scroll off the
//! top, but callers keep addressing rows by the same monotonically increasing
//! absolute index for the whole session.
//!
//! The ring owns its rows. A disposal hook installed with
//! [`Ring::set_drop_hook`] observes every row the ring lets go of, whether by
//! eviction, overwrite, removal, or dropping the ring itself.

use std::fmt;

/// Scrollback ring buffer over opaque row objects.
pub struct Ring<T> {
    /// Absolute index of the logically-oldest live row.
    delta: i64,
    /// Count of live rows, `0..=slots.len()`.
    length: i64,
    /// Physical storage; the row at absolute index `p` lives in slot
    /// `p mod capacity`.
    slots: Vec<Option<T>>,
    /// One-slot memo of an absolute index and its physical slot.
    cached: Option<(i64, usize)>,
    drop_hook: Option<Box<dyn FnMut(T)>>,
}

impl<T> Ring<T> {
    /// Creates a ring able to hold up to `max_elements` rows at a time.
    /// Capacities below 2 are raised to 2.
    pub fn new(max_elements: usize) -> Self {
        let max = max_elements.max(2);
        let mut slots = Vec::with_capacity(max);
        slots.resize_with(max, || None);
        Self {
            delta: 0,
            length: 0,
            slots,
            cached: None,
            drop_hook: None,
        }
    }

    /// Like [`Ring::new`], but the first appended row gets absolute index
    /// `delta` instead of 0.
    pub fn new_with_delta(max_elements: usize, delta: i64) -> Self {
        let mut ring = Self::new(max_elements);
        ring.delta = delta;
        ring
    }

    /// Installs a hook observing every row the ring disposes of. Each row is
    /// handed to the hook at most once; without a hook rows are simply
    /// dropped.
    pub fn set_drop_hook(&mut self, hook: impl FnMut(T) + 'static) {
        self.drop_hook = Some(Box::new(hook));
    }

    /// Physical capacity chosen at construction.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Count of live rows.
    pub fn len(&self) -> usize {
        self.length as usize
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Absolute index of the oldest live row.
    pub fn delta(&self) -> i64 {
        self.delta
    }

    /// Absolute index the next appended row will get.
    pub fn next(&self) -> i64 {
        self.delta + self.length
    }

    /// Whether `position` addresses a live row.
    pub fn contains(&self, position: i64) -> bool {
        position >= self.delta && position < self.delta + self.length
    }

    fn slot_of(&self, position: i64) -> usize {
        position.rem_euclid(self.slots.len() as i64) as usize
    }

    /// O(1) lookup of the row at absolute index `position`.
    pub fn get(&self, position: i64) -> Option<&T> {
        if !self.contains(position) {
            return None;
        }
        if let Some((cached, slot)) = self.cached {
            if cached == position {
                return self.slots[slot].as_ref();
            }
        }
        self.slots[self.slot_of(position)].as_ref()
    }

    pub fn get_mut(&mut self, position: i64) -> Option<&mut T> {
        if !self.contains(position) {
            return None;
        }
        let slot = self.slot_of(position);
        self.slots[slot].as_mut()
    }

    /// Live rows, oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        (self.delta..self.next()).filter_map(move |p| self.slots[self.slot_of(p)].as_ref())
    }

    /// Memoizes the slot lookup for `position`; read-heavy callers fetch the
    /// same row over and over. Indices outside the live window clear the
    /// memo. Purely a performance feature: it never changes what [`get`]
    /// returns.
    ///
    /// [`get`]: Ring::get
    pub fn set_cache(&mut self, position: i64) {
        self.cached = self
            .contains(position)
            .then(|| (position, self.slot_of(position)));
    }

    pub fn invalidate_cache(&mut self) {
        self.cached = None;
    }

    fn dispose(&mut self, row: T) {
        if let Some(hook) = self.drop_hook.as_mut() {
            hook(row);
        }
    }

    fn invalidate_cache_at_or_above(&mut self, position: i64) {
        if let Some((cached, _)) = self.cached {
            if position <= cached {
                self.cached = None;
            }
        }
    }

    /// Inserts `data` at absolute index `position`, shifting later rows
    /// toward the tail.
    ///
    /// Appending to a full ring evicts the oldest row and advances `delta`.
    /// Inserting into the window of a full ring instead disposes of the
    /// current newest row, so everything from `position` up stays
    /// addressable. Positions outside `[delta, next()]` are ignored with a
    /// warning.
    pub fn insert(&mut self, position: i64, data: T) {
        if position < self.delta || position > self.next() {
            log::warn!(
                "ring insert at {} outside [{}, {}], ignored",
                position,
                self.delta,
                self.next()
            );
            return;
        }

        // Initial insertion, or append.
        if position == self.next() {
            let slot = self.slot_of(position);
            if let Some(stale) = self.slots[slot].take() {
                self.dispose(stale);
            }
            self.slots[slot] = Some(data);
            if self.length == self.slots.len() as i64 {
                // Full: the row just disposed of was the oldest one, and it
                // scrolls off the top.
                self.delta += 1;
                if let Some((cached, _)) = self.cached {
                    if self.delta > cached {
                        self.cached = None;
                    }
                }
            } else {
                self.length += 1;
            }
            self.debug_validate();
            return;
        }

        self.invalidate_cache_at_or_above(position);

        // Slot index the current last row will occupy after the shift.
        let mut point = self.delta + self.length - 1;
        if self.length == self.slots.len() as i64 {
            // Full: the newest row is lost so the buffer doesn't grow.
            let slot = self.slot_of(point);
            if let Some(last) = self.slots[slot].take() {
                self.dispose(last);
            }
        } else {
            point += 1;
        }

        // Bubble the remaining rows up toward the tail.
        let mut i = point;
        while i > position {
            let src = self.slot_of(i - 1);
            let moved = self.slots[src].take();
            let dst = self.slot_of(i);
            self.slots[dst] = moved;
            i -= 1;
        }

        let slot = self.slot_of(position);
        self.slots[slot] = Some(data);
        self.length = (self.length + 1).min(self.slots.len() as i64);
        self.debug_validate();
    }

    /// Appends `data` at the tail, evicting the oldest row when full.
    pub fn append(&mut self, data: T) {
        self.insert(self.next(), data);
    }

    /// Inserts `data` at `position` while preserving every existing row from
    /// `position` on; when the ring overflows, rows are evicted from the
    /// *top* instead.
    ///
    /// The tail `[position, next())` is detached without disposal, `data` is
    /// appended, and the saved rows are re-appended in order. Each re-append
    /// may advance `delta` exactly as a plain full append would.
    pub fn insert_preserve(&mut self, position: i64, data: T) {
        if position < self.delta || position > self.next() {
            log::warn!(
                "ring insert_preserve at {} outside [{}, {}], ignored",
                position,
                self.delta,
                self.next()
            );
            return;
        }

        self.invalidate_cache_at_or_above(position);

        // Detach the tail without running the disposal hook. Rows come out
        // newest-first.
        let point = self.next();
        let mut saved: Vec<T> = Vec::with_capacity((point - position) as usize);
        while self.next() > position {
            if let Some(row) = self.remove(self.next() - 1, false) {
                saved.push(row);
            }
        }

        self.insert(position, data);
        for row in saved.into_iter().rev() {
            self.append(row);
        }
        self.debug_validate();
    }

    /// Removes the row at `position`, shifting later rows down by one.
    ///
    /// With `free_element` the row goes to the disposal hook and `None` is
    /// returned; otherwise ownership passes back to the caller. Positions
    /// outside the live window are ignored with a warning.
    pub fn remove(&mut self, position: i64, free_element: bool) -> Option<T> {
        if !self.contains(position) {
            log::warn!(
                "ring remove at {} outside [{}, {}), ignored",
                position,
                self.delta,
                self.next()
            );
            return None;
        }

        self.invalidate_cache_at_or_above(position);

        let slot = self.slot_of(position);
        let row = self.slots[slot].take();

        // Bubble the rest of the buffer down one notch; the vacated tail
        // slot ends up empty.
        let mut i = position;
        while i < self.delta + self.length - 1 {
            let src = self.slot_of(i + 1);
            let moved = self.slots[src].take();
            let dst = self.slot_of(i);
            self.slots[dst] = moved;
            i += 1;
        }
        if self.length > 0 {
            self.length -= 1;
        }
        self.debug_validate();

        match row {
            Some(row) if free_element => {
                self.dispose(row);
                None
            }
            row => row,
        }
    }

    #[cfg(debug_assertions)]
    fn debug_validate(&self) {
        debug_assert!(self.length >= 0);
        debug_assert!(self.length as usize <= self.slots.len());
        for p in self.delta..self.next() {
            debug_assert!(self.slots[self.slot_of(p)].is_some());
        }
        if let Some((p, slot)) = self.cached {
            debug_assert!(self.contains(p));
            debug_assert_eq!(slot, self.slot_of(p));
        }
    }

    #[cfg(not(debug_assertions))]
    fn debug_validate(&self) {}
}

impl<T> Drop for Ring<T> {
    fn drop(&mut self) {
        // Sweep the whole physical array, not just the live window, so any
        // straggler reaches the hook.
        for slot in 0..self.slots.len() {
            if let Some(row) = self.slots[slot].take() {
                if let Some(hook) = self.drop_hook.as_mut() {
                    hook(row);
                }
            }
        }
    }
}

impl<T> fmt::Debug for Ring<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ring")
            .field("delta", &self.delta)
            .field("length", &self.length)
            .field("max", &self.slots.len())
            .field("cached", &self.cached.map(|(p, _)| p))
            .finish()
    }
}
