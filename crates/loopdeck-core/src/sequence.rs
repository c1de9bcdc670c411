#![forbid(unsafe_code)]

//! The padded item sequence.
//!
//! A looping carousel with `N` originals and `K` clones per side mounts
//!
//! ```text
//! [clone(N-K) … clone(N-1)] [original(0) … original(N-1)] [clone(0) … clone(K-1)]
//!  ^ leading clones          ^ originals                   ^ trailing clones
//! ```
//!
//! [`Sequence`] is the logical model of that layout. Rendering it into the DOM
//! is a separate step owned by the front end; every slot records which
//! original it presents so that step can copy the right node.

use crate::config::CarouselConfig;

/// Whether a mounted slot is page content or a presentational copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Original,
    Clone,
}

/// One mounted position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Slot {
    pub role: Role,
    /// Index of the original this slot presents.
    pub source: usize,
}

impl Slot {
    #[must_use]
    pub const fn original(source: usize) -> Self {
        Self {
            role: Role::Original,
            source,
        }
    }

    #[must_use]
    pub const fn clone_of(source: usize) -> Self {
        Self {
            role: Role::Clone,
            source,
        }
    }

    #[must_use]
    pub const fn is_clone(&self) -> bool {
        matches!(self.role, Role::Clone)
    }
}

/// Ordered list of mounted slots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sequence {
    originals: usize,
    clones: usize,
    slots: Vec<Slot>,
}

impl Sequence {
    /// Clones per side for `originals` items under `config`.
    ///
    /// Zero when there are too few items to loop.
    #[must_use]
    pub fn clone_count_for(originals: usize, config: &CarouselConfig) -> usize {
        if originals < config.min_loop_items {
            return 0;
        }
        originals.min(config.max_clones)
    }

    /// Build the padded layout with `clones` copies on each side.
    ///
    /// `clones` is capped at `originals`.
    #[must_use]
    pub fn fabricate(originals: usize, clones: usize) -> Self {
        let clones = clones.min(originals);
        let mut slots = Vec::with_capacity(originals + 2 * clones);
        slots.extend((originals - clones..originals).map(Slot::clone_of));
        slots.extend((0..originals).map(Slot::original));
        slots.extend((0..clones).map(Slot::clone_of));
        Self {
            originals,
            clones,
            slots,
        }
    }

    /// Layout for `originals` items as decided by `config`.
    #[must_use]
    pub fn for_config(originals: usize, config: &CarouselConfig) -> Self {
        Self::fabricate(originals, Self::clone_count_for(originals, config))
    }

    #[must_use]
    pub const fn original_count(&self) -> usize {
        self.originals
    }

    /// Clones on each side (`K`).
    #[must_use]
    pub const fn clone_count(&self) -> usize {
        self.clones
    }

    /// Mounted slot count, `N + 2K`.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Whether boundary clones exist.
    #[must_use]
    pub const fn is_looping(&self) -> bool {
        self.clones > 0
    }

    #[must_use]
    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    #[must_use]
    pub fn get(&self, mounted: usize) -> Option<Slot> {
        self.slots.get(mounted).copied()
    }

    /// Clones mounted before the first original, in mount order.
    #[must_use]
    pub fn leading_clones(&self) -> &[Slot] {
        &self.slots[..self.clones]
    }

    /// Clones mounted after the last original, in mount order.
    #[must_use]
    pub fn trailing_clones(&self) -> &[Slot] {
        &self.slots[self.clones + self.originals..]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    #[test]
    fn five_items_get_four_clones_each_side() {
        let seq = Sequence::for_config(5, &CarouselConfig::default());
        assert_eq!(seq.clone_count(), 4);
        assert_eq!(seq.len(), 13);
        let sources: Vec<usize> = seq.slots().iter().map(|s| s.source).collect();
        assert_eq!(sources, vec![1, 2, 3, 4, 0, 1, 2, 3, 4, 0, 1, 2, 3]);
        assert!(seq.leading_clones().iter().all(Slot::is_clone));
        assert!(seq.trailing_clones().iter().all(Slot::is_clone));
        assert!(seq.slots()[4..9].iter().all(|s| !s.is_clone()));
    }

    #[test]
    fn three_items_clone_everything() {
        let seq = Sequence::for_config(3, &CarouselConfig::default());
        assert_eq!(seq.clone_count(), 3);
        let sources: Vec<usize> = seq.slots().iter().map(|s| s.source).collect();
        assert_eq!(sources, vec![0, 1, 2, 0, 1, 2, 0, 1, 2]);
    }

    #[test]
    fn two_or_fewer_items_never_loop() {
        for n in 0..=2 {
            let seq = Sequence::for_config(n, &CarouselConfig::default());
            assert!(!seq.is_looping(), "n={n}");
            assert_eq!(seq.len(), n);
            assert!(seq.leading_clones().is_empty());
            assert!(seq.trailing_clones().is_empty());
        }
    }

    #[test]
    fn originals_follow_leading_clones() {
        let seq = Sequence::for_config(6, &CarouselConfig::default());
        assert_eq!(seq.get(3).map(|s| s.is_clone()), Some(true));
        assert_eq!(seq.get(4), Some(Slot::original(0)));
        assert_eq!(seq.get(9), Some(Slot::original(5)));
    }

    #[test]
    fn fabricate_caps_clones_at_originals() {
        let seq = Sequence::fabricate(2, 7);
        assert_eq!(seq.clone_count(), 2);
        assert_eq!(seq.len(), 6);
    }

    proptest! {
        #[test]
        fn padded_layout_invariants(n in 0usize..64, max in 1usize..8) {
            let config = CarouselConfig::default().with_max_clones(max);
            let seq = Sequence::for_config(n, &config);
            let k = seq.clone_count();

            if n <= 2 {
                prop_assert_eq!(k, 0);
            } else {
                prop_assert_eq!(k, n.min(max));
            }
            prop_assert!(k <= n);
            prop_assert_eq!(seq.len(), n + 2 * k);

            // Leading clones copy the tail, trailing clones copy the head.
            for (i, slot) in seq.leading_clones().iter().enumerate() {
                prop_assert_eq!(slot.source, n - k + i);
            }
            for (i, slot) in seq.trailing_clones().iter().enumerate() {
                prop_assert_eq!(slot.source, i);
            }

            // Each slot shows the same original as the slot N positions away.
            for i in 0..seq.len().saturating_sub(n) {
                prop_assert_eq!(seq.slots()[i].source, seq.slots()[i + n].source);
            }
        }
    }
}
