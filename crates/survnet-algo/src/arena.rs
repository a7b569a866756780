//! Arena allocation context for per-scenario working state.
//!
//! Reachability testing needs a fresh "working topology" for every failure
//! scenario: a disabled-edge set, component labels, a BFS queue. These live in a
//! bumpalo arena that is reset between scenarios, so no scenario ever sees the
//! state of another.

use bumpalo::Bump;

/// Arena context for scenario-scoped allocations.
///
/// Created once per worker, reset between scenarios.
///
/// # Example
///
/// ```
/// use survnet_algo::arena::ArenaContext;
///
/// let mut ctx = ArenaContext::new();
/// {
///     let mut disabled = ctx.alloc_hashset::<usize>();
///     disabled.insert(3);
/// }
/// ctx.reset();
/// ```
pub struct ArenaContext {
    bump: Bump,
}

impl ArenaContext {
    pub fn new() -> Self {
        Self { bump: Bump::new() }
    }

    /// Reset arena for reuse (O(1) operation).
    ///
    /// Frees everything allocated for the previous scenario without running
    /// destructors; arena contents here are plain indices.
    pub fn reset(&mut self) {
        self.bump.reset();
    }

    pub fn alloc_vec<T>(&self) -> bumpalo::collections::Vec<'_, T> {
        bumpalo::collections::Vec::new_in(&self.bump)
    }

    /// Arena Vec of `len` copies of `value`.
    pub fn alloc_vec_filled<T: Clone>(
        &self,
        len: usize,
        value: T,
    ) -> bumpalo::collections::Vec<'_, T> {
        let mut vec = bumpalo::collections::Vec::with_capacity_in(len, &self.bump);
        vec.resize(len, value);
        vec
    }

    pub fn alloc_hashset<T: Eq + std::hash::Hash>(
        &self,
    ) -> hashbrown::HashSet<T, hashbrown::DefaultHashBuilder, &Bump> {
        hashbrown::HashSet::new_in(&self.bump)
    }
}

impl Default for ArenaContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filled_vec() {
        let ctx = ArenaContext::new();
        let labels = ctx.alloc_vec_filled(4, usize::MAX);
        assert_eq!(labels.len(), 4);
        assert!(labels.iter().all(|&l| l == usize::MAX));
    }

    #[test]
    fn test_hashset_dedups() {
        let ctx = ArenaContext::new();
        let mut set = ctx.alloc_hashset::<usize>();
        set.insert(1);
        set.insert(2);
        set.insert(1);
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_reset_allows_reuse() {
        let mut ctx = ArenaContext::new();
        {
            let mut queue = ctx.alloc_vec::<usize>();
            queue.extend(0..1000);
        }
        ctx.reset();
        let mut queue = ctx.alloc_vec::<usize>();
        queue.push(42);
        assert_eq!(queue[0], 42);
    }

    #[test]
    fn test_arena_context_is_send() {
        fn assert_send<T: Send>() {}
        assert_send::<ArenaContext>();
    }
}
