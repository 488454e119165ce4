use rand::{seq::SliceRandom, thread_rng};
use std::{collections::HashSet, hash::Hash};

pub trait SliceUtil {
    /// Returns `true` if the slice holds no value twice
    fn is_unique<T>(&self) -> bool
    where
        Self: AsRef<[T]>,
        T: Eq + Hash,
    {
        is_unique(self.as_ref())
    }

    fn shuffle<T>(&mut self)
    where
        Self: AsMut<[T]>,
    {
        shuffle(self.as_mut())
    }
}

impl<T> SliceUtil for [T] {}

#[macro_export]
macro_rules! assert_unique {
    ($slice:expr) => {{
        use $crate::slice::SliceUtil;
        let slice = &$slice[..];
        assert!(
            slice.is_unique(),
            "expected `{}` to hold unique values; actual={:?}",
            stringify!($slice),
            slice,
        );
    }};
}

#[macro_export]
macro_rules! assert_empty {
    ($e:expr) => {
        match &$e {
            actual if actual.is_empty() => {}
            actual => panic!("expected empty; actual={:?}", actual),
        }
    };
}

pub fn is_unique<T: Eq + Hash>(slice: &[T]) -> bool {
    let mut seen = HashSet::new();
    slice.iter().all(|value| seen.insert(value))
}

/// Puts the slice in a random order.
pub fn shuffle<T>(slice: &mut [T]) {
    SliceRandom::shuffle(slice, &mut thread_rng());
}
