/*
 * Copyright © 2024 Volodymyr Kadzhaia
 * Copyright © 2024 Pieter Bonte
 * KU Leuven — Stream Intelligence Lab, Belgium
 *
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this file,
 * you can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! [`Arena`] owns the facts and rules of a knowledge base and hands out
//! typed [`ID`]s for them. IDs come from a serial counter and are never
//! reused, so an ID of a removed entry simply stops resolving.

use std::collections::BTreeMap;
use std::fmt::Debug;
use std::marker::PhantomData;

/// Typed handle to an entry of an [`Arena<T>`].
pub struct ID<T> {
    index: u64,
    _marker: PhantomData<fn() -> T>,
}

impl<T> ID<T> {
    pub const fn new(index: u64) -> Self {
        Self {
            index,
            _marker: PhantomData,
        }
    }

    pub const fn index(&self) -> u64 {
        self.index
    }
}

impl<T> Debug for ID<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ID({})", self.index)
    }
}

impl<T> Clone for ID<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for ID<T> {}

impl<T> PartialEq for ID<T> {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index
    }
}

impl<T> Eq for ID<T> {}

impl<T> PartialOrd for ID<T> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for ID<T> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.index.cmp(&other.index)
    }
}

impl<T> std::hash::Hash for ID<T> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.index.hash(state);
    }
}

/// Insertion-ordered storage keyed by [`ID`].
///
/// Iteration follows ID order, which is also insertion order since the
/// counter only moves forward.
#[derive(Debug, Clone)]
pub struct Arena<T> {
    next: u64,
    items: BTreeMap<ID<T>, T>,
}

impl<T> Default for Arena<T> {
    fn default() -> Self {
        Self {
            next: 0,
            items: BTreeMap::new(),
        }
    }
}

impl<T> Arena<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn insert(&mut self, item: T) -> ID<T> {
        let id = ID::new(self.next);
        self.next += 1;
        self.items.insert(id, item);
        id
    }

    pub fn get(&self, id: ID<T>) -> Option<&T> {
        self.items.get(&id)
    }

    pub fn get_mut(&mut self, id: ID<T>) -> Option<&mut T> {
        self.items.get_mut(&id)
    }

    pub fn contains_id(&self, id: ID<T>) -> bool {
        self.items.contains_key(&id)
    }

    pub fn remove(&mut self, id: ID<T>) -> Option<T> {
        self.items.remove(&id)
    }

    pub fn ids(&self) -> impl ExactSizeIterator<Item = ID<T>> + '_ {
        self.items.keys().copied()
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = (ID<T>, &T)> {
        self.items.iter().map(|(id, item)| (*id, item))
    }

    pub fn items(&self) -> impl ExactSizeIterator<Item = &T> {
        self.items.values()
    }
}
