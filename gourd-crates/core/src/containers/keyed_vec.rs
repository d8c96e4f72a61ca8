use std::marker::PhantomData;
use std::ops::Index;
use std::ops::IndexMut;

/// A vector that can only be indexed by keys of type `Key`.
///
/// Every store inside a [`Space`](crate::Space) is a [`KeyedVec`]; the keys handed out by
/// [`KeyedVec::push`] stay valid in every clone of the space, so a handle obtained while
/// modelling can be used on any node of the search tree.
#[derive(Debug, Hash, PartialEq, Eq)]
pub struct KeyedVec<Key, Value> {
    key: PhantomData<Key>,
    elements: Vec<Value>,
}

impl<Key, Value: Clone> Clone for KeyedVec<Key, Value> {
    fn clone(&self) -> Self {
        Self {
            key: PhantomData,
            elements: self.elements.clone(),
        }
    }
}

impl<Key, Value> Default for KeyedVec<Key, Value> {
    fn default() -> Self {
        Self {
            key: PhantomData,
            elements: Vec::default(),
        }
    }
}

impl<Key: StorageKey, Value> KeyedVec<Key, Value> {
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Add a new value to the vector.
    ///
    /// Returns the key for the inserted value.
    pub fn push(&mut self, value: Value) -> Key {
        self.elements.push(value);

        Key::create_from_index(self.elements.len() - 1)
    }

    /// Reserve a slot for a value which needs to know its own key before it can be created.
    pub fn new_slot(&mut self) -> Slot<'_, Key, Value> {
        Slot { vec: self }
    }

    pub fn get(&self, key: Key) -> Option<&Value> {
        self.elements.get(key.index())
    }

    pub fn get_mut(&mut self, key: Key) -> Option<&mut Value> {
        self.elements.get_mut(key.index())
    }

    /// Iterate over the values in the vector.
    pub fn iter(&self) -> impl Iterator<Item = &'_ Value> {
        self.elements.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = Key> {
        (0..self.elements.len()).map(Key::create_from_index)
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &'_ mut Value> {
        self.elements.iter_mut()
    }
}

impl<Key: StorageKey, Value: Clone> KeyedVec<Key, Value> {
    /// Grow the vector such that `key` can be used to index it.
    pub(crate) fn accomodate(&mut self, key: Key, default_value: Value) {
        if key.index() >= self.elements.len() {
            self.elements.resize(key.index() + 1, default_value);
        }
    }
}

impl<Key: StorageKey, Value> Index<Key> for KeyedVec<Key, Value> {
    type Output = Value;

    fn index(&self, index: Key) -> &Self::Output {
        &self.elements[index.index()]
    }
}

impl<Key: StorageKey, Value> Index<&Key> for KeyedVec<Key, Value> {
    type Output = Value;

    fn index(&self, index: &Key) -> &Self::Output {
        &self.elements[index.index()]
    }
}

impl<Key: StorageKey, Value> IndexMut<Key> for KeyedVec<Key, Value> {
    fn index_mut(&mut self, index: Key) -> &mut Self::Output {
        &mut self.elements[index.index()]
    }
}

impl StorageKey for usize {
    fn index(&self) -> usize {
        *self
    }

    fn create_from_index(index: usize) -> Self {
        index
    }
}

/// A simple trait which requires that the structures implementing this trait can generate an index.
pub trait StorageKey: Clone {
    fn index(&self) -> usize;

    fn create_from_index(index: usize) -> Self;
}

/// A reserved slot for a new value in a [`KeyedVec`].
#[derive(Debug)]
pub struct Slot<'a, Key, Value> {
    vec: &'a mut KeyedVec<Key, Value>,
}

impl<Key: StorageKey, Value> Slot<'_, Key, Value> {
    /// The key this slot will have.
    pub fn key(&self) -> Key {
        Key::create_from_index(self.vec.len())
    }

    /// Populate the slot with a value.
    pub fn populate(self, value: Value) -> Key {
        self.vec.push(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_handed_out_in_insertion_order() {
        let mut vec: KeyedVec<usize, &str> = KeyedVec::default();
        let a = vec.push("a");
        let b = vec.push("b");

        assert_eq!(a, 0);
        assert_eq!(b, 1);
        assert_eq!(vec[b], "b");
    }

    #[test]
    fn slot_knows_its_key_before_population() {
        let mut vec: KeyedVec<usize, usize> = KeyedVec::default();
        let _ = vec.push(10);

        let slot = vec.new_slot();
        let key = slot.key();
        let populated = slot.populate(key * 2);

        assert_eq!(key, populated);
        assert_eq!(vec[1], 2);
    }

    #[test]
    fn clones_do_not_share_elements() {
        let mut vec: KeyedVec<usize, i32> = KeyedVec::default();
        let key = vec.push(1);
        let mut copy = vec.clone();
        copy[key] = 5;

        assert_eq!(vec[key], 1);
        assert_eq!(copy[key], 5);
    }
}
