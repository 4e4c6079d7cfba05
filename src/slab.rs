use std::mem;
use std::num::NonZeroUsize;
use std::ops::{Index, IndexMut};

#[cfg(test)]
use static_assertions::const_assert_eq;

/// A handle to an occupied entry of a `Slab`
///
/// The handle stores `index + 1` so that `Option<Ptr>` uses the zero niche and an absent link
/// costs nothing extra.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Ptr(NonZeroUsize);

// Child links are stored as `Option<Ptr>`, so this must stay a single word to help with cache
#[cfg(test)]
const_assert_eq!(mem::size_of::<Option<Ptr>>(), mem::size_of::<usize>());

impl Ptr {
    #[inline(always)]
    fn from_index(index: usize) -> Self {
        match index.checked_add(1).and_then(NonZeroUsize::new) {
            Some(value) => Ptr(value),
            None => panic!("cannot have more than usize::MAX - 1 entries in slab"),
        }
    }

    #[inline(always)]
    pub fn index(self) -> usize {
        self.0.get() - 1
    }
}

#[derive(Debug, Clone)]
enum Entry<T> {
    Occupied(T),
    /// A removed entry, linking to the next entry in the free list
    Vacant(Option<Ptr>),
}

/// An allocation primitive similar to `Vec`, but implemented to reuse space from removed entries.
///
/// Items are kept contiguously in memory, but handles are not shifted when an individual item is
/// removed. Instead of always pushing items after the previously pushed item, the slab reuses
/// space from previously removed entries when possible, so a handle stays valid until the entry it
/// points to is removed.
#[derive(Debug, Clone)]
pub struct Slab<T> {
    entries: Vec<Entry<T>>,
    /// The first entry in the free list or `None` if the free list is empty
    ///
    /// The free list is a linked list stored in `entries` that is used as a stack to track which
    /// entries have space that can be reused in calls to `push`.
    free_head: Option<Ptr>,
    /// The number of occupied entries
    len: usize,
}

impl<T> Default for Slab<T> {
    fn default() -> Self {
        Self {
            entries: Vec::default(),
            free_head: None,
            len: 0,
        }
    }
}

impl<T> Slab<T> {
    /// Creates an empty slab
    ///
    /// The slab is initially created with a capacity of 0, so it will not allocate until it is
    /// first inserted into.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty slab with the specified capacity.
    ///
    /// The slab will be able to hold at least `capacity` elements without reallocating. If
    /// `capacity` is 0, the slab will not allocate.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            ..Self::default()
        }
    }

    /// Returns the number of entries in the slab that contain values
    ///
    /// This is the number of items pushed minus the number of items removed
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the slab is empty
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of elements the slab can hold without reallocating.
    pub fn capacity(&self) -> usize {
        self.entries.capacity()
    }

    /// Returns a reference to the value behind `ptr`, or `None` if that entry was removed
    pub fn get(&self, ptr: Ptr) -> Option<&T> {
        match self.entries.get(ptr.index())? {
            Entry::Occupied(value) => Some(value),
            Entry::Vacant(_) => None,
        }
    }

    /// Returns a mutable reference to the value behind `ptr`, or `None` if that entry was removed
    pub fn get_mut(&mut self, ptr: Ptr) -> Option<&mut T> {
        match self.entries.get_mut(ptr.index())? {
            Entry::Occupied(value) => Some(value),
            Entry::Vacant(_) => None,
        }
    }

    /// Pushes a value into the slab and returns a handle to it.
    ///
    /// The item may be placed at the end of the list, or in the space of an item that was
    /// previously removed.
    pub fn push(&mut self, value: T) -> Ptr {
        self.len += 1;

        // Check if we can reuse some space from the free list
        if let Some(free_head) = self.free_head {
            let entry = &mut self.entries[free_head.index()];
            if let Entry::Vacant(next) = *entry {
                self.free_head = next;
            }
            *entry = Entry::Occupied(value);

            return free_head;
        }

        let ptr = Ptr::from_index(self.entries.len());
        self.entries.push(Entry::Occupied(value));

        ptr
    }

    /// Removes an item from the slab, returning its value, or `None` if the entry was already
    /// removed.
    ///
    /// The space for the item will be reused in future calls to `push`. This does not move or
    /// modify any other entries in the slab. Their handles remain the same and can still be used.
    pub fn remove(&mut self, ptr: Ptr) -> Option<T> {
        let entry = self.entries.get_mut(ptr.index())?;
        if let Entry::Vacant(_) = entry {
            return None;
        }

        // Retrieve the value in this entry by swapping in a free entry
        let prev = mem::replace(entry, Entry::Vacant(self.free_head));
        self.free_head = Some(ptr);
        self.len -= 1;

        match prev {
            Entry::Occupied(value) => Some(value),
            Entry::Vacant(_) => None,
        }
    }

    /// Clears the slab, removing all values.
    ///
    /// Note that this method has no effect on the allocated capacity of the slab. This invalidates
    /// every handle previously returned from `push`.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.free_head = None;
        self.len = 0;
    }

    /// Reserves capacity for at least `additional` more elements to be inserted in the slab.
    pub fn reserve(&mut self, additional: usize) {
        self.entries.reserve(additional)
    }

    /// Shrinks the capacity of the slab as much as possible.
    ///
    /// Removed entries still occupy space until the slab is cleared.
    pub fn shrink_to_fit(&mut self) {
        self.entries.shrink_to_fit()
    }
}

impl<T> Index<Ptr> for Slab<T> {
    type Output = T;

    fn index(&self, ptr: Ptr) -> &T {
        match self.get(ptr) {
            Some(value) => value,
            None => panic!("slab entry {} is not occupied", ptr.index()),
        }
    }
}

impl<T> IndexMut<Ptr> for Slab<T> {
    fn index_mut(&mut self, ptr: Ptr) -> &mut T {
        match self.get_mut(ptr) {
            Some(value) => value,
            None => panic!("slab entry {} is not occupied", ptr.index()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ptr_api() {
        assert_eq!(Ptr::from_index(0).index(), 0);
        assert_eq!(Ptr::from_index(1).index(), 1);
        assert_eq!(Ptr::from_index(5).index(), 5);
        assert_ne!(Ptr::from_index(5), Ptr::from_index(4));
    }

    #[test]
    #[should_panic(expected = "cannot have more than")]
    fn ptr_overflow() {
        Ptr::from_index(usize::MAX);
    }

    #[test]
    fn slab_push_remove() {
        let mut slab = Slab::new();

        assert_eq!(slab.len(), 0);
        assert!(slab.is_empty());
        assert_eq!(slab.capacity(), 0);

        // Push a single value
        let ptr0 = slab.push(19384);
        assert_eq!(slab[ptr0], 19384);

        assert_eq!(slab.len(), 1);
        assert!(!slab.is_empty());
        assert!(slab.capacity() > 0);

        // Remove the only value in the slab
        assert_eq!(slab.remove(ptr0), Some(19384));
        assert_eq!(slab.get(ptr0), None);

        assert_eq!(slab.len(), 0);
        assert!(slab.is_empty());

        // Removing twice is a no-op
        assert_eq!(slab.remove(ptr0), None);
        assert_eq!(slab.len(), 0);

        // Push another value (reuses the freed space)
        let ptr0 = slab.push(831783);
        assert_eq!(slab[ptr0], 831783);
        assert_eq!(slab.len(), 1);

        // Push a second value
        let ptr1 = slab.push(57);
        assert_eq!(slab[ptr0], 831783);
        assert_eq!(slab[ptr1], 57);
        assert_eq!(slab.len(), 2);

        // Remove the first value (second should still be available at the same handle)
        assert_eq!(slab.remove(ptr0), Some(831783));
        assert_eq!(slab[ptr1], 57);
        assert_eq!(slab.len(), 1);

        // Push another value (ends up where the first value was)
        let ptr2 = slab.push(999);
        assert_eq!(ptr2, ptr0);
        assert_eq!(slab[ptr1], 57);
        assert_eq!(slab[ptr2], 999);
        assert_eq!(slab.len(), 2);
    }

    #[test]
    fn slab_free_list_is_a_stack() {
        let mut slab = Slab::new();
        let ptrs: Vec<_> = (0..4).map(|i| slab.push(i)).collect();

        slab.remove(ptrs[1]);
        slab.remove(ptrs[3]);

        // Most recently freed entry is reused first
        assert_eq!(slab.push(10), ptrs[3]);
        assert_eq!(slab.push(11), ptrs[1]);
        // Free list exhausted, so the slab grows
        let fresh = slab.push(12);
        assert_eq!(fresh.index(), 4);

        assert_eq!(slab[ptrs[0]], 0);
        assert_eq!(slab[ptrs[2]], 2);
        assert_eq!(slab.len(), 5);
    }

    #[test]
    fn slab_get_mut() {
        let mut slab = Slab::new();
        let ptr = slab.push(-12);

        *slab.get_mut(ptr).unwrap() *= -1;
        assert_eq!(slab[ptr], 12);

        slab[ptr] += 1;
        assert_eq!(slab.get(ptr), Some(&13));
    }

    #[test]
    #[should_panic(expected = "is not occupied")]
    fn index_removed_entry() {
        let mut slab = Slab::new();
        let ptr = slab.push("abc".to_string());
        slab.remove(ptr);
        let _ = &slab[ptr];
    }

    #[test]
    fn slab_clear() {
        let mut slab: Slab<String> = Slab::new();

        slab.push("abc".to_string());
        let ptr = slab.push("ddd".to_string());
        slab.remove(ptr);
        let capacity = slab.capacity();

        assert!(!slab.is_empty());
        slab.clear();
        assert!(slab.is_empty());
        assert_eq!(slab.capacity(), capacity);

        // insertions after clearing start from the beginning again
        let ptr = slab.push("qqq".to_string());
        assert_eq!(ptr.index(), 0);
        assert_eq!(slab.len(), 1);
    }

    #[test]
    fn drop_removed() {
        use std::sync::Arc;

        let mut slab = Slab::new();

        let ptr0;
        let weak_ref1;
        let weak_ref2;
        {
            let value1 = Arc::new(1);
            let value2 = Arc::new(2);
            weak_ref1 = Arc::downgrade(&value1);
            weak_ref2 = Arc::downgrade(&value2);

            ptr0 = slab.push(value1);
            slab.push(value2);
        }

        // Drop one of the values via remove, but then reuse the space
        drop(slab.remove(ptr0));
        let value3 = Arc::new(3);
        let weak_ref3 = Arc::downgrade(&value3);
        slab.push(value3);

        assert!(weak_ref1.upgrade().is_none());
        assert_eq!(*weak_ref2.upgrade().unwrap(), 2);
        assert_eq!(*weak_ref3.upgrade().unwrap(), 3);

        drop(slab);

        assert!(weak_ref2.upgrade().is_none());
        // Value that was in the reused space should still be dropped normally
        assert!(weak_ref3.upgrade().is_none());
    }

    #[test]
    fn slab_capacity() {
        let mut slab: Slab<String> = Slab::with_capacity(10);
        assert!(slab.capacity() >= 10);

        slab.reserve(20);
        assert!(slab.capacity() >= slab.len() + 20);

        slab.push("x".to_string());
        slab.shrink_to_fit();
        assert!(slab.capacity() >= slab.len());
    }
}
