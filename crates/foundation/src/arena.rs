use crate::handles::Handle;

#[derive(Debug, Clone)]
struct Slot<T> {
    generation: u32,
    value: Option<T>,
}

/// Generational arena.
///
/// Values are addressed by [`Handle`]. Removing a value bumps the slot
/// generation, so handles to removed values resolve to `None` even after the
/// slot is reused.
///
/// Ordering contract:
/// - `iter()` yields live values in ascending slot index order.
#[derive(Debug, Clone)]
pub struct Arena<T> {
    slots: Vec<Slot<T>>,
    free: Vec<u32>,
    len: usize,
}

impl<T> Default for Arena<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Arena<T> {
    pub fn new() -> Self {
        Arena {
            slots: Vec::new(),
            free: Vec::new(),
            len: 0,
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Arena {
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
            len: 0,
        }
    }

    pub fn alloc(&mut self, v: T) -> Handle {
        self.len += 1;
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.value = Some(v);
            return Handle::new(index, slot.generation);
        }
        let index = self.slots.len() as u32;
        self.slots.push(Slot {
            generation: 0,
            value: Some(v),
        });
        Handle::new(index, 0)
    }

    pub fn get(&self, handle: Handle) -> Option<&T> {
        self.slots
            .get(handle.index() as usize)
            .filter(|s| s.generation == handle.generation())
            .and_then(|s| s.value.as_ref())
    }

    pub fn get_mut(&mut self, handle: Handle) -> Option<&mut T> {
        self.slots
            .get_mut(handle.index() as usize)
            .filter(|s| s.generation == handle.generation())
            .and_then(|s| s.value.as_mut())
    }

    pub fn remove(&mut self, handle: Handle) -> Option<T> {
        let slot = self.slots.get_mut(handle.index() as usize)?;
        if slot.generation != handle.generation() {
            return None;
        }
        let value = slot.value.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(handle.index());
        self.len -= 1;
        Some(value)
    }

    pub fn contains(&self, handle: Handle) -> bool {
        self.get(handle).is_some()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = (Handle, &T)> + '_ {
        self.slots.iter().enumerate().filter_map(|(idx, s)| {
            s.value
                .as_ref()
                .map(|v| (Handle::new(idx as u32, s.generation), v))
        })
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Handle, &mut T)> + '_ {
        self.slots.iter_mut().enumerate().filter_map(|(idx, s)| {
            let generation = s.generation;
            s.value
                .as_mut()
                .map(|v| (Handle::new(idx as u32, generation), v))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::Arena;

    #[test]
    fn alloc_get_and_iterate_in_index_order() {
        let mut arena = Arena::new();
        let a = arena.alloc("a");
        let b = arena.alloc("b");
        assert_eq!(arena.get(a), Some(&"a"));
        assert_eq!(arena.get(b), Some(&"b"));
        let got: Vec<&str> = arena.iter().map(|(_, v)| *v).collect();
        assert_eq!(got, vec!["a", "b"]);
        assert_eq!(arena.len(), 2);
    }

    #[test]
    fn stale_handles_do_not_alias_reused_slots() {
        let mut arena = Arena::new();
        let a = arena.alloc(1);
        assert_eq!(arena.remove(a), Some(1));
        let b = arena.alloc(2);
        assert_eq!(a.index(), b.index());
        assert_eq!(arena.get(a), None);
        assert_eq!(arena.get(b), Some(&2));
        assert_eq!(arena.remove(a), None);
        assert_eq!(arena.len(), 1);
    }

    #[test]
    fn get_mut_updates_in_place() {
        let mut arena = Arena::new();
        let h = arena.alloc(10);
        if let Some(v) = arena.get_mut(h) {
            *v += 5;
        }
        assert_eq!(arena.get(h), Some(&15));
    }
}
