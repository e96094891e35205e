//! Non-owning texture handle registry
//!
//! Draw commands carry a [`TextureId`]. The registry maps it to a weak
//! reference, so a texture dropped by its owner simply stops resolving.

use std::rc::{Rc, Weak};

use slotmap::{DefaultKey, Key, KeyData, SlotMap};

use crate::gui::TextureId;

/// Maps texture identifiers to weak texture references
#[derive(Debug)]
pub struct TextureRegistry<T> {
    slots: SlotMap<DefaultKey, Weak<T>>,
}

impl<T> Default for TextureRegistry<T> {
    fn default() -> Self {
        Self { slots: SlotMap::new() }
    }
}

impl<T> TextureRegistry<T> {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a texture without taking ownership of it
    pub fn register(&mut self, texture: &Rc<T>) -> TextureId {
        let key = self.slots.insert(Rc::downgrade(texture));
        TextureId(key.data().as_ffi())
    }

    /// The live texture behind `id`
    ///
    /// `None` for unknown, unregistered or dropped textures.
    pub fn resolve(&self, id: TextureId) -> Option<Rc<T>> {
        self.slots.get(key_for(id)).and_then(Weak::upgrade)
    }

    /// Forget `id`; returns whether it was registered
    pub fn unregister(&mut self, id: TextureId) -> bool {
        self.slots.remove(key_for(id)).is_some()
    }

    /// Drop entries whose texture no longer exists; returns how many
    pub fn purge(&mut self) -> usize {
        let before = self.slots.len();
        self.slots.retain(|_, texture| texture.strong_count() > 0);
        before - self.slots.len()
    }

    /// Registered entries, live or not
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether nothing is registered
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Forget every entry
    pub fn clear(&mut self) {
        self.slots.clear();
    }
}

fn key_for(id: TextureId) -> DefaultKey {
    KeyData::from_ffi(id.0).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolves_while_owner_lives() {
        let mut registry = TextureRegistry::new();
        let texture = Rc::new("font atlas");
        let id = registry.register(&texture);

        assert_eq!(registry.resolve(id).as_deref(), Some(&"font atlas"));
        assert_eq!(Rc::strong_count(&texture), 1);

        drop(texture);
        assert!(registry.resolve(id).is_none());
        assert_eq!(registry.purge(), 1);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_unregistered_and_unknown_ids() {
        let mut registry = TextureRegistry::new();
        let texture = Rc::new(7_u32);
        let id = registry.register(&texture);

        assert!(registry.unregister(id));
        assert!(!registry.unregister(id));
        assert!(registry.resolve(id).is_none());
        assert!(registry.resolve(TextureId(0)).is_none());
        assert!(registry.resolve(TextureId(u64::MAX)).is_none());
    }

    #[test]
    fn test_stale_id_does_not_alias_new_texture() {
        let mut registry = TextureRegistry::new();
        let first = Rc::new(1_u32);
        let stale = registry.register(&first);
        registry.unregister(stale);

        let second = Rc::new(2_u32);
        let fresh = registry.register(&second);
        assert_ne!(stale, fresh);
        assert!(registry.resolve(stale).is_none());
        assert_eq!(registry.resolve(fresh).as_deref(), Some(&2));
    }
}
