use crate::api::types::EntityId;
use crate::components::entity::Entity;

/// Entity storage using a flat Vec.
/// Mini-games hold tens of entities, so linear lookups are fine.
pub struct Scene {
    entities: Vec<Entity>,
}

impl Scene {
    pub fn new() -> Self {
        Self {
            entities: Vec::with_capacity(128),
        }
    }

    /// Add an entity to the scene.
    pub fn spawn(&mut self, entity: Entity) {
        self.entities.push(entity);
    }

    /// Remove an entity by ID. Returns the removed entity if found.
    pub fn despawn(&mut self, id: EntityId) -> Option<Entity> {
        let idx = self.entities.iter().position(|e| e.id == id)?;
        Some(self.entities.remove(idx))
    }

    /// Remove every entity carrying `tag`. Returns how many were removed.
    pub fn despawn_tagged(&mut self, tag: &str) -> usize {
        let before = self.entities.len();
        self.entities.retain(|e| e.tag != tag);
        before - self.entities.len()
    }

    /// Get a reference to an entity by ID.
    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    /// Get a mutable reference to an entity by ID.
    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|e| e.id == id)
    }

    /// Iterate over all entities.
    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    /// Iterate over all entities mutably.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Entity> {
        self.entities.iter_mut()
    }

    /// Find the first entity with the given tag.
    pub fn find_by_tag(&self, tag: &str) -> Option<&Entity> {
        self.entities.iter().find(|e| e.tag == tag)
    }

    /// Raise an entity above everything else currently in the scene.
    pub fn bring_to_top(&mut self, id: EntityId) {
        let top = self.entities.iter().map(|e| e.depth).max().unwrap_or(0);
        if let Some(e) = self.get_mut(id) {
            e.depth = top + 1;
        }
    }

    /// Number of entities in the scene.
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Whether the scene is empty.
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Clear all entities.
    pub fn clear(&mut self) {
        self.entities.clear();
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    #[test]
    fn spawn_and_get() {
        let mut scene = Scene::new();
        let id = EntityId(1);
        scene.spawn(Entity::new(id).with_pos(Vec2::new(10.0, 20.0)));
        assert_eq!(scene.get(id).unwrap().pos, Vec2::new(10.0, 20.0));
    }

    #[test]
    fn despawn_tagged_only_hits_tag() {
        let mut scene = Scene::new();
        scene.spawn(Entity::new(EntityId(1)).with_tag("tile"));
        scene.spawn(Entity::new(EntityId(2)).with_tag("tile"));
        scene.spawn(Entity::new(EntityId(3)).with_tag("hint"));
        assert_eq!(scene.despawn_tagged("tile"), 2);
        assert_eq!(scene.len(), 1);
        assert!(scene.find_by_tag("hint").is_some());
    }

    #[test]
    fn bring_to_top_raises_depth() {
        let mut scene = Scene::new();
        scene.spawn(Entity::new(EntityId(1)).with_depth(3));
        scene.spawn(Entity::new(EntityId(2)).with_depth(1));
        scene.bring_to_top(EntityId(2));
        assert_eq!(scene.get(EntityId(2)).unwrap().depth, 4);
    }
}
