use crate::components::entity::Entity;
use crate::renderer::instance::{RenderBuffer, RenderInstance};

/// Build the render buffer from a set of entities.
/// Inactive and sprite-less entities are skipped. Output is ordered by
/// depth; entities at equal depth keep their scene order.
pub fn build_render_buffer<'a>(entities: impl Iterator<Item = &'a Entity>, buffer: &mut RenderBuffer) {
    buffer.clear();

    let mut visible: Vec<(&Entity, RenderInstance)> = entities
        .filter(|e| e.active)
        .filter_map(|entity| {
            let sprite = entity.sprite.as_ref()?;
            Some((
                entity,
                RenderInstance {
                    x: entity.pos.x,
                    y: entity.pos.y,
                    rotation: entity.rotation,
                    scale: entity.scale.x,
                    atlas: sprite.atlas.0 as f32,
                    col: sprite.col,
                    row: sprite.row,
                    alpha: sprite.alpha,
                    tint: sprite.tint as f32,
                },
            ))
        })
        .collect();

    // Stable sort keeps insertion order within a depth.
    visible.sort_by_key(|(e, _)| e.depth);

    for (_, inst) in visible {
        buffer.push(inst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::EntityId;
    use crate::components::sprite::{AtlasId, SpriteComponent};
    use glam::Vec2;

    #[test]
    fn build_buffer_orders_by_depth() {
        let entities = vec![
            Entity::new(EntityId(1))
                .with_pos(Vec2::new(10.0, 20.0))
                .with_depth(5)
                .with_sprite(SpriteComponent::default()),
            Entity::new(EntityId(2))
                .with_pos(Vec2::new(30.0, 40.0))
                .with_sprite(SpriteComponent::cell(AtlasId::FONT, 3.0, 2.0).with_tint(0x00FF00)),
            Entity::new(EntityId(3))
                .with_pos(Vec2::new(50.0, 60.0))
                .with_sprite(SpriteComponent::default()),
        ];

        let mut buffer = RenderBuffer::new();
        build_render_buffer(entities.iter(), &mut buffer);

        assert_eq!(buffer.instance_count(), 3);
        let xs: Vec<f32> = buffer.instances.iter().map(|i| i.x).collect();
        assert_eq!(xs, vec![30.0, 50.0, 10.0]);
        assert_eq!(buffer.instances[0].atlas, 1.0);
        assert_eq!(buffer.instances[0].tint, 0x00FF00 as f32);
    }

    #[test]
    fn inactive_and_bare_entities_are_skipped() {
        let mut hidden = Entity::new(EntityId(1)).with_sprite(SpriteComponent::default());
        hidden.active = false;
        let bare = Entity::new(EntityId(2));

        let entities = vec![hidden, bare];
        let mut buffer = RenderBuffer::new();
        build_render_buffer(entities.iter(), &mut buffer);
        assert_eq!(buffer.instance_count(), 0);
    }
}
