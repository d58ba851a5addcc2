//! Tag and group auxiliary indices.

use signature_ecs::prelude::*;

#[test]
fn test_tag_lookup() {
    let mut registry = Registry::new();
    let player = registry.create_entity();
    let enemy = registry.create_entity();

    registry.tag_entity(player, "player");

    assert!(registry.has_tag(player, "player"));
    assert!(!registry.has_tag(enemy, "player"));
    assert_eq!(registry.entity_by_tag("player"), Some(player));
    assert_eq!(registry.entity_by_tag("boss"), None);
}

#[test]
fn test_tag_is_unique_and_moves() {
    let mut registry = Registry::new();
    let a = registry.create_entity();
    let b = registry.create_entity();

    registry.tag_entity(a, "player");
    // Reusing the tag moves it to the new entity
    registry.tag_entity(b, "player");
    assert!(!registry.has_tag(a, "player"));
    assert!(registry.has_tag(b, "player"));

    // Retagging an entity releases its old tag
    registry.tag_entity(b, "winner");
    assert_eq!(registry.entity_by_tag("player"), None);
    assert!(registry.has_tag(b, "winner"));
}

#[test]
fn test_remove_tag() {
    let mut registry = Registry::new();
    let entity = registry.create_entity();
    registry.tag_entity(entity, "player");

    registry.remove_tag(entity);
    assert!(!registry.has_tag(entity, "player"));
    assert_eq!(registry.entity_by_tag("player"), None);

    // Removing again is a no-op
    registry.remove_tag(entity);
}

#[test]
fn test_group_membership() {
    let mut registry = Registry::new();
    let a = registry.create_entity();
    let b = registry.create_entity();
    let c = registry.create_entity();

    registry.group_entity(a, "enemies");
    registry.group_entity(b, "enemies");
    registry.group_entity(c, "obstacles");

    assert!(registry.belongs_to_group(a, "enemies"));
    assert!(!registry.belongs_to_group(c, "enemies"));
    assert_eq!(registry.entities_in_group("enemies"), vec![a, b]);
    assert_eq!(registry.entities_in_group("projectiles"), Vec::<Entity>::new());
}

#[test]
fn test_group_is_exclusive() {
    let mut registry = Registry::new();
    let entity = registry.create_entity();

    registry.group_entity(entity, "enemies");
    registry.group_entity(entity, "obstacles");

    assert!(!registry.belongs_to_group(entity, "enemies"));
    assert!(registry.belongs_to_group(entity, "obstacles"));
    assert!(registry.entities_in_group("enemies").is_empty());
}

#[test]
fn test_kill_purges_tags_and_groups() {
    let mut registry = Registry::new();
    let entity = registry.create_entity();
    registry.tag_entity(entity, "player");
    registry.group_entity(entity, "heroes");
    registry.update();

    registry.kill_entity(entity);
    registry.update();

    assert_eq!(registry.entity_by_tag("player"), None);
    assert!(registry.entities_in_group("heroes").is_empty());

    // The recycled id does not inherit the old tag or group
    let recycled = registry.create_entity();
    assert_eq!(recycled.id(), entity.id());
    assert!(!registry.has_tag(recycled, "player"));
    assert!(!registry.belongs_to_group(recycled, "heroes"));
}

#[test]
fn test_entity_mut_tag_group_forwarding() {
    let mut registry = Registry::new();
    let entity = registry.create_entity();

    let mut handle = registry.entity_mut(entity);
    handle.tag("player");
    handle.join_group("heroes");
    assert!(handle.has_tag("player"));
    assert!(handle.belongs_to_group("heroes"));
}
