//! Default lookup capabilities: the tag and group indices every deployment
//! is expected to carry. Both are plain `Manager` implementations with no
//! special standing beyond being registered by `World::new`.

use std::collections::HashMap;

use inlinable_string::InlinableString;
use smallvec::SmallVec;

use super::entity::{Entity, EntityId};
use super::manager::Manager;

/// A bidirectional name⇄entity index. Each tag names at most one entity
/// and each entity carries at most one tag.
#[derive(Default)]
pub struct TagManager {
    tags: HashMap<InlinableString, EntityId>,
    entities: HashMap<EntityId, InlinableString>,
}

impl TagManager {
    pub fn new() -> Self {
        Default::default()
    }

    /// Tags an entity, displacing both any previous owner of the tag and
    /// any previous tag of the entity.
    pub fn register<S: Into<InlinableString>>(&mut self, tag: S, e: EntityId) {
        let tag = tag.into();

        if let Some(prev) = self.tags.insert(tag.clone(), e) {
            if prev != e {
                self.entities.remove(&prev);
            }
        }

        if let Some(prev_tag) = self.entities.insert(e, tag.clone()) {
            if prev_tag != tag {
                self.tags.remove(&prev_tag);
            }
        }
    }

    /// Drops a tag, returning the entity it named.
    pub fn unregister(&mut self, tag: &str) -> Option<EntityId> {
        let e = self.tags.remove(&InlinableString::from(tag))?;
        self.entities.remove(&e);
        Some(e)
    }

    /// Returns the entity named by `tag`.
    #[inline]
    pub fn entity(&self, tag: &str) -> Option<EntityId> {
        self.tags.get(&InlinableString::from(tag)).cloned()
    }

    /// Returns the tag carried by `e`.
    #[inline]
    pub fn tag(&self, e: EntityId) -> Option<&str> {
        self.entities.get(&e).map(|v| &**v)
    }
}

impl Manager for TagManager {
    fn entity_deleted(&mut self, e: &Entity) {
        if let Some(tag) = self.entities.remove(&e.id()) {
            self.tags.remove(&tag);
        }
    }
}

type Members = SmallVec<[EntityId; 8]>;

/// A group-name → ordered-member-list index. An entity may belong to any
/// number of groups.
#[derive(Default)]
pub struct GroupManager {
    groups: HashMap<InlinableString, Members>,
    by_entity: HashMap<EntityId, SmallVec<[InlinableString; 2]>>,
}

impl GroupManager {
    pub fn new() -> Self {
        Default::default()
    }

    /// Adds an entity to a group. Idempotent per (group, entity) pair.
    pub fn add<S: Into<InlinableString>>(&mut self, group: S, e: EntityId) {
        let group = group.into();

        let members = self.groups.entry(group.clone()).or_insert_with(Members::new);
        if !members.contains(&e) {
            members.push(e);
        }

        let groups = self.by_entity.entry(e).or_insert_with(SmallVec::new);
        if !groups.contains(&group) {
            groups.push(group);
        }
    }

    /// Removes an entity from a group; does nothing if it was not a member.
    pub fn remove(&mut self, group: &str, e: EntityId) {
        let key = InlinableString::from(group);

        if let Some(members) = self.groups.get_mut(&key) {
            if let Some(pos) = members.iter().position(|&m| m == e) {
                members.remove(pos);
            }
        }

        if let Some(groups) = self.by_entity.get_mut(&e) {
            if let Some(pos) = groups.iter().position(|g| *g == key) {
                groups.remove(pos);
            }
        }
    }

    /// Returns the members of a group, in insertion order.
    pub fn entities(&self, group: &str) -> &[EntityId] {
        self.groups
            .get(&InlinableString::from(group))
            .map(|m| m.as_slice())
            .unwrap_or(&[])
    }

    /// Returns the groups `e` belongs to.
    pub fn groups_of(&self, e: EntityId) -> impl Iterator<Item = &str> {
        self.by_entity
            .get(&e)
            .into_iter()
            .flat_map(|v| v.iter())
            .map(|v| &**v)
    }

    /// Returns whether `e` is a member of `group`.
    pub fn is_in_group(&self, group: &str, e: EntityId) -> bool {
        self.entities(group).contains(&e)
    }
}

impl Manager for GroupManager {
    fn entity_deleted(&mut self, e: &Entity) {
        if let Some(groups) = self.by_entity.remove(&e.id()) {
            for g in groups {
                if let Some(members) = self.groups.get_mut(&g) {
                    if let Some(pos) = members.iter().position(|&m| m == e.id()) {
                        members.remove(pos);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn tags() {
        let mut tags = TagManager::new();

        tags.register("player", 1);
        tags.register("boss", 2);
        assert_eq!(tags.entity("player"), Some(1));
        assert_eq!(tags.tag(2), Some("boss"));

        // Re-registering a tag moves it.
        tags.register("player", 3);
        assert_eq!(tags.entity("player"), Some(3));
        assert_eq!(tags.tag(1), None);

        // Re-tagging an entity drops its old tag.
        tags.register("final-boss", 2);
        assert_eq!(tags.entity("boss"), None);
        assert_eq!(tags.tag(2), Some("final-boss"));

        assert_eq!(tags.unregister("final-boss"), Some(2));
        assert_eq!(tags.entity("final-boss"), None);
    }

    #[test]
    fn groups() {
        let mut groups = GroupManager::new();

        groups.add("enemies", 1);
        groups.add("enemies", 2);
        groups.add("enemies", 2);
        groups.add("flying", 2);

        assert_eq!(groups.entities("enemies"), &[1, 2]);
        assert!(groups.is_in_group("flying", 2));
        assert_eq!(groups.groups_of(2).count(), 2);

        groups.remove("enemies", 2);
        assert_eq!(groups.entities("enemies"), &[1]);
        assert!(groups.is_in_group("flying", 2));

        assert_eq!(groups.entities("unknown"), &[]);
    }
}
