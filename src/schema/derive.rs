//! Derived object metadata: groups, keys, uniqueness
//!
//! Computed once per object node during normalization and exposed on
//! [`super::ObjectBody`] for external consumers; the engine itself
//! only enforces per-field constraints.

use std::collections::BTreeSet;
use std::sync::Arc;

use super::node::{GroupTag, ObjectBody, SchemaNode, UniqueSpec};

/// Builds the derived metadata for an object's fields.
pub(super) fn derive_object(fields: Vec<(String, Arc<SchemaNode>)>) -> ObjectBody {
    let group_map = derive_groups(&fields);
    let pk_array: Vec<String> = fields
        .iter()
        .filter(|(_, node)| node.meta.pk)
        .map(|(name, _)| name.clone())
        .collect();
    let fk_map: Vec<(String, (String, String))> = fields
        .iter()
        .filter_map(|(name, node)| {
            node.meta
                .fk
                .as_ref()
                .map(|target| (name.clone(), target.clone()))
        })
        .collect();

    let mut id_array = pk_array.clone();
    for (name, _) in &fk_map {
        if !id_array.contains(name) {
            id_array.push(name.clone());
        }
    }

    let pk_map: Vec<(String, bool)> = pk_array.iter().map(|name| (name.clone(), true)).collect();
    let id_map: Vec<(String, bool)> = id_array.iter().map(|name| (name.clone(), true)).collect();

    let unique_array = derive_unique(&fields, &pk_array);

    ObjectBody {
        fields,
        group_map,
        pk_map,
        pk_array,
        fk_map,
        id_map,
        id_array,
        unique_array,
    }
}

/// Group map: `@default` for missing or empty tags, named groups by
/// first appearance, `null`-tagged fields excluded.
fn derive_groups(fields: &[(String, Arc<SchemaNode>)]) -> Vec<(String, Vec<String>)> {
    let mut groups: Vec<(String, Vec<String>)> = Vec::new();
    for (name, node) in fields {
        let group = match &node.meta.group {
            GroupTag::Default => "@default",
            GroupTag::Named(g) => g.as_str(),
            GroupTag::Excluded => continue,
        };
        match groups.iter_mut().find(|(g, _)| g == group) {
            Some((_, members)) => members.push(name.clone()),
            None => groups.push((group.to_string(), vec![name.clone()])),
        }
    }
    groups
}

/// Unique groups as sorted, deduplicated tuples:
/// - a truthy `$unique` forms a singleton group;
/// - named groups collect every field naming them;
/// - all PK fields together form one group;
/// - each PK field pairs with every other member of any named group
///   it participates in.
fn derive_unique(
    fields: &[(String, Arc<SchemaNode>)],
    pk_array: &[String],
) -> Vec<Vec<String>> {
    let mut named: Vec<(String, Vec<String>)> = Vec::new();
    let mut tuples: BTreeSet<Vec<String>> = BTreeSet::new();

    for (name, node) in fields {
        match &node.meta.unique {
            None => {}
            Some(UniqueSpec::Single) => {
                tuples.insert(vec![name.clone()]);
            }
            Some(UniqueSpec::Groups(group_names)) => {
                for g in group_names {
                    match named.iter_mut().find(|(n, _)| n == g) {
                        Some((_, members)) => members.push(name.clone()),
                        None => named.push((g.clone(), vec![name.clone()])),
                    }
                }
            }
        }
    }

    for (_, members) in &named {
        let mut tuple = members.clone();
        tuple.sort();
        tuples.insert(tuple);
    }

    if !pk_array.is_empty() {
        let mut pk_tuple = pk_array.to_vec();
        pk_tuple.sort();
        tuples.insert(pk_tuple);

        for (_, members) in &named {
            for pk in pk_array {
                if !members.contains(pk) {
                    continue;
                }
                for field in members {
                    if field != pk {
                        let mut pair = vec![pk.clone(), field.clone()];
                        pair.sort();
                        tuples.insert(pair);
                    }
                }
            }
        }
    }

    tuples.into_iter().collect()
}
