//! Objects nested inside other objects, mappings and sequences.

use polyconf::{Mapping, TreeConverter, Value, constants::DISCRIMINATOR_KEY};

use crate::helpers::*;

fn alias_at<'a>(value: &'a Value, path: &[&str]) -> Option<&'a str> {
    let mut current = value;
    for key in path {
        current = current.as_map()?.get(key)?;
    }
    current.as_map()?.get(DISCRIMINATOR_KEY)?.as_text()
}

#[test]
fn test_serialize_expands_three_levels() {
    let registry = test_registry();
    let converter = TreeConverter::new(&registry);

    let value = converter.serialize(&sample_kit());

    assert!(!contains_object(&value));
    assert_eq!(alias_at(&value, &[]), Some("Kit"));
    assert_eq!(alias_at(&value, &["icon"]), Some("ItemStack"));
    assert_eq!(alias_at(&value, &["icon", "meta"]), Some("ItemMeta"));
    assert_eq!(alias_at(&value, &["spawn"]), Some("Location"));
}

#[test]
fn test_nested_objects_round_trip_through_mappings() {
    let registry = test_registry();
    let converter = TreeConverter::new(&registry);
    let kit = sample_kit();

    let restored: Kit = converter.deserialize_as(converter.serialize(&kit)).unwrap();

    assert_eq!(restored, kit);
    assert_eq!(
        restored.icon.meta.map(|meta| meta.lore),
        Some(vec!["sharp".to_string(), "shiny".to_string()])
    );
}

#[test]
fn test_serialize_expands_objects_in_mixed_containers() {
    let registry = test_registry();
    let converter = TreeConverter::new(&registry);

    let mut featured = Mapping::new();
    featured.insert("kit", object(sample_kit()));
    let snapshot = Snapshot::default().with(
        "groups",
        Value::List(vec![
            Value::Map(featured),
            Value::List(vec![object(ItemStack::new("BREAD", 8))]),
        ]),
    );

    let value = converter.serialize(&snapshot);
    assert!(!contains_object(&value));

    let groups = value.as_map().unwrap().get("groups").unwrap().as_list().unwrap();
    assert_eq!(alias_at(&groups[0], &["kit"]), Some("Kit"));
    assert_eq!(alias_at(&groups[0], &["kit", "icon", "meta"]), Some("ItemMeta"));
    assert_eq!(alias_at(&groups[1].as_list().unwrap()[0], &[]), Some("ItemStack"));
}

#[test]
fn test_load_resolves_mappings_inside_plain_mappings() {
    let registry = test_registry();
    let converter = TreeConverter::new(&registry);

    let mut warps = Mapping::new();
    warps.insert("home", object(Location::new("world", 1.0, 2.0, 3.0)));
    let snapshot = Snapshot::default().with("warps", warps);

    let restored: Snapshot = converter
        .deserialize_as(converter.serialize(&snapshot))
        .unwrap();

    let home = restored
        .fields
        .get("warps")
        .and_then(Value::as_map)
        .and_then(|warps| warps.get("home"))
        .and_then(|home| home.downcast_ref::<Location>());
    assert_eq!(home, Some(&Location::new("world", 1.0, 2.0, 3.0)));
}

#[test]
fn test_pre_expanded_mapping_is_resolved_on_load() {
    let registry = test_registry();
    let converter = TreeConverter::new(&registry);

    let value = discriminated(
        "Snapshot",
        vec![(
            "spawn",
            discriminated(
                "Location",
                vec![
                    ("world", Value::from("world")),
                    ("x", Value::Float(0.5)),
                    ("y", Value::Float(64.0)),
                    ("z", Value::Float(0.5)),
                ],
            ),
        )],
    );

    let restored: Snapshot = converter.deserialize_as(value).unwrap();
    assert_eq!(
        restored.fields.get("spawn").and_then(|v| v.downcast_ref::<Location>()),
        Some(&Location::new("world", 0.5, 64.0, 0.5))
    );
}
