//! Integration tests for templates and prefixes

use mudmap_foundation::{Coord, Direction, ErrorKind};
use mudmap_storage::{AttributeRegistry, Exit, PrefixStore, Room, TemplateStore};

fn inn() -> Room {
    let mut room = Room::new(Coord::new(0, 0));
    room.name = "/d/city/inn".to_string();
    room.title = "Inn".to_string();
    room.description = "Warm and loud.".to_string();
    room.exits.push(Exit::new(Direction::South, "/d/city/road"));
    room.tags.push("indoor".to_string());
    room.set_attribute(&AttributeRegistry::default(), "no_fight", true)
        .unwrap();
    room
}

#[test]
fn templates_are_numbered_from_one() {
    let mut templates = TemplateStore::new();
    assert_eq!(templates.save(&inn()).name, "模板_1");
    assert_eq!(templates.save(&inn()).name, "模板_2");
    assert_eq!(templates.len(), 2);
}

#[test]
fn apply_overwrites_everything_but_position() {
    let mut templates = TemplateStore::new();
    templates.save(&inn());

    let mut target = Room::new(Coord::new(7, 3));
    target.exits.push(Exit::new(Direction::North, "/d/x"));
    target.tags.push("old".to_string());

    let applied = templates.apply(0, &target).unwrap();
    assert_eq!(applied.coord(), Coord::new(7, 3));
    assert_eq!(applied.id(), "7,3");
    assert_eq!(applied.name, "/d/city/inn");
    assert_eq!(applied.description, "Warm and loud.");
    assert_eq!(applied.exits, [Exit::new(Direction::South, "/d/city/road")]);
    assert_eq!(applied.tags, ["indoor"]);
    assert!(applied.has_attribute("no_fight"));
}

#[test]
fn apply_adds_flags_without_clearing_others() {
    let registry = AttributeRegistry::default();
    let mut templates = TemplateStore::new();
    templates.save(&Room::new(Coord::new(1, 1)));

    let mut target = Room::new(Coord::new(2, 2));
    target.set_attribute(&registry, "outdoors", true).unwrap();
    target.set_attribute(&registry, "fuben", true).unwrap();

    let applied = templates.apply(0, &target).unwrap();
    assert!(applied.has_attribute("outdoors"));
    assert!(applied.has_attribute("fuben"));
    assert_eq!(applied.title, "新房间 (1,1)");
}

#[test]
fn missing_template_is_reported() {
    let templates = TemplateStore::new();
    let err = templates.apply(0, &inn()).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::TemplateNotFound(0)));
}

#[test]
fn template_keeps_source_state() {
    let mut templates = TemplateStore::new();
    let mut source = inn();
    templates.save(&source);
    source.title = "Changed".to_string();
    assert_eq!(templates.get(0).unwrap().room.title, "Inn");
}

#[test]
fn template_json_has_no_position() {
    let mut templates = TemplateStore::new();
    templates.save(&inn());
    let json = serde_json::to_value(&templates).unwrap();
    let room = &json[0]["room"];
    assert!(room.get("x").is_none());
    assert_eq!(room["no_fight"], true);
}

#[test]
fn prefixes_are_unique_and_ordered() {
    let mut prefixes = PrefixStore::default();
    assert_eq!(prefixes.first(), Some("/d/city/"));
    assert!(prefixes.add("/d/cave/"));
    assert!(!prefixes.add("/d/cave/"));
    assert!(!prefixes.add(""));
    assert_eq!(
        prefixes.iter().collect::<Vec<_>>(),
        ["/d/city/", "/d/village/", "/d/forest/", "/d/cave/"]
    );
}
