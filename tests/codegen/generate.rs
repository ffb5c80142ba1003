//! Integration tests for LPC script generation

use mudmap_codegen::{CodeGenerator, GeneratorConfig};
use mudmap_foundation::{Coord, Direction};
use mudmap_storage::{AttributeRegistry, Exit, Room};

fn gate() -> Room {
    let mut room = Room::new(Coord::new(0, 0));
    room.name = "/d/city/gate".to_string();
    room.title = "City Gate".to_string();
    room.description = "Guards watch the road.".to_string();
    room
}

#[test]
fn only_set_flags_are_emitted() {
    let registry = AttributeRegistry::default();
    let mut room = gate();
    room.set_attribute(&registry, "outdoors", true).unwrap();
    room.set_attribute(&registry, "no_fight", false).unwrap();

    let code = CodeGenerator::new().generate(&room, &registry);
    let flag_lines: Vec<_> = code
        .lines()
        .filter(|l| l.trim_start().starts_with("set(\"") && l.ends_with(", 1);"))
        .collect();
    assert_eq!(flag_lines, ["  set(\"outdoors\", 1);"]);
}

#[test]
fn flags_follow_registry_order() {
    let mut registry = AttributeRegistry::empty();
    registry.register("zeta", "Z").unwrap();
    registry.register("alpha", "A").unwrap();
    let mut room = gate();
    room.set_attribute(&registry, "alpha", true).unwrap();
    room.set_attribute(&registry, "zeta", true).unwrap();

    let code = CodeGenerator::new().generate(&room, &registry);
    let zeta = code.find("\"zeta\"").unwrap();
    let alpha = code.find("\"alpha\"").unwrap();
    assert!(zeta < alpha);
}

#[test]
fn exits_follow_stored_order() {
    let mut room = gate();
    room.exits.push(Exit::new(Direction::South, "/d/city/road"));
    room.exits.push(Exit::new(Direction::North, "/d/city/square"));

    let code = CodeGenerator::new().generate(&room, &AttributeRegistry::default());
    assert!(code.contains(
        "      \"south\" : \"/d/city/road\",\n        \"north\" : \"/d/city/square\"\n"
    ));
}

#[test]
fn header_and_body() {
    let code = CodeGenerator::new().generate(&gate(), &AttributeRegistry::default());
    assert!(code.starts_with("// /d/city/gate.c\n#include <ansi.h>\n#include <room.h>\n"));
    assert!(code.contains("inherit ROOM;"));
    assert!(code.contains("  set(\"short\", \"City Gate\");\n"));
    assert!(code.contains("  set(\"long\", \"Guards watch the road.\");\n"));
    assert!(code.ends_with("  setup();\n}\n"));
}

#[test]
fn output_is_deterministic() {
    let registry = AttributeRegistry::default();
    let generator = CodeGenerator::new();
    assert_eq!(
        generator.generate(&gate(), &registry),
        generator.generate(&gate(), &registry)
    );
}

#[test]
fn quotes_are_escaped_unless_raw() {
    let mut room = gate();
    room.title = "The \"Gate\"".to_string();
    room.description = "line one\nline two".to_string();
    let registry = AttributeRegistry::default();

    let escaped = CodeGenerator::new().generate(&room, &registry);
    assert!(escaped.contains(r#"set("short", "The \"Gate\"");"#));
    assert!(escaped.contains(r#"set("long", "line one\nline two");"#));

    let raw = CodeGenerator::with_config(GeneratorConfig::default().with_escaping(false))
        .generate(&room, &registry);
    assert!(raw.contains("set(\"short\", \"The \"Gate\"\");"));
}

#[test]
fn file_name_uses_extension() {
    let generator = CodeGenerator::with_config(GeneratorConfig::default().with_extension("lpc"));
    assert_eq!(generator.file_name(&gate()), "/d/city/gate.lpc");
}
