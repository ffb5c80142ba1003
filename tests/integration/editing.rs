//! Editing scenarios through the session

use mudmap_foundation::{Coord, Direction, ErrorKind};
use mudmap_runtime::{ClickOutcome, Session};

#[test]
fn build_hall_and_plaza() {
    let mut session = Session::new();

    assert_eq!(session.click(Coord::new(0, -1)).unwrap(), ClickOutcome::Drafted);
    assert_eq!(session.click(Coord::new(0, -1)).unwrap(), ClickOutcome::Created);
    session.set_local_name("plaza").unwrap();
    session.set_title("Plaza").unwrap();
    session.save_room().unwrap();

    session.create(Coord::new(0, 0)).unwrap();
    session.set_local_name("hall").unwrap();
    session.save_room().unwrap();
    let exit = session.add_exit("north").unwrap().unwrap();

    assert_eq!(exit.direction, Direction::North);
    assert_eq!(exit.destination, "/d/city/plaza");
    let plaza = session.rooms().at(Coord::new(0, -1)).unwrap();
    assert!(plaza.exits.is_empty());

    let code = session.generate_current().unwrap();
    assert!(code.contains("\"north\" : \"/d/city/plaza\""));
}

#[test]
fn every_change_is_one_undo_step() {
    let mut session = Session::new();
    session.create(Coord::new(0, 0)).unwrap();
    session.add_exit("e").unwrap();
    session.add_tag("road").unwrap();
    session.set_flag("outdoors", true).unwrap();
    assert_eq!(session.history().len(), 5);

    assert!(session.undo());
    assert!(!session.current().unwrap().has_attribute("outdoors"));
    assert!(session.undo());
    assert!(session.current().unwrap().tags.is_empty());
    assert!(session.undo());
    assert!(session.current().unwrap().exits.is_empty());

    assert!(session.redo());
    assert_eq!(session.current().unwrap().exits.len(), 1);
}

#[test]
fn undo_all_the_way_then_branch() {
    let mut session = Session::new();
    for x in 0..3 {
        session.create(Coord::new(x, 0)).unwrap();
    }
    while session.undo() {}
    assert!(session.rooms().is_empty());

    session.create(Coord::new(9, 9)).unwrap();
    assert!(!session.redo());
    assert_eq!(session.rooms().len(), 1);
}

#[test]
fn template_copy_delete_flow() {
    let mut session = Session::new();
    session.create(Coord::new(0, 0)).unwrap();
    session.set_title("Shop").unwrap();
    session.set_description("Shelves everywhere.").unwrap();
    session.save_room().unwrap();
    session.set_flag("no_fight", true).unwrap();
    session.save_template().unwrap();

    session.create(Coord::new(4, 0)).unwrap();
    session.apply_template(0).unwrap();
    let applied = session.rooms().at(Coord::new(4, 0)).unwrap();
    assert_eq!(applied.title, "Shop");
    assert!(applied.has_attribute("no_fight"));

    let copy = session.copy_current().unwrap();
    assert_eq!(copy.coord(), Coord::new(5, 1));
    let id = session.delete_current().unwrap();
    assert_eq!(id, "5,1");
    assert_eq!(session.rooms().len(), 2);
}

#[test]
fn custom_attribute_reaches_generated_code() {
    let mut session = Session::new();
    session.register_attribute("no_magic", "禁止魔法").unwrap();
    session.create(Coord::new(0, 0)).unwrap();
    session.set_flag("no_magic", true).unwrap();
    session.set_flag("outdoors", true).unwrap();

    let code = session.generate_current().unwrap();
    let outdoors = code.find("\"outdoors\"").unwrap();
    let no_magic = code.find("\"no_magic\"").unwrap();
    assert!(outdoors < no_magic);
}

#[test]
fn failed_operations_change_nothing() {
    let mut session = Session::new();
    session.create(Coord::new(0, 0)).unwrap();
    let before = session.rooms().clone();
    let steps = session.history().len();

    assert!(session.create(Coord::new(0, 0)).is_err());
    assert!(session.remove_exit(0).is_err());
    assert!(session.apply_template(0).is_err());
    let err = session.set_flag("ghost", true).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::UnknownAttribute(_)));

    assert_eq!(session.rooms(), &before);
    assert_eq!(session.history().len(), steps);
}
