//! Integration tests for compass directions

use mudmap_foundation::{Direction, ErrorKind};

#[test]
fn north_is_up_the_grid() {
    assert_eq!(Direction::North.delta(), (0, -1));
    assert_eq!(Direction::Southeast.delta(), (1, 1));
}

#[test]
fn deltas_are_distinct_unit_steps() {
    let mut seen = Vec::new();
    for dir in Direction::ALL {
        let (dx, dy) = dir.delta();
        assert!(dx.abs() <= 1 && dy.abs() <= 1 && (dx, dy) != (0, 0));
        assert!(!seen.contains(&(dx, dy)), "{dir}");
        seen.push((dx, dy));
    }
    assert_eq!(seen.len(), 8);
}

#[test]
fn abbreviations_and_case() {
    assert_eq!("NE".parse::<Direction>().unwrap(), Direction::Northeast);
    assert_eq!("southWest".parse::<Direction>().unwrap(), Direction::Southwest);
    assert_eq!(" w ".parse::<Direction>().unwrap(), Direction::West);
}

#[test]
fn center_is_a_no_op_heading() {
    assert_eq!(Direction::parse_heading("center").unwrap(), None);
    assert_eq!(Direction::parse_heading("CENTER").unwrap(), None);
    assert_eq!(Direction::parse_heading("s").unwrap(), Some(Direction::South));
}

#[test]
fn unknown_heading_is_an_error() {
    let err = Direction::parse_heading("up").unwrap_err();
    assert!(matches!(err.kind, ErrorKind::UnknownDirection(ref s) if s == "up"));
}

#[test]
fn serializes_lowercase() {
    assert_eq!(serde_json::to_string(&Direction::Northwest).unwrap(), "\"northwest\"");
    let dir: Direction = serde_json::from_str("\"east\"").unwrap();
    assert_eq!(dir, Direction::East);
}
