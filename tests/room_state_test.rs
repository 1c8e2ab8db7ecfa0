//! Tests for the room state machine: move validation, terminal detection,
//! and restart.

use quickmatch::{ConnId, Mark, MoveOutcome, MoveRejection, Room, RoomStatus};

fn conn(id: u64) -> ConnId {
    ConnId::from(id)
}

fn room() -> Room {
    Room::new("1#2#1".to_string(), conn(1), conn(2))
}

/// Plays a sequence of (connection, cell) moves, asserting each is accepted.
fn play(room: &mut Room, moves: &[(u64, usize)]) -> MoveOutcome {
    let mut last = MoveOutcome::Continued;
    for (id, cell) in moves {
        last = room
            .apply_move(conn(*id), *cell)
            .unwrap_or_else(|e| panic!("move {cell} by {id} rejected: {e}"));
    }
    last
}

#[test]
fn test_new_room_assigns_marks_deterministically() {
    let room = room();
    assert_eq!(room.mark_of(conn(1)), Some(Mark::X));
    assert_eq!(room.mark_of(conn(2)), Some(Mark::O));
    assert_eq!(room.turn(), Mark::X);
    assert_eq!(room.status(), RoomStatus::InProgress);
    assert_eq!(room.board(), &quickmatch::Board::new());
}

#[test]
fn test_opponent_lookup() {
    let room = room();
    assert_eq!(room.opponent_of(conn(1)), Some(conn(2)));
    assert_eq!(room.opponent_of(conn(2)), Some(conn(1)));
    assert_eq!(room.opponent_of(conn(9)), None);
}

#[test]
fn test_non_participant_move_is_rejected() {
    let mut room = room();
    let before = room.board().clone();
    assert_eq!(
        room.apply_move(conn(9), 0),
        Err(MoveRejection::NotAParticipant)
    );
    assert_eq!(room.board(), &before);
    assert_eq!(room.turn(), Mark::X);
}

#[test]
fn test_out_of_range_move_is_rejected() {
    let mut room = room();
    assert_eq!(room.apply_move(conn(1), 9), Err(MoveRejection::OutOfRange));
    assert_eq!(room.turn(), Mark::X);
}

#[test]
fn test_occupied_cell_is_rejected() {
    let mut room = room();
    play(&mut room, &[(1, 0)]);
    assert_eq!(room.apply_move(conn(2), 0), Err(MoveRejection::CellOccupied));
    assert_eq!(room.turn(), Mark::O);
}

#[test]
fn test_out_of_turn_move_is_rejected() {
    let mut room = room();
    assert_eq!(room.apply_move(conn(2), 0), Err(MoveRejection::OutOfTurn));
    assert_eq!(room.turn(), Mark::X);
}

#[test]
fn test_turn_alternates_after_legal_moves() {
    let mut room = room();
    assert_eq!(play(&mut room, &[(1, 0)]), MoveOutcome::Continued);
    assert_eq!(room.turn(), Mark::O);
    assert_eq!(play(&mut room, &[(2, 4)]), MoveOutcome::Continued);
    assert_eq!(room.turn(), Mark::X);
}

#[test]
fn test_winning_move_ends_the_game() {
    let mut room = room();
    let outcome = play(&mut room, &[(1, 0), (2, 3), (1, 1), (2, 4), (1, 2)]);
    assert_eq!(outcome, MoveOutcome::Won(Mark::X));
    assert_eq!(room.status(), RoomStatus::Won(Mark::X));
}

#[test]
fn test_full_board_without_line_is_a_draw() {
    let mut room = room();
    let outcome = play(
        &mut room,
        &[
            (1, 0),
            (2, 1),
            (1, 2),
            (2, 4),
            (1, 3),
            (2, 5),
            (1, 7),
            (2, 6),
            (1, 8),
        ],
    );
    assert_eq!(outcome, MoveOutcome::Drawn);
    assert_eq!(room.status(), RoomStatus::Draw);
}

#[test]
fn test_win_takes_precedence_over_draw() {
    // The ninth move both fills the board and completes the 0-1-2 row.
    let mut room = room();
    let outcome = play(
        &mut room,
        &[
            (1, 0),
            (2, 3),
            (1, 1),
            (2, 4),
            (1, 5),
            (2, 6),
            (1, 7),
            (2, 8),
            (1, 2),
        ],
    );
    assert_eq!(outcome, MoveOutcome::Won(Mark::X));
    assert_eq!(room.status(), RoomStatus::Won(Mark::X));
}

#[test]
fn test_terminal_room_accepts_no_moves() {
    let mut room = room();
    play(&mut room, &[(1, 0), (2, 3), (1, 1), (2, 4), (1, 2)]);
    assert_eq!(room.apply_move(conn(2), 5), Err(MoveRejection::GameOver));
    assert_eq!(room.apply_move(conn(1), 5), Err(MoveRejection::GameOver));
}

#[test]
fn test_restart_resets_mid_game() {
    let mut room = room();
    play(&mut room, &[(1, 0), (2, 4)]);
    room.restart();
    assert_eq!(room.board(), &quickmatch::Board::new());
    assert_eq!(room.turn(), Mark::X);
    assert_eq!(room.status(), RoomStatus::InProgress);
}

#[test]
fn test_restart_resets_a_won_room() {
    let mut room = room();
    play(&mut room, &[(1, 0), (2, 3), (1, 1), (2, 4), (1, 2)]);
    room.restart();
    assert_eq!(room.status(), RoomStatus::InProgress);
    assert_eq!(room.turn(), Mark::X);
    // Fresh game is playable again.
    assert_eq!(play(&mut room, &[(1, 4)]), MoveOutcome::Continued);
}

#[test]
fn test_restart_policy_is_permissive() {
    let room = room();
    // Any connection naming the key may reset; tighten in may_restart if
    // participant-only restarts are ever wanted.
    assert!(room.may_restart(conn(1)));
    assert!(room.may_restart(conn(9)));
}
