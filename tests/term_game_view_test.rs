use blockfall::core::{Game, GameConfig, GameSnapshot, PieceCatalog};
use blockfall::term::{FrameBuffer, GameView, Viewport};
use blockfall::types::PieceName;

fn snapshot() -> GameSnapshot {
    Game::with_seed(GameConfig::default(), 1).unwrap().snapshot()
}

fn view() -> GameView {
    GameView::new(&PieceCatalog::standard())
}

fn screen_text(fb: &FrameBuffer) -> String {
    (0..fb.height())
        .map(|y| fb.row_text(y))
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn term_view_renders_border_corners() {
    // 10 cells * 2 columns + border = 22 wide, 20 rows + border = 22 tall.
    let fb = view().render(&snapshot(), "ann", Viewport::new(22, 22));

    assert_eq!(fb.get(0, 0).unwrap().ch, '┌');
    assert_eq!(fb.get(21, 0).unwrap().ch, '┐');
    assert_eq!(fb.get(0, 21).unwrap().ch, '└');
    assert_eq!(fb.get(21, 21).unwrap().ch, '┘');
}

#[test]
fn term_view_renders_locked_cell_two_columns_wide() {
    let mut snap = snapshot();
    snap.set_cell(19, 0, Some(PieceName::I));
    snap.active = None;

    let fb = view().render(&snap, "ann", Viewport::new(22, 22));

    let (x, y) = (1, 1 + 19);
    let left = fb.get(x, y).unwrap();
    assert_eq!(left.ch, '█');
    assert_eq!(fb.get(x + 1, y).unwrap().ch, '█');
    assert_eq!(left.style.fg, view().color(PieceName::I));
    // Neighbor stays empty.
    assert_eq!(fb.get(x + 2, y).unwrap().ch, '·');
}

#[test]
fn term_view_skips_active_cells_in_spawn_buffer() {
    let snap = snapshot();
    let active = snap.active.clone().unwrap();
    let fb = view().render(&snap, "ann", Viewport::new(22, 22));

    let blocks = screen_text(&fb).chars().filter(|&c| c == '█').count();
    let visible = active.cells().filter(|&(r, _)| r >= 0).count();
    assert_eq!(blocks, visible * 2);
}

#[test]
fn term_view_draws_panel_when_wide_enough() {
    let mut snap = snapshot();
    snap.score = 1234;
    snap.level = 13;

    let fb = view().render(&snap, "ann", Viewport::new(60, 24));
    let text = screen_text(&fb);
    for needle in ["USER", "ann", "SCORE", "1234", "LEVEL", "13", "NEXT"] {
        assert!(text.contains(needle), "missing {needle}");
    }
}

#[test]
fn term_view_omits_panel_when_narrow() {
    let fb = view().render(&snapshot(), "ann", Viewport::new(30, 22));
    assert!(!screen_text(&fb).contains("SCORE"));
}

#[test]
fn term_view_shows_game_over_overlay() {
    let mut snap = snapshot();
    snap.game_over = true;
    snap.active = None;
    let fb = view().render(&snap, "ann", Viewport::new(22, 22));
    assert!(fb.row_text(11).contains("GAME OVER"));
}

#[test]
fn term_view_centers_field_on_tall_viewports() {
    let fb = view().render(&snapshot(), "ann", Viewport::new(22, 30));
    // (30 - 22) / 2 = 4
    assert_eq!(fb.get(0, 4).unwrap().ch, '┌');
}

#[test]
fn term_view_render_into_reuses_buffer() {
    let v = view();
    let snap = snapshot();
    let mut fb = FrameBuffer::new(1, 1);
    v.render_into(&snap, "ann", Viewport::new(40, 24), &mut fb);
    assert_eq!((fb.width(), fb.height()), (40, 24));
    assert_eq!(fb, v.render(&snap, "ann", Viewport::new(40, 24)));
}
