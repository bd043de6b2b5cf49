// =====
// TESTS: 7
// =====
//
// Render smoke tests against ratatui's test backend.

use artichat::app::{App, Overlay};
use crossterm::event::KeyCode;
use ratatui::Terminal;
use ratatui::backend::TestBackend;

use crate::helpers::{ctrl, drain_reply, press, test_app, type_str};

fn draw(app: &mut App, width: u16, height: u16) -> String {
    let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
    terminal.draw(|frame| artichat::ui::render(frame, app)).unwrap();
    let buffer = terminal.backend().buffer();
    let mut text = String::new();
    for y in 0..buffer.area.height {
        for x in 0..buffer.area.width {
            text.push_str(buffer[(x, y)].symbol());
        }
        text.push('\n');
    }
    text
}

#[tokio::test]
async fn empty_app_shows_welcome_and_footer() {
    let mut app = test_app();
    let screen = draw(&mut app, 100, 30);
    assert!(screen.contains("artichat"));
    assert!(screen.contains("source: local"));
    assert!(screen.contains("Ctrl+K commands"));
}

#[tokio::test]
async fn reply_renders_inline_artifact_boxes() {
    let mut app = test_app();
    type_str(&mut app, "hello");
    press(&mut app, KeyCode::Enter);
    drain_reply(&mut app).await;

    let screen = draw(&mut app, 100, 60);
    assert!(screen.contains("You"));
    assert!(screen.contains("Assistant"));
    assert!(screen.contains("Ctrl+O to open"));
    assert!(screen.contains("hello"));
}

#[tokio::test]
async fn overlays_render_over_chat() {
    let mut app = test_app();
    ctrl(&mut app, 'k');
    assert!(draw(&mut app, 100, 30).contains("Commands"));

    press(&mut app, KeyCode::Esc);
    press(&mut app, KeyCode::F(1));
    assert!(matches!(app.overlay, Some(Overlay::Help)));
    assert!(draw(&mut app, 100, 30).contains("Esc to close"));
}

#[tokio::test]
async fn tiny_terminal_does_not_panic() {
    let mut app = test_app();
    type_str(&mut app, "a fairly long line of input that has to wrap somewhere");
    for (w, h) in [(1, 1), (10, 3), (20, 5), (69, 7)] {
        draw(&mut app, w, h);
    }
    ctrl(&mut app, 'p');
    draw(&mut app, 12, 4);
}

#[tokio::test]
async fn notice_replaces_footer_hint() {
    let mut app = test_app();
    ctrl(&mut app, 'o');
    let screen = draw(&mut app, 100, 30);
    let footer = screen.lines().last().unwrap_or_default();
    assert!(footer.contains("No artifacts in this chat"));
    assert!(!footer.contains("Ctrl+K commands"));
    assert!(footer.contains("source: local"));
}

#[tokio::test]
async fn first_question_stays_pinned_when_scrolled_away() {
    let mut app = test_app();
    for prompt in ["first question", "second"] {
        type_str(&mut app, prompt);
        press(&mut app, KeyCode::Enter);
        drain_reply(&mut app).await;
    }

    let screen = draw(&mut app, 60, 20);
    assert!(screen.contains("Question  first question"), "{screen}");

    let roomy = draw(&mut app, 60, 200);
    assert!(!roomy.contains("Question  first question"), "{roomy}");
}

#[tokio::test]
async fn selected_message_lists_its_actions() {
    let mut app = test_app();
    type_str(&mut app, "hello");
    press(&mut app, KeyCode::Enter);
    drain_reply(&mut app).await;

    press(&mut app, KeyCode::BackTab);
    assert!(draw(&mut app, 100, 60).contains("c copy \u{00B7} r regenerate"));
    press(&mut app, KeyCode::Up);
    assert!(draw(&mut app, 100, 60).contains("c copy \u{00B7} e edit \u{00B7} s resubmit"));
}
