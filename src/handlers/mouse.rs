use crossterm::event::{MouseEvent, MouseEventKind};

use crate::app::{App, CurrentScreen};

pub fn handle_mouse_event(app: &mut App, mouse: MouseEvent) {
    let forward = match mouse.kind {
        MouseEventKind::ScrollDown => true,
        MouseEventKind::ScrollUp => false,
        _ => return,
    };

    if app.view.sidebar_open {
        if forward {
            app.next_social()
        } else {
            app.previous_social()
        }
        return;
    }

    let row_step = if forward { 1 } else { -1 };
    match app.view.current_screen {
        CurrentScreen::LiveTv if !app.view.search_mode => {
            if forward {
                app.next_category()
            } else {
                app.previous_category()
            }
        }
        CurrentScreen::LiveTv | CurrentScreen::CategoryDetail => app.move_channel_cursor(0, row_step),
        CurrentScreen::LiveEvent => {
            if forward {
                app.next_match()
            } else {
                app.previous_match()
            }
        }
        CurrentScreen::ChannelPlayer => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogSnapshot;
    use crossterm::event::KeyModifiers;

    fn scroll(kind: MouseEventKind) -> MouseEvent {
        MouseEvent {
            kind,
            column: 0,
            row: 0,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_scroll_moves_category_cursor() {
        let mut app = App::default();
        app.install_catalog(CatalogSnapshot::fallback());
        handle_mouse_event(&mut app, scroll(MouseEventKind::ScrollDown));
        handle_mouse_event(&mut app, scroll(MouseEventKind::ScrollDown));
        assert_eq!(app.cursors.category_list_state.selected(), Some(2));
        handle_mouse_event(&mut app, scroll(MouseEventKind::ScrollUp));
        assert_eq!(app.cursors.category_list_state.selected(), Some(1));
    }
}
