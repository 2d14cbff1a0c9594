use crate::app::{App, Page, View};
use ratatui::{layout::Rect, widgets::Paragraph, Frame};
use std::borrow::Cow;

/// Render the status bar
pub fn render(f: &mut Frame, app: &App<'_>, area: Rect) {
    if area.width < 1 || area.height < 1 {
        return;
    }

    let text: Cow<'_, str> = if let Some((msg, _)) = &app.status_message {
        Cow::Borrowed(msg.as_ref())
    } else {
        hints(app)
    };

    let paragraph = Paragraph::new(text).style(app.style("status_bar"));
    f.render_widget(paragraph, area);
}

/// Keybinding hints for the current view.
fn hints(app: &App<'_>) -> Cow<'static, str> {
    match app.view {
        View::Reader => {
            Cow::Borrowed("[b]ack [j/k]scroll [Ctrl+d/u]page [Tab]related [Enter]open related [q]uit")
        }
        View::Browse if app.search_mode => {
            Cow::Borrowed("Type to search | ESC cancel | ENTER confirm")
        }
        View::Browse => match app.page {
            Page::Tools => Cow::Owned(format!(
                "[s]ort: {} [b]ookmark [o]pen [Enter]changelog [Tab]switch [?]help [q]uit",
                app.tool_sort.label()
            )),
            Page::Articles => {
                Cow::Borrowed("[/]search [x]clear [Enter]read [Tab]switch [?]help [q]uit")
            }
            Page::Changelog => {
                Cow::Borrowed("[o]pen tool site [x]all tools [Tab]switch [?]help [q]uit")
            }
        },
    }
}
