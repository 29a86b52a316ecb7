/// View construction
///
/// Pure functions from state to widgets:
/// - Users card grid, detail panel and forms (users.rs)
/// - Albums table, detail panel and forms (albums.rs)
/// - Staged-import review editor (import.rs)
///
/// Query-level failures replace the view body with a plain error
/// line; mutation-level failures stay in the status bar so the
/// triggering dialog remains open.

pub mod albums;
pub mod import;
pub mod users;

use iced::widget::{container, text};
use iced::{Element, Length};

use crate::Message;

pub(crate) fn loading(note: &'static str) -> Element<'static, Message> {
    container(text(note).size(16))
        .width(Length::Fill)
        .height(Length::Fill)
        .center_x(Length::Fill)
        .center_y(Length::Fill)
        .into()
}

pub(crate) fn failure(message: &str) -> Element<'_, Message> {
    container(text(format!("Error: {}", message)).size(16))
        .padding(16)
        .into()
}
