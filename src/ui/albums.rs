/// Albums list (selectable table) and detail views

use iced::widget::{button, checkbox, column, container, row, scrollable, text, text_input};
use iced::{Alignment, Element, Length};

use super::{failure, loading};
use crate::state::data::{Album, AlbumField, AlbumForm, AlbumPage, SortOrder};
use crate::state::selection::Selection;
use crate::state::Remote;
use crate::Message;

/// The albums screen: toolbar, optional add-album form, sortable table
pub fn list<'a>(
    albums: &'a Remote<AlbumPage>,
    selection: &'a Selection,
    order: SortOrder,
    dialog: Option<&'a AlbumForm>,
    busy: bool,
) -> Element<'a, Message> {
    let body: Element<Message> = match albums {
        Remote::Idle | Remote::Loading => loading("Loading albums…"),
        Remote::Failed(message) => failure(message),
        Remote::Ready(page) => {
            let page_ids: Vec<String> = page.data.iter().map(|album| album.id.clone()).collect();

            let header = row![
                checkbox("", selection.covers(&page_ids)).on_toggle(Message::PageToggled),
                button(text(format!("Title {}", order.arrow())).size(14))
                    .style(button::text)
                    .on_press(Message::ToggleSort)
                    .width(Length::Fill),
                text("User").size(14).width(Length::Fixed(180.0)),
            ]
            .spacing(8)
            .align_y(Alignment::Center);

            let mut rows = column![].spacing(4);
            for album in &page.data {
                rows = rows.push(table_row(album, selection));
            }

            column![
                text(format!("{} albums total", page.meta.total_count)).size(14),
                header,
                scrollable(rows).height(Length::Fill),
            ]
            .spacing(8)
            .into()
        }
    };

    let toolbar = row![
        button("Add new album").on_press_maybe((!busy).then_some(Message::OpenAlbumDialog)),
        button("Import from file…").on_press_maybe((!busy).then_some(Message::PickImportFile)),
        button(text(format!("Delete selected ({})", selection.len())))
            .on_press_maybe((!busy).then_some(Message::DeleteSelected)),
    ]
    .spacing(10);

    let mut content = column![toolbar].spacing(16).padding(16);
    if let Some(form) = dialog {
        content = content.push(form_panel(
            "Add New Album",
            "Add Album",
            form,
            true,
            busy,
            Message::SubmitAlbumDialog,
        ));
    }
    content.push(body).into()
}

fn table_row<'a>(album: &'a Album, selection: &'a Selection) -> Element<'a, Message> {
    let toggle_id = album.id.clone();
    let open_id = album.id.clone();
    let owner = album
        .user
        .as_ref()
        .map(|user| user.name.as_str())
        .unwrap_or("—");

    row![
        checkbox("", selection.contains(&album.id))
            .on_toggle(move |on| Message::RowToggled(toggle_id.clone(), on)),
        button(text(&album.title))
            .style(button::text)
            .on_press(Message::ShowAlbum(open_id))
            .width(Length::Fill),
        text(owner).size(14).width(Length::Fixed(180.0)),
    ]
    .spacing(8)
    .align_y(Alignment::Center)
    .into()
}

/// The album detail screen: owner, photos, inline edit form
pub fn detail<'a>(
    album: &'a Remote<Album>,
    edit: Option<&'a AlbumForm>,
    busy: bool,
) -> Element<'a, Message> {
    let body: Element<Message> = match album {
        Remote::Idle | Remote::Loading => loading("Loading album…"),
        Remote::Failed(message) => failure(message),
        Remote::Ready(album) => {
            let owner = album
                .user
                .as_ref()
                .map(|user| user.name.as_str())
                .unwrap_or("—");

            let mut photos = column![text("Photos").size(18)].spacing(6);
            let photo_list = album
                .photos
                .as_ref()
                .map(|page| page.data.as_slice())
                .unwrap_or(&[]);
            if photo_list.is_empty() {
                photos = photos.push(text("No photos in this album.").size(14));
            }
            for photo in photo_list {
                photos = photos.push(
                    column![
                        text(&photo.title).size(14),
                        text(&photo.thumbnail_url).size(12),
                    ]
                    .spacing(2),
                );
            }

            let actions: Element<Message> = if let Some(form) = edit {
                form_panel("Edit Album", "Save", form, false, busy, Message::SubmitEdit)
            } else {
                row![
                    button("Edit").on_press_maybe((!busy).then_some(Message::OpenEdit)),
                    button(if busy { "Working…" } else { "Delete" })
                        .on_press_maybe((!busy).then_some(Message::DeleteCurrent)),
                ]
                .spacing(10)
                .into()
            };

            column![
                container(
                    column![
                        text(&album.title).size(24),
                        text(format!("Album id: {}", album.id)).size(13),
                        text(format!("Album Owner: {}", owner)).size(16),
                    ]
                    .spacing(6),
                )
                .padding(16)
                .style(container::rounded_box),
                actions,
                scrollable(photos).height(Length::Fill),
            ]
            .spacing(16)
            .into()
        }
    };

    column![button("Back").on_press(Message::Back), body]
        .spacing(16)
        .padding(16)
        .into()
}

/// `with_user_id` is off for edits: only the title is editable after
/// creation
fn form_panel<'a>(
    title: &'static str,
    submit: &'static str,
    form: &'a AlbumForm,
    with_user_id: bool,
    busy: bool,
    on_submit: Message,
) -> Element<'a, Message> {
    let mut fields = column![
        text(title).size(22),
        text("Title").size(14),
        text_input("Title", &form.title)
            .on_input(|value| Message::AlbumFormChanged(AlbumField::Title, value)),
    ]
    .spacing(6);

    if with_user_id {
        fields = fields
            .push(text("User id").size(14))
            .push(
                text_input("User id", &form.user_id)
                    .on_input(|value| Message::AlbumFormChanged(AlbumField::UserId, value)),
            );
    }

    container(
        fields.push(
            row![
                button(if busy { "Working…" } else { submit })
                    .on_press_maybe((!busy).then_some(on_submit)),
                button("Cancel").on_press(Message::CancelDialog),
            ]
            .spacing(10),
        ),
    )
    .padding(16)
    .max_width(420)
    .style(container::rounded_box)
    .into()
}
