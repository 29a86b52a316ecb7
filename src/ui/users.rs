/// Users list and detail views

use iced::widget::{button, checkbox, column, container, row, scrollable, text, text_input};
use iced::{Alignment, Element, Length};
use iced_aw::Wrap;

use super::{failure, loading};
use crate::state::data::{User, UserField, UserForm};
use crate::state::selection::Selection;
use crate::state::Remote;
use crate::Message;

/// The users screen: toolbar, optional add-user form, card grid
pub fn list<'a>(
    users: &'a Remote<Vec<User>>,
    selection: &'a Selection,
    dialog: Option<&'a UserForm>,
    busy: bool,
) -> Element<'a, Message> {
    let body: Element<Message> = match users {
        Remote::Idle | Remote::Loading => loading("Loading users…"),
        Remote::Failed(message) => failure(message),
        Remote::Ready(list) => {
            let mut grid = Wrap::new().spacing(12.0).line_spacing(12.0);
            for user in list {
                grid = grid.push(card(user, selection));
            }
            scrollable(grid).height(Length::Fill).into()
        }
    };

    let toolbar = row![
        button("Add new user").on_press_maybe((!busy).then_some(Message::OpenUserDialog)),
        button("Import from file…").on_press_maybe((!busy).then_some(Message::PickImportFile)),
        button(text(format!("Delete selected ({})", selection.len())))
            .on_press_maybe((!busy).then_some(Message::DeleteSelected)),
    ]
    .spacing(10);

    let mut content = column![toolbar].spacing(16).padding(16);
    if let Some(form) = dialog {
        content = content.push(form_panel(
            "Add New User",
            "Add User",
            form,
            busy,
            Message::SubmitUserDialog,
        ));
    }
    content.push(body).into()
}

fn card<'a>(user: &'a User, selection: &'a Selection) -> Element<'a, Message> {
    let toggle_id = user.id.clone();
    let detail_id = user.id.clone();

    let header = row![
        checkbox("", selection.contains(&user.id))
            .on_toggle(move |on| Message::RowToggled(toggle_id.clone(), on)),
        column![text(&user.name).size(18), text(&user.username).size(13)].spacing(2),
    ]
    .spacing(8)
    .align_y(Alignment::Center);

    container(
        column![
            header,
            text(format!("Email: {}", user.email)).size(14),
            text(format!("Phone: {}", user.phone)).size(14),
            button("View details").on_press(Message::ShowUser(detail_id)),
        ]
        .spacing(8),
    )
    .padding(12)
    .width(Length::Fixed(260.0))
    .style(container::rounded_box)
    .into()
}

/// The user detail screen with inline edit form
pub fn detail<'a>(
    user: &'a Remote<User>,
    edit: Option<&'a UserForm>,
    busy: bool,
) -> Element<'a, Message> {
    let body: Element<Message> = match user {
        Remote::Idle | Remote::Loading => loading("Loading user…"),
        Remote::Failed(message) => failure(message),
        Remote::Ready(user) => {
            let mut info = column![
                text(&user.name).size(24),
                text(format!("Username: {}", user.username)).size(16),
                text(format!("Email: {}", user.email)).size(16),
                text(format!("Phone: {}", user.phone)).size(16),
            ]
            .spacing(6);

            if let Some(address) = &user.address {
                info = info.push(
                    text(format!(
                        "Address: {}, {}, {}",
                        address.street, address.city, address.zipcode
                    ))
                    .size(16),
                );
            }
            if let Some(company) = &user.company {
                info = info.push(text(format!("Company: {}", company.name)).size(16));
            }

            let actions: Element<Message> = if let Some(form) = edit {
                form_panel("Edit User", "Save", form, busy, Message::SubmitEdit)
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
                container(info).padding(16).style(container::rounded_box),
                actions,
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

fn form_panel<'a>(
    title: &'static str,
    submit: &'static str,
    form: &'a UserForm,
    busy: bool,
    on_submit: Message,
) -> Element<'a, Message> {
    let field = |label: &'static str, value: &'a str, target: UserField| {
        column![
            text(label).size(14),
            text_input(label, value).on_input(move |value| Message::UserFormChanged(target, value)),
        ]
        .spacing(4)
    };

    container(
        column![
            text(title).size(22),
            field("Name", &form.name, UserField::Name),
            field("Username", &form.username, UserField::Username),
            field("Email", &form.email, UserField::Email),
            field("Phone", &form.phone, UserField::Phone),
            row![
                button(if busy { "Working…" } else { submit })
                    .on_press_maybe((!busy).then_some(on_submit)),
                button("Cancel").on_press(Message::CancelDialog),
            ]
            .spacing(10),
        ]
        .spacing(10),
    )
    .padding(16)
    .max_width(420)
    .style(container::rounded_box)
    .into()
}
