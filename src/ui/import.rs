/// Staged-import review editor
///
/// One row of text inputs per staged record, generic over the draft
/// type so users and albums share the same editor. Nothing here
/// touches the network; commit hands the records to the sequential
/// import runner.

use iced::widget::{button, column, row, scrollable, text, text_input, Space};
use iced::{Element, Length};

use crate::state::staging::{Draft, StagingList};
use crate::Message;

pub fn editor<'a, R: Draft>(list: &'a StagingList<R>, busy: bool) -> Element<'a, Message> {
    let title = text(format!(
        "Review import — {} staged {}(s)",
        list.len(),
        R::KIND
    ))
    .size(22);

    let mut header = row![].spacing(8);
    for &field in R::FIELDS {
        header = header.push(text(field).size(14).width(Length::Fill));
    }
    header = header.push(Space::with_width(Length::Fixed(90.0)));

    let mut rows = column![].spacing(6);
    for (index, record) in list.records().iter().enumerate() {
        let mut cells = row![].spacing(8);
        for &field in R::FIELDS {
            cells = cells.push(
                text_input(field, record.field(field))
                    .on_input(move |value| Message::ImportFieldChanged(index, field, value))
                    .width(Length::Fill),
            );
        }
        cells = cells.push(
            button("Remove")
                .on_press_maybe((!busy).then_some(Message::ImportRowRemoved(index)))
                .width(Length::Fixed(90.0)),
        );
        rows = rows.push(cells);
    }

    let commit_label = if busy {
        "Importing…".to_string()
    } else {
        format!("Import {} row(s)", list.len())
    };
    let footer = row![
        button(text(commit_label))
            .on_press_maybe((!busy && !list.is_empty()).then_some(Message::CommitImport)),
        button("Cancel").on_press_maybe((!busy).then_some(Message::CancelImport)),
    ]
    .spacing(10);

    column![title, header, scrollable(rows).height(Length::Fill), footer]
        .spacing(12)
        .padding(16)
        .into()
}
