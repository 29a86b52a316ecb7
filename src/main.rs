use iced::widget::{button, column, container, row, text};
use iced::{Element, Length, Task, Theme};
use rfd::FileDialog;
use serde_json::Value;

mod api;
mod batch;
mod error;
mod import;
mod state;
mod ui;

use api::cache::ResponseCache;
use api::operations::{album_list_variables, id_variables, names, no_variables};
use api::GqlClient;
use batch::BatchOutcome;
use error::Error;
use state::data::{
    Album, AlbumDraft, AlbumField, AlbumForm, AlbumPage, SortOrder, User, UserDraft, UserField,
    UserForm,
};
use state::selection::Selection;
use state::staging::{CommitReport, StagingList};
use state::Remote;

/// Which view is on screen
#[derive(Debug, Clone, PartialEq)]
enum Screen {
    Users,
    UserDetail(String),
    Albums,
    AlbumDetail(String),
}

/// Staged rows pending import, tagged by target resource
#[derive(Debug, Clone)]
enum ImportStaging {
    Users(StagingList<UserDraft>),
    Albums(StagingList<AlbumDraft>),
}

/// Aggregated result of committing staged rows
#[derive(Debug, Clone)]
enum ImportReport {
    Users(CommitReport<UserDraft>),
    Albums(CommitReport<AlbumDraft>),
}

/// Main application state
struct Console {
    client: GqlClient,
    /// The one response cache instance; every query resolves through it
    cache: ResponseCache,
    screen: Screen,
    /// Status message to display to the user
    status: String,
    users: Remote<Vec<User>>,
    albums: Remote<AlbumPage>,
    user_detail: Remote<User>,
    album_detail: Remote<Album>,
    album_sort: SortOrder,
    /// Checked rows of whichever list is on screen
    selection: Selection,
    user_dialog: Option<UserForm>,
    album_dialog: Option<AlbumForm>,
    edit_user: Option<UserForm>,
    edit_album: Option<AlbumForm>,
    import: Option<ImportStaging>,
    /// True while a mutation or batch is in flight; at most one batch
    /// runs at a time per view
    busy: bool,
}

/// Application messages (events)
#[derive(Debug, Clone)]
enum Message {
    // navigation
    ShowUsers,
    ShowAlbums,
    ShowUser(String),
    ShowAlbum(String),
    Back,

    // query completions
    UsersLoaded(Result<Vec<User>, Error>),
    UserLoaded(Result<User, Error>),
    AlbumsLoaded(Result<AlbumPage, Error>),
    AlbumLoaded(Result<Album, Error>),

    // list controls
    ToggleSort,
    RowToggled(String, bool),
    PageToggled(bool),

    // create dialogs
    OpenUserDialog,
    OpenAlbumDialog,
    UserFormChanged(UserField, String),
    AlbumFormChanged(AlbumField, String),
    SubmitUserDialog,
    SubmitAlbumDialog,
    CancelDialog,
    UserCreated(Result<User, Error>),
    AlbumCreated(Result<Album, Error>),

    // detail edit and delete
    OpenEdit,
    SubmitEdit,
    UserUpdated(Result<User, Error>),
    AlbumUpdated(Result<Album, Error>),
    DeleteCurrent,
    CurrentDeleted(Result<bool, Error>),

    // bulk delete
    DeleteSelected,
    BulkDeleteDone(Result<BatchOutcome, Error>),

    // spreadsheet import
    PickImportFile,
    ImportFieldChanged(usize, &'static str, String),
    ImportRowRemoved(usize),
    CommitImport,
    ImportDone(ImportReport),
    CancelImport,
}

impl Console {
    /// Create a new instance of the application and kick off the
    /// initial users fetch
    fn new() -> (Self, Task<Message>) {
        let mut console = Console {
            client: GqlClient::from_env(),
            cache: ResponseCache::default(),
            screen: Screen::Users,
            status: "Ready.".to_string(),
            users: Remote::Idle,
            albums: Remote::Idle,
            user_detail: Remote::Idle,
            album_detail: Remote::Idle,
            album_sort: SortOrder::default(),
            selection: Selection::default(),
            user_dialog: None,
            album_dialog: None,
            edit_user: None,
            edit_album: None,
            import: None,
            busy: false,
        };
        let task = console.load_users();
        (console, task)
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            // ---- navigation ----
            Message::ShowUsers => self.open_list(Screen::Users),
            Message::ShowAlbums => self.open_list(Screen::Albums),
            Message::ShowUser(id) => {
                self.close_forms();
                self.import = None;
                self.screen = Screen::UserDetail(id.clone());
                self.load_user(id)
            }
            Message::ShowAlbum(id) => {
                self.close_forms();
                self.import = None;
                self.screen = Screen::AlbumDetail(id.clone());
                self.load_album(id)
            }
            Message::Back => match self.screen.clone() {
                Screen::UserDetail(_) => self.open_list(Screen::Users),
                Screen::AlbumDetail(_) => self.open_list(Screen::Albums),
                _ => Task::none(),
            },

            // ---- query completions ----
            Message::UsersLoaded(result) => {
                match result {
                    Ok(list) => {
                        self.cache.store(
                            names::GET_USERS,
                            &no_variables(),
                            serde_json::to_value(&list).unwrap_or(Value::Null),
                        );
                        let ids: Vec<String> = list.iter().map(|user| user.id.clone()).collect();
                        self.selection.prune(&ids);
                        self.users = Remote::Ready(list);
                    }
                    Err(error) => self.users = Remote::Failed(error.to_string()),
                }
                Task::none()
            }
            Message::AlbumsLoaded(result) => {
                match result {
                    Ok(page) => {
                        self.cache.store(
                            names::GET_ALBUMS,
                            &album_list_variables(self.album_sort),
                            serde_json::to_value(&page).unwrap_or(Value::Null),
                        );
                        let ids: Vec<String> =
                            page.data.iter().map(|album| album.id.clone()).collect();
                        self.selection.prune(&ids);
                        self.albums = Remote::Ready(page);
                    }
                    Err(error) => self.albums = Remote::Failed(error.to_string()),
                }
                Task::none()
            }
            Message::UserLoaded(result) => {
                match result {
                    Ok(user) => {
                        self.cache.store(
                            names::GET_USER_BY_ID,
                            &id_variables(&user.id),
                            serde_json::to_value(&user).unwrap_or(Value::Null),
                        );
                        self.user_detail = Remote::Ready(user);
                    }
                    Err(error) => self.user_detail = Remote::Failed(error.to_string()),
                }
                Task::none()
            }
            Message::AlbumLoaded(result) => {
                match result {
                    Ok(album) => {
                        self.cache.store(
                            names::GET_ALBUM_BY_ID,
                            &id_variables(&album.id),
                            serde_json::to_value(&album).unwrap_or(Value::Null),
                        );
                        self.album_detail = Remote::Ready(album);
                    }
                    Err(error) => self.album_detail = Remote::Failed(error.to_string()),
                }
                Task::none()
            }

            // ---- list controls ----
            Message::ToggleSort => {
                self.album_sort = self.album_sort.flipped();
                self.load_albums()
            }
            Message::RowToggled(id, _on) => {
                self.selection.toggle(&id);
                Task::none()
            }
            Message::PageToggled(on) => {
                let page = self.current_page_ids();
                self.selection.toggle_all(&page, on);
                Task::none()
            }

            // ---- create dialogs ----
            Message::OpenUserDialog => {
                self.user_dialog = Some(UserForm::default());
                Task::none()
            }
            Message::OpenAlbumDialog => {
                self.album_dialog = Some(AlbumForm::default());
                Task::none()
            }
            Message::UserFormChanged(field, value) => {
                if let Some(form) = self.user_dialog.as_mut() {
                    form.set(field, value);
                } else if let Some(form) = self.edit_user.as_mut() {
                    form.set(field, value);
                }
                Task::none()
            }
            Message::AlbumFormChanged(field, value) => {
                if let Some(form) = self.album_dialog.as_mut() {
                    form.set(field, value);
                } else if let Some(form) = self.edit_album.as_mut() {
                    form.set(field, value);
                }
                Task::none()
            }
            Message::CancelDialog => {
                self.close_forms();
                Task::none()
            }
            Message::SubmitUserDialog => {
                let Some(form) = self.user_dialog.as_ref() else {
                    return Task::none();
                };
                match form.create_input() {
                    Ok(input) => {
                        self.busy = true;
                        self.status = "Adding user…".to_string();
                        let client = self.client.clone();
                        Task::perform(
                            async move { client.create_user(&input).await },
                            Message::UserCreated,
                        )
                    }
                    Err(error) => {
                        self.status = format!("⚠️  {}", error);
                        Task::none()
                    }
                }
            }
            Message::SubmitAlbumDialog => {
                let Some(form) = self.album_dialog.as_ref() else {
                    return Task::none();
                };
                match form.create_input() {
                    Ok(input) => {
                        self.busy = true;
                        self.status = "Adding album…".to_string();
                        let client = self.client.clone();
                        Task::perform(
                            async move { client.create_album(&input).await },
                            Message::AlbumCreated,
                        )
                    }
                    Err(error) => {
                        self.status = format!("⚠️  {}", error);
                        Task::none()
                    }
                }
            }
            Message::UserCreated(result) => {
                self.busy = false;
                match result {
                    Ok(user) => {
                        self.user_dialog = None;
                        self.status = format!("✅ Added user {}.", user.name);
                        self.cache.invalidate_operation(names::GET_USERS);
                        self.refresh_current_list()
                    }
                    Err(error) => {
                        // Dialog stays open for correction
                        self.status = format!("⚠️  {}", error);
                        Task::none()
                    }
                }
            }
            Message::AlbumCreated(result) => {
                self.busy = false;
                match result {
                    Ok(album) => {
                        self.album_dialog = None;
                        self.status = format!("✅ Added album {}.", album.title);
                        self.cache.invalidate_operation(names::GET_ALBUMS);
                        self.refresh_current_list()
                    }
                    Err(error) => {
                        self.status = format!("⚠️  {}", error);
                        Task::none()
                    }
                }
            }

            // ---- detail edit and delete ----
            Message::OpenEdit => {
                match &self.screen {
                    Screen::UserDetail(_) => {
                        if let Some(user) = self.user_detail.ready() {
                            self.edit_user = Some(UserForm::from_user(user));
                        }
                    }
                    Screen::AlbumDetail(_) => {
                        if let Some(album) = self.album_detail.ready() {
                            self.edit_album = Some(AlbumForm::from_album(album));
                        }
                    }
                    _ => {}
                }
                Task::none()
            }
            Message::SubmitEdit => match self.screen.clone() {
                Screen::UserDetail(id) => {
                    let Some(form) = self.edit_user.as_ref() else {
                        return Task::none();
                    };
                    match form.update_input() {
                        Ok(input) => {
                            self.busy = true;
                            self.status = "Saving user…".to_string();
                            let client = self.client.clone();
                            Task::perform(
                                async move { client.update_user(&id, &input).await },
                                Message::UserUpdated,
                            )
                        }
                        Err(error) => {
                            self.status = format!("⚠️  {}", error);
                            Task::none()
                        }
                    }
                }
                Screen::AlbumDetail(id) => {
                    let Some(form) = self.edit_album.as_ref() else {
                        return Task::none();
                    };
                    match form.update_input() {
                        Ok(input) => {
                            self.busy = true;
                            self.status = "Saving album…".to_string();
                            let client = self.client.clone();
                            Task::perform(
                                async move { client.update_album(&id, &input).await },
                                Message::AlbumUpdated,
                            )
                        }
                        Err(error) => {
                            self.status = format!("⚠️  {}", error);
                            Task::none()
                        }
                    }
                }
                _ => Task::none(),
            },
            Message::UserUpdated(result) => {
                self.busy = false;
                match result {
                    Ok(user) => {
                        self.edit_user = None;
                        self.status = format!("✅ Saved user {}.", user.name);
                        self.cache.invalidate_operation(names::GET_USERS);
                        self.cache.invalidate_operation(names::GET_USER_BY_ID);
                        match self.screen.clone() {
                            Screen::UserDetail(id) => self.load_user(id),
                            _ => Task::none(),
                        }
                    }
                    Err(error) => {
                        self.status = format!("⚠️  {}", error);
                        Task::none()
                    }
                }
            }
            Message::AlbumUpdated(result) => {
                self.busy = false;
                match result {
                    Ok(album) => {
                        self.edit_album = None;
                        self.status = format!("✅ Saved album {}.", album.title);
                        self.cache.invalidate_operation(names::GET_ALBUMS);
                        self.cache.invalidate_operation(names::GET_ALBUM_BY_ID);
                        match self.screen.clone() {
                            Screen::AlbumDetail(id) => self.load_album(id),
                            _ => Task::none(),
                        }
                    }
                    Err(error) => {
                        self.status = format!("⚠️  {}", error);
                        Task::none()
                    }
                }
            }
            Message::DeleteCurrent => match self.screen.clone() {
                Screen::UserDetail(id) => {
                    self.busy = true;
                    self.status = "Deleting user…".to_string();
                    let client = self.client.clone();
                    Task::perform(
                        async move { client.delete_user(&id).await },
                        Message::CurrentDeleted,
                    )
                }
                Screen::AlbumDetail(id) => {
                    self.busy = true;
                    self.status = "Deleting album…".to_string();
                    let client = self.client.clone();
                    Task::perform(
                        async move { client.delete_album(&id).await },
                        Message::CurrentDeleted,
                    )
                }
                _ => Task::none(),
            },
            Message::CurrentDeleted(result) => {
                self.busy = false;
                match result {
                    Ok(_) => {
                        self.status = "✅ Deleted.".to_string();
                        match &self.screen {
                            Screen::UserDetail(_) => {
                                self.cache.invalidate_operation(names::GET_USERS);
                                self.cache.invalidate_operation(names::GET_USER_BY_ID);
                                self.open_list(Screen::Users)
                            }
                            Screen::AlbumDetail(_) => {
                                self.cache.invalidate_operation(names::GET_ALBUMS);
                                self.cache.invalidate_operation(names::GET_ALBUM_BY_ID);
                                self.open_list(Screen::Albums)
                            }
                            _ => Task::none(),
                        }
                    }
                    Err(error) => {
                        self.status = format!("⚠️  {}", error);
                        Task::none()
                    }
                }
            }

            // ---- bulk delete ----
            Message::DeleteSelected => {
                if self.busy {
                    self.status = "A batch is already running.".to_string();
                    return Task::none();
                }
                if !matches!(self.screen, Screen::Users | Screen::Albums) {
                    return Task::none();
                }

                let page = self.current_page_ids();
                let ids = self.selection.in_page_order(&page);
                self.busy = true;
                if !ids.is_empty() {
                    self.status = format!("Deleting {} item(s)…", ids.len());
                }

                let client = self.client.clone();
                match self.screen {
                    Screen::Users => Task::perform(
                        async move {
                            batch::run_all(ids, move |id| {
                                let client = client.clone();
                                async move { client.delete_user(&id).await.map(drop) }
                            })
                            .await
                        },
                        Message::BulkDeleteDone,
                    ),
                    Screen::Albums => Task::perform(
                        async move {
                            batch::run_all(ids, move |id| {
                                let client = client.clone();
                                async move { client.delete_album(&id).await.map(drop) }
                            })
                            .await
                        },
                        Message::BulkDeleteDone,
                    ),
                    _ => Task::none(),
                }
            }
            Message::BulkDeleteDone(result) => {
                self.busy = false;
                match result {
                    Ok(outcome) => {
                        // One refresh per batch, regardless of partial failure
                        self.selection.clear();
                        self.status = outcome.summary("Deleted");
                        match &self.screen {
                            Screen::Users => self.cache.invalidate_operation(names::GET_USERS),
                            Screen::Albums => self.cache.invalidate_operation(names::GET_ALBUMS),
                            _ => {}
                        }
                        self.refresh_current_list()
                    }
                    Err(Error::EmptySelection) => {
                        self.status = "Nothing selected.".to_string();
                        Task::none()
                    }
                    Err(error) => {
                        self.status = format!("⚠️  {}", error);
                        Task::none()
                    }
                }
            }

            // ---- spreadsheet import ----
            Message::PickImportFile => {
                if self.busy {
                    return Task::none();
                }
                let Some(path) = FileDialog::new()
                    .set_title("Select import file")
                    .add_filter("Spreadsheets", &["csv", "xlsx", "xls", "ods"])
                    .pick_file()
                else {
                    return Task::none();
                };

                let file_name = path
                    .file_name()
                    .map(|name| name.to_string_lossy().to_string())
                    .unwrap_or_default();
                let bytes = match std::fs::read(&path) {
                    Ok(bytes) => bytes,
                    Err(error) => {
                        self.status = format!("⚠️  Could not read {}: {}", file_name, error);
                        return Task::none();
                    }
                };

                let staged = match &self.screen {
                    Screen::Users => StagingList::<UserDraft>::from_file(&file_name, &bytes)
                        .map(ImportStaging::Users),
                    Screen::Albums => StagingList::<AlbumDraft>::from_file(&file_name, &bytes)
                        .map(ImportStaging::Albums),
                    _ => return Task::none(),
                };
                match staged {
                    Ok(staging) => {
                        let count = match &staging {
                            ImportStaging::Users(list) => list.len(),
                            ImportStaging::Albums(list) => list.len(),
                        };
                        self.status = format!("Parsed {} row(s) from {}.", count, file_name);
                        self.import = Some(staging);
                    }
                    Err(error) => self.status = format!("⚠️  {}", error),
                }
                Task::none()
            }
            Message::ImportFieldChanged(index, field, value) => {
                match self.import.as_mut() {
                    Some(ImportStaging::Users(list)) => list.edit_field(index, field, value),
                    Some(ImportStaging::Albums(list)) => list.edit_field(index, field, value),
                    None => {}
                }
                Task::none()
            }
            Message::ImportRowRemoved(index) => {
                match self.import.as_mut() {
                    Some(ImportStaging::Users(list)) => list.remove(index),
                    Some(ImportStaging::Albums(list)) => list.remove(index),
                    None => {}
                }
                Task::none()
            }
            Message::CancelImport => {
                self.import = None;
                self.status = "Import cancelled.".to_string();
                Task::none()
            }
            Message::CommitImport => {
                if self.busy {
                    return Task::none();
                }
                match &self.import {
                    Some(ImportStaging::Users(list)) => {
                        if list.is_empty() {
                            self.status = "No rows staged.".to_string();
                            return Task::none();
                        }
                        let records = list.records().to_vec();
                        self.busy = true;
                        self.status = format!("Importing {} user(s)…", records.len());
                        let client = self.client.clone();
                        Task::perform(
                            async move {
                                ImportReport::Users(
                                    state::staging::commit_all(records, move |draft: UserDraft| {
                                        let client = client.clone();
                                        async move {
                                            client.create_user(&draft.input()).await.map(drop)
                                        }
                                    })
                                    .await,
                                )
                            },
                            Message::ImportDone,
                        )
                    }
                    Some(ImportStaging::Albums(list)) => {
                        if list.is_empty() {
                            self.status = "No rows staged.".to_string();
                            return Task::none();
                        }
                        let records = list.records().to_vec();
                        self.busy = true;
                        self.status = format!("Importing {} album(s)…", records.len());
                        let client = self.client.clone();
                        Task::perform(
                            async move {
                                ImportReport::Albums(
                                    state::staging::commit_all(records, move |draft: AlbumDraft| {
                                        let client = client.clone();
                                        async move {
                                            client.create_album(&draft.input()).await.map(drop)
                                        }
                                    })
                                    .await,
                                )
                            },
                            Message::ImportDone,
                        )
                    }
                    None => Task::none(),
                }
            }
            Message::ImportDone(report) => {
                self.busy = false;
                let outcome = match report {
                    ImportReport::Users(report) => {
                        self.cache.invalidate_operation(names::GET_USERS);
                        // Keep rejected rows staged for correction
                        self.import = if report.rejected.is_empty() {
                            None
                        } else {
                            Some(ImportStaging::Users(StagingList::from_records(
                                report.rejected,
                            )))
                        };
                        report.outcome
                    }
                    ImportReport::Albums(report) => {
                        self.cache.invalidate_operation(names::GET_ALBUMS);
                        self.import = if report.rejected.is_empty() {
                            None
                        } else {
                            Some(ImportStaging::Albums(StagingList::from_records(
                                report.rejected,
                            )))
                        };
                        report.outcome
                    }
                };
                self.status = outcome.summary("Imported");
                self.refresh_current_list()
            }
        }
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        let sidebar = container(
            column![
                text("GQL Admin").size(22),
                button("Users")
                    .width(Length::Fill)
                    .on_press(Message::ShowUsers),
                button("Albums")
                    .width(Length::Fill)
                    .on_press(Message::ShowAlbums),
            ]
            .spacing(12)
            .padding(16)
            .width(Length::Fixed(180.0)),
        )
        .height(Length::Fill);

        let content: Element<Message> = if let Some(staging) = &self.import {
            match staging {
                ImportStaging::Users(list) => ui::import::editor(list, self.busy),
                ImportStaging::Albums(list) => ui::import::editor(list, self.busy),
            }
        } else {
            match &self.screen {
                Screen::Users => ui::users::list(
                    &self.users,
                    &self.selection,
                    self.user_dialog.as_ref(),
                    self.busy,
                ),
                Screen::UserDetail(_) => {
                    ui::users::detail(&self.user_detail, self.edit_user.as_ref(), self.busy)
                }
                Screen::Albums => ui::albums::list(
                    &self.albums,
                    &self.selection,
                    self.album_sort,
                    self.album_dialog.as_ref(),
                    self.busy,
                ),
                Screen::AlbumDetail(_) => {
                    ui::albums::detail(&self.album_detail, self.edit_album.as_ref(), self.busy)
                }
            }
        };

        let status_bar = container(text(&self.status).size(14))
            .padding(8)
            .width(Length::Fill);

        column![
            row![
                sidebar,
                container(content).width(Length::Fill).height(Length::Fill)
            ]
            .height(Length::Fill),
            status_bar,
        ]
        .into()
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }

    // ---- helpers ----

    /// Navigate to a list screen: forms and import staging are
    /// dropped, the selection starts empty
    fn open_list(&mut self, screen: Screen) -> Task<Message> {
        self.screen = screen;
        self.close_forms();
        self.import = None;
        self.selection.clear();
        match &self.screen {
            Screen::Users => self.load_users(),
            Screen::Albums => self.load_albums(),
            _ => Task::none(),
        }
    }

    fn close_forms(&mut self) {
        self.user_dialog = None;
        self.album_dialog = None;
        self.edit_user = None;
        self.edit_album = None;
    }

    fn current_page_ids(&self) -> Vec<String> {
        match &self.screen {
            Screen::Users => self
                .users
                .ready()
                .map(|list| list.iter().map(|user| user.id.clone()).collect())
                .unwrap_or_default(),
            Screen::Albums => self
                .albums
                .ready()
                .map(|page| page.data.iter().map(|album| album.id.clone()).collect())
                .unwrap_or_default(),
            _ => Vec::new(),
        }
    }

    /// Re-issue the query behind the current list screen; with the
    /// cache invalidated beforehand this is the one post-mutation
    /// refresh
    fn refresh_current_list(&mut self) -> Task<Message> {
        match &self.screen {
            Screen::Users => self.load_users(),
            Screen::Albums => self.load_albums(),
            _ => Task::none(),
        }
    }

    fn load_users(&mut self) -> Task<Message> {
        if let Some(value) = self.cache.lookup(names::GET_USERS, &no_variables()) {
            if let Ok(list) = serde_json::from_value::<Vec<User>>(value.clone()) {
                let ids: Vec<String> = list.iter().map(|user| user.id.clone()).collect();
                self.selection.prune(&ids);
                self.users = Remote::Ready(list);
                return Task::none();
            }
            self.cache.invalidate(names::GET_USERS, &no_variables());
        }
        self.users = Remote::Loading;
        let client = self.client.clone();
        Task::perform(
            async move { client.fetch_users().await },
            Message::UsersLoaded,
        )
    }

    fn load_albums(&mut self) -> Task<Message> {
        let variables = album_list_variables(self.album_sort);
        if let Some(value) = self.cache.lookup(names::GET_ALBUMS, &variables) {
            if let Ok(page) = serde_json::from_value::<AlbumPage>(value.clone()) {
                let ids: Vec<String> = page.data.iter().map(|album| album.id.clone()).collect();
                self.selection.prune(&ids);
                self.albums = Remote::Ready(page);
                return Task::none();
            }
            self.cache.invalidate(names::GET_ALBUMS, &variables);
        }
        self.albums = Remote::Loading;
        let client = self.client.clone();
        let order = self.album_sort;
        Task::perform(
            async move { client.fetch_albums(order).await },
            Message::AlbumsLoaded,
        )
    }

    fn load_user(&mut self, id: String) -> Task<Message> {
        let variables = id_variables(&id);
        if let Some(value) = self.cache.lookup(names::GET_USER_BY_ID, &variables) {
            if let Ok(user) = serde_json::from_value::<User>(value.clone()) {
                self.user_detail = Remote::Ready(user);
                return Task::none();
            }
            self.cache.invalidate(names::GET_USER_BY_ID, &variables);
        }
        self.user_detail = Remote::Loading;
        let client = self.client.clone();
        Task::perform(
            async move { client.fetch_user(&id).await },
            Message::UserLoaded,
        )
    }

    fn load_album(&mut self, id: String) -> Task<Message> {
        let variables = id_variables(&id);
        if let Some(value) = self.cache.lookup(names::GET_ALBUM_BY_ID, &variables) {
            if let Ok(album) = serde_json::from_value::<Album>(value.clone()) {
                self.album_detail = Remote::Ready(album);
                return Task::none();
            }
            self.cache.invalidate(names::GET_ALBUM_BY_ID, &variables);
        }
        self.album_detail = Remote::Loading;
        let client = self.client.clone();
        Task::perform(
            async move { client.fetch_album(&id).await },
            Message::AlbumLoaded,
        )
    }
}

fn main() -> iced::Result {
    iced::application("GQL Admin Console", Console::update, Console::view)
        .theme(Console::theme)
        .centered()
        .run_with(Console::new)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn console() -> Console {
        Console::new().0
    }

    fn sample_user(id: &str, name: &str) -> User {
        User {
            id: id.to_string(),
            name: name.to_string(),
            username: name.to_lowercase(),
            email: format!("{}@example.com", name.to_lowercase()),
            phone: "555-0100".to_string(),
            website: None,
            address: None,
            company: None,
        }
    }

    fn sample_users() -> Vec<User> {
        vec![sample_user("u1", "Ada"), sample_user("u2", "Grace")]
    }

    #[test]
    fn test_users_loaded_caches_and_prunes_selection() {
        let mut console = console();
        console.selection.toggle("u1");
        console.selection.toggle("stale");

        let _ = console.update(Message::UsersLoaded(Ok(sample_users())));

        assert!(matches!(console.users, Remote::Ready(_)));
        assert!(console
            .cache
            .lookup(names::GET_USERS, &no_variables())
            .is_some());
        assert!(console.selection.contains("u1"));
        assert!(!console.selection.contains("stale"));
    }

    #[test]
    fn test_bulk_completion_clears_selection_and_refreshes_once() {
        let mut console = console();
        let _ = console.update(Message::UsersLoaded(Ok(sample_users())));
        console.selection.toggle("u1");
        console.selection.toggle("u2");

        let outcome = BatchOutcome {
            succeeded: 1,
            failed: vec![("u2".to_string(), Error::Server("not found".to_string()))],
        };
        let _ = console.update(Message::BulkDeleteDone(Ok(outcome)));

        assert!(!console.busy);
        assert!(console.selection.is_empty());
        assert!(console.status.contains("not found"));
        // The cached page is gone and the one refresh is in flight
        assert!(console
            .cache
            .lookup(names::GET_USERS, &no_variables())
            .is_none());
        assert!(matches!(console.users, Remote::Loading));
    }

    #[test]
    fn test_empty_selection_skips_the_refresh() {
        let mut console = console();
        let _ = console.update(Message::UsersLoaded(Ok(sample_users())));

        let _ = console.update(Message::BulkDeleteDone(Err(Error::EmptySelection)));

        assert_eq!(console.status, "Nothing selected.");
        assert!(matches!(console.users, Remote::Ready(_)));
    }

    #[test]
    fn test_mutation_error_keeps_the_dialog_open() {
        let mut console = console();
        console.user_dialog = Some(UserForm::default());

        let _ = console.update(Message::UserCreated(Err(Error::Server(
            "email taken".to_string(),
        ))));

        assert!(console.user_dialog.is_some());
        assert!(console.status.contains("email taken"));
        assert!(!console.busy);
    }

    #[test]
    fn test_navigating_to_a_list_resets_selection_and_staging() {
        let mut console = console();
        console.selection.toggle("u1");
        console.import = Some(ImportStaging::Users(StagingList::from_records(vec![
            UserDraft::default(),
        ])));

        let _ = console.update(Message::ShowAlbums);

        assert!(console.selection.is_empty());
        assert!(console.import.is_none());
        assert_eq!(console.screen, Screen::Albums);
    }

    #[test]
    fn test_import_done_keeps_rejected_rows_staged() {
        let mut console = console();
        console.import = Some(ImportStaging::Albums(StagingList::from_records(vec![
            AlbumDraft {
                title: "kept".to_string(),
                user_id: "1".to_string(),
            },
        ])));

        let report = CommitReport {
            outcome: BatchOutcome {
                succeeded: 1,
                failed: vec![(
                    "kept".to_string(),
                    Error::Server("duplicate".to_string()),
                )],
            },
            rejected: vec![AlbumDraft {
                title: "kept".to_string(),
                user_id: "1".to_string(),
            }],
        };
        let _ = console.update(Message::ImportDone(ImportReport::Albums(report)));

        match &console.import {
            Some(ImportStaging::Albums(list)) => {
                assert_eq!(list.len(), 1);
                assert_eq!(list.records()[0].title, "kept");
            }
            other => panic!("expected rejected albums to stay staged, got {:?}", other),
        }
    }
}
