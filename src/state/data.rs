/// Typed records for the two managed resources
///
/// These structs mirror the shapes the GraphQL API returns and
/// accepts. The server owns every persisted record; the client only
/// ever holds a transient cached copy, so everything here is plain
/// data that serializes cleanly for the response cache.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::staging::Draft;
use crate::error::Error;

/// A user as returned by the API
///
/// List queries fetch only the core fields; the detail query adds
/// address and company, so those stay optional with defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub username: String,
    pub email: String,
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<Company>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Address {
    #[serde(default)]
    pub street: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suite: Option<String>,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub zipcode: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geo: Option<Geo>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Geo {
    pub lat: String,
    pub lng: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Company {
    #[serde(default)]
    pub name: String,
    #[serde(
        rename = "catchPhrase",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub catch_phrase: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bs: Option<String>,
}

/// An album; photos are read-only from this client's perspective
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Album {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<AlbumOwner>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photos: Option<PhotoPage>,
}

/// The owning user as selected by album queries
///
/// The list query only asks for the name; the detail query adds the id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlbumOwner {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Photo {
    pub id: String,
    pub title: String,
    pub url: String,
    #[serde(rename = "thumbnailUrl")]
    pub thumbnail_url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PhotoPage {
    #[serde(default)]
    pub data: Vec<Photo>,
}

/// One page of albums plus the server-reported total
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AlbumPage {
    #[serde(default)]
    pub data: Vec<Album>,
    #[serde(default)]
    pub meta: Meta,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Meta {
    #[serde(rename = "totalCount", default)]
    pub total_count: i64,
}

// ========== Mutation inputs ==========

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateUserInput {
    pub name: String,
    pub username: String,
    pub email: String,
    pub phone: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UpdateUserInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateAlbumInput {
    pub title: String,
    #[serde(rename = "userId")]
    pub user_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UpdateAlbumInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

// ========== Sorting ==========

/// Sort direction for the albums list (always sorted by title)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl SortOrder {
    pub fn as_graphql(self) -> &'static str {
        match self {
            SortOrder::Ascending => "ASC",
            SortOrder::Descending => "DESC",
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            SortOrder::Ascending => SortOrder::Descending,
            SortOrder::Descending => SortOrder::Ascending,
        }
    }

    pub fn arrow(self) -> &'static str {
        match self {
            SortOrder::Ascending => "▲",
            SortOrder::Descending => "▼",
        }
    }
}

// ========== Dialog forms ==========

/// Fields of the user create/edit form
#[derive(Debug, Clone, Copy)]
pub enum UserField {
    Name,
    Username,
    Email,
    Phone,
}

/// In-progress input for the user create/edit dialogs
///
/// Required-field checks run client-side before anything is
/// submitted; the dialog stays open when validation fails.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserForm {
    pub name: String,
    pub username: String,
    pub email: String,
    pub phone: String,
}

impl UserForm {
    pub fn from_user(user: &User) -> Self {
        UserForm {
            name: user.name.clone(),
            username: user.username.clone(),
            email: user.email.clone(),
            phone: user.phone.clone(),
        }
    }

    pub fn set(&mut self, field: UserField, value: String) {
        match field {
            UserField::Name => self.name = value,
            UserField::Username => self.username = value,
            UserField::Email => self.email = value,
            UserField::Phone => self.phone = value,
        }
    }

    fn validate(&self) -> Result<(), Error> {
        for (label, value) in [
            ("name", &self.name),
            ("username", &self.username),
            ("email", &self.email),
            ("phone", &self.phone),
        ] {
            if value.trim().is_empty() {
                return Err(Error::Validation(format!("{} is required", label)));
            }
        }
        if !self.email.contains('@') {
            return Err(Error::Validation("email looks malformed".to_string()));
        }
        Ok(())
    }

    pub fn create_input(&self) -> Result<CreateUserInput, Error> {
        self.validate()?;
        Ok(CreateUserInput {
            name: self.name.trim().to_string(),
            username: self.username.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
        })
    }

    pub fn update_input(&self) -> Result<UpdateUserInput, Error> {
        let create = self.create_input()?;
        Ok(UpdateUserInput {
            name: Some(create.name),
            username: Some(create.username),
            email: Some(create.email),
            phone: Some(create.phone),
        })
    }
}

/// Fields of the album create/edit form
#[derive(Debug, Clone, Copy)]
pub enum AlbumField {
    Title,
    UserId,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlbumForm {
    pub title: String,
    pub user_id: String,
}

impl AlbumForm {
    pub fn from_album(album: &Album) -> Self {
        AlbumForm {
            title: album.title.clone(),
            user_id: album
                .user
                .as_ref()
                .and_then(|owner| owner.id.clone())
                .unwrap_or_default(),
        }
    }

    pub fn set(&mut self, field: AlbumField, value: String) {
        match field {
            AlbumField::Title => self.title = value,
            AlbumField::UserId => self.user_id = value,
        }
    }

    pub fn create_input(&self) -> Result<CreateAlbumInput, Error> {
        if self.title.trim().is_empty() {
            return Err(Error::Validation("title is required".to_string()));
        }
        if self.user_id.trim().is_empty() {
            return Err(Error::Validation("userId is required".to_string()));
        }
        Ok(CreateAlbumInput {
            title: self.title.trim().to_string(),
            user_id: self.user_id.trim().to_string(),
        })
    }

    /// Only the title is editable after creation
    pub fn update_input(&self) -> Result<UpdateAlbumInput, Error> {
        if self.title.trim().is_empty() {
            return Err(Error::Validation("title is required".to_string()));
        }
        Ok(UpdateAlbumInput {
            title: Some(self.title.trim().to_string()),
        })
    }
}

// ========== Import drafts ==========

/// A user candidate parsed from an import file, no id yet
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserDraft {
    pub name: String,
    pub username: String,
    pub email: String,
    pub phone: String,
}

impl UserDraft {
    pub fn input(&self) -> CreateUserInput {
        CreateUserInput {
            name: self.name.trim().to_string(),
            username: self.username.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
        }
    }
}

impl Draft for UserDraft {
    const KIND: &'static str = "user";
    const FIELDS: &'static [&'static str] = &["name", "username", "email", "phone"];
    const REQUIRED: &'static [&'static str] = &["name", "username", "email", "phone"];

    fn from_row(row: &BTreeMap<String, String>) -> Self {
        let field = |name: &str| row.get(name).cloned().unwrap_or_default();
        UserDraft {
            name: field("name"),
            username: field("username"),
            email: field("email"),
            phone: field("phone"),
        }
    }

    fn field(&self, name: &str) -> &str {
        match name {
            "name" => &self.name,
            "username" => &self.username,
            "email" => &self.email,
            "phone" => &self.phone,
            _ => "",
        }
    }

    fn set_field(&mut self, name: &str, value: String) {
        match name {
            "name" => self.name = value,
            "username" => self.username = value,
            "email" => self.email = value,
            "phone" => self.phone = value,
            _ => {}
        }
    }

    fn label(&self) -> String {
        [&self.name, &self.username, &self.email]
            .into_iter()
            .find(|value| !value.trim().is_empty())
            .cloned()
            .unwrap_or_else(|| "(blank row)".to_string())
    }
}

/// An album candidate parsed from an import file, no id yet
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlbumDraft {
    pub title: String,
    pub user_id: String,
}

impl AlbumDraft {
    pub fn input(&self) -> CreateAlbumInput {
        CreateAlbumInput {
            title: self.title.trim().to_string(),
            user_id: self.user_id.trim().to_string(),
        }
    }
}

impl Draft for AlbumDraft {
    const KIND: &'static str = "album";
    const FIELDS: &'static [&'static str] = &["title", "userId"];
    const REQUIRED: &'static [&'static str] = &["title", "userId"];

    fn from_row(row: &BTreeMap<String, String>) -> Self {
        let field = |name: &str| row.get(name).cloned().unwrap_or_default();
        AlbumDraft {
            title: field("title"),
            user_id: field("userId"),
        }
    }

    fn field(&self, name: &str) -> &str {
        match name {
            "title" => &self.title,
            "userId" => &self.user_id,
            _ => "",
        }
    }

    fn set_field(&mut self, name: &str, value: String) {
        match name {
            "title" => self.title = value,
            "userId" => self.user_id = value,
            _ => {}
        }
    }

    fn label(&self) -> String {
        if self.title.trim().is_empty() {
            "(untitled)".to_string()
        } else {
            self.title.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_user_decodes_from_list_selection() {
        // The list query fetches no address/company
        let user: User = serde_json::from_value(json!({
            "id": "1",
            "name": "Leanne Graham",
            "username": "Bret",
            "email": "Sincere@april.biz",
            "phone": "1-770-736-8031"
        }))
        .unwrap();
        assert_eq!(user.id, "1");
        assert!(user.address.is_none());
        assert!(user.company.is_none());
    }

    #[test]
    fn test_user_decodes_from_detail_selection() {
        let user: User = serde_json::from_value(json!({
            "id": "1",
            "name": "Leanne Graham",
            "username": "Bret",
            "email": "Sincere@april.biz",
            "phone": "1-770-736-8031",
            "address": { "street": "Kulas Light", "city": "Gwenborough", "zipcode": "92998-3874" },
            "company": { "name": "Romaguera-Crona", "catchPhrase": "Multi-layered client-server neural-net" }
        }))
        .unwrap();
        let address = user.address.unwrap();
        assert_eq!(address.street, "Kulas Light");
        assert!(address.suite.is_none());
        let company = user.company.unwrap();
        assert_eq!(
            company.catch_phrase.as_deref(),
            Some("Multi-layered client-server neural-net")
        );
    }

    #[test]
    fn test_album_page_decodes_total_count() {
        let page: AlbumPage = serde_json::from_value(json!({
            "data": [
                { "id": "1", "title": "quidem molestiae enim", "user": { "name": "Leanne Graham" } }
            ],
            "meta": { "totalCount": 100 }
        }))
        .unwrap();
        assert_eq!(page.meta.total_count, 100);
        assert_eq!(page.data.len(), 1);
        assert_eq!(page.data[0].user.as_ref().unwrap().name, "Leanne Graham");
        assert!(page.data[0].user.as_ref().unwrap().id.is_none());
    }

    #[test]
    fn test_photo_thumbnail_rename() {
        let photo: Photo = serde_json::from_value(json!({
            "id": "1",
            "title": "accusamus",
            "url": "https://via.placeholder.com/600/92c952",
            "thumbnailUrl": "https://via.placeholder.com/150/92c952"
        }))
        .unwrap();
        assert!(photo.thumbnail_url.ends_with("92c952"));
    }

    #[test]
    fn test_user_form_requires_all_fields() {
        let mut form = UserForm::default();
        form.name = "Ada".to_string();
        let err = form.create_input().unwrap_err();
        assert_eq!(err, Error::Validation("username is required".to_string()));

        form.username = "ada".to_string();
        form.email = "not-an-email".to_string();
        form.phone = "555".to_string();
        assert_eq!(
            form.create_input().unwrap_err(),
            Error::Validation("email looks malformed".to_string())
        );

        form.email = "ada@example.com".to_string();
        let input = form.create_input().unwrap();
        assert_eq!(input.username, "ada");
    }

    #[test]
    fn test_album_create_input_renames_user_id() {
        let form = AlbumForm {
            title: "Holiday".to_string(),
            user_id: "7".to_string(),
        };
        let value = serde_json::to_value(form.create_input().unwrap()).unwrap();
        assert_eq!(value, json!({ "title": "Holiday", "userId": "7" }));
    }

    #[test]
    fn test_update_album_input_skips_unset_fields() {
        let value = serde_json::to_value(UpdateAlbumInput::default()).unwrap();
        assert_eq!(value, json!({}));
    }

    #[test]
    fn test_album_draft_from_row_ignores_unknown_headers() {
        let mut row = BTreeMap::new();
        row.insert("title".to_string(), "Roadtrip".to_string());
        row.insert("userId".to_string(), "3".to_string());
        row.insert("mystery".to_string(), "ignored".to_string());
        let draft = AlbumDraft::from_row(&row);
        assert_eq!(draft.title, "Roadtrip");
        assert_eq!(draft.user_id, "3");
    }

    #[test]
    fn test_draft_validation_blocks_missing_required_field() {
        let draft = AlbumDraft {
            title: "Roadtrip".to_string(),
            user_id: String::new(),
        };
        assert_eq!(
            draft.validate(),
            Err(Error::Validation("userId is required".to_string()))
        );
    }
}
