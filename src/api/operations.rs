/// The fixed GraphQL contract
///
/// Operation documents and typed wrappers. Names and shapes are set
/// by the external API; nothing here is negotiable, which is why the
/// documents live as plain strings instead of being generated.

use serde_json::{json, Value};

use super::client::{decode, GqlClient};
use crate::error::Error;
use crate::state::data::{
    Album, AlbumPage, CreateAlbumInput, CreateUserInput, SortOrder, UpdateAlbumInput,
    UpdateUserInput, User,
};

/// Operation names, shared with the response cache as keys
pub mod names {
    pub const GET_USERS: &str = "GetUsers";
    pub const GET_USER_BY_ID: &str = "GetUserById";
    pub const GET_ALBUMS: &str = "GetAlbums";
    pub const GET_ALBUM_BY_ID: &str = "GetAlbumById";
}

const GET_USERS: &str = r#"
query GetUsers {
  users {
    data {
      id
      name
      username
      email
      phone
    }
  }
}"#;

const GET_USER_BY_ID: &str = r#"
query GetUserById($id: ID!) {
  user(id: $id) {
    id
    name
    username
    email
    phone
    address {
      street
      city
      zipcode
    }
    company {
      name
    }
  }
}"#;

const ADD_USER: &str = r#"
mutation AddUser($input: CreateUserInput!) {
  createUser(input: $input) {
    id
    name
    username
    email
    phone
  }
}"#;

const UPDATE_USER: &str = r#"
mutation UpdateUser($id: ID!, $input: UpdateUserInput!) {
  updateUser(id: $id, input: $input) {
    id
    name
    email
    username
    phone
  }
}"#;

const DELETE_USER: &str = r#"
mutation DeleteUser($id: ID!) {
  deleteUser(id: $id)
}"#;

const GET_ALBUMS: &str = r#"
query GetAlbums($options: PageQueryOptions) {
  albums(options: $options) {
    data {
      id
      title
      user {
        name
      }
    }
    meta {
      totalCount
    }
  }
}"#;

const GET_ALBUM_BY_ID: &str = r#"
query GetAlbumById($id: ID!) {
  album(id: $id) {
    id
    title
    user {
      id
      name
    }
    photos {
      data {
        id
        title
        url
        thumbnailUrl
      }
    }
  }
}"#;

const ADD_ALBUM: &str = r#"
mutation AddAlbum($input: CreateAlbumInput!) {
  createAlbum(input: $input) {
    id
    title
    user {
      name
    }
  }
}"#;

const UPDATE_ALBUM: &str = r#"
mutation UpdateAlbum($id: ID!, $input: UpdateAlbumInput!) {
  updateAlbum(id: $id, input: $input) {
    id
    title
  }
}"#;

const DELETE_ALBUM: &str = r#"
mutation DeleteAlbum($id: ID!) {
  deleteAlbum(id: $id)
}"#;

// Variable builders are shared with the cache so lookups and stores
// always agree on the key.

pub fn no_variables() -> Value {
    json!({})
}

pub fn id_variables(id: &str) -> Value {
    json!({ "id": id })
}

pub fn album_list_variables(order: SortOrder) -> Value {
    json!({
        "options": {
            "sort": {
                "field": "title",
                "order": order.as_graphql()
            }
        }
    })
}

impl GqlClient {
    pub async fn fetch_users(&self) -> Result<Vec<User>, Error> {
        let data = self.execute(GET_USERS, no_variables()).await?;
        decode(&data, "/users/data")
    }

    pub async fn fetch_user(&self, id: &str) -> Result<User, Error> {
        let data = self.execute(GET_USER_BY_ID, id_variables(id)).await?;
        decode(&data, "/user")
    }

    pub async fn create_user(&self, input: &CreateUserInput) -> Result<User, Error> {
        let data = self.execute(ADD_USER, json!({ "input": input })).await?;
        decode(&data, "/createUser")
    }

    pub async fn update_user(&self, id: &str, input: &UpdateUserInput) -> Result<User, Error> {
        let data = self
            .execute(UPDATE_USER, json!({ "id": id, "input": input }))
            .await?;
        decode(&data, "/updateUser")
    }

    pub async fn delete_user(&self, id: &str) -> Result<bool, Error> {
        let data = self.execute(DELETE_USER, id_variables(id)).await?;
        decode(&data, "/deleteUser")
    }

    pub async fn fetch_albums(&self, order: SortOrder) -> Result<AlbumPage, Error> {
        let data = self.execute(GET_ALBUMS, album_list_variables(order)).await?;
        decode(&data, "/albums")
    }

    pub async fn fetch_album(&self, id: &str) -> Result<Album, Error> {
        let data = self.execute(GET_ALBUM_BY_ID, id_variables(id)).await?;
        decode(&data, "/album")
    }

    pub async fn create_album(&self, input: &CreateAlbumInput) -> Result<Album, Error> {
        let data = self.execute(ADD_ALBUM, json!({ "input": input })).await?;
        decode(&data, "/createAlbum")
    }

    pub async fn update_album(&self, id: &str, input: &UpdateAlbumInput) -> Result<Album, Error> {
        let data = self
            .execute(UPDATE_ALBUM, json!({ "id": id, "input": input }))
            .await?;
        decode(&data, "/updateAlbum")
    }

    pub async fn delete_album(&self, id: &str) -> Result<bool, Error> {
        let data = self.execute(DELETE_ALBUM, id_variables(id)).await?;
        decode(&data, "/deleteAlbum")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_album_list_variables_carry_sort() {
        assert_eq!(
            album_list_variables(SortOrder::Descending),
            json!({ "options": { "sort": { "field": "title", "order": "DESC" } } })
        );
    }

    #[test]
    fn test_variable_builders_are_stable_cache_keys() {
        // The cache compares serialized variables, so two calls must
        // produce byte-identical JSON.
        assert_eq!(
            id_variables("7").to_string(),
            id_variables("7").to_string()
        );
        assert_eq!(
            album_list_variables(SortOrder::Ascending).to_string(),
            album_list_variables(SortOrder::Ascending).to_string()
        );
    }
}
