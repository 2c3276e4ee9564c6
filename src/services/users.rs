use crate::{
    models::user::{NewUser, User},
    services::ServiceError,
    storage::UserStorage,
};

pub fn register_user(
    storage: &mut impl UserStorage,
    username: String,
    password: String,
) -> Result<User, ServiceError> {
    if storage.get_user_by_username(&username).is_some() {
        return Err(ServiceError::UsernameTaken(username));
    }

    Ok(storage.create_user(NewUser { username, password }))
}

pub fn get_user(storage: &impl UserStorage, id: &str) -> Result<User, ServiceError> {
    storage
        .get_user(id)
        .ok_or_else(|| ServiceError::UserNotFound(id.to_string()))
}

pub fn find_user(storage: &impl UserStorage, username: &str) -> Result<User, ServiceError> {
    storage
        .get_user_by_username(username)
        .ok_or_else(|| ServiceError::UserNotFound(username.to_string()))
}
