//! Common types

use uuid::Uuid;

pub type UserId = Uuid;
pub type TopicId = i32;

pub fn new_id() -> UserId {
    Uuid::new_v4()
}
