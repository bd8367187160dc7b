use derive_more::{Display, Error};
use mongodb::bson::oid::ObjectId;

#[derive(Debug, Display, Error)]
pub enum InnerError {
    #[display(fmt = "Repository lock poisoned")]
    PoisonedLock,
    #[display(fmt = "Id {} is already taken", _0)]
    IdCollision(#[error(not(source))] ObjectId),
}
