use failure::Fail;

use crate::blueprint::BlueprintHandle;
use crate::Entity;

#[derive(Debug, Fail)]
pub enum Error {
    #[fail(display = "{} is not alive.", _0)]
    EntityInvalid(Entity),
    #[fail(display = "{} does not have a node component.", _0)]
    NonNodeFound(Entity),
    #[fail(display = "Node can not set self as parent.")]
    CanNotAttachSelfAsParent,
    #[fail(display = "{} is an ancestor of {}, attaching would make a cycle.", child, parent)]
    CyclicRelationship { parent: Entity, child: Entity },
    #[fail(display = "{} is a scene root and can not be attached as a child.", _0)]
    RootCanNotBeChild(Entity),
    #[fail(display = "{} is not a child of {}.", child, parent)]
    NotChildOf { parent: Entity, child: Entity },
    #[fail(display = "{} has a parent and can not be a scene root.", _0)]
    HasParent(Entity),
    #[fail(display = "{} is invalid.", _0)]
    BlueprintInvalid(BlueprintHandle),
    #[fail(display = "Malformed blueprint: {}.", _0)]
    BlueprintMalformed(String),
    #[fail(display = "{}", _0)]
    Serialization(#[cause] serde_json::Error),
}

pub type Result<T> = ::std::result::Result<T, Error>;

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err)
    }
}
