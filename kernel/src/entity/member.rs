mod age;
mod id;
mod name;

pub use self::{age::*, id::*, name::*};
use destructure::{Destructure, Mutation};
use vodca::References;

#[derive(Debug, Clone, Eq, PartialEq, References, Destructure, Mutation)]
pub struct Member {
    id: MemberId,
    name: MemberName,
    age: Option<MemberAge>,
}

impl Member {
    pub fn new(id: MemberId, name: MemberName, age: Option<MemberAge>) -> Self {
        Self { id, name, age }
    }
}
