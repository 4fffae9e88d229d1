use serde::{Deserialize, Serialize};

use crate::misc::NoDecorators;

/// Struct representing a complete message (apart from the `@type` field) as
/// defined in a protocol RFC. The purpose of this type is to allow
/// decomposition of certain message parts so they can be independently
/// processed, if needed.
///
/// This allows separating, for example, the protocol specific fields from the
/// decorators used in a message without decomposing the entire message into
/// individual fields.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct MsgParts<C, D = NoDecorators> {
    /// All standalone messages have an `id` field.
    #[serde(rename = "@id")]
    pub id: String,
    /// The protocol specific fields provided as a standalone type.
    #[serde(flatten)]
    pub content: C,
    /// The decorators this message uses, provided as a standalone type.
    #[serde(flatten)]
    pub decorators: D,
}

impl<C, D> MsgParts<C, D> {
    /// Create a builder for building `MsgParts`. The `id` and `content`
    /// fields are required; when `decorators` is not provided, the built
    /// message resorts to [`NoDecorators`].
    pub fn builder() -> MsgPartsBuilder<(), (), NoDecorators> {
        MsgPartsBuilder {
            id: (),
            content: (),
            decorators: NoDecorators,
        }
    }
}

/// A builder not unlike the ones derived through
/// [`typed_builder::TypedBuilder`], with the caveat that this one supports
/// the decorators not being set. Omitting `id` or `content` leaves the
/// builder in a state where no matching message alias can be produced, so
/// incomplete messages are rejected at compile time.
#[must_use]
#[derive(Clone, Debug)]
pub struct MsgPartsBuilder<Id, Content, D> {
    id: Id,
    content: Content,
    decorators: D,
}

impl<Id, Content, D> MsgPartsBuilder<Id, Content, D> {
    pub fn id(self, id: String) -> MsgPartsBuilder<String, Content, D> {
        MsgPartsBuilder {
            id,
            content: self.content,
            decorators: self.decorators,
        }
    }

    pub fn content<C>(self, content: C) -> MsgPartsBuilder<Id, C, D> {
        MsgPartsBuilder {
            id: self.id,
            content,
            decorators: self.decorators,
        }
    }

    pub fn decorators<D2>(self, decorators: D2) -> MsgPartsBuilder<Id, Content, D2> {
        MsgPartsBuilder {
            id: self.id,
            content: self.content,
            decorators,
        }
    }
}

impl<C, D> MsgPartsBuilder<String, C, D> {
    pub fn build(self) -> MsgParts<C, D> {
        MsgParts {
            id: self.id,
            content: self.content,
            decorators: self.decorators,
        }
    }
}
