use serde::{Deserialize, Serialize};

use crate::{
    account::Author,
    crypto::PublicKey,
    name::Name,
    serializer::{Reader, ReaderError, Serializer, Writer},
};

/// Payload of a `CreateAccount` action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAccountPayload {
    pub account_name: Name,
    /// Empty or self means the new account founds itself
    pub founder: Name,
    pub public_key: PublicKey,
    pub description: String,
}

impl Serializer for CreateAccountPayload {
    fn write(&self, writer: &mut Writer) {
        self.account_name.write(writer);
        self.founder.write(writer);
        self.public_key.write(writer);
        self.description.write(writer);
    }

    fn read(reader: &mut Reader) -> Result<Self, ReaderError> {
        Ok(Self {
            account_name: Name::read(reader)?,
            founder: Name::read(reader)?,
            public_key: PublicKey::read(reader)?,
            description: String::read(reader)?,
        })
    }

    fn size(&self) -> usize {
        self.account_name.size()
            + self.founder.size()
            + self.public_key.size()
            + self.description.size()
    }
}

/// Payload of an `UpdateAccount` action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateAccountPayload {
    /// Empty defaults to the account's own name
    pub founder: Name,
}

impl Serializer for UpdateAccountPayload {
    fn write(&self, writer: &mut Writer) {
        self.founder.write(writer);
    }

    fn read(reader: &mut Reader) -> Result<Self, ReaderError> {
        Ok(Self {
            founder: Name::read(reader)?,
        })
    }

    fn size(&self) -> usize {
        self.founder.size()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthorOpKind {
    Add,
    Update,
    Delete,
}

impl Serializer for AuthorOpKind {
    fn write(&self, writer: &mut Writer) {
        let value = match self {
            AuthorOpKind::Add => 0u8,
            AuthorOpKind::Update => 1u8,
            AuthorOpKind::Delete => 2u8,
        };
        writer.write_u8(value);
    }

    fn read(reader: &mut Reader) -> Result<Self, ReaderError> {
        match reader.read_u8()? {
            0 => Ok(AuthorOpKind::Add),
            1 => Ok(AuthorOpKind::Update),
            2 => Ok(AuthorOpKind::Delete),
            _ => Err(ReaderError::InvalidValue),
        }
    }

    fn size(&self) -> usize {
        1
    }
}

/// One mutation of the authority set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorOp {
    pub kind: AuthorOpKind,
    pub author: Author,
}

impl Serializer for AuthorOp {
    fn write(&self, writer: &mut Writer) {
        self.kind.write(writer);
        self.author.write(writer);
    }

    fn read(reader: &mut Reader) -> Result<Self, ReaderError> {
        Ok(Self {
            kind: AuthorOpKind::read(reader)?,
            author: Author::read(reader)?,
        })
    }

    fn size(&self) -> usize {
        self.kind.size() + self.author.size()
    }
}

/// Payload of an `UpdateAccountAuthor` action. Ops apply in order, then the
/// non-zero thresholds; zero leaves a threshold unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAccountAuthorPayload {
    pub threshold: u64,
    pub update_author_threshold: u64,
    pub author_ops: Vec<AuthorOp>,
}

impl Serializer for UpdateAccountAuthorPayload {
    fn write(&self, writer: &mut Writer) {
        writer.write_u64(self.threshold);
        writer.write_u64(self.update_author_threshold);
        self.author_ops.write(writer);
    }

    fn read(reader: &mut Reader) -> Result<Self, ReaderError> {
        Ok(Self {
            threshold: reader.read_u64()?,
            update_author_threshold: reader.read_u64()?,
            author_ops: Vec::read(reader)?,
        })
    }

    fn size(&self) -> usize {
        8 + 8 + self.author_ops.size()
    }
}
