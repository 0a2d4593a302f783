use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_newtype!(CommentId);
id_newtype!(PostId);

/// One comment row as served by the collection endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    #[serde(rename = "postId")]
    pub post_id: PostId,
    pub id: CommentId,
    pub name: String,
    pub email: String,
    pub body: String,
}

impl Comment {
    /// Case-insensitive containment over name, email and body.
    ///
    /// `needle_lower` must already be lowercased.
    pub fn matches_lowercase(&self, needle_lower: &str) -> bool {
        self.name.to_lowercase().contains(needle_lower)
            || self.email.to_lowercase().contains(needle_lower)
            || self.body.to_lowercase().contains(needle_lower)
    }

    pub fn field(&self, field: EditField) -> &str {
        match field {
            EditField::Name => &self.name,
            EditField::Email => &self.email,
            EditField::Body => &self.body,
        }
    }

    pub fn set_field(&mut self, field: EditField, value: impl Into<String>) {
        let value = value.into();
        match field {
            EditField::Name => self.name = value,
            EditField::Email => self.email = value,
            EditField::Body => self.body = value,
        }
    }
}

/// Text columns a user may change while a row is in edit mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditField {
    Name,
    Email,
    Body,
}

impl EditField {
    pub const ALL: [EditField; 3] = [EditField::Name, EditField::Email, EditField::Body];

    pub fn label(self) -> &'static str {
        match self {
            EditField::Name => "name",
            EditField::Email => "email",
            EditField::Body => "body",
        }
    }
}

impl std::str::FromStr for EditField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "name" => Ok(EditField::Name),
            "email" => Ok(EditField::Email),
            "body" => Ok(EditField::Body),
            other => Err(format!("unknown editable field '{other}'")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_wire_record_with_camel_case_post_id() {
        let raw = r#"{"postId":1,"id":3,"name":"odio adipisci","email":"Nikita@garfield.biz","body":"quia molestiae"}"#;
        let comment: Comment = serde_json::from_str(raw).expect("decode");
        assert_eq!(comment.post_id, PostId(1));
        assert_eq!(comment.id, CommentId(3));
        assert_eq!(comment.email, "Nikita@garfield.biz");
    }

    #[test]
    fn matches_any_text_column_ignoring_case() {
        let comment = Comment {
            post_id: PostId(1),
            id: CommentId(1),
            name: "Ann".to_string(),
            email: "ann@example.com".to_string(),
            body: "Hello World".to_string(),
        };
        assert!(comment.matches_lowercase("ann"));
        assert!(comment.matches_lowercase("example"));
        assert!(comment.matches_lowercase("world"));
        assert!(!comment.matches_lowercase("bob"));
    }

    #[test]
    fn set_field_touches_only_the_named_column() {
        let mut comment = Comment {
            post_id: PostId(2),
            id: CommentId(9),
            name: "a".to_string(),
            email: "b".to_string(),
            body: "c".to_string(),
        };
        comment.set_field(EditField::Body, "edited");
        assert_eq!(comment.field(EditField::Body), "edited");
        assert_eq!(comment.name, "a");
        assert_eq!(comment.id, CommentId(9));
    }
}
