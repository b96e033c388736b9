use serde::Serialize;

#[derive(Serialize, Debug)]
pub struct Health {
    pub status: &'static str,
}

/// Human readable outcome of a mutating request, shown to the visitor.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Message {
    pub message: String,
}

impl Message {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

/// [`Message`] plus the record the request produced or changed.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Saved<T> {
    pub message: String,
    pub data: T,
}

impl<T> Saved<T> {
    pub fn new(message: impl Into<String>, data: T) -> Self {
        Self { message: message.into(), data }
    }
}
