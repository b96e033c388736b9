use axum::{extract::Path, Json};
use serde::Serialize;

use common::types::Message;

const ANONYMOUS: &str = "anonyme";

#[derive(Serialize, Debug, PartialEq)]
pub struct Greeting {
    pub name: String,
    pub age: u32,
    pub message: String,
}

fn greet(name: Option<String>, age: Option<u32>) -> Greeting {
    let name = name.unwrap_or_else(|| ANONYMOUS.to_string());
    let age = age.unwrap_or(0);
    let message = format!("Hello {name}, you are {age} years old");
    Greeting { name, age, message }
}

#[utoipa::path(get, path = "/", tag = "home", responses((status = 200, description = "Homepage")))]
pub async fn home() -> Json<Message> {
    Json(Message::new("Welcome! Browse the ads, book a stay, leave a comment."))
}

pub async fn hello() -> Json<Greeting> { Json(greet(None, None)) }

pub async fn hello_name(Path(name): Path<String>) -> Json<Greeting> { Json(greet(Some(name), None)) }

pub async fn hello_name_age(Path((name, age)): Path<(String, u32)>) -> Json<Greeting> {
    Json(greet(Some(name), Some(age)))
}
