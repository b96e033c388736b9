#![cfg(test)]
use sea_orm::DatabaseConnection;
use migration::MigratorTrait;
use models::db::{connect_with_config, DatabaseConfig};
use models::{ad, user};
use uuid::Uuid;

/// Fresh SQLite file per test, migrated up; tests never share rows.
pub async fn get_db() -> Result<DatabaseConnection, anyhow::Error> {
    let path = std::env::temp_dir().join(format!("adboard-service-{}.db", Uuid::new_v4()));
    let cfg = DatabaseConfig {
        url: format!("sqlite://{}?mode=rwc", path.display()),
        max_connections: 4,
        ..DatabaseConfig::default()
    };
    let db = connect_with_config(&cfg).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

pub async fn seed_user(db: &DatabaseConnection, email: &str) -> Result<user::Model, anyhow::Error> {
    seed_user_with_role(db, email, user::ROLE_USER).await
}

pub async fn seed_user_with_role(db: &DatabaseConnection, email: &str, role: &str) -> Result<user::Model, anyhow::Error> {
    Ok(user::create(db, user::NewUser {
        first_name: "Jeanne".into(),
        last_name: "Martin".into(),
        email: email.into(),
        introduction: None,
        role: role.into(),
        password_hash: "$argon2id$seeded".into(),
    }).await?)
}

pub fn ad_fields(title: &str) -> ad::AdFields {
    ad::AdFields {
        title: title.into(),
        introduction: "A bright flat a few steps from the beach.".into(),
        content: "Two bedrooms, a large living room opening on a terrace, a fully equipped kitchen and a quiet garden at the back of the house.".into(),
        cover_image: "https://picsum.photos/1000/350".into(),
        price: 80.0,
        rooms: 3,
    }
}

pub async fn seed_ad(db: &DatabaseConnection, author_id: Uuid, title: &str) -> Result<ad::Model, anyhow::Error> {
    Ok(ad::create(db, author_id, ad_fields(title)).await?)
}
