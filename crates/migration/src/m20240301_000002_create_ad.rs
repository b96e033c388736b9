//! Create `ad` table with FK to its author.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Ad::Table)
                    .if_not_exists()
                    .col(uuid(Ad::Id).primary_key())
                    .col(uuid(Ad::AuthorId).not_null())
                    .col(string_len(Ad::Title, 255).not_null())
                    .col(string_len(Ad::Slug, 255).unique_key().not_null())
                    .col(double(Ad::Price).not_null())
                    .col(text(Ad::Introduction).not_null())
                    .col(text(Ad::Content).not_null())
                    .col(string_len(Ad::CoverImage, 512).not_null())
                    .col(integer(Ad::Rooms).not_null())
                    .col(timestamp_with_time_zone(Ad::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Ad::UpdatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_ad_author")
                            .from(Ad::Table, Ad::AuthorId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Ad::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Ad { Table, Id, AuthorId, Title, Slug, Price, Introduction, Content, CoverImage, Rooms, CreatedAt, UpdatedAt }

#[derive(DeriveIden)]
enum User { Table, Id }
