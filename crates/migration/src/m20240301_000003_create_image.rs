//! Create `image` table; images are owned by an ad and removed with it.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Image::Table)
                    .if_not_exists()
                    .col(uuid(Image::Id).primary_key())
                    .col(uuid(Image::AdId).not_null())
                    .col(string_len(Image::Url, 512).not_null())
                    .col(string_len(Image::Caption, 255).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_image_ad")
                            .from(Image::Table, Image::AdId)
                            .to(Ad::Table, Ad::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Image::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Image { Table, Id, AdId, Url, Caption }

#[derive(DeriveIden)]
enum Ad { Table, Id }
