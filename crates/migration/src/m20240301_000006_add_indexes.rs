use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Ad: listing by author
        manager
            .create_index(
                Index::create()
                    .name("idx_ad_author")
                    .table(Ad::Table)
                    .col(Ad::AuthorId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_image_ad")
                    .table(Image::Table)
                    .col(Image::AdId)
                    .to_owned(),
            )
            .await?;

        // Booking: availability checks scan an ad's date ranges
        manager
            .create_index(
                Index::create()
                    .name("idx_booking_ad_dates")
                    .table(Booking::Table)
                    .col(Booking::AdId)
                    .col(Booking::StartDate)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_comment_ad")
                    .table(Comment::Table)
                    .col(Comment::AdId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_index(Index::drop().name("idx_comment_ad").table(Comment::Table).to_owned()).await?;
        manager.drop_index(Index::drop().name("idx_booking_ad_dates").table(Booking::Table).to_owned()).await?;
        manager.drop_index(Index::drop().name("idx_image_ad").table(Image::Table).to_owned()).await?;
        manager.drop_index(Index::drop().name("idx_ad_author").table(Ad::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Ad { Table, AuthorId }

#[derive(DeriveIden)]
enum Image { Table, AdId }

#[derive(DeriveIden)]
enum Booking { Table, AdId, StartDate }

#[derive(DeriveIden)]
enum Comment { Table, AdId }
