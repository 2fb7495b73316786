use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Parlays::Table)
                    .if_not_exists()
                    .col(pk_auto(Parlays::Id))
                    .col(integer(Parlays::UserId).not_null())
                    .col(integer(Parlays::LeagueId).not_null())
                    .col(integer(Parlays::Week).not_null())
                    .col(json_binary(Parlays::Picks).not_null())
                    .col(double(Parlays::Odds).not_null())
                    .col(string_len(Parlays::Result, 20).default("pending"))
                    .col(integer(Parlays::LegsWon).default(0))
                    .col(integer(Parlays::LegsLost).default(0))
                    .col(timestamp(Parlays::SubmittedAt).default(Expr::current_timestamp()))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_parlays_user_id")
                            .from(Parlays::Table, Parlays::UserId)
                            .to(Users::Table, Users::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_parlays_league_id")
                            .from(Parlays::Table, Parlays::LeagueId)
                            .to(Leagues::Table, Leagues::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // Backs the upsert's ON CONFLICT target.
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_parlays_user_league_week")
                    .table(Parlays::Table)
                    .col(Parlays::UserId)
                    .col(Parlays::LeagueId)
                    .col(Parlays::Week)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_parlays_league_week")
                    .table(Parlays::Table)
                    .col(Parlays::LeagueId)
                    .col(Parlays::Week)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Parlays::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Parlays {
    Table,
    Id,
    UserId,
    LeagueId,
    Week,
    Picks,
    Odds,
    Result,
    LegsWon,
    LegsLost,
    SubmittedAt,
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Leagues {
    Table,
    Id,
}
