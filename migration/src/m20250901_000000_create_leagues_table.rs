use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Leagues::Table)
                    .if_not_exists()
                    .col(pk_auto(Leagues::Id))
                    .col(string_len(Leagues::Name, 100).not_null())
                    .col(string_len(Leagues::NameKey, 100).not_null().unique_key())
                    .col(string_len(Leagues::Passkey, 100).not_null())
                    .col(integer(Leagues::CreatorId).not_null())
                    .col(string_len(Leagues::LeagueType, 20).default("classic"))
                    .col(decimal_len_null(Leagues::StartingBucs, 12, 2))
                    .col(double_null(Leagues::PointsPerWin))
                    .col(double_null(Leagues::BonusWeek))
                    .col(double_null(Leagues::BonusSeason))
                    .col(double(Leagues::MinTotalOdds).not_null())
                    .col(double(Leagues::MinLegOdds).not_null())
                    .col(integer(Leagues::NumLegs).not_null())
                    .col(string_len(Leagues::SubmissionDeadline, 100).not_null())
                    .col(timestamp(Leagues::CreatedAt).default(Expr::current_timestamp()))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_leagues_creator_id")
                            .from(Leagues::Table, Leagues::CreatorId)
                            .to(Users::Table, Users::Id),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Leagues::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Leagues {
    Table,
    Id,
    Name,
    NameKey,
    Passkey,
    CreatorId,
    LeagueType,
    StartingBucs,
    PointsPerWin,
    BonusWeek,
    BonusSeason,
    MinTotalOdds,
    MinLegOdds,
    NumLegs,
    SubmissionDeadline,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
}
