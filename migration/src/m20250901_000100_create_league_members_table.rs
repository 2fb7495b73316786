use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(LeagueMembers::Table)
                    .if_not_exists()
                    .col(integer(LeagueMembers::LeagueId).not_null())
                    .col(integer(LeagueMembers::UserId).not_null())
                    .col(timestamp(LeagueMembers::JoinedAt).default(Expr::current_timestamp()))
                    .primary_key(
                        Index::create()
                            .col(LeagueMembers::LeagueId)
                            .col(LeagueMembers::UserId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_league_members_league_id")
                            .from(LeagueMembers::Table, LeagueMembers::LeagueId)
                            .to(Leagues::Table, Leagues::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_league_members_user_id")
                            .from(LeagueMembers::Table, LeagueMembers::UserId)
                            .to(Users::Table, Users::Id),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(LeagueMembers::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum LeagueMembers {
    Table,
    LeagueId,
    UserId,
    JoinedAt,
}

#[derive(DeriveIden)]
enum Leagues {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
}
