use sea_orm_migration::prelude::*;

#[derive(DeriveIden)]
enum Employees {
    Table,
    Id,
    Username,
    Password,
}

#[derive(DeriveIden)]
enum Customers {
    Table,
    Id,
    Name,
    Phone,
}

#[derive(DeriveIden)]
enum Loans {
    Table,
    Id,
    CustomerId,
    Amount,
    Date,
    Duration,
    Status,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Deployments that predate the migration table already have these
        // tables, so every statement must tolerate them.
        manager
            .create_table(
                Table::create()
                    .table(Employees::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Employees::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Employees::Username).text().unique_key())
                    .col(ColumnDef::new(Employees::Password).text())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Customers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Customers::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Customers::Name).text())
                    .col(ColumnDef::new(Customers::Phone).text().unique_key())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Loans::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Loans::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Loans::CustomerId).integer())
                    .col(ColumnDef::new(Loans::Amount).double())
                    .col(ColumnDef::new(Loans::Date).date())
                    .col(ColumnDef::new(Loans::Duration).integer())
                    .col(ColumnDef::new(Loans::Status).text())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_loans_customer_id")
                            .from(Loans::Table, Loans::CustomerId)
                            .to(Customers::Table, Customers::Id),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, _manager: &SchemaManager) -> Result<(), DbErr> {
        // Forward-only: existing records are never dropped.
        Ok(())
    }
}
