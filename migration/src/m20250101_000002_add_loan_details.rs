use sea_orm_migration::prelude::*;

#[derive(DeriveIden)]
enum Customers {
    Table,
    Collateral,
}

#[derive(DeriveIden)]
enum Loans {
    Table,
    LoanType,
    InterestRate,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        if !manager.has_column("customers", "collateral").await? {
            manager
                .alter_table(
                    Table::alter()
                        .table(Customers::Table)
                        .add_column(ColumnDef::new(Customers::Collateral).text().null())
                        .to_owned(),
                )
                .await?;
        }

        // SQLite only accepts one column per ALTER TABLE statement.
        if !manager.has_column("loans", "loan_type").await? {
            manager
                .alter_table(
                    Table::alter()
                        .table(Loans::Table)
                        .add_column(ColumnDef::new(Loans::LoanType).text().null())
                        .to_owned(),
                )
                .await?;
        }

        if !manager.has_column("loans", "interest_rate").await? {
            manager
                .alter_table(
                    Table::alter()
                        .table(Loans::Table)
                        .add_column(ColumnDef::new(Loans::InterestRate).double().null())
                        .to_owned(),
                )
                .await?;
        }

        Ok(())
    }

    async fn down(&self, _manager: &SchemaManager) -> Result<(), DbErr> {
        Ok(())
    }
}
