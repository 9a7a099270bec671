use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Author is optional free text, existing rows stay NULL
        manager
            .alter_table(
                Table::alter()
                    .table(Alias::new("articles"))
                    .add_column(ColumnDef::new(Alias::new("author")).string().null())
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .alter_table(
                Table::alter()
                    .table(Alias::new("articles"))
                    .drop_column(Alias::new("author"))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }
}
