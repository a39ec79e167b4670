//! Migration: Create work order, repair, repair item and repair note tables.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(WorkOrders::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(WorkOrders::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(WorkOrders::PublicToken)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(WorkOrders::FormCode)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(WorkOrders::ClientId).uuid().not_null())
                    .col(ColumnDef::new(WorkOrders::DeviceType).string().not_null())
                    .col(ColumnDef::new(WorkOrders::Brand).string().not_null())
                    .col(ColumnDef::new(WorkOrders::Model).string().not_null())
                    .col(ColumnDef::new(WorkOrders::SerialNumber).string().not_null())
                    .col(ColumnDef::new(WorkOrders::Problem).text().not_null())
                    .col(ColumnDef::new(WorkOrders::Accessories).text().not_null())
                    .col(ColumnDef::new(WorkOrders::Description).text().not_null())
                    .col(
                        ColumnDef::new(WorkOrders::Status)
                            .string()
                            .not_null()
                            .default("received"),
                    )
                    .col(
                        ColumnDef::new(WorkOrders::Price)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(ColumnDef::new(WorkOrders::Warranty).string().null())
                    .col(ColumnDef::new(WorkOrders::AssignedUserId).uuid().null())
                    .col(ColumnDef::new(WorkOrders::TechnicianName).string().null())
                    .col(
                        ColumnDef::new(WorkOrders::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(WorkOrders::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_work_orders_status")
                    .table(WorkOrders::Table)
                    .col(WorkOrders::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_work_orders_assigned_user_id")
                    .table(WorkOrders::Table)
                    .col(WorkOrders::AssignedUserId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Repairs::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Repairs::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Repairs::WorkOrderId).uuid().not_null())
                    .col(ColumnDef::new(Repairs::AssignedTechnicianId).uuid().null())
                    .col(
                        ColumnDef::new(Repairs::Status)
                            .string()
                            .not_null()
                            .default("in_progress"),
                    )
                    .col(
                        ColumnDef::new(Repairs::Diagnostic)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(Repairs::Notes).text().not_null().default(""))
                    .col(
                        ColumnDef::new(Repairs::TakenAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Repairs::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Repairs::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_repairs_work_order_id")
                    .table(Repairs::Table)
                    .col(Repairs::WorkOrderId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(RepairItems::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(RepairItems::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(RepairItems::RepairId).uuid().not_null())
                    .col(ColumnDef::new(RepairItems::Kind).string().not_null())
                    .col(ColumnDef::new(RepairItems::Label).string().not_null())
                    .col(ColumnDef::new(RepairItems::Qty).integer().not_null())
                    .col(ColumnDef::new(RepairItems::UnitPrice).double().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_repair_items_repair_id")
                    .table(RepairItems::Table)
                    .col(RepairItems::RepairId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(RepairNotes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(RepairNotes::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(RepairNotes::RepairId).uuid().not_null())
                    .col(ColumnDef::new(RepairNotes::UserId).uuid().not_null())
                    .col(ColumnDef::new(RepairNotes::Message).text().not_null())
                    .col(
                        ColumnDef::new(RepairNotes::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_repair_notes_repair_id")
                    .table(RepairNotes::Table)
                    .col(RepairNotes::RepairId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(RepairNotes::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(RepairItems::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Repairs::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(WorkOrders::Table).to_owned())
            .await
    }
}

/// Table and column identifiers for WorkOrders
#[derive(Iden)]
enum WorkOrders {
    Table,
    Id,
    PublicToken,
    FormCode,
    ClientId,
    DeviceType,
    Brand,
    Model,
    SerialNumber,
    Problem,
    Accessories,
    Description,
    Status,
    Price,
    Warranty,
    AssignedUserId,
    TechnicianName,
    CreatedAt,
    UpdatedAt,
}

/// Table and column identifiers for Repairs
#[derive(Iden)]
enum Repairs {
    Table,
    Id,
    WorkOrderId,
    AssignedTechnicianId,
    Status,
    Diagnostic,
    Notes,
    TakenAt,
    CreatedAt,
    UpdatedAt,
}

/// Table and column identifiers for RepairItems
#[derive(Iden)]
enum RepairItems {
    Table,
    Id,
    RepairId,
    Kind,
    Label,
    Qty,
    UnitPrice,
}

/// Table and column identifiers for RepairNotes
#[derive(Iden)]
enum RepairNotes {
    Table,
    Id,
    RepairId,
    UserId,
    Message,
    CreatedAt,
}
