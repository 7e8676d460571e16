use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "messages")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub sender_id: i32,
    pub sender_username: String,
    pub recipient_id: i32,
    pub recipient_username: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub date_read: Option<DateTimeWithTimeZone>,
    pub message_sent: DateTimeWithTimeZone,
    pub sender_deleted: bool,
    pub recipient_deleted: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::SenderId",
        to = "super::users::Column::Id",
        on_update = "NoAction",
        on_delete = "Restrict"
    )]
    Sender,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::RecipientId",
        to = "super::users::Column::Id",
        on_update = "NoAction",
        on_delete = "Restrict"
    )]
    Recipient,
}

impl ActiveModelBehavior for ActiveModel {}
