use sea_orm::prelude::*;

use crate::entities::v1::tokens::{ActiveModel, Column, Entity, Model};

impl Model {
    pub async fn find_by_token<C: ConnectionTrait>(
        db: &C,
        token: &str,
    ) -> Result<Option<Self>, DbErr> {
        Entity::find().filter(Column::Token.eq(token)).one(db).await
    }

    pub async fn store<C: ConnectionTrait>(&self, db: &C) -> Result<Self, DbErr> {
        ActiveModel::from(self.clone()).insert(db).await
    }

    /// Remove this token only; the user's other sessions stay valid
    pub async fn revoke<C: ConnectionTrait>(&self, db: &C) -> Result<(), DbErr> {
        Entity::delete_by_id(self.id).exec(db).await?;

        Ok(())
    }

    /// Remove every token of `user_id`, returning how many were removed
    pub async fn revoke_all<C: ConnectionTrait>(db: &C, user_id: Uuid) -> Result<u64, DbErr> {
        let result = Entity::delete_many()
            .filter(Column::UserId.eq(user_id))
            .exec(db)
            .await?;

        Ok(result.rows_affected)
    }
}
