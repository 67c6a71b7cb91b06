use sea_orm::prelude::*;
use sea_orm::sea_query::{Expr, Func, InsertStatement, Query};
use sea_orm::{ActiveValue::Set, QueryOrder, SqlErr, TransactionTrait};

use crate::entities::v1::tokens;
use crate::entities::v1::users::{ActiveModel, Column, Entity, Model};
use crate::helpers::now;
use crate::responses::v1::user::User;

/// Bound on retries when a concurrent append claims the same sequence
const APPEND_TOKEN_ATTEMPTS: usize = 5;

/// Fields a profile update may change, already validated and normalized
#[derive(Clone, Debug, Default)]
pub struct ProfileChanges {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

impl ProfileChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.password.is_none()
    }
}

impl Model {
    pub fn new(name: String, email: String, password: String) -> Self {
        let now = now();

        Self {
            id: Uuid::new_v4(),
            name,
            email,
            password,
            avatar: None,
            avatar_content_type: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub async fn find_by_id<C: ConnectionTrait>(db: &C, id: Uuid) -> Result<Option<Self>, DbErr> {
        Entity::find_by_id(id).one(db).await
    }

    pub async fn find_by_email<C: ConnectionTrait>(
        db: &C,
        email: &str,
    ) -> Result<Option<Self>, DbErr> {
        Entity::find().filter(Column::Email.eq(email)).one(db).await
    }

    /// Whether `email` belongs to a user other than `except`
    pub async fn email_exists<C: ConnectionTrait>(
        db: &C,
        email: &str,
        except: Option<Uuid>,
    ) -> Result<bool, DbErr> {
        let mut query = Entity::find().filter(Column::Email.eq(email));

        if let Some(id) = except {
            query = query.filter(Column::Id.ne(id));
        }

        Ok(query.count(db).await? > 0)
    }

    pub async fn store<C: ConnectionTrait>(&self, db: &C) -> Result<Self, DbErr> {
        ActiveModel::from(self.clone()).insert(db).await
    }

    pub async fn update_profile<C: ConnectionTrait>(
        &self,
        db: &C,
        changes: ProfileChanges,
    ) -> Result<Self, DbErr> {
        let mut model = ActiveModel::from(self.clone());

        if let Some(name) = changes.name {
            model.name = Set(name);
        }
        if let Some(email) = changes.email {
            model.email = Set(email);
        }
        if let Some(password) = changes.password {
            model.password = Set(password);
        }

        model.updated_at = Set(now());
        model.update(db).await
    }

    pub async fn update_password<C: ConnectionTrait>(
        &self,
        db: &C,
        password: String,
    ) -> Result<Self, DbErr> {
        self.update_profile(
            db,
            ProfileChanges {
                password: Some(password),
                ..Default::default()
            },
        )
        .await
    }

    pub async fn set_avatar<C: ConnectionTrait>(
        &self,
        db: &C,
        avatar: Vec<u8>,
        content_type: &str,
    ) -> Result<Self, DbErr> {
        let mut model = ActiveModel::from(self.clone());

        model.avatar = Set(Some(avatar));
        model.avatar_content_type = Set(Some(content_type.to_string()));
        model.updated_at = Set(now());
        model.update(db).await
    }

    pub async fn remove_avatar<C: ConnectionTrait>(&self, db: &C) -> Result<Self, DbErr> {
        let mut model = ActiveModel::from(self.clone());

        model.avatar = Set(None);
        model.avatar_content_type = Set(None);
        model.updated_at = Set(now());
        model.update(db).await
    }

    /// Remove the user together with every token issued to it
    pub async fn destroy(&self, db: &DatabaseConnection) -> Result<(), DbErr> {
        let txn = db.begin().await?;

        tokens::Model::revoke_all(&txn, self.id).await?;
        Entity::delete_by_id(self.id).exec(&txn).await?;

        txn.commit().await
    }

    /// Issued tokens, oldest first
    pub async fn tokens<C: ConnectionTrait>(&self, db: &C) -> Result<Vec<tokens::Model>, DbErr> {
        tokens::Entity::find()
            .filter(tokens::Column::UserId.eq(self.id))
            .order_by_asc(tokens::Column::Sequence)
            .all(db)
            .await
    }

    /// Append `token` to the end of this user's token collection
    ///
    /// The next sequence is computed by the INSERT itself, so SQLite
    /// serializes concurrent appends on its write lock. Under Postgres two
    /// statements can still read the same maximum; the loser hits the
    /// `(user_id, sequence)` unique index and is retried.
    pub async fn append_token<C: ConnectionTrait>(
        &self,
        db: &C,
        token: String,
    ) -> Result<tokens::Model, DbErr> {
        let mut attempt = 0;

        loop {
            attempt += 1;

            let id = Uuid::new_v4();
            let statement = self.append_token_statement(id, &token)?;

            match db.execute(db.get_database_backend().build(&statement)).await {
                Ok(_) => {
                    return tokens::Entity::find_by_id(id).one(db).await?.ok_or_else(|| {
                        DbErr::RecordNotFound(format!("token {id} vanished after insert"))
                    });
                }
                Err(e)
                    if attempt < APPEND_TOKEN_ATTEMPTS
                        && matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) =>
                {
                    tracing::debug!(user_id = %self.id, attempt, "Token sequence taken, retrying");
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// `INSERT INTO tokens (..) SELECT .., COALESCE(MAX(sequence) + 1, 0), .. FROM tokens WHERE user_id = ?`
    fn append_token_statement(&self, id: Uuid, token: &str) -> Result<InsertStatement, DbErr> {
        let next_sequence = Func::coalesce([
            Expr::expr(Func::max(Expr::col(tokens::Column::Sequence))).add(1i64),
            Expr::val(0i64).into(),
        ]);

        let select = Query::select()
            .expr(Expr::val(id))
            .expr(Expr::val(self.id))
            .expr(next_sequence)
            .expr(Expr::val(token))
            .expr(Expr::val(now()))
            .from(tokens::Entity)
            .and_where(Expr::col(tokens::Column::UserId).eq(self.id))
            .to_owned();

        let mut statement = Query::insert();

        statement
            .into_table(tokens::Entity)
            .columns([
                tokens::Column::Id,
                tokens::Column::UserId,
                tokens::Column::Sequence,
                tokens::Column::Token,
                tokens::Column::CreatedAt,
            ])
            .select_from(select)
            .map_err(|e| DbErr::Custom(e.to_string()))?;

        Ok(statement)
    }

    pub async fn has_token<C: ConnectionTrait>(&self, db: &C, token: &str) -> Result<bool, DbErr> {
        let count = tokens::Entity::find()
            .filter(tokens::Column::UserId.eq(self.id))
            .filter(tokens::Column::Token.eq(token))
            .count(db)
            .await?;

        Ok(count > 0)
    }
}

impl From<Model> for User {
    fn from(val: Model) -> Self {
        User::from(&val)
    }
}

impl From<&Model> for User {
    fn from(val: &Model) -> Self {
        User {
            id: val.id,
            name: val.name.clone(),
            email: val.email.clone(),
            has_avatar: val.avatar.is_some(),
            created_at: val.created_at,
            updated_at: val.updated_at,
        }
    }
}
