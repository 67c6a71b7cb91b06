use crate::middlewares::v1::auth::Auth;
use crate::responses::v1::user::User;

pub async fn show(auth: Auth) -> User {
    auth.user.into()
}
