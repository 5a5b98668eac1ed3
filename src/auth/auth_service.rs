use crate::auth::{create_jwt, hash_password, verify_password};
use crate::error::Result;
use crate::user::user_models::User;
use crate::user::user_repository::UserRepository;

#[derive(Clone)]
pub struct AuthService {
    user_repo: UserRepository,
    jwt_secret: String,
    jwt_expiration_hours: i64,
}

impl AuthService {
    pub fn new(user_repo: UserRepository, jwt_secret: String, jwt_expiration_hours: i64) -> Self {
        Self {
            user_repo,
            jwt_secret,
            jwt_expiration_hours,
        }
    }

    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<(User, String)> {
        let password_hash = hash_password(password)?;

        let user = self.user_repo.create(username, email, &password_hash).await?;

        let token = create_jwt(user.id, &user.email, &self.jwt_secret, self.jwt_expiration_hours)?;

        Ok((user, token))
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<(User, String)> {
        let user = self
            .user_repo
            .find_by_email(email)
            .await?
            .ok_or_else(|| crate::error::AppError::Authentication("Invalid credentials".into()))?;

        if let Some(ref password_hash) = user.password_hash {
            if !verify_password(password, password_hash)? {
                return Err(crate::error::AppError::Authentication(
                    "Invalid credentials".into(),
                ));
            }
        } else {
            return Err(crate::error::AppError::Authentication(
                "Invalid credentials".into(),
            ));
        }

        let token = create_jwt(user.id, &user.email, &self.jwt_secret, self.jwt_expiration_hours)?;

        Ok((user, token))
    }

    pub async fn current_user(&self, user_id: uuid::Uuid) -> Result<User> {
        self.user_repo
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| crate::error::AppError::NotFound("User not found".into()))
    }
}
