//! Models mapping to the `user_ask` database table. An inquiry left by a
//! visitor who wants to be contacted about a course.
use sqlx::{query_as, FromRow};
use time::PrimitiveDateTime;

use crate::{
    db::{errors::DatabaseError, ConnectionPool},
    utils::mobile::MobileNumber,
};

/// INSERT model for a `UserAsk`. Only constructible from validated input.
#[derive(Debug)]
pub struct UserAskInsert {
    /// The visitor's name.
    name: String,
    /// The visitor's mobile number.
    mobile: MobileNumber,
    /// The course the visitor is asking about.
    course_name: String,
}

/// A `UserAsk` which is stored in the database.
#[derive(FromRow, Debug)]
pub struct UserAsk {
    /// The inquiry's ID primary key.
    pub id: i64,
    /// The visitor's name.
    pub name: String,
    /// The visitor's mobile number.
    pub mobile: String,
    /// The course the visitor is asking about.
    pub course_name: String,
    /// When the inquiry was left.
    pub add_time: PrimitiveDateTime,
}

impl UserAskInsert {
    /// Construct a new `UserAsk` INSERT model.
    pub fn new(name: &str, mobile: MobileNumber, course_name: &str) -> Self {
        Self {
            name: name.to_owned(),
            mobile,
            course_name: course_name.to_owned(),
        }
    }
    /// The visitor's name.
    pub fn name(&self) -> &str {
        &self.name
    }
    /// The course being asked about.
    pub fn course_name(&self) -> &str {
        &self.course_name
    }
    /// Store this INSERT model in the database and return a complete `UserAsk` model.
    pub async fn store(self, db_client: &ConnectionPool) -> Result<UserAsk, DatabaseError> {
        Ok(query_as::<_, UserAsk>(
            "INSERT INTO user_ask (name, mobile, course_name) VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(self.name)
        .bind(String::from(self.mobile))
        .bind(self.course_name)
        .fetch_one(db_client)
        .await?)
    }
}
